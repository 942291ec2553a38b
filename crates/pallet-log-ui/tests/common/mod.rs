use std::path::Path;

use egui_kittest::Harness;
use pallet_log_ui::{App, StartupArgs};
use tempfile::TempDir;

/// Startup args keeping config and data inside `dir`.
pub fn args_in(dir: &Path) -> StartupArgs {
    StartupArgs {
        config_path: Some(dir.join("pallet-log.json")),
        data_dir: Some(dir.join("data")),
        in_memory: false,
    }
}

/// Creates a harness for the app at 1024x768 with the given args.
pub fn create_harness_with(args: StartupArgs) -> Harness<'static, App> {
    Harness::builder()
        .with_size(egui::Vec2::new(1024.0, 768.0))
        .build_eframe(move |cc| App::new(cc, args))
}

/// Creates a standard test harness backed by a fresh temp directory.
///
/// Keep the returned `TempDir` alive for the duration of the test.
pub fn create_harness() -> (Harness<'static, App>, TempDir) {
    let dir = TempDir::new().expect("create temp dir");
    let harness = create_harness_with(args_in(dir.path()));
    (harness, dir)
}
