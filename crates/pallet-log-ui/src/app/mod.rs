//! Top-level application tying together the entry form, the delivery list,
//! the history window and the status bar.

mod delivery_list;
mod entries;
mod entry_form;
mod header;
mod history_window;
mod shortcuts;
mod status_bar;
mod theme;

pub use theme::ThemeMode;

use std::path::PathBuf;

use eframe::egui;
use egui::Color32;

use pallet_log_config::{resolve_data_dir, AppConfig};
use pallet_log_core::{Journal, RedbStore};

use crate::form::{EntryForm, PalletEdit};

/// Label shown in the status bar when nothing is written to disk.
const IN_MEMORY_LABEL: &str = "In memory";

/// Arguments passed from the command line to the application.
#[derive(Debug, Clone, Default)]
pub struct StartupArgs {
    /// Config file to use instead of the one next to the executable.
    pub config_path: Option<PathBuf>,
    /// Data directory overriding the configured one.
    pub data_dir: Option<PathBuf>,
    /// Keep deliveries in memory only.
    pub in_memory: bool,
}

/// The main application state.
pub struct App {
    pub journal: Journal,
    pub suppliers: Vec<String>,
    pub form: EntryForm,
    pub theme_mode: ThemeMode,
    pub history_open: bool,
    pub editing: Option<PalletEdit>,
    /// Last error, shown in the status bar until the next successful action.
    pub status: Option<String>,
    pub(crate) storage_label: String,
    /// Whether a text field had keyboard focus during the last frame.
    pub(crate) text_focused: bool,
    accent_color: Color32,
    configured_data_dir: String,
    config_path: PathBuf,
}

impl App {
    /// Creates a new application instance.
    pub fn new(cc: &eframe::CreationContext<'_>, args: StartupArgs) -> Self {
        let config_path = args
            .config_path
            .clone()
            .unwrap_or_else(AppConfig::config_path);
        let app_config = AppConfig::load_or_create(&config_path);

        let theme_mode = ThemeMode::from_name(&app_config.current_theme);
        let dark_mode = theme_mode.is_dark();
        theme::apply_visuals(&cc.egui_ctx, dark_mode);

        let (journal, storage_label, status) = open_journal(&args, &app_config);

        Self {
            journal,
            form: EntryForm::new(app_config.initial_supplier()),
            suppliers: app_config.suppliers,
            theme_mode,
            history_open: false,
            editing: None,
            status,
            storage_label,
            text_focused: false,
            accent_color: theme::accent_color(dark_mode),
            configured_data_dir: app_config.data_dir,
            config_path,
        }
    }

    /// Switches to a new theme mode and applies it.
    pub fn set_theme_mode(&mut self, mode: ThemeMode, ctx: &egui::Context) {
        self.theme_mode = mode;
        let dark_mode = mode.is_dark();
        theme::apply_visuals(ctx, dark_mode);
        self.accent_color = theme::accent_color(dark_mode);
    }

    /// Preferences as they should be written back to the config file.
    fn current_config(&self) -> AppConfig {
        AppConfig {
            suppliers: self.suppliers.clone(),
            default_supplier: self.form.supplier.clone(),
            current_theme: self.theme_mode.name().to_string(),
            data_dir: self.configured_data_dir.clone(),
        }
    }
}

/// Opens the delivery journal, falling back to memory when the database
/// cannot be opened.
///
/// Returns the journal, a label describing where rows are kept and an
/// optional startup error for the status bar.
fn open_journal(args: &StartupArgs, config: &AppConfig) -> (Journal, String, Option<String>) {
    if args.in_memory {
        tracing::info!("Keeping deliveries in memory");
        return (Journal::in_memory(), IN_MEMORY_LABEL.to_string(), None);
    }

    let data_dir = args
        .data_dir
        .clone()
        .unwrap_or_else(|| resolve_data_dir(&config.data_dir));
    let opened = RedbStore::open(&data_dir).and_then(|store| Journal::open(Box::new(store)));
    match opened {
        Ok(journal) => (journal, data_dir.display().to_string(), None),
        Err(e) => {
            tracing::warn!("Failed to open delivery database, falling back to in-memory: {e:#}");
            (
                Journal::in_memory(),
                IN_MEMORY_LABEL.to_string(),
                Some(format!("Deliveries will not be saved: {e}")),
            )
        }
    }
}

/// The local calendar day new deliveries are logged against.
pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_global_shortcuts(ctx);
        self.text_focused = false;

        let panel_fill = ctx.style().visuals.panel_fill;
        let extreme_bg = ctx.style().visuals.extreme_bg_color;

        egui::TopBottomPanel::top("header")
            .frame(
                egui::Frame::new()
                    .fill(panel_fill)
                    .inner_margin(egui::Margin::symmetric(12, 8)),
            )
            .show(ctx, |ui| {
                self.show_header(ui);
            });

        egui::TopBottomPanel::bottom("status_bar")
            .max_height(24.0)
            .frame(
                egui::Frame::new()
                    .fill(extreme_bg)
                    .inner_margin(egui::Margin::symmetric(8, 3)),
            )
            .show(ctx, |ui| {
                self.show_status_bar(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_entry_form(ui);
            ui.add_space(12.0);
            self.show_delivery_list(ui);
        });

        self.show_history_window(ctx);
    }

    // eframe 0.34 calls the (deprecated) `update` before `ui` each frame;
    // all rendering lives in `update`, so `ui` has nothing extra to draw.
    fn ui(&mut self, _ui: &mut egui::Ui, _frame: &mut eframe::Frame) {}

    fn on_exit(&mut self) {
        if let Err(e) = self.current_config().save(&self.config_path) {
            tracing::warn!("Failed to save config on exit: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use chrono::NaiveDate;
    use pallet_log_core::{Delivery, DeliveryId, DeliveryStore, NewDelivery};

    /// Helper: create an App for unit-testing (no rendering needed).
    fn test_app() -> App {
        app_with_journal(Journal::in_memory())
    }

    fn app_with_journal(journal: Journal) -> App {
        App {
            journal,
            suppliers: vec!["Spark".to_string(), "Velvet".to_string()],
            form: EntryForm::new("Spark"),
            theme_mode: ThemeMode::Dark,
            history_open: false,
            editing: None,
            status: None,
            storage_label: IN_MEMORY_LABEL.to_string(),
            text_focused: false,
            accent_color: theme::accent_color(true),
            configured_data_dir: String::new(),
            config_path: PathBuf::from("pallet-log.json"),
        }
    }

    /// Store that accepts reads but fails every write.
    struct ReadOnlyStore;

    impl DeliveryStore for ReadOnlyStore {
        fn insert(&mut self, _: &Delivery) -> Result<()> {
            anyhow::bail!("database is read-only")
        }
        fn update(&mut self, _: &Delivery) -> Result<()> {
            anyhow::bail!("database is read-only")
        }
        fn delete(&mut self, _: &DeliveryId) -> Result<()> {
            anyhow::bail!("database is read-only")
        }
        fn list(&self) -> Result<Vec<Delivery>> {
            Ok(Vec::new())
        }
    }

    fn add(app: &mut App, supplier: &str, pallets: &str) {
        app.form.supplier = supplier.to_string();
        app.form.pallets_text = pallets.to_string();
        app.add_entry();
    }

    fn descriptions(app: &App) -> Vec<String> {
        app.journal
            .history()
            .list_history()
            .iter()
            .map(|s| s.description().to_string())
            .collect()
    }

    // -- Entry form --

    #[test]
    fn test_add_entry_records_today() {
        let mut app = test_app();
        add(&mut app, "Velvet", "4");

        let rows = app.journal.ledger().rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].supplier, "Velvet");
        assert_eq!(rows[0].pallets, 4);
        assert_eq!(rows[0].date, today());
        assert_eq!(descriptions(&app)[1], "Added: 4 pallets for Velvet");
    }

    #[test]
    fn test_add_entry_clears_pallets_keeps_supplier() {
        let mut app = test_app();
        add(&mut app, "Velvet", "4");
        assert!(app.form.pallets_text.is_empty());
        assert_eq!(app.form.supplier, "Velvet");
    }

    #[test]
    fn test_add_entry_ignores_incomplete_form() {
        let mut app = test_app();
        add(&mut app, "Spark", "0");
        add(&mut app, "Spark", "");
        assert!(app.journal.ledger().is_empty());
        assert_eq!(app.journal.history().len(), 1);
    }

    #[test]
    fn test_store_failure_is_reported_and_input_kept() {
        let journal = Journal::open(Box::new(ReadOnlyStore)).expect("open");
        let mut app = app_with_journal(journal);
        add(&mut app, "Spark", "3");

        assert!(app.journal.ledger().is_empty());
        assert_eq!(app.form.pallets_text, "3");
        let status = app.status.as_deref().expect("error shown");
        assert!(status.starts_with("Failed to add delivery"), "{status}");
    }

    #[test]
    fn test_success_clears_previous_error() {
        let mut app = test_app();
        app.status = Some("old error".to_string());
        add(&mut app, "Spark", "2");
        assert!(app.status.is_none());
    }

    // -- Inline editing --

    #[test]
    fn test_finish_edit_saves_new_value() {
        let mut app = test_app();
        add(&mut app, "Spark", "5");
        let id = app.journal.ledger().rows()[0].id.clone();

        app.start_edit(&id, 5);
        app.editing.as_mut().expect("editing").text = "9".to_string();
        app.finish_edit();

        assert!(app.editing.is_none());
        assert_eq!(app.journal.ledger().rows()[0].pallets, 9);
        assert_eq!(
            descriptions(&app).last().map(String::as_str),
            Some("Changed pallets for Spark from 5 to 9")
        );
    }

    #[test]
    fn test_finish_edit_invalid_resets() {
        let mut app = test_app();
        add(&mut app, "Spark", "5");
        let id = app.journal.ledger().rows()[0].id.clone();

        app.start_edit(&id, 5);
        app.editing.as_mut().expect("editing").text = "five".to_string();
        app.finish_edit();

        assert!(app.editing.is_none());
        assert_eq!(app.journal.ledger().rows()[0].pallets, 5);
        assert_eq!(app.journal.history().len(), 2);
    }

    #[test]
    fn test_finish_edit_same_value_records_nothing() {
        let mut app = test_app();
        add(&mut app, "Spark", "5");
        let id = app.journal.ledger().rows()[0].id.clone();

        app.start_edit(&id, 5);
        app.finish_edit();
        assert_eq!(app.journal.history().len(), 2);
    }

    #[test]
    fn test_cancel_edit() {
        let mut app = test_app();
        add(&mut app, "Spark", "5");
        let id = app.journal.ledger().rows()[0].id.clone();

        app.start_edit(&id, 5);
        app.editing.as_mut().expect("editing").text = "1".to_string();
        app.cancel_edit();
        assert!(app.editing.is_none());
        assert_eq!(app.journal.ledger().rows()[0].pallets, 5);
    }

    // -- Delete, revert, undo --

    #[test]
    fn test_delete_entry() {
        let mut app = test_app();
        add(&mut app, "Velvet", "2");
        let id = app.journal.ledger().rows()[0].id.clone();

        app.delete_entry(&id);
        assert!(app.journal.ledger().is_empty());
        assert_eq!(
            descriptions(&app).last().map(String::as_str),
            Some("Deleted: 2 pallets from Velvet")
        );
    }

    #[test]
    fn test_delete_entry_drops_its_edit() {
        let mut app = test_app();
        add(&mut app, "Velvet", "2");
        let id = app.journal.ledger().rows()[0].id.clone();

        app.start_edit(&id, 2);
        app.delete_entry(&id);
        assert!(app.editing.is_none());
    }

    #[test]
    fn test_delete_entry_saves_edit_of_other_row() {
        let mut app = test_app();
        add(&mut app, "Spark", "6");
        add(&mut app, "Velvet", "2");
        let velvet = app.journal.ledger().rows()[0].id.clone();
        let spark = app.journal.ledger().rows()[1].id.clone();

        app.start_edit(&velvet, 2);
        app.editing.as_mut().expect("editing").text = "8".to_string();
        app.delete_entry(&spark);

        assert!(app.editing.is_none());
        let rows = app.journal.ledger().rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].pallets, 8);
        assert_eq!(
            descriptions(&app)[3..],
            [
                "Changed pallets for Velvet from 2 to 8",
                "Deleted: 6 pallets from Spark"
            ]
        );
    }

    #[test]
    fn test_revert_action_newest_row_undoes_last() {
        let mut app = test_app();
        add(&mut app, "Spark", "1");
        add(&mut app, "Velvet", "2");
        app.history_open = true;

        app.revert_action(0);

        let rows = app.journal.ledger().rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].supplier, "Spark");
        assert_eq!(app.journal.history().len(), 2);
        assert!(!app.history_open);
    }

    #[test]
    fn test_revert_action_oldest_row_restores_initial() {
        let mut app = test_app();
        add(&mut app, "Spark", "1");
        add(&mut app, "Velvet", "2");

        app.revert_action(1);
        assert!(app.journal.ledger().is_empty());
        assert_eq!(app.journal.history().len(), 1);
    }

    #[test]
    fn test_revert_action_out_of_range_reports() {
        let mut app = test_app();
        add(&mut app, "Spark", "1");
        app.history_open = true;

        app.revert_action(3);

        assert_eq!(app.journal.ledger().len(), 1);
        assert!(app.status.is_some());
        assert!(app.history_open);
    }

    #[test]
    fn test_undo_last() {
        let mut app = test_app();
        add(&mut app, "Spark", "1");
        app.undo_last();
        assert!(app.journal.ledger().is_empty());

        // Nothing left to undo
        app.undo_last();
        assert!(app.status.is_none());
        assert_eq!(app.journal.history().len(), 1);
    }

    #[test]
    fn test_preloaded_rows_are_initial_state() {
        let row = NewDelivery {
            supplier: "Daily".to_string(),
            pallets: 6,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        }
        .into_delivery()
        .expect("valid");
        let store = pallet_log_core::MemoryStore::with_rows(vec![row]);
        let mut app = app_with_journal(Journal::open(Box::new(store)).expect("open"));

        app.undo_last();
        assert_eq!(app.journal.ledger().len(), 1);
        assert_eq!(app.journal.ledger().grand_total(), 6);
    }

    // -- Config --

    #[test]
    fn test_current_config_remembers_supplier_and_theme() {
        let mut app = test_app();
        app.form.supplier = "Velvet".to_string();
        app.theme_mode = ThemeMode::Light;
        app.configured_data_dir = "/srv/pallets".to_string();

        let config = app.current_config();
        assert_eq!(config.default_supplier, "Velvet");
        assert_eq!(config.current_theme, "Light");
        assert_eq!(config.data_dir, "/srv/pallets");
        assert_eq!(config.suppliers, vec!["Spark", "Velvet"]);
    }

    #[test]
    fn test_open_journal_in_memory() {
        let args = StartupArgs {
            in_memory: true,
            ..StartupArgs::default()
        };
        let (journal, label, status) = open_journal(&args, &AppConfig::default());
        assert!(journal.ledger().is_empty());
        assert_eq!(label, IN_MEMORY_LABEL);
        assert!(status.is_none());
    }

    #[test]
    fn test_open_journal_uses_data_dir() {
        let dir = tempfile::TempDir::new().expect("create temp dir");
        let args = StartupArgs {
            data_dir: Some(dir.path().to_path_buf()),
            ..StartupArgs::default()
        };
        let (_journal, label, status) = open_journal(&args, &AppConfig::default());
        assert_eq!(label, dir.path().display().to_string());
        assert!(status.is_none());
        assert!(dir.path().join("deliveries.redb").exists());
    }

    #[test]
    fn test_open_journal_falls_back_to_memory() {
        let dir = tempfile::TempDir::new().expect("create temp dir");
        // A file where the data directory should be.
        let blocked = dir.path().join("blocked");
        std::fs::write(&blocked, "not a directory").expect("write");
        let args = StartupArgs {
            data_dir: Some(blocked),
            ..StartupArgs::default()
        };
        let (journal, label, status) = open_journal(&args, &AppConfig::default());
        assert!(journal.ledger().is_empty());
        assert_eq!(label, IN_MEMORY_LABEL);
        assert!(status.is_some());
    }
}
