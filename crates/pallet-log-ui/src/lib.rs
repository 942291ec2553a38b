//! egui front end for the pallet delivery log.
pub mod app;
pub mod form;

pub use app::{App, StartupArgs, ThemeMode};
