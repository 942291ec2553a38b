pub mod config;
pub mod paths;

pub use config::{AppConfig, DEFAULT_SUPPLIERS};
pub use paths::resolve_data_dir;
