//! Config module.
//! Provides configuration types, default paths, and XML load/save.
//! The config is read once at startup and written back at shutdown.

pub mod paths;
pub mod types;
pub mod xml;

pub use paths::{
    CONFIG_ENV, app_data_dir, default_config_path, default_history_path, default_log_path,
    path_has_symlink_ancestor,
};
pub use types::{Config, LogLevel, WindowGeometry};
pub use xml::{load_config, load_config_from_xml_path, save_config_to_xml_path};

/// Directory name used under the platform config/data dirs.
pub const APP_DIR_NAME: &str = "folder_levelup";
