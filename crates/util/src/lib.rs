//! Shared helpers for the kdocs binaries: configuration loading, path
//! handling and terminal-width aware text trimming.

pub mod config;
pub mod path_processing;
pub mod text_processing;

pub use config::{CONFIG_PATH_ENV, ConfigError, SidebarConfig, default_config_path};
pub use path_processing::{expand_tilde, to_origin_relative};
pub use text_processing::truncate_to_width;
