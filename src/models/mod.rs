pub mod config;

pub use config::{AppConfig, Defaults, CONFIG_ENV};
