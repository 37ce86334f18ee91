pub mod console_config;

pub use console_config::{load_env_file, ConfigOverrides, ConsoleConfig};
