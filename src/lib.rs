pub mod chart;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::cli::LocalStorage;
pub use config::toml_config::TomlConfig;
pub use config::CliConfig;
pub use core::{etl::EtlEngine, pipeline::SalesPipeline};
pub use utils::error::{EtlError, Result};
