pub mod cli;
pub mod toml_config;

use crate::domain::model::{AggregateMode, DEFAULT_TARGET_PRODUCT};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_path, Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(
    feature = "cli",
    command(name = "morsel-etl"),
    command(about = "Consolidate daily sales CSVs into a single cleaned file")
)]
pub struct CliConfig {
    /// Directory scanned (non-recursively) for .csv input files
    #[cfg_attr(feature = "cli", arg(long, default_value = "data"))]
    pub input_dir: String,

    /// Consolidated output file, overwritten on every run
    #[cfg_attr(feature = "cli", arg(long, default_value = "cleaned_sales.csv"))]
    pub output_path: String,

    /// Product name to keep; compared case- and whitespace-insensitively
    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_TARGET_PRODUCT))]
    pub target_product: String,

    /// How rows are combined before writing
    #[cfg_attr(
        feature = "cli",
        arg(long, value_enum, default_value_t = AggregateMode::DateRegion)
    )]
    pub aggregate: AggregateMode,

    /// Optional TOML configuration file; flags above are ignored when set
    #[cfg_attr(feature = "cli", arg(long))]
    pub config: Option<String>,

    /// Enable verbose output
    #[cfg_attr(feature = "cli", arg(long))]
    pub verbose: bool,

    /// Emit logs as JSON instead of the compact human format
    #[cfg_attr(feature = "cli", arg(long))]
    pub log_json: bool,

    /// Log system stats (memory, CPU) per pipeline phase
    #[cfg_attr(feature = "cli", arg(long))]
    pub monitor: bool,
}

impl ConfigProvider for CliConfig {
    fn input_dir(&self) -> &str {
        &self.input_dir
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn target_product(&self) -> &str {
        &self.target_product
    }

    fn aggregate_mode(&self) -> AggregateMode {
        self.aggregate
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input_dir", &self.input_dir)?;
        validate_path("output_path", &self.output_path)?;
        validate_file_extension("output_path", &self.output_path, "csv")?;
        validate_non_empty_string("target_product", &self.target_product)?;
        Ok(())
    }
}
