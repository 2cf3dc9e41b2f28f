use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Product the pipeline filters for unless configuration says otherwise.
pub const DEFAULT_TARGET_PRODUCT: &str = "pink morsel";

/// One row as read from an input file. Field values are kept as raw strings;
/// parsing happens in the transform step so that a bad value can be counted
/// and skipped instead of failing the file.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub product: String,
    pub quantity: String,
    pub price: String,
    pub date: String,
    pub region: String,
}

/// A row that passed filtering and normalization. Invariant: `sales > 0`,
/// `region` is non-empty and title-cased, `date` parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanRecord {
    pub sales: f64,
    pub date: NaiveDate,
    pub region: String,
}

/// Serialized output schema: header is exactly `Sales,Date,Region`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRow {
    #[serde(rename = "Sales")]
    pub sales: f64,
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Region")]
    pub region: String,
}

/// How the writer combines clean records before serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum AggregateMode {
    /// One output row per clean record.
    Passthrough,
    /// Rows sharing (date, region) are summed into a single row.
    DateRegion,
}

impl Default for AggregateMode {
    fn default() -> Self {
        AggregateMode::DateRegion
    }
}

/// Per-row skip counters, one per rejection reason.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipCounts {
    pub malformed_row: u64,
    pub unparsable_price: u64,
    pub unparsable_quantity: u64,
    pub unparsable_date: u64,
    pub non_positive_sales: u64,
    pub missing_region: u64,
}

impl SkipCounts {
    pub fn total(&self) -> u64 {
        self.malformed_row
            + self.unparsable_price
            + self.unparsable_quantity
            + self.unparsable_date
            + self.non_positive_sales
            + self.missing_region
    }
}

/// An input file dropped from the run, with the columns it was missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedFile {
    pub file: String,
    pub missing_columns: Vec<String>,
}

/// Everything the ingestor produced in one pass over the input directory.
#[derive(Debug, Clone)]
pub struct ExtractResult {
    pub records: Vec<RawRecord>,
    pub files_read: usize,
    pub skipped_files: Vec<SkippedFile>,
    pub malformed_rows: u64,
}

/// Clean records plus the per-row accounting from the filter/normalizer.
#[derive(Debug, Clone)]
pub struct TransformResult {
    pub records: Vec<CleanRecord>,
    pub rows_seen: u64,
    pub rows_matched: u64,
    pub skipped: SkipCounts,
}

/// Where the writer put the output and how many rows it serialized.
#[derive(Debug, Clone)]
pub struct LoadResult {
    pub output_path: String,
    pub rows_written: u64,
}

/// Per-run accounting: what was read, what was dropped and why.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub files_read: usize,
    pub files_skipped: Vec<SkippedFile>,
    pub rows_seen: u64,
    pub rows_matched: u64,
    pub rows_written: u64,
    pub skipped_rows: SkipCounts,
}

impl RunReport {
    pub fn has_skips(&self) -> bool {
        !self.files_skipped.is_empty() || self.skipped_rows.total() > 0
    }
}

/// What `EtlEngine::run` hands back to the caller.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output_path: String,
    pub report: RunReport,
}

/// Trim and lowercase a product name for comparison against the target.
pub fn normalize_product(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Title-case a region so "north", "NORTH" and " North " all collapse to
/// "North". Interior runs of whitespace collapse to a single space.
pub fn title_case(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
