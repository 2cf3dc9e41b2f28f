pub mod etl;
pub mod pipeline;

pub use crate::domain::model::{
    AggregateMode, CleanRecord, ExtractResult, LoadResult, OutputRow, RawRecord, RunReport,
    RunSummary, SkipCounts, SkippedFile, TransformResult,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
