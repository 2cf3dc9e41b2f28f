use crate::domain::model::{RunReport, RunSummary};
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(false),
        }
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("Starting ETL process");

        tracing::info!("Extracting data...");
        let extracted = self.pipeline.extract().await?;
        tracing::info!(
            "Extracted {} rows from {} files",
            extracted.records.len(),
            extracted.files_read
        );
        self.monitor.log_stats("Extract");

        let files_read = extracted.files_read;
        let files_skipped = extracted.skipped_files.clone();
        let malformed_rows = extracted.malformed_rows;

        tracing::info!("Transforming data...");
        let transformed = self.pipeline.transform(extracted.records).await?;
        tracing::info!(
            "Kept {} of {} rows",
            transformed.records.len(),
            transformed.rows_seen
        );
        self.monitor.log_stats("Transform");

        let rows_seen = transformed.rows_seen;
        let rows_matched = transformed.rows_matched;
        let mut skipped_rows = transformed.skipped.clone();
        skipped_rows.malformed_row += malformed_rows;

        tracing::info!("Loading data...");
        let loaded = self.pipeline.load(transformed).await?;
        tracing::info!("Wrote {} rows to {}", loaded.rows_written, loaded.output_path);
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        let report = RunReport {
            files_read,
            files_skipped,
            rows_seen,
            rows_matched,
            rows_written: loaded.rows_written,
            skipped_rows,
        };

        if report.has_skips() {
            tracing::warn!(
                "Run completed with {} skipped rows and {} skipped files",
                report.skipped_rows.total(),
                report.files_skipped.len()
            );
        }

        Ok(RunSummary {
            output_path: loaded.output_path,
            report,
        })
    }
}
