use crate::domain::model::title_case;
use chrono::NaiveDate;
use std::path::Path;

/// One row of the consolidated sales file, as the chart consumes it.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRow {
    pub sales: f64,
    pub date: NaiveDate,
    pub region: String,
}

/// Immutable snapshot of `cleaned_sales.csv`. Loaded once and handed to the
/// chart component; never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct SalesDataset {
    rows: Vec<SalesRow>,
}

impl SalesDataset {
    pub fn new(rows: Vec<SalesRow>) -> Self {
        Self { rows }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Tolerant load: a missing file yields an empty dataset (the hosting
    /// app must still come up), and rows that fail to parse are dropped.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let data = match std::fs::read(&path) {
            Ok(data) => data,
            Err(e) => {
                tracing::debug!(
                    "Sales data file '{}' not readable ({}), starting empty",
                    path.as_ref().display(),
                    e
                );
                return Self::empty();
            }
        };
        Self::from_csv_bytes(&data)
    }

    pub fn from_csv_bytes(data: &[u8]) -> Self {
        let mut rdr = csv::Reader::from_reader(data);

        let headers = match rdr.headers() {
            Ok(headers) => headers.clone(),
            Err(_) => return Self::empty(),
        };
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let (Some(sales_col), Some(date_col), Some(region_col)) =
            (find("sales"), find("date"), find("region"))
        else {
            tracing::warn!("Sales data is missing Sales/Date/Region columns, starting empty");
            return Self::empty();
        };

        let mut rows = Vec::new();
        for record in rdr.records().flatten() {
            let Ok(sales) = record.get(sales_col).unwrap_or("").trim().parse::<f64>() else {
                continue;
            };
            let Ok(date) =
                NaiveDate::parse_from_str(record.get(date_col).unwrap_or("").trim(), "%Y-%m-%d")
            else {
                continue;
            };
            let region = title_case(record.get(region_col).unwrap_or(""));
            if region.is_empty() {
                continue;
            }
            rows.push(SalesRow {
                sales,
                date,
                region,
            });
        }

        Self { rows }
    }

    pub fn rows(&self) -> &[SalesRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
