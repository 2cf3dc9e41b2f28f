use crate::domain::model::{
    normalize_product, title_case, AggregateMode, CleanRecord, ExtractResult, LoadResult,
    OutputRow, RawRecord, SkipCounts, SkippedFile, TransformResult,
};
use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
use crate::utils::error::{EtlError, Result};
use chrono::NaiveDate;
use regex::Regex;
use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};
use std::io::Cursor;
use std::path::Path;

const REQUIRED_COLUMNS: [&str; 5] = ["product", "quantity", "price", "date", "region"];
const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct SalesPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> SalesPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    /// Parse one file into raw records. Fails with a schema error when the
    /// header lacks required columns; malformed rows are counted, not fatal.
    fn read_records(
        file: &str,
        data: &[u8],
        out: &mut Vec<RawRecord>,
        malformed_rows: &mut u64,
    ) -> Result<()> {
        let mut rdr = csv::Reader::from_reader(Cursor::new(data));
        let headers = rdr.headers()?.clone();
        let columns = Columns::resolve(&headers).map_err(|missing| EtlError::SchemaError {
            file: file.to_string(),
            missing,
        })?;

        for row in rdr.records() {
            match row {
                Ok(record) => out.push(RawRecord {
                    product: record.get(columns.product).unwrap_or("").to_string(),
                    quantity: record.get(columns.quantity).unwrap_or("").to_string(),
                    price: record.get(columns.price).unwrap_or("").to_string(),
                    date: record.get(columns.date).unwrap_or("").to_string(),
                    region: record.get(columns.region).unwrap_or("").to_string(),
                }),
                Err(e) => {
                    tracing::warn!("Malformed row in '{}': {}", file, e);
                    *malformed_rows += 1;
                }
            }
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for SalesPipeline<S, C> {
    async fn extract(&self) -> Result<ExtractResult> {
        let dir = self.config.input_dir();
        let csv_files = csv_file_names(&self.storage, dir).await?;

        tracing::debug!("Found {} CSV files in '{}'", csv_files.len(), dir);

        let mut records = Vec::new();
        let mut skipped_files = Vec::new();
        let mut malformed_rows = 0u64;
        let mut files_read = 0usize;

        for name in &csv_files {
            let path = format!("{}/{}", dir, name);
            let data = self.storage.read_file(&path).await?;

            match Self::read_records(&path, &data, &mut records, &mut malformed_rows) {
                Ok(()) => files_read += 1,
                Err(EtlError::SchemaError { file, missing }) => {
                    tracing::warn!(
                        "Skipping '{}': missing required columns {}",
                        file,
                        missing.join(", ")
                    );
                    skipped_files.push(SkippedFile {
                        file,
                        missing_columns: missing,
                    });
                }
                Err(e) => return Err(e),
            }
        }

        Ok(ExtractResult {
            records,
            files_read,
            skipped_files,
            malformed_rows,
        })
    }

    async fn transform(&self, data: Vec<RawRecord>) -> Result<TransformResult> {
        let target = normalize_product(self.config.target_product());
        let price_symbols = Regex::new(r"[$,]").unwrap();

        let mut records = Vec::new();
        let mut skipped = SkipCounts::default();
        let mut rows_seen = 0u64;
        let mut rows_matched = 0u64;

        for raw in data {
            rows_seen += 1;

            if normalize_product(&raw.product) != target {
                continue;
            }
            rows_matched += 1;

            let price = match price_symbols
                .replace_all(raw.price.trim(), "")
                .parse::<f64>()
            {
                Ok(price) => price,
                Err(_) => {
                    tracing::warn!("Skipping row: unparsable price '{}'", raw.price);
                    skipped.unparsable_price += 1;
                    continue;
                }
            };

            let quantity = match raw.quantity.trim().parse::<f64>() {
                Ok(quantity) => quantity,
                Err(_) => {
                    tracing::warn!("Skipping row: unparsable quantity '{}'", raw.quantity);
                    skipped.unparsable_quantity += 1;
                    continue;
                }
            };

            let date = match NaiveDate::parse_from_str(raw.date.trim(), DATE_FORMAT) {
                Ok(date) => date,
                Err(_) => {
                    tracing::warn!("Skipping row: unparsable date '{}'", raw.date);
                    skipped.unparsable_date += 1;
                    continue;
                }
            };

            let region = title_case(&raw.region);
            if region.is_empty() {
                tracing::warn!("Skipping row: empty region on {}", date);
                skipped.missing_region += 1;
                continue;
            }

            let sales = quantity * price;
            if !(sales > 0.0) {
                tracing::warn!("Skipping row: non-positive sales {} on {}", sales, date);
                skipped.non_positive_sales += 1;
                continue;
            }

            records.push(CleanRecord {
                sales,
                date,
                region,
            });
        }

        if records.is_empty() {
            return Err(EtlError::NoMatchesError {
                product: self.config.target_product().to_string(),
            });
        }

        Ok(TransformResult {
            records,
            rows_seen,
            rows_matched,
            skipped,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<LoadResult> {
        let output_path = self.config.output_path().to_string();

        let mut rows = match self.config.aggregate_mode() {
            AggregateMode::Passthrough => result
                .records
                .into_iter()
                .map(|rec| OutputRow {
                    sales: rec.sales,
                    date: rec.date,
                    region: rec.region,
                })
                .collect(),
            AggregateMode::DateRegion => aggregate_date_region(result.records),
        };

        // Stable sort: rows on the same date keep their insertion order.
        rows.sort_by_key(|row| row.date);

        let mut wtr = csv::Writer::from_writer(Vec::new());
        for row in &rows {
            wtr.serialize(row)?;
        }
        let data = wtr.into_inner().map_err(|e| EtlError::WriteError {
            path: output_path.clone(),
            reason: e.to_string(),
        })?;

        self.storage
            .write_file(&output_path, &data)
            .await
            .map_err(|e| EtlError::WriteError {
                path: output_path.clone(),
                reason: e.to_string(),
            })?;

        Ok(LoadResult {
            output_path,
            rows_written: rows.len() as u64,
        })
    }
}

struct Columns {
    product: usize,
    quantity: usize,
    price: usize,
    date: usize,
    region: usize,
}

impl Columns {
    /// Resolve required columns case-insensitively, in any order. On
    /// duplicate headers the first occurrence wins.
    fn resolve(headers: &csv::StringRecord) -> std::result::Result<Self, Vec<String>> {
        let mut index: HashMap<String, usize> = HashMap::new();
        for (i, name) in headers.iter().enumerate() {
            index.entry(name.trim().to_lowercase()).or_insert(i);
        }

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| !index.contains_key(**name))
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(missing);
        }

        Ok(Columns {
            product: index["product"],
            quantity: index["quantity"],
            price: index["price"],
            date: index["date"],
            region: index["region"],
        })
    }
}

/// Sum sales for rows sharing (date, region), keeping first-seen order.
fn aggregate_date_region(records: Vec<CleanRecord>) -> Vec<OutputRow> {
    let mut rows: Vec<OutputRow> = Vec::new();
    let mut index: HashMap<(NaiveDate, String), usize> = HashMap::new();

    for rec in records {
        match index.entry((rec.date, rec.region.clone())) {
            Entry::Occupied(entry) => rows[*entry.get()].sales += rec.sales,
            Entry::Vacant(entry) => {
                entry.insert(rows.len());
                rows.push(OutputRow {
                    sales: rec.sales,
                    date: rec.date,
                    region: rec.region,
                });
            }
        }
    }

    rows
}

/// Enumerate `.csv` files (non-recursive, lexicographic order) in `dir`.
/// A missing or empty directory is a no-input failure.
async fn csv_file_names<S: Storage>(storage: &S, dir: &str) -> Result<Vec<String>> {
    let names = match storage.list_files(dir).await {
        Ok(names) => names,
        Err(EtlError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(EtlError::NoInputError {
                dir: dir.to_string(),
            })
        }
        Err(e) => return Err(e),
    };

    let mut csv_files: Vec<String> = names
        .into_iter()
        .filter(|name| {
            Path::new(name)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        })
        .collect();
    csv_files.sort();

    if csv_files.is_empty() {
        return Err(EtlError::NoInputError {
            dir: dir.to_string(),
        });
    }

    Ok(csv_files)
}

/// Collect the distinct trimmed product names across all input files. Files
/// without a `product` column are skipped with a warning.
pub async fn scan_products<S: Storage>(storage: &S, input_dir: &str) -> Result<Vec<String>> {
    let csv_files = csv_file_names(storage, input_dir).await?;

    let mut products = BTreeSet::new();
    for name in &csv_files {
        let path = format!("{}/{}", input_dir, name);
        let data = storage.read_file(&path).await?;

        let mut rdr = csv::Reader::from_reader(Cursor::new(data.as_slice()));
        let headers = rdr.headers()?.clone();
        let product_col = headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case("product"));

        let Some(product_col) = product_col else {
            tracing::warn!("Skipping '{}': no product column", path);
            continue;
        };

        for row in rdr.records() {
            let Ok(record) = row else { continue };
            let product = record.get(product_col).unwrap_or("").trim();
            if !product.is_empty() {
                products.insert(product.to_string());
            }
        }
    }

    Ok(products.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn put(&self, path: &str, data: &str) {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.as_bytes().to_vec());
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn list_files(&self, dir: &str) -> Result<Vec<String>> {
            let files = self.files.lock().await;
            let prefix = format!("{}/", dir);
            Ok(files
                .keys()
                .filter_map(|key| key.strip_prefix(&prefix))
                .filter(|rest| !rest.contains('/'))
                .map(|rest| rest.to_string())
                .collect())
        }

        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                EtlError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        input_dir: String,
        output_path: String,
        target_product: String,
        aggregate: AggregateMode,
    }

    impl MockConfig {
        fn new() -> Self {
            Self {
                input_dir: "data".to_string(),
                output_path: "cleaned_sales.csv".to_string(),
                target_product: "pink morsel".to_string(),
                aggregate: AggregateMode::DateRegion,
            }
        }

        fn passthrough() -> Self {
            Self {
                aggregate: AggregateMode::Passthrough,
                ..Self::new()
            }
        }
    }

    impl ConfigProvider for MockConfig {
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

    fn raw(product: &str, quantity: &str, price: &str, date: &str, region: &str) -> RawRecord {
        RawRecord {
            product: product.to_string(),
            quantity: quantity.to_string(),
            price: price.to_string(),
            date: date.to_string(),
            region: region.to_string(),
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[tokio::test]
    async fn test_extract_reads_files_in_lexicographic_order() {
        let storage = MockStorage::new();
        storage
            .put(
                "data/b.csv",
                "product,quantity,price,date,region\npink morsel,1,$1.00,2021-01-02,north\n",
            )
            .await;
        storage
            .put(
                "data/a.csv",
                "product,quantity,price,date,region\npink morsel,1,$1.00,2021-01-01,south\n",
            )
            .await;

        let pipeline = SalesPipeline::new(storage, MockConfig::new());
        let result = pipeline.extract().await.unwrap();

        assert_eq!(result.files_read, 2);
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[0].date, "2021-01-01");
        assert_eq!(result.records[1].date, "2021-01-02");
    }

    #[tokio::test]
    async fn test_extract_resolves_columns_case_insensitively_any_order() {
        let storage = MockStorage::new();
        storage
            .put(
                "data/odd.csv",
                "Region,DATE,Price,Quantity,Product\nnorth,2021-01-01,$2.00,5,pink morsel\n",
            )
            .await;

        let pipeline = SalesPipeline::new(storage, MockConfig::new());
        let result = pipeline.extract().await.unwrap();

        assert_eq!(result.records.len(), 1);
        let record = &result.records[0];
        assert_eq!(record.product, "pink morsel");
        assert_eq!(record.quantity, "5");
        assert_eq!(record.price, "$2.00");
        assert_eq!(record.region, "north");
    }

    #[tokio::test]
    async fn test_extract_skips_file_missing_columns() {
        let storage = MockStorage::new();
        storage
            .put(
                "data/good.csv",
                "product,quantity,price,date,region\npink morsel,1,$1.00,2021-01-01,north\n",
            )
            .await;
        storage
            .put("data/bad.csv", "product,quantity\npink morsel,1\n")
            .await;

        let pipeline = SalesPipeline::new(storage, MockConfig::new());
        let result = pipeline.extract().await.unwrap();

        assert_eq!(result.files_read, 1);
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.skipped_files.len(), 1);
        assert_eq!(result.skipped_files[0].file, "data/bad.csv");
        assert_eq!(
            result.skipped_files[0].missing_columns,
            vec!["price".to_string(), "date".to_string(), "region".to_string()]
        );
    }

    #[tokio::test]
    async fn test_extract_ignores_non_csv_files() {
        let storage = MockStorage::new();
        storage
            .put(
                "data/jan.csv",
                "product,quantity,price,date,region\npink morsel,1,$1.00,2021-01-01,north\n",
            )
            .await;
        storage.put("data/notes.txt", "not a csv").await;

        let pipeline = SalesPipeline::new(storage, MockConfig::new());
        let result = pipeline.extract().await.unwrap();

        assert_eq!(result.files_read, 1);
        assert_eq!(result.records.len(), 1);
    }

    #[tokio::test]
    async fn test_extract_fails_without_csv_files() {
        let storage = MockStorage::new();
        storage.put("data/readme.md", "nothing here").await;

        let pipeline = SalesPipeline::new(storage, MockConfig::new());
        let err = pipeline.extract().await.unwrap_err();

        assert!(matches!(err, EtlError::NoInputError { dir } if dir == "data"));
    }

    #[tokio::test]
    async fn test_extract_counts_malformed_rows() {
        let storage = MockStorage::new();
        storage
            .put(
                "data/jan.csv",
                "product,quantity,price,date,region\n\
                 pink morsel,1,$1.00,2021-01-01,north\n\
                 pink morsel,oops\n\
                 pink morsel,2,$1.00,2021-01-02,south\n",
            )
            .await;

        let pipeline = SalesPipeline::new(storage, MockConfig::new());
        let result = pipeline.extract().await.unwrap();

        assert_eq!(result.malformed_rows, 1);
        assert_eq!(result.records.len(), 2);
    }

    #[tokio::test]
    async fn test_transform_filters_non_matching_products() {
        let pipeline = SalesPipeline::new(MockStorage::new(), MockConfig::new());
        let input = vec![
            raw("Pink Morsel", "5", "$2.00", "2021-01-10", "north"),
            raw("  PINK MORSEL  ", "2", "$3.00", "2021-01-11", "south"),
            raw("Other", "9", "$1", "2021-01-10", "north"),
            raw("pink morselx", "1", "$1", "2021-01-10", "north"),
        ];

        let result = pipeline.transform(input).await.unwrap();

        assert_eq!(result.rows_seen, 4);
        assert_eq!(result.rows_matched, 2);
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[0].sales, 10.0);
        assert_eq!(result.records[1].sales, 6.0);
    }

    #[tokio::test]
    async fn test_transform_cleans_price_strings() {
        let pipeline = SalesPipeline::new(MockStorage::new(), MockConfig::new());
        let input = vec![
            raw("pink morsel", "2", "$1,000.50", "2021-01-10", "north"),
            raw("pink morsel", "3", " $2.00 ", "2021-01-10", "south"),
        ];

        let result = pipeline.transform(input).await.unwrap();

        assert_eq!(result.records[0].sales, 2001.0);
        assert_eq!(result.records[1].sales, 6.0);
    }

    #[tokio::test]
    async fn test_transform_normalizes_regions() {
        let pipeline = SalesPipeline::new(MockStorage::new(), MockConfig::new());
        let input = vec![
            raw("pink morsel", "1", "$1.00", "2021-01-10", "north"),
            raw("pink morsel", "1", "$1.00", "2021-01-10", "NORTH"),
            raw("pink morsel", "1", "$1.00", "2021-01-10", " North "),
        ];

        let result = pipeline.transform(input).await.unwrap();

        assert!(result.records.iter().all(|r| r.region == "North"));
    }

    #[tokio::test]
    async fn test_transform_skips_bad_rows_with_reasons() {
        let pipeline = SalesPipeline::new(MockStorage::new(), MockConfig::new());
        let input = vec![
            raw("pink morsel", "5", "$2.00", "2021-01-10", "north"),
            raw("pink morsel", "5", "two dollars", "2021-01-10", "north"),
            raw("pink morsel", "many", "$2.00", "2021-01-10", "north"),
            raw("pink morsel", "5", "$2.00", "not-a-date", "north"),
            raw("pink morsel", "0", "$2.00", "2021-01-10", "north"),
            raw("pink morsel", "-1", "$2.00", "2021-01-10", "north"),
            raw("pink morsel", "5", "$2.00", "2021-01-10", "  "),
        ];

        let result = pipeline.transform(input).await.unwrap();

        assert_eq!(result.records.len(), 1);
        assert_eq!(result.skipped.unparsable_price, 1);
        assert_eq!(result.skipped.unparsable_quantity, 1);
        assert_eq!(result.skipped.unparsable_date, 1);
        assert_eq!(result.skipped.non_positive_sales, 2);
        assert_eq!(result.skipped.missing_region, 1);
        assert_eq!(result.skipped.total(), 6);
    }

    #[tokio::test]
    async fn test_transform_fails_when_nothing_matches() {
        let pipeline = SalesPipeline::new(MockStorage::new(), MockConfig::new());
        let input = vec![raw("Other", "5", "$2.00", "2021-01-10", "north")];

        let err = pipeline.transform(input).await.unwrap_err();

        assert!(matches!(err, EtlError::NoMatchesError { product } if product == "pink morsel"));
    }

    #[tokio::test]
    async fn test_transform_respects_configured_target() {
        let config = MockConfig {
            target_product: "Blue Morsel".to_string(),
            ..MockConfig::new()
        };
        let pipeline = SalesPipeline::new(MockStorage::new(), config);
        let input = vec![
            raw("blue morsel", "2", "$4.00", "2021-01-10", "east"),
            raw("pink morsel", "5", "$2.00", "2021-01-10", "north"),
        ];

        let result = pipeline.transform(input).await.unwrap();

        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].sales, 8.0);
    }

    #[tokio::test]
    async fn test_load_aggregates_by_date_and_region() {
        let storage = MockStorage::new();
        let pipeline = SalesPipeline::new(storage.clone(), MockConfig::new());

        let records = vec![
            CleanRecord {
                sales: 10.0,
                date: date("2021-01-10"),
                region: "North".to_string(),
            },
            CleanRecord {
                sales: 15.0,
                date: date("2021-01-10"),
                region: "North".to_string(),
            },
            CleanRecord {
                sales: 7.0,
                date: date("2021-01-10"),
                region: "South".to_string(),
            },
        ];
        let result = TransformResult {
            records,
            rows_seen: 3,
            rows_matched: 3,
            skipped: SkipCounts::default(),
        };

        let loaded = pipeline.load(result).await.unwrap();
        assert_eq!(loaded.rows_written, 2);

        let data = storage.get_file("cleaned_sales.csv").await.unwrap();
        let content = String::from_utf8(data).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "Sales,Date,Region");
        assert_eq!(lines[1], "25.0,2021-01-10,North");
        assert_eq!(lines[2], "7.0,2021-01-10,South");
    }

    #[tokio::test]
    async fn test_load_passthrough_keeps_every_record() {
        let storage = MockStorage::new();
        let pipeline = SalesPipeline::new(storage.clone(), MockConfig::passthrough());

        let records = vec![
            CleanRecord {
                sales: 10.0,
                date: date("2021-01-10"),
                region: "North".to_string(),
            },
            CleanRecord {
                sales: 15.0,
                date: date("2021-01-10"),
                region: "North".to_string(),
            },
        ];
        let result = TransformResult {
            records,
            rows_seen: 2,
            rows_matched: 2,
            skipped: SkipCounts::default(),
        };

        let loaded = pipeline.load(result).await.unwrap();
        assert_eq!(loaded.rows_written, 2);

        let data = storage.get_file("cleaned_sales.csv").await.unwrap();
        let content = String::from_utf8(data).unwrap();
        assert_eq!(content.lines().count(), 3);
    }

    #[tokio::test]
    async fn test_load_sorts_ascending_by_date() {
        let storage = MockStorage::new();
        let pipeline = SalesPipeline::new(storage.clone(), MockConfig::new());

        let records = vec![
            CleanRecord {
                sales: 3.0,
                date: date("2021-03-01"),
                region: "North".to_string(),
            },
            CleanRecord {
                sales: 1.0,
                date: date("2021-01-01"),
                region: "North".to_string(),
            },
            CleanRecord {
                sales: 2.0,
                date: date("2021-02-01"),
                region: "North".to_string(),
            },
        ];
        let result = TransformResult {
            records,
            rows_seen: 3,
            rows_matched: 3,
            skipped: SkipCounts::default(),
        };

        pipeline.load(result).await.unwrap();

        let data = storage.get_file("cleaned_sales.csv").await.unwrap();
        let content = String::from_utf8(data).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[1], "1.0,2021-01-01,North");
        assert_eq!(lines[2], "2.0,2021-02-01,North");
        assert_eq!(lines[3], "3.0,2021-03-01,North");
    }

    #[tokio::test]
    async fn test_load_keeps_insertion_order_within_a_date() {
        let storage = MockStorage::new();
        let pipeline = SalesPipeline::new(storage.clone(), MockConfig::new());

        let records = vec![
            CleanRecord {
                sales: 1.0,
                date: date("2021-01-10"),
                region: "West".to_string(),
            },
            CleanRecord {
                sales: 2.0,
                date: date("2021-01-10"),
                region: "East".to_string(),
            },
        ];
        let result = TransformResult {
            records,
            rows_seen: 2,
            rows_matched: 2,
            skipped: SkipCounts::default(),
        };

        pipeline.load(result).await.unwrap();

        let data = storage.get_file("cleaned_sales.csv").await.unwrap();
        let content = String::from_utf8(data).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[1], "1.0,2021-01-10,West");
        assert_eq!(lines[2], "2.0,2021-01-10,East");
    }

    #[tokio::test]
    async fn test_full_pipeline_matches_expected_output() {
        let storage = MockStorage::new();
        storage
            .put(
                "data/jan.csv",
                "product,quantity,price,date,region\n\
                 Pink Morsel,5,$2.00,2021-01-10,north\n\
                 Other,9,$1,2021-01-10,north\n",
            )
            .await;

        let pipeline = SalesPipeline::new(storage.clone(), MockConfig::new());

        let extracted = pipeline.extract().await.unwrap();
        let transformed = pipeline.transform(extracted.records).await.unwrap();
        let loaded = pipeline.load(transformed).await.unwrap();

        assert_eq!(loaded.rows_written, 1);

        let data = storage.get_file("cleaned_sales.csv").await.unwrap();
        let content = String::from_utf8(data).unwrap();
        assert_eq!(content, "Sales,Date,Region\n10.0,2021-01-10,North\n");
    }

    #[tokio::test]
    async fn test_scan_products_collects_distinct_names() {
        let storage = MockStorage::new();
        storage
            .put(
                "data/jan.csv",
                "product,quantity,price,date,region\n\
                 Pink Morsel,5,$2.00,2021-01-10,north\n\
                 Gold Morsel,1,$5.00,2021-01-10,north\n",
            )
            .await;
        storage
            .put(
                "data/feb.csv",
                "product,quantity,price,date,region\nPink Morsel,2,$2.00,2021-02-01,south\n",
            )
            .await;

        let products = scan_products(&storage, "data").await.unwrap();

        assert_eq!(
            products,
            vec!["Gold Morsel".to_string(), "Pink Morsel".to_string()]
        );
    }

    #[tokio::test]
    async fn test_scan_products_skips_files_without_product_column() {
        let storage = MockStorage::new();
        storage
            .put(
                "data/jan.csv",
                "product,quantity,price,date,region\nPink Morsel,5,$2.00,2021-01-10,north\n",
            )
            .await;
        storage.put("data/other.csv", "sku,amount\nX1,3\n").await;

        let products = scan_products(&storage, "data").await.unwrap();

        assert_eq!(products, vec!["Pink Morsel".to_string()]);
    }
}
