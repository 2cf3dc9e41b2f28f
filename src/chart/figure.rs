use super::dataset::SalesDataset;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The price increase the chart marks as a before/after boundary.
pub fn price_change_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 1, 15).expect("static date")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    All,
    North,
    East,
    South,
    West,
}

impl Region {
    /// Case-insensitive parse; anything unrecognized falls back to `All`
    /// because a render request must never fail.
    pub fn from_input(raw: &str) -> Region {
        match raw.trim().to_lowercase().as_str() {
            "north" => Region::North,
            "east" => Region::East,
            "south" => Region::South,
            "west" => Region::West,
            _ => Region::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Region::All => "All",
            Region::North => "North",
            Region::East => "East",
            Region::South => "South",
            Region::West => "West",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub date: NaiveDate,
    pub sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub date: NaiveDate,
    pub label: String,
}

/// A renderable line-chart description. This is the whole contract with the
/// hosting UI: one daily-total series, an optional price-change marker, and
/// a placeholder message when there is nothing to plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub title: String,
    pub x_axis: String,
    pub y_axis: String,
    pub region: Region,
    pub points: Vec<DataPoint>,
    pub marker: Option<Marker>,
    pub placeholder: Option<String>,
}

impl Figure {
    fn empty(region: Region) -> Self {
        Self {
            title: "Pink Morsel Sales".to_string(),
            x_axis: "Date".to_string(),
            y_axis: "Sales".to_string(),
            region,
            points: Vec::new(),
            marker: None,
            placeholder: Some("No data available".to_string()),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder.is_some()
    }
}

/// Chart component over an immutable dataset. Building a figure is a pure
/// function of (dataset, region); repeated calls are independent.
pub struct SalesChart {
    dataset: SalesDataset,
}

impl SalesChart {
    pub fn new(dataset: SalesDataset) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &SalesDataset {
        &self.dataset
    }

    pub fn figure(&self, region: Region) -> Figure {
        let mut daily: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for row in self.dataset.rows() {
            if region != Region::All && !row.region.eq_ignore_ascii_case(region.label()) {
                continue;
            }
            *daily.entry(row.date).or_insert(0.0) += row.sales;
        }

        if daily.is_empty() {
            return Figure::empty(region);
        }

        let points = daily
            .into_iter()
            .map(|(date, sales)| DataPoint { date, sales })
            .collect();

        Figure {
            title: "Pink Morsel Sales".to_string(),
            x_axis: "Date".to_string(),
            y_axis: "Sales".to_string(),
            region,
            points,
            marker: Some(Marker {
                date: price_change_date(),
                label: "Price change (2021-01-15)".to_string(),
            }),
            placeholder: None,
        }
    }
}
