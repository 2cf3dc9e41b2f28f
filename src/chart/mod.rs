// Chart layer: the consolidated CSV is loaded once into an immutable
// dataset; figures are pure values derived from it on demand.

pub mod dataset;
pub mod figure;

pub use dataset::{SalesDataset, SalesRow};
pub use figure::{price_change_date, Figure, Region, SalesChart};
