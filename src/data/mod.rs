pub mod loader;
pub mod types;

pub use loader::{dataset_from_range, load_dataset, LoadOptions};
pub use types::{Dataset, Metric, RegionRecord, ID_COLUMN, SCORE_COLUMN};
