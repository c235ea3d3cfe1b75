pub mod charts;
pub mod stats;
pub mod summary;

pub use charts::{
    correlation_matrix, price_histogram, radar_profile, scatter_points, CorrelationMatrix,
    RadarAxis, RadarProfile, ScatterPoint, CORRELATION_METRICS, RADAR_METRICS,
};
pub use stats::{histogram, median, pearson, Bin};
pub use summary::{find_region, kpis, region_names, search_regions, top_n, Kpis};
