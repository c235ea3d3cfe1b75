use serde::Serialize;

use super::stats::{histogram, pearson, Bin};
use crate::data::{Dataset, Metric, RegionRecord};

/// Columns of the correlation heatmap
pub const CORRELATION_METRICS: [Metric; 6] = Metric::ALL;

/// Axes of the region radar chart
pub const RADAR_METRICS: [Metric; 5] = [
    Metric::PriceChange12m,
    Metric::Yield,
    Metric::SalesTurnover,
    Metric::BuyAffordability,
    Metric::RentAffordability,
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub metrics: Vec<Metric>,
    /// Row-major, `None` where the coefficient is undefined
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get(row).and_then(|r| r.get(col)).copied().flatten()
    }
}

pub fn correlation_matrix(dataset: &Dataset, metrics: &[Metric]) -> CorrelationMatrix {
    let columns: Vec<Vec<Option<f64>>> = metrics.iter().map(|m| dataset.column(*m)).collect();
    let values = columns
        .iter()
        .map(|x| columns.iter().map(|y| pearson(x, y)).collect())
        .collect();
    CorrelationMatrix {
        metrics: metrics.to_vec(),
        values,
    }
}

/// Distribution of median prices
pub fn price_histogram(dataset: &Dataset, bins: usize) -> Vec<Bin> {
    histogram(&dataset.present_values(Metric::Median), bins)
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadarAxis {
    pub metric: Metric,
    pub value: Option<f64>,
    /// Position on the shared radial axis, 0.0 (centre) to 1.0 (rim)
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadarProfile {
    pub region: String,
    pub axes: Vec<RadarAxis>,
    /// Shared radial range, lower bound never above zero
    pub range: (f64, f64),
}

/// Raw metric values of one region on a single radial scale.
pub fn radar_profile(record: &RegionRecord) -> RadarProfile {
    let values: Vec<Option<f64>> = RADAR_METRICS.iter().map(|m| record.get(*m)).collect();
    let present = values.iter().flatten().copied();
    let low = present.clone().fold(0.0_f64, f64::min);
    let high = present.fold(low, f64::max);
    let span = high - low;

    let axes = RADAR_METRICS
        .iter()
        .zip(values)
        .map(|(metric, value)| RadarAxis {
            metric: *metric,
            value,
            radius: match value {
                Some(v) if span > 0.0 => (v - low) / span,
                _ => 0.0,
            },
        })
        .collect();

    RadarProfile {
        region: record.id.clone(),
        axes,
        range: (low, high),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub region: String,
    pub median: f64,
    pub price_change_12m: f64,
    /// Colour channel
    #[serde(rename = "yield")]
    pub yield_pct: Option<f64>,
    /// Size channel
    pub sales_turnover: Option<f64>,
}

/// Median price against 12-month change; rows missing either axis are dropped
pub fn scatter_points(dataset: &Dataset) -> Vec<ScatterPoint> {
    dataset
        .records
        .iter()
        .filter_map(|r| {
            Some(ScatterPoint {
                region: r.id.clone(),
                median: r.median?,
                price_change_12m: r.price_change_12m?,
                yield_pct: r.yield_pct,
                sales_turnover: r.sales_turnover,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::with_all_metrics(vec![
            RegionRecord::new("A")
                .with(Metric::Median, 500_000.0)
                .with(Metric::PriceChange12m, 2.0)
                .with(Metric::Yield, 5.0),
            RegionRecord::new("B")
                .with(Metric::Median, 700_000.0)
                .with(Metric::PriceChange12m, 4.0)
                .with(Metric::Yield, 4.0),
            RegionRecord::new("C")
                .with(Metric::Median, 900_000.0)
                .with(Metric::PriceChange12m, 6.0)
                .with(Metric::Yield, 3.0),
            RegionRecord::new("D").with(Metric::PriceChange12m, 1.0),
        ])
    }

    #[test]
    fn test_correlation_matrix_shape_and_signs() {
        let matrix = correlation_matrix(
            &sample(),
            &[Metric::Median, Metric::PriceChange12m, Metric::Yield, Metric::RentAffordability],
        );
        assert_eq!(matrix.values.len(), 4);
        assert!(matrix.values.iter().all(|row| row.len() == 4));

        assert!((matrix.get(0, 0).unwrap() - 1.0).abs() < 1e-12);
        assert!((matrix.get(0, 1).unwrap() - 1.0).abs() < 1e-12);
        assert!((matrix.get(0, 2).unwrap() + 1.0).abs() < 1e-12);
        // No Rent Affordability values at all
        assert_eq!(matrix.get(3, 3), None);
        assert_eq!(matrix.get(0, 3), None);
    }

    #[test]
    fn test_correlation_matrix_symmetric() {
        let matrix = correlation_matrix(&sample(), &CORRELATION_METRICS);
        for i in 0..matrix.metrics.len() {
            for j in 0..matrix.metrics.len() {
                assert_eq!(matrix.get(i, j), matrix.get(j, i));
            }
        }
    }

    #[test]
    fn test_price_histogram_skips_missing() {
        let bins = price_histogram(&sample(), 2);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 3);
    }

    #[test]
    fn test_radar_profile_shared_scale() {
        let record = RegionRecord::new("A")
            .with(Metric::PriceChange12m, -2.0)
            .with(Metric::Yield, 4.0)
            .with(Metric::SalesTurnover, 8.0);
        let profile = radar_profile(&record);

        assert_eq!(profile.range, (-2.0, 8.0));
        assert_eq!(profile.axes.len(), 5);
        assert_eq!(profile.axes[0].radius, 0.0);
        assert!((profile.axes[1].radius - 0.6).abs() < 1e-12);
        assert_eq!(profile.axes[2].radius, 1.0);
        assert_eq!(profile.axes[3].value, None);
        assert_eq!(profile.axes[3].radius, 0.0);
    }

    #[test]
    fn test_radar_profile_positive_values_start_at_zero() {
        let record = RegionRecord::new("A")
            .with(Metric::Yield, 5.0)
            .with(Metric::RentAffordability, 25.0);
        let profile = radar_profile(&record);
        assert_eq!(profile.range, (0.0, 25.0));
        assert_eq!(profile.axes[1].radius, 0.2);
    }

    #[test]
    fn test_radar_profile_empty_record() {
        let profile = radar_profile(&RegionRecord::new("Empty"));
        assert_eq!(profile.range, (0.0, 0.0));
        assert!(profile.axes.iter().all(|a| a.radius == 0.0));
    }

    #[test]
    fn test_scatter_points_need_both_axes() {
        let points = scatter_points(&sample());
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].region, "A");
        assert_eq!(points[0].yield_pct, Some(5.0));
        assert_eq!(points[0].sales_turnover, None);
    }
}
