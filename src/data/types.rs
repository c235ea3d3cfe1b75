use serde::Serialize;

use crate::scoring::ScoreBreakdown;

/// Header of the region identifier column.
pub const ID_COLUMN: &str = "SA3";

/// Header of a precomputed investment score column.
pub const SCORE_COLUMN: &str = "Investment_Score";

/// Numeric columns the dashboard knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Metric {
    Median,
    PriceChange12m,
    Yield,
    SalesTurnover,
    BuyAffordability,
    RentAffordability,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::Median,
        Metric::PriceChange12m,
        Metric::Yield,
        Metric::SalesTurnover,
        Metric::BuyAffordability,
        Metric::RentAffordability,
    ];

    /// Spreadsheet header for this metric (after whitespace trimming)
    pub fn header(&self) -> &'static str {
        match self {
            Metric::Median => "Median",
            Metric::PriceChange12m => "12M Price Change",
            Metric::Yield => "Yield",
            Metric::SalesTurnover => "Sales Turnover",
            Metric::BuyAffordability => "Buy Affordability",
            Metric::RentAffordability => "Rent Affordability",
        }
    }

    /// Short label for narrow table columns and chart axes
    pub fn short_label(&self) -> &'static str {
        match self {
            Metric::Median => "Median",
            Metric::PriceChange12m => "12M Chg",
            Metric::Yield => "Yield",
            Metric::SalesTurnover => "Turnover",
            Metric::BuyAffordability => "Buy Aff",
            Metric::RentAffordability => "Rent Aff",
        }
    }

    pub fn from_header(header: &str) -> Option<Metric> {
        Metric::ALL.into_iter().find(|m| m.header() == header)
    }
}

/// One row of the input sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionRecord {
    pub id: String,
    pub median: Option<f64>,
    pub price_change_12m: Option<f64>,
    #[serde(rename = "yield")]
    pub yield_pct: Option<f64>,
    pub sales_turnover: Option<f64>,
    pub buy_affordability: Option<f64>,
    pub rent_affordability: Option<f64>,
    pub investment_score: Option<f64>,
    #[serde(skip)]
    pub breakdown: Option<ScoreBreakdown>,
}

impl RegionRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            median: None,
            price_change_12m: None,
            yield_pct: None,
            sales_turnover: None,
            buy_affordability: None,
            rent_affordability: None,
            investment_score: None,
            breakdown: None,
        }
    }

    pub fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Median => self.median,
            Metric::PriceChange12m => self.price_change_12m,
            Metric::Yield => self.yield_pct,
            Metric::SalesTurnover => self.sales_turnover,
            Metric::BuyAffordability => self.buy_affordability,
            Metric::RentAffordability => self.rent_affordability,
        }
    }

    pub fn set(&mut self, metric: Metric, value: Option<f64>) {
        let slot = match metric {
            Metric::Median => &mut self.median,
            Metric::PriceChange12m => &mut self.price_change_12m,
            Metric::Yield => &mut self.yield_pct,
            Metric::SalesTurnover => &mut self.sales_turnover,
            Metric::BuyAffordability => &mut self.buy_affordability,
            Metric::RentAffordability => &mut self.rent_affordability,
        };
        // NaN never reaches ranking or statistics
        *slot = value.filter(|v| v.is_finite());
    }

    /// Builder-style setter, mostly for tests and fixtures
    pub fn with(mut self, metric: Metric, value: f64) -> Self {
        self.set(metric, Some(value));
        self
    }

    /// True when the scorer had to treat at least one input as missing
    pub fn is_incomplete(&self) -> bool {
        self.breakdown.as_ref().is_some_and(|b| b.incomplete)
    }
}

/// Ordered rows sharing one schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Trimmed header names in sheet order
    pub columns: Vec<String>,
    pub records: Vec<RegionRecord>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, records: Vec<RegionRecord>) -> Self {
        Self { columns, records }
    }

    /// Dataset whose schema holds the id column plus every known metric
    pub fn with_all_metrics(records: Vec<RegionRecord>) -> Self {
        let mut columns = vec![ID_COLUMN.to_string()];
        columns.extend(Metric::ALL.iter().map(|m| m.header().to_string()));
        Self { columns, records }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn has_metric(&self, metric: Metric) -> bool {
        self.has_column(metric.header())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Column values in row order, `None` where missing
    pub fn column(&self, metric: Metric) -> Vec<Option<f64>> {
        self.records.iter().map(|r| r.get(metric)).collect()
    }

    /// Non-missing column values in row order
    pub fn present_values(&self, metric: Metric) -> Vec<f64> {
        self.records.iter().filter_map(|r| r.get(metric)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_header_lookup() {
        for metric in Metric::ALL {
            assert_eq!(Metric::from_header(metric.header()), Some(metric));
        }
        assert_eq!(Metric::from_header("Suburb"), None);
    }

    #[test]
    fn test_set_drops_nan() {
        let mut record = RegionRecord::new("Sydney Inner City");
        record.set(Metric::Yield, Some(f64::NAN));
        assert_eq!(record.yield_pct, None);
        record.set(Metric::Yield, Some(3.2));
        assert_eq!(record.get(Metric::Yield), Some(3.2));
    }

    #[test]
    fn test_with_all_metrics_schema() {
        let dataset = Dataset::with_all_metrics(vec![]);
        assert!(dataset.has_column(ID_COLUMN));
        assert!(Metric::ALL.iter().all(|m| dataset.has_metric(*m)));
        assert!(!dataset.has_column(SCORE_COLUMN));
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_present_values_skips_missing() {
        let dataset = Dataset::with_all_metrics(vec![
            RegionRecord::new("A").with(Metric::Median, 500_000.0),
            RegionRecord::new("B"),
            RegionRecord::new("C").with(Metric::Median, 750_000.0),
        ]);
        assert_eq!(dataset.present_values(Metric::Median), vec![500_000.0, 750_000.0]);
        assert_eq!(dataset.column(Metric::Median)[1], None);
    }
}
