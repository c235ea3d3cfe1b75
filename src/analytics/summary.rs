use serde::Serialize;

use super::stats::median;
use crate::data::{Dataset, Metric, RegionRecord};

/// Headline medians shown above the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    pub median_price: Option<f64>,
    pub price_change_12m: Option<f64>,
    #[serde(rename = "yield")]
    pub yield_pct: Option<f64>,
    pub buy_affordability: Option<f64>,
}

pub fn kpis(dataset: &Dataset) -> Kpis {
    let column_median = |metric| median(&dataset.present_values(metric));
    Kpis {
        median_price: column_median(Metric::Median),
        price_change_12m: column_median(Metric::PriceChange12m),
        yield_pct: column_median(Metric::Yield),
        buy_affordability: column_median(Metric::BuyAffordability),
    }
}

/// Highest scoring records first. Unscored rows are left out and equal
/// scores keep their sheet order.
pub fn top_n(dataset: &Dataset, n: usize) -> Vec<&RegionRecord> {
    let mut scored: Vec<&RegionRecord> = dataset
        .records
        .iter()
        .filter(|r| r.investment_score.is_some())
        .collect();

    // sort_by is stable, so ties stay in sheet order
    scored.sort_by(|a, b| {
        let a = a.investment_score.unwrap_or(f64::NEG_INFINITY);
        let b = b.investment_score.unwrap_or(f64::NEG_INFINITY);
        b.total_cmp(&a)
    });
    scored.truncate(n);
    scored
}

/// Distinct region identifiers in first-seen order
pub fn region_names(dataset: &Dataset) -> Vec<&str> {
    let mut seen = std::collections::HashSet::new();
    dataset
        .records
        .iter()
        .map(|r| r.id.as_str())
        .filter(|id| seen.insert(*id))
        .collect()
}

/// First record with this identifier (exact match, then case-insensitive)
pub fn find_region<'a>(dataset: &'a Dataset, name: &str) -> Option<&'a RegionRecord> {
    let name = name.trim();
    dataset
        .records
        .iter()
        .find(|r| r.id == name)
        .or_else(|| dataset.records.iter().find(|r| r.id.eq_ignore_ascii_case(name)))
}

/// Identifiers containing `query`, case-insensitively, in first-seen order
pub fn search_regions<'a>(dataset: &'a Dataset, query: &str) -> Vec<&'a str> {
    let needle = query.trim().to_lowercase();
    region_names(dataset)
        .into_iter()
        .filter(|id| id.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(id: &str, score: Option<f64>) -> RegionRecord {
        let mut record = RegionRecord::new(id);
        record.investment_score = score;
        record
    }

    #[test]
    fn test_kpis_are_medians() {
        let dataset = Dataset::with_all_metrics(vec![
            RegionRecord::new("A")
                .with(Metric::Median, 600_000.0)
                .with(Metric::Yield, 3.0),
            RegionRecord::new("B")
                .with(Metric::Median, 800_000.0)
                .with(Metric::Yield, 5.0),
            RegionRecord::new("C").with(Metric::Median, 1_000_000.0),
        ]);
        let kpis = kpis(&dataset);
        assert_eq!(kpis.median_price, Some(800_000.0));
        assert_eq!(kpis.yield_pct, Some(4.0));
        assert_eq!(kpis.price_change_12m, None);
    }

    #[test]
    fn test_top_n_orders_by_score() {
        let dataset = Dataset::with_all_metrics(vec![
            scored("A", Some(0.4)),
            scored("B", Some(0.9)),
            scored("C", None),
            scored("D", Some(0.7)),
        ]);
        let ids: Vec<&str> = top_n(&dataset, 10).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "D", "A"]);
    }

    #[test]
    fn test_top_n_truncates_and_keeps_tie_order() {
        let dataset = Dataset::with_all_metrics(vec![
            scored("A", Some(0.5)),
            scored("B", Some(0.8)),
            scored("C", Some(0.5)),
            scored("D", Some(0.1)),
        ]);
        let ids: Vec<&str> = top_n(&dataset, 3).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_region_names_unique_in_order() {
        let dataset = Dataset::with_all_metrics(vec![
            RegionRecord::new("Ryde"),
            RegionRecord::new("Auburn"),
            RegionRecord::new("Ryde"),
        ]);
        assert_eq!(region_names(&dataset), vec!["Ryde", "Auburn"]);
    }

    #[test]
    fn test_find_region() {
        let dataset = Dataset::with_all_metrics(vec![
            RegionRecord::new("Ryde").with(Metric::Yield, 1.0),
            RegionRecord::new("Ryde").with(Metric::Yield, 2.0),
        ]);
        assert_eq!(find_region(&dataset, "Ryde").unwrap().yield_pct, Some(1.0));
        assert!(find_region(&dataset, " ryde ").is_some());
        assert!(find_region(&dataset, "Hornsby").is_none());
    }

    #[test]
    fn test_search_regions() {
        let dataset = Dataset::with_all_metrics(vec![
            RegionRecord::new("Sydney Inner City"),
            RegionRecord::new("North Sydney - Mosman"),
            RegionRecord::new("Parramatta"),
        ]);
        assert_eq!(
            search_regions(&dataset, "sydney"),
            vec!["Sydney Inner City", "North Sydney - Mosman"]
        );
        assert!(search_regions(&dataset, "perth").is_empty());
    }
}
