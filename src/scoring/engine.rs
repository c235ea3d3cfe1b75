use super::config::{RankDirection, ScoringConfig};
use super::error::ScoreError;
use super::factors::{rank_pct, FACTORS, WEIGHT_TOTAL_BP};
use crate::data::{Dataset, Metric, RegionRecord, SCORE_COLUMN};

#[derive(Debug, Clone, PartialEq)]
pub struct FactorContribution {
    pub metric: Metric,
    pub value: Option<f64>,  // Raw cell value
    pub rank: Option<f64>,   // Percentile rank in (0, 1], None when the value is missing
    pub weight: f64,
    pub contribution: f64,   // weight * rank, 0 when missing
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub factors: Vec<FactorContribution>,
    /// At least one factor was missing and contributed nothing
    pub incomplete: bool,
}

fn direction_for(metric: Metric, config: &ScoringConfig) -> RankDirection {
    match metric {
        Metric::BuyAffordability => config.buy_affordability,
        _ => RankDirection::Ascending,
    }
}

/// Attach an investment score to every record.
///
/// A dataset whose schema already carries `Investment_Score` is returned as-is.
/// Otherwise every required column must be present in the schema; rows missing
/// an individual value are ranked without it and flagged incomplete.
pub fn score_dataset(dataset: Dataset, config: &ScoringConfig) -> Result<Dataset, ScoreError> {
    if dataset.is_empty() {
        return Err(ScoreError::EmptyDataset);
    }

    if dataset.has_column(SCORE_COLUMN) {
        return Ok(dataset);
    }

    if let Some(factor) = FACTORS.iter().find(|f| !dataset.has_metric(f.metric)) {
        return Err(ScoreError::MissingColumn(factor.metric.header().to_string()));
    }

    let ranks: Vec<Vec<Option<f64>>> = FACTORS
        .iter()
        .map(|factor| {
            let direction = direction_for(factor.metric, config);
            let oriented: Vec<Option<f64>> = dataset
                .records
                .iter()
                .map(|r| r.get(factor.metric).map(|v| direction.orient(v)))
                .collect();
            rank_pct(&oriented)
        })
        .collect();

    let Dataset {
        mut columns,
        mut records,
    } = dataset;

    for (row, record) in records.iter_mut().enumerate() {
        let mut total_bp = 0.0;
        let mut incomplete = false;
        let mut factors = Vec::with_capacity(FACTORS.len());

        for (factor, column_ranks) in FACTORS.iter().zip(&ranks) {
            let rank = column_ranks[row];
            let contribution_bp = match rank {
                Some(r) => factor.weight_bp as f64 * r,
                None => {
                    incomplete = true;
                    0.0
                }
            };
            total_bp += contribution_bp;

            factors.push(FactorContribution {
                metric: factor.metric,
                value: record.get(factor.metric),
                rank,
                weight: factor.weight(),
                contribution: contribution_bp / WEIGHT_TOTAL_BP as f64,
            });
        }

        record.investment_score = Some(total_bp / WEIGHT_TOTAL_BP as f64);
        record.breakdown = Some(ScoreBreakdown {
            factors,
            incomplete,
        });
    }

    columns.push(SCORE_COLUMN.to_string());
    Ok(Dataset::new(columns, records))
}

/// Records the scorer flagged as having missing inputs
pub fn incomplete_records(dataset: &Dataset) -> Vec<&RegionRecord> {
    dataset.records.iter().filter(|r| r.is_incomplete()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn region(id: &str, change: f64, yld: f64, turnover: f64, buy: f64) -> RegionRecord {
        RegionRecord::new(id)
            .with(Metric::PriceChange12m, change)
            .with(Metric::Yield, yld)
            .with(Metric::SalesTurnover, turnover)
            .with(Metric::BuyAffordability, buy)
    }

    fn score_of<'a>(dataset: &'a Dataset, id: &str) -> f64 {
        dataset
            .records
            .iter()
            .find(|r| r.id == id)
            .and_then(|r| r.investment_score)
            .unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_dominating_region_scores_higher() {
        let dataset = Dataset::with_all_metrics(vec![
            region("A", 5.0, 4.0, 10.0, 2.0),
            region("B", 10.0, 8.0, 20.0, 1.0),
        ]);
        let scored = score_dataset(dataset, &ScoringConfig::default()).unwrap();

        // Ascending: higher Buy Affordability ranks higher, so A wins that factor
        // A = 0.3*0.5 + 0.3*0.5 + 0.2*0.5 + 0.2*1.0
        // B = 0.3*1.0 + 0.3*1.0 + 0.2*1.0 + 0.2*0.5
        assert!(approx(score_of(&scored, "A"), 0.6));
        assert!(approx(score_of(&scored, "B"), 0.9));
        assert!(score_of(&scored, "B") > score_of(&scored, "A"));
    }

    #[test]
    fn test_descending_buy_affordability() {
        let dataset = Dataset::with_all_metrics(vec![
            region("A", 5.0, 4.0, 10.0, 2.0),
            region("B", 10.0, 8.0, 20.0, 1.0),
        ]);
        let config = ScoringConfig {
            buy_affordability: RankDirection::Descending,
        };
        let scored = score_dataset(dataset, &config).unwrap();

        assert!(approx(score_of(&scored, "A"), 0.5));
        assert_eq!(score_of(&scored, "B"), 1.0);
    }

    #[test]
    fn test_single_record_scores_one() {
        let dataset = Dataset::with_all_metrics(vec![region("Only", -3.0, 2.0, 0.0, 9.0)]);
        let scored = score_dataset(dataset, &ScoringConfig::default()).unwrap();
        assert_eq!(scored.records[0].investment_score, Some(1.0));
    }

    #[test]
    fn test_empty_dataset_fails() {
        let dataset = Dataset::with_all_metrics(vec![]);
        let result = score_dataset(dataset, &ScoringConfig::default());
        assert_eq!(result, Err(ScoreError::EmptyDataset));
    }

    #[test]
    fn test_missing_yield_column_fails() {
        let columns = vec![
            "SA3".to_string(),
            "12M Price Change".to_string(),
            "Sales Turnover".to_string(),
            "Buy Affordability".to_string(),
        ];
        let dataset = Dataset::new(columns, vec![region("A", 1.0, 2.0, 3.0, 4.0)]);
        let result = score_dataset(dataset, &ScoringConfig::default());
        assert_eq!(result, Err(ScoreError::MissingColumn("Yield".to_string())));
    }

    #[test]
    fn test_already_scored_is_untouched() {
        let mut dataset = Dataset::with_all_metrics(vec![
            region("A", 5.0, 4.0, 10.0, 2.0),
            region("B", 10.0, 8.0, 20.0, 1.0),
        ]);
        dataset.columns.push(SCORE_COLUMN.to_string());
        dataset.records[0].investment_score = Some(0.11);
        dataset.records[1].investment_score = None;

        let scored = score_dataset(dataset.clone(), &ScoringConfig::default()).unwrap();
        assert_eq!(scored, dataset);
    }

    #[test]
    fn test_scoring_twice_is_idempotent() {
        let dataset = Dataset::with_all_metrics(vec![
            region("A", 5.0, 4.0, 10.0, 2.0),
            region("B", 10.0, 8.0, 20.0, 1.0),
            region("C", 7.0, 6.0, 15.0, 1.5),
        ]);
        let once = score_dataset(dataset, &ScoringConfig::default()).unwrap();
        assert!(once.has_column(SCORE_COLUMN));

        // A different config must not matter once the score exists
        let config = ScoringConfig {
            buy_affordability: RankDirection::Descending,
        };
        let twice = score_dataset(once.clone(), &config).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_identical_rows_tie() {
        let dataset = Dataset::with_all_metrics(vec![
            region("A", 5.0, 4.0, 10.0, 2.0),
            region("B", 1.0, 9.0, 30.0, 0.5),
            region("C", 5.0, 4.0, 10.0, 2.0),
        ]);
        let scored = score_dataset(dataset, &ScoringConfig::default()).unwrap();
        assert_eq!(score_of(&scored, "A"), score_of(&scored, "C"));
    }

    #[test]
    fn test_missing_value_contributes_zero() {
        let mut gap = region("Gap", 10.0, 0.0, 20.0, 3.0);
        gap.set(Metric::Yield, None);
        let dataset = Dataset::with_all_metrics(vec![
            region("A", 5.0, 4.0, 10.0, 2.0),
            gap,
            region("C", 1.0, 8.0, 5.0, 1.0),
        ]);
        let scored = score_dataset(dataset, &ScoringConfig::default()).unwrap();

        let gap = scored.records.iter().find(|r| r.id == "Gap").unwrap();
        let breakdown = gap.breakdown.as_ref().unwrap();
        assert!(breakdown.incomplete);
        let yield_factor = breakdown
            .factors
            .iter()
            .find(|f| f.metric == Metric::Yield)
            .unwrap();
        assert_eq!(yield_factor.rank, None);
        assert_eq!(yield_factor.contribution, 0.0);
        // Top on change, turnover and buy: 0.3 + 0 + 0.2 + 0.2
        assert!(approx(gap.investment_score.unwrap(), 0.7));

        // Yield ranked among the two present values only
        let c = scored.records.iter().find(|r| r.id == "C").unwrap();
        let c_yield = &c.breakdown.as_ref().unwrap().factors[1];
        assert_eq!(c_yield.rank, Some(1.0));

        let incomplete = incomplete_records(&scored);
        assert_eq!(incomplete.len(), 1);
        assert_eq!(incomplete[0].id, "Gap");
    }

    #[test]
    fn test_breakdown_sums_to_score() {
        let dataset = Dataset::with_all_metrics(vec![
            region("A", 5.0, 4.0, 10.0, 2.0),
            region("B", 10.0, 8.0, 20.0, 1.0),
            region("C", 7.0, 2.0, 25.0, 3.0),
        ]);
        let scored = score_dataset(dataset, &ScoringConfig::default()).unwrap();
        for record in &scored.records {
            let breakdown = record.breakdown.as_ref().unwrap();
            assert_eq!(breakdown.factors.len(), 4);
            assert!(!breakdown.incomplete);
            let sum: f64 = breakdown.factors.iter().map(|f| f.contribution).sum();
            assert!((sum - record.investment_score.unwrap()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_schema_gains_score_column() {
        let dataset = Dataset::with_all_metrics(vec![region("A", 1.0, 1.0, 1.0, 1.0)]);
        let scored = score_dataset(dataset, &ScoringConfig::default()).unwrap();
        assert_eq!(scored.columns.last().map(String::as_str), Some(SCORE_COLUMN));
    }

    fn rows_strategy() -> impl Strategy<Value = Vec<[i32; 4]>> {
        // Small integer domain so ties are common
        proptest::collection::vec(proptest::array::uniform4(-20i32..20), 1..12)
    }

    fn build(rows: &[[i32; 4]]) -> Dataset {
        Dataset::with_all_metrics(
            rows.iter()
                .enumerate()
                .map(|(i, v)| {
                    region(&format!("R{}", i), v[0] as f64, v[1] as f64, v[2] as f64, v[3] as f64)
                })
                .collect(),
        )
    }

    proptest! {
        #[test]
        fn prop_scores_in_unit_interval(rows in rows_strategy()) {
            let scored = score_dataset(build(&rows), &ScoringConfig::default()).unwrap();
            for record in &scored.records {
                let score = record.investment_score.unwrap();
                prop_assert!(score > 0.0 && score <= 1.0, "score {} out of range", score);
            }
        }

        #[test]
        fn prop_score_monotonic_in_each_input(
            rows in rows_strategy(),
            pick in any::<prop::sample::Index>(),
            factor in 0usize..4,
            bump in 1i32..10,
        ) {
            let row = pick.index(rows.len());
            let before = score_dataset(build(&rows), &ScoringConfig::default()).unwrap();

            let mut raised = rows.clone();
            raised[row][factor] += bump;
            let after = score_dataset(build(&raised), &ScoringConfig::default()).unwrap();

            let id = format!("R{}", row);
            prop_assert!(score_of(&after, &id) >= score_of(&before, &id));
        }
    }
}
