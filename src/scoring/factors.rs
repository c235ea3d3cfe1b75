use crate::data::Metric;

/// Weights are held in basis points so their total can be checked exactly.
pub const WEIGHT_TOTAL_BP: u32 = 10_000;

/// A ranked input of the investment score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Factor {
    pub metric: Metric,
    pub weight_bp: u32,
}

impl Factor {
    pub fn weight(&self) -> f64 {
        self.weight_bp as f64 / WEIGHT_TOTAL_BP as f64
    }
}

pub const FACTORS: [Factor; 4] = [
    Factor { metric: Metric::PriceChange12m, weight_bp: 3_000 },
    Factor { metric: Metric::Yield, weight_bp: 3_000 },
    Factor { metric: Metric::SalesTurnover, weight_bp: 2_000 },
    Factor { metric: Metric::BuyAffordability, weight_bp: 2_000 },
];

const fn total_weight_bp(factors: &[Factor]) -> u32 {
    let mut total = 0;
    let mut i = 0;
    while i < factors.len() {
        total += factors[i].weight_bp;
        i += 1;
    }
    total
}

// Editing a weight without rebalancing the others fails the build
const _: () = assert!(total_weight_bp(&FACTORS) == WEIGHT_TOTAL_BP);

/// Percentile rank of each value among the non-missing values of the column.
///
/// Ties share the mean of the ordinal ranks they span, and ranks are divided
/// by the number of non-missing values, so the largest value gets 1.0 and the
/// smallest gets 1/N (or more when tied). Missing inputs stay missing.
pub fn rank_pct(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut present: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.filter(|x| !x.is_nan()).map(|x| (i, x)))
        .collect();

    let mut ranks = vec![None; values.len()];
    let count = present.len();
    if count == 0 {
        return ranks;
    }

    present.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut start = 0;
    while start < count {
        let mut end = start + 1;
        while end < count && present[end].1 == present[start].1 {
            end += 1;
        }
        // Ordinal ranks start+1 ..= end share their mean
        let average = (start + 1 + end) as f64 / 2.0;
        let pct = average / count as f64;
        for &(index, _) in &present[start..end] {
            ranks[index] = Some(pct);
        }
        start = end;
    }

    ranks
}
