use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::analytics::{CorrelationMatrix, Kpis, RadarProfile};
use crate::data::{Metric, RegionRecord};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format an investment score with three decimals.
/// Incomplete scores get a trailing asterisk, missing scores show as "-"
pub fn format_score(score: Option<f64>, incomplete: bool) -> String {
    match score {
        Some(s) if incomplete => format!("{:.3}*", s),
        Some(s) => format!("{:.3}", s),
        None => "-".to_string(),
    }
}

/// Format a dollar amount with thousands separators: "$1,234,567"
pub fn format_money(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Format a number in compact notation (1.5k, 2.3M, 847)
pub fn format_compact(value: f64) -> String {
    let magnitude = value.abs();
    let formatted = if magnitude >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if magnitude >= 1_000.0 {
        format!("{:.1}k", value / 1_000.0)
    } else if magnitude >= 100.0 || value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    };

    // Trim trailing .0 (e.g., "1.0k" -> "1k")
    formatted.replace(".0M", "M").replace(".0k", "k")
}

/// Format a metric value the way the dashboard labels it
pub fn format_metric(metric: Metric, value: Option<f64>) -> String {
    match value {
        None => "-".to_string(),
        Some(v) => match metric {
            Metric::Median => format_money(v),
            Metric::PriceChange12m | Metric::Yield => format_percent(v),
            Metric::SalesTurnover | Metric::BuyAffordability | Metric::RentAffordability => {
                format!("{:.2}", v)
            }
        },
    }
}

/// Headline KPI line: "Median Price $812,500 | 12M Price Change 4.10% | ..."
pub fn format_kpis(kpis: &Kpis, use_colors: bool) -> String {
    let items = [
        ("Median Price", format_metric(Metric::Median, kpis.median_price)),
        ("12M Price Change", format_metric(Metric::PriceChange12m, kpis.price_change_12m)),
        ("Yield", format_metric(Metric::Yield, kpis.yield_pct)),
        ("Buy Affordability", format_metric(Metric::BuyAffordability, kpis.buy_affordability)),
    ];

    items
        .iter()
        .map(|(label, value)| {
            if use_colors {
                format!("{} {}", label.dimmed(), value.bold())
            } else {
                format!("{} {}", label, value)
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a region name to fit available width, accounting for Unicode
pub fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

const TABLE_METRICS: [Metric; 5] = [
    Metric::Median,
    Metric::PriceChange12m,
    Metric::Yield,
    Metric::SalesTurnover,
    Metric::BuyAffordability,
];

/// Format ranked regions as a table with columns:
/// Index, Score, Region, Median, 12M Chg, Yield, Turnover, Buy Aff
pub fn format_scored_table(records: &[&RegionRecord], use_colors: bool) -> String {
    if records.is_empty() {
        return "No scored regions found.".to_string();
    }

    let index_width = 3;
    let score_width = 6;
    let metric_width = 12;
    let separator = "  ";

    let fixed_width = index_width
        + 1
        + score_width
        + separator.len() * (TABLE_METRICS.len() + 1)
        + metric_width * TABLE_METRICS.len();
    let longest_name = records.iter().map(|r| r.id.chars().count()).max().unwrap_or(0);
    let name_width = match get_terminal_width() {
        Some(width) if width > fixed_width + 10 => longest_name.min(width - fixed_width),
        Some(_) => longest_name.min(20),
        None => longest_name,
    }
    .max(6);

    let mut header = format!(
        "{:>iw$} {:>sw$}{}{:<nw$}",
        "#",
        "Score",
        separator,
        "Region",
        iw = index_width,
        sw = score_width,
        nw = name_width
    );
    for metric in TABLE_METRICS {
        header.push_str(separator);
        header.push_str(&format!("{:>w$}", metric.short_label(), w = metric_width));
    }
    let header = if use_colors { header.bold().to_string() } else { header };

    let rows = records.iter().enumerate().map(|(idx, record)| {
        // 1-based index, right-aligned with trailing dot
        let index_str = format!("{:>2}.", idx + 1);
        let score_str = format!(
            "{:>w$}",
            format_score(record.investment_score, record.is_incomplete()),
            w = score_width
        );
        let name = format!("{:<w$}", truncate_name(&record.id, name_width), w = name_width);
        let metrics: String = TABLE_METRICS
            .iter()
            .map(|m| {
                format!(
                    "{}{:>w$}",
                    separator,
                    format_metric(*m, record.get(*m)),
                    w = metric_width
                )
            })
            .collect();

        if use_colors {
            format!("{} {}{}{}{}", index_str.dimmed(), score_str.bold(), separator, name.cyan(), metrics)
        } else {
            format!("{} {}{}{}{}", index_str, score_str, separator, name, metrics)
        }
    });

    std::iter::once(header).chain(rows).collect::<Vec<_>>().join("\n")
}

/// Format ranked regions as tab-separated values for scripting
/// Columns: score, region, then every metric (no headers, no colors)
pub fn format_tsv(records: &[&RegionRecord]) -> String {
    records
        .iter()
        .map(|record| {
            let mut fields = vec![
                record
                    .investment_score
                    .map(|s| format!("{:.6}", s))
                    .unwrap_or_default(),
                record.id.clone(),
            ];
            fields.extend(
                Metric::ALL
                    .iter()
                    .map(|m| record.get(*m).map(|v| v.to_string()).unwrap_or_default()),
            );
            fields.join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format ranked regions as a pretty-printed JSON array
pub fn format_json(records: &[&RegionRecord]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Format the correlation matrix as an aligned grid with two-decimal cells
pub fn format_correlation(matrix: &CorrelationMatrix, use_colors: bool) -> String {
    let label_width = matrix
        .metrics
        .iter()
        .map(|m| m.header().len())
        .max()
        .unwrap_or(0);
    let cell_width = 9;

    let mut lines = Vec::with_capacity(matrix.metrics.len() + 1);
    let mut header = " ".repeat(label_width);
    for metric in &matrix.metrics {
        header.push_str(&format!("{:>w$}", metric.short_label(), w = cell_width));
    }
    lines.push(if use_colors { header.bold().to_string() } else { header });

    for (i, metric) in matrix.metrics.iter().enumerate() {
        let mut line = format!("{:<w$}", metric.header(), w = label_width);
        for j in 0..matrix.metrics.len() {
            let cell = match matrix.get(i, j) {
                Some(r) => format!("{:>w$.2}", r, w = cell_width),
                None => format!("{:>w$}", "-", w = cell_width),
            };
            let cell = match (use_colors, matrix.get(i, j)) {
                (true, Some(r)) if r >= 0.5 => cell.blue().to_string(),
                (true, Some(r)) if r <= -0.5 => cell.red().to_string(),
                _ => cell,
            };
            line.push_str(&cell);
        }
        lines.push(line);
    }

    lines.join("\n")
}

/// Format one region with every metric, its radar scale and score breakdown
pub fn format_region_detail(record: &RegionRecord, radar: &RadarProfile, use_colors: bool) -> String {
    let mut lines = Vec::new();
    lines.push(if use_colors {
        record.id.bold().to_string()
    } else {
        record.id.clone()
    });

    for metric in Metric::ALL {
        lines.push(format!("  {}: {}", metric.header(), format_metric(metric, record.get(metric))));
    }
    lines.push(format!(
        "  Investment Score: {}",
        format_score(record.investment_score, record.is_incomplete())
    ));

    lines.push(String::new());
    lines.push(format!(
        "Radar (scale {} to {}):",
        format_compact(radar.range.0),
        format_compact(radar.range.1)
    ));
    for axis in &radar.axes {
        let filled = (axis.radius * 20.0).round() as usize;
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(20 - filled.min(20)));
        lines.push(format!(
            "  {:<18} {} {}",
            axis.metric.header(),
            if use_colors { bar.cyan().to_string() } else { bar },
            format_metric(axis.metric, axis.value)
        ));
    }

    if let Some(breakdown) = &record.breakdown {
        lines.push(String::new());
        lines.push("Score breakdown:".to_string());
        for factor in &breakdown.factors {
            let rank = factor
                .rank
                .map(|r| format!("{:.3}", r))
                .unwrap_or_else(|| "missing".to_string());
            lines.push(format!(
                "  {:<18} rank {:>7} x {:.1} = {:.3}",
                factor.metric.header(),
                rank,
                factor.weight,
                factor.contribution
            ));
        }
        if breakdown.incomplete {
            lines.push("  * missing inputs contribute 0".to_string());
        }
    }

    lines.join("\n")
}
