pub mod formatter;

pub use formatter::{
    format_compact, format_correlation, format_json, format_kpis, format_metric, format_money,
    format_percent, format_region_detail, format_score, format_scored_table, format_tsv,
    should_use_colors, truncate_name,
};
