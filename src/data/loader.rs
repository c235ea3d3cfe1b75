use anyhow::{bail, Context, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;

use super::types::{Dataset, Metric, RegionRecord, ID_COLUMN, SCORE_COLUMN};

/// Where to find the data inside a workbook
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub sheet: String,
    pub id_column: String,
    pub verbose: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            sheet: "SA3".to_string(),
            id_column: ID_COLUMN.to_string(),
            verbose: false,
        }
    }
}

/// Load a dataset from a spreadsheet file (xlsx, xlsm, xls or ods)
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened as a workbook
/// - The sheet does not exist
/// - The sheet has no header row or no identifier column
pub fn load_dataset(path: &Path, options: &LoadOptions) -> Result<Dataset> {
    if !path.exists() {
        bail!("Data file not found at {}", path.display());
    }

    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook at {}", path.display()))?;

    let sheet_names = workbook.sheet_names();
    if !sheet_names.iter().any(|name| name == &options.sheet) {
        bail!(
            "Sheet '{}' not found in {} (available: {})",
            options.sheet,
            path.display(),
            sheet_names.join(", ")
        );
    }

    let range = workbook
        .worksheet_range(&options.sheet)
        .with_context(|| format!("Failed to read sheet '{}' in {}", options.sheet, path.display()))?;

    dataset_from_range(&range, options)
        .with_context(|| format!("Invalid data in sheet '{}' of {}", options.sheet, path.display()))
}

/// Convert a sheet range into a dataset. The first row is the header row.
pub fn dataset_from_range(range: &Range<Data>, options: &LoadOptions) -> Result<Dataset> {
    let mut rows = range.rows();

    let header_row = match rows.next() {
        Some(row) => row,
        None => bail!("Sheet is empty (no header row)"),
    };

    let columns: Vec<String> = header_row
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();

    let id_index = match columns.iter().position(|c| c == &options.id_column) {
        Some(i) => i,
        None => bail!("Identifier column '{}' not found in header", options.id_column),
    };

    let metric_indices: Vec<(Metric, usize)> = Metric::ALL
        .iter()
        .filter_map(|m| columns.iter().position(|c| c == m.header()).map(|i| (*m, i)))
        .collect();
    let score_index = columns.iter().position(|c| c == SCORE_COLUMN);

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (row_offset, row) in rows.enumerate() {
        let id = row.get(id_index).map(cell_text).unwrap_or_default();
        if id.is_empty() {
            skipped += 1;
            continue;
        }

        let mut record = RegionRecord::new(id);
        for (metric, index) in &metric_indices {
            record.set(*metric, row.get(*index).and_then(cell_number));
        }
        if let Some(index) = score_index {
            record.investment_score = row.get(index).and_then(cell_number);
        }
        if options.verbose {
            let missing: Vec<&str> = metric_indices
                .iter()
                .filter(|(m, _)| record.get(*m).is_none())
                .map(|(m, _)| m.header())
                .collect();
            if !missing.is_empty() {
                // +2: one for the header, one for 1-based sheet rows
                crate::buffered_eprintln!(
                    "Row {} ({}): missing {}",
                    row_offset + 2,
                    record.id,
                    missing.join(", ")
                );
            }
        }
        records.push(record);
    }

    if skipped > 0 && options.verbose {
        crate::buffered_eprintln!("Skipped {} rows without a {} value", skipped, options.id_column);
    }

    Ok(Dataset::new(columns, records))
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.trim().to_string(),
        other => other.to_string().trim().to_string(),
    }
}

fn cell_number(cell: &Data) -> Option<f64> {
    let value = match cell {
        Data::Float(f) => *f,
        Data::Int(i) => *i as f64,
        Data::String(s) => parse_number(s)?,
        _ => return None,
    };
    value.is_finite().then_some(value)
}

/// Parse numbers the way people type them into spreadsheets: "$1,250,000", "4.5%"
fn parse_number(s: &str) -> Option<f64> {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '$' | '%') && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(rows: &[Vec<Data>]) -> Range<Data> {
        let height = rows.len() as u32;
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0) as u32;
        let mut range = Range::new((0, 0), (height - 1, width - 1));
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                range.set_value((r as u32, c as u32), cell.clone());
            }
        }
        range
    }

    fn s(text: &str) -> Data {
        Data::String(text.to_string())
    }

    fn header() -> Vec<Data> {
        vec![
            s(" SA3 "),
            s("Median"),
            s("12M Price Change "),
            s("Yield"),
            s("Sales Turnover"),
            s("Buy Affordability"),
            s("Rent Affordability"),
        ]
    }

    #[test]
    fn test_headers_are_trimmed() {
        let range = sheet(&[header(), vec![s("Parramatta"), Data::Float(950_000.0)]]);
        let dataset = dataset_from_range(&range, &LoadOptions::default()).unwrap();
        assert_eq!(dataset.columns[0], "SA3");
        assert_eq!(dataset.columns[2], "12M Price Change");
        assert!(dataset.has_metric(Metric::PriceChange12m));
    }

    #[test]
    fn test_rows_are_converted() {
        let range = sheet(&[
            header(),
            vec![
                s("Parramatta"),
                Data::Float(950_000.0),
                Data::Float(4.5),
                s("3.8%"),
                Data::Int(12),
                Data::Float(7.1),
                Data::Float(28.0),
            ],
        ]);
        let dataset = dataset_from_range(&range, &LoadOptions::default()).unwrap();
        assert_eq!(dataset.len(), 1);
        let record = &dataset.records[0];
        assert_eq!(record.id, "Parramatta");
        assert_eq!(record.median, Some(950_000.0));
        assert_eq!(record.yield_pct, Some(3.8));
        assert_eq!(record.sales_turnover, Some(12.0));
        assert_eq!(record.investment_score, None);
    }

    #[test]
    fn test_blank_cells_are_missing() {
        let range = sheet(&[
            header(),
            vec![s("Blacktown"), Data::Empty, s("n/a"), Data::Float(4.0)],
        ]);
        let dataset = dataset_from_range(&range, &LoadOptions::default()).unwrap();
        let record = &dataset.records[0];
        assert_eq!(record.median, None);
        assert_eq!(record.price_change_12m, None);
        assert_eq!(record.yield_pct, Some(4.0));
        assert_eq!(record.rent_affordability, None);
    }

    #[test]
    fn test_rows_without_id_are_skipped() {
        let range = sheet(&[
            header(),
            vec![s("Ryde"), Data::Float(1_400_000.0)],
            vec![Data::Empty, Data::Float(1.0)],
            vec![s("   "), Data::Float(2.0)],
            vec![s("Hornsby"), Data::Float(1_300_000.0)],
        ]);
        let dataset = dataset_from_range(&range, &LoadOptions::default()).unwrap();
        let ids: Vec<&str> = dataset.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["Ryde", "Hornsby"]);
    }

    #[test]
    fn test_missing_id_column_is_error() {
        let range = sheet(&[vec![s("Region"), s("Median")], vec![s("Ryde"), Data::Float(1.0)]]);
        let err = dataset_from_range(&range, &LoadOptions::default()).unwrap_err();
        assert!(err.to_string().contains("'SA3'"));
    }

    #[test]
    fn test_custom_id_column() {
        let range = sheet(&[vec![s("Region"), s("Yield")], vec![s("Ryde"), Data::Float(3.0)]]);
        let options = LoadOptions {
            id_column: "Region".to_string(),
            ..LoadOptions::default()
        };
        let dataset = dataset_from_range(&range, &options).unwrap();
        assert_eq!(dataset.records[0].id, "Ryde");
        assert!(!dataset.has_metric(Metric::Median));
    }

    #[test]
    fn test_existing_score_column_is_loaded() {
        let range = sheet(&[
            vec![s("SA3"), s("Yield"), s("Investment_Score")],
            vec![s("Ryde"), Data::Float(3.0), Data::Float(0.42)],
        ]);
        let dataset = dataset_from_range(&range, &LoadOptions::default()).unwrap();
        assert!(dataset.has_column(SCORE_COLUMN));
        assert_eq!(dataset.records[0].investment_score, Some(0.42));
    }

    #[test]
    fn test_numeric_ids_are_kept_as_text() {
        let range = sheet(&[vec![s("SA3"), s("Yield")], vec![Data::Int(11703), Data::Float(3.0)]]);
        let dataset = dataset_from_range(&range, &LoadOptions::default()).unwrap();
        assert_eq!(dataset.records[0].id, "11703");
    }

    #[test]
    fn test_parse_number_formats() {
        assert_eq!(parse_number("$1,250,000"), Some(1_250_000.0));
        assert_eq!(parse_number(" 4.5% "), Some(4.5));
        assert_eq!(parse_number("-2.1"), Some(-2.1));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("-"), None);
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("suburb_radar_test_missing.xlsx");
        let _ = std::fs::remove_file(&path);
        let err = load_dataset(&path, &LoadOptions::default()).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
