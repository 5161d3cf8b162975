use crate::core::view::ViewResult;
use crate::domain::column::ColumnSpec;
use crate::utils::error::{Result, ScerosError};
use std::fmt::Write as _;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Tsv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ScerosError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            "json" => Ok(OutputFormat::Json),
            other => Err(ScerosError::InvalidConfigValueError {
                field: "format".to_string(),
                value: other.to_string(),
                reason: "Valid formats: table, csv, tsv, json".to_string(),
            }),
        }
    }
}

pub fn render(view: &ViewResult<'_>, columns: &[ColumnSpec], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(view, columns)),
        OutputFormat::Csv => render_delimited(view, columns, b','),
        OutputFormat::Tsv => render_delimited(view, columns, b'\t'),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&view.visible)?),
    }
}

fn cells(view: &ViewResult<'_>, columns: &[ColumnSpec]) -> Vec<Vec<String>> {
    view.visible
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|column| column.display(record.get(&column.key)))
                .collect()
        })
        .collect()
}

/// Aligned text table with a pager footer.
pub fn render_table(view: &ViewResult<'_>, columns: &[ColumnSpec]) -> String {
    let rows = cells(view, columns);
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(column.label.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(column, width)| pad(&column.label, *width))
        .collect();
    let _ = writeln!(out, "{}", header.join("  ").trim_end());
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("  "));

    for row in &rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| pad(cell, *width))
            .collect();
        let _ = writeln!(out, "{}", line.join("  ").trim_end());
    }

    match view.showing() {
        Some((first, last, total)) => {
            let _ = writeln!(
                out,
                "\nShowing {} to {} of {} results (page {} of {})",
                first, last, total, view.page, view.total_pages
            );
        }
        None => {
            let _ = writeln!(out, "\nNo results");
        }
    }
    out
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

fn render_delimited(view: &ViewResult<'_>, columns: &[ColumnSpec], delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(columns.iter().map(|c| c.label.as_str()))?;
    for row in cells(view, columns) {
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ScerosError::IoError(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| ScerosError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}
