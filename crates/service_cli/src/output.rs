//! Report output helpers shared by the commands

use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;

use crate::Result;

/// Output format for command reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Pretty-printed JSON document
    Json,
    /// CSV rows with a header line
    Csv,
}

/// Write `value` as pretty JSON followed by a newline
pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Write serialisable rows as CSV with a header
pub fn write_csv<W: Write, T: Serialize>(out: W, rows: impl IntoIterator<Item = T>) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Amount with thousands separators and an optional currency code
pub fn format_amount(value: f64, currency: &str) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let rounded = format!("{:.2}", value.abs());
    let (whole, fraction) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && rounded != "0.00" { "-" } else { "" };
    if currency.is_empty() {
        format!("{sign}{grouped}.{fraction}")
    } else {
        format!("{sign}{grouped}.{fraction} {currency}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        x: f64,
        label: &'static str,
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0, ""), "0.00");
        assert_eq!(format_amount(999.994, ""), "999.99");
        assert_eq!(format_amount(1_234_567.891, "EUR"), "1,234,567.89 EUR");
        assert_eq!(format_amount(-12_000.0, "USD"), "-12,000.00 USD");
        assert_eq!(format_amount(f64::INFINITY, ""), "inf");
    }

    #[test]
    fn test_write_csv_header_and_rows() {
        let mut buffer = Vec::new();
        write_csv(
            &mut buffer,
            [Row { x: 1.5, label: "a" }, Row { x: 2.0, label: "b" }],
        )
        .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "x,label\n1.5,a\n2.0,b\n");
    }

    #[test]
    fn test_write_json_trailing_newline() {
        let mut buffer = Vec::new();
        write_json(&mut buffer, &Row { x: 1.0, label: "a" }).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.ends_with("}\n"));
        assert!(text.contains("\"label\": \"a\""));
    }
}
