//! CSV export in the two layouts downstream spreadsheets expect.

use std::io::Write;

use crate::error::MarketError;
use crate::model::ReconciledMarket;
use crate::seasonal::MonthlyRow;

pub const ANNUAL_HEADER: [&str; 4] = ["Submarket", "STR Revenue", "Median Rent", "Revenue Multiple"];

pub const MONTHLY_HEADER: [&str; 6] = [
    "Year",
    "Submarket",
    "Month",
    "STR Revenue",
    "Median Rent",
    "Revenue-to-Rent Multiple",
];

fn format_multiple(multiple: f64) -> String {
    format!("{multiple:.2}")
}

/// One row per market, in the given order.
pub fn write_annual_csv(markets: &[ReconciledMarket], writer: impl Write) -> Result<(), MarketError> {
    let mut csv = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv.write_record(ANNUAL_HEADER)?;
    for m in markets {
        csv.write_record(&[
            m.submarket.clone(),
            m.str_revenue.to_string(),
            m.median_rent.to_string(),
            format_multiple(m.multiple),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

/// Twelve rows per market as produced by [`crate::seasonal::expand_seasonal`].
pub fn write_monthly_csv(rows: &[MonthlyRow], writer: impl Write) -> Result<(), MarketError> {
    let mut csv = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv.write_record(MONTHLY_HEADER)?;
    for row in rows {
        csv.write_record(&[
            row.year.to_string(),
            row.submarket.clone(),
            row.month.to_string(),
            row.str_revenue.to_string(),
            row.median_rent.to_string(),
            format_multiple(row.multiple),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

pub fn annual_csv_string(markets: &[ReconciledMarket]) -> Result<String, MarketError> {
    let mut buf = Vec::new();
    write_annual_csv(markets, &mut buf)?;
    String::from_utf8(buf).map_err(|e| MarketError::Csv(e.to_string()))
}

pub fn monthly_csv_string(rows: &[MonthlyRow]) -> Result<String, MarketError> {
    let mut buf = Vec::new();
    write_monthly_csv(rows, &mut buf)?;
    String::from_utf8(buf).map_err(|e| MarketError::Csv(e.to_string()))
}
