use std::fmt::Write as FmtWrite;
use std::io::Write;

use serde::Serialize;

use crate::errors::AppError;
use crate::models::matrix::CorrelationMatrix;
use crate::models::summary::SeriesSummary;

/// Write a correlation matrix as CSV: a `ticker` header column, one row per
/// ticker, full-precision coefficients.
pub fn write_matrix_csv<W: Write>(matrix: &CorrelationMatrix, out: W) -> Result<(), AppError> {
    let mut wtr = csv::Writer::from_writer(out);

    let mut header = Vec::with_capacity(matrix.size() + 1);
    header.push("ticker");
    header.extend(matrix.tickers.iter().map(|t| t.as_str()));
    wtr.write_record(&header)?;

    for (ticker, row) in matrix.rows() {
        let mut record = Vec::with_capacity(row.len() + 1);
        record.push(ticker.to_string());
        record.extend(row.iter().map(|r| r.to_string()));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write a correlation matrix as an aligned plain-text table, two decimals
/// per cell.
pub fn write_matrix_table<W: Write>(matrix: &CorrelationMatrix, mut out: W) -> Result<(), AppError> {
    // "-1.00" is the widest cell.
    let width = matrix
        .tickers
        .iter()
        .map(|t| t.as_str().chars().count())
        .max()
        .unwrap_or(0)
        .max(5);

    let mut text = String::new();
    let _ = write!(text, "{:<width$}", "", width = width);
    for ticker in &matrix.tickers {
        let _ = write!(text, "  {:>width$}", ticker.as_str(), width = width);
    }
    text.push('\n');

    for (ticker, row) in matrix.rows() {
        let _ = write!(text, "{:<width$}", ticker.as_str(), width = width);
        for r in row {
            let _ = write!(text, "  {:>width$.2}", r, width = width);
        }
        text.push('\n');
    }

    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Write per-ticker summaries as CSV.
pub fn write_summaries_csv<W: Write>(summaries: &[SeriesSummary], out: W) -> Result<(), AppError> {
    let mut wtr = csv::Writer::from_writer(out);

    wtr.write_record([
        "ticker",
        "points",
        "first",
        "last",
        "min",
        "max",
        "change_pct",
        "mean",
        "std_dev",
    ])?;

    for s in summaries {
        wtr.write_record([
            s.ticker.to_string(),
            s.points.to_string(),
            format!("{:.4}", s.first),
            format!("{:.4}", s.last),
            format!("{:.4}", s.min),
            format!("{:.4}", s.max),
            format!("{:.2}", s.change_pct),
            format!("{:.4}", s.mean),
            format!("{:.4}", s.std_dev),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write any serializable value as pretty-printed JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(value: &T, mut out: W) -> Result<(), AppError> {
    serde_json::to_writer_pretty(&mut out, value)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}
