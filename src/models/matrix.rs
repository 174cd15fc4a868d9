use serde::Serialize;

use super::config::WindowMinutes;
use super::ticker::Ticker;

/// Square grid of pairwise correlation coefficients.
///
/// `values[i][j]` correlates `tickers[i]` with `tickers[j]`. Renderers must
/// label both axes with `tickers` in this exact order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub window: WindowMinutes,
    pub tickers: Vec<Ticker>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Number of tickers (rows == columns).
    pub fn size(&self) -> usize {
        self.tickers.len()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get(row)?.get(col).copied()
    }

    /// Coefficient between two tickers by name.
    pub fn coefficient(&self, a: &Ticker, b: &Ticker) -> Option<f64> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        self.get(i, j)
    }

    pub fn index_of(&self, ticker: &Ticker) -> Option<usize> {
        self.tickers.iter().position(|t| t == ticker)
    }

    pub fn rows(&self) -> impl Iterator<Item = (&Ticker, &[f64])> {
        self.tickers
            .iter()
            .zip(self.values.iter().map(|row| row.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CorrelationMatrix {
        CorrelationMatrix {
            window: WindowMinutes::new(60).unwrap(),
            tickers: vec![Ticker::from("AAA"), Ticker::from("BBB")],
            values: vec![vec![1.0, -0.5], vec![-0.5, 1.0]],
        }
    }

    #[test]
    fn test_lookup_by_ticker() {
        let m = sample();
        assert_eq!(m.size(), 2);
        assert_eq!(m.coefficient(&"AAA".into(), &"BBB".into()), Some(-0.5));
        assert_eq!(m.coefficient(&"AAA".into(), &"ZZZ".into()), None);
        assert_eq!(m.get(2, 0), None);
    }

    #[test]
    fn test_rows_follow_ticker_order() {
        let m = sample();
        let labels: Vec<&str> = m.rows().map(|(t, _)| t.as_str()).collect();
        assert_eq!(labels, vec!["AAA", "BBB"]);
    }

    #[test]
    fn test_serializes_labels_with_values() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["window"], 60);
        assert_eq!(json["tickers"][1], "BBB");
        assert_eq!(json["values"][0][1], -0.5);
    }
}
