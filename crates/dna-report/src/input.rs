use anyhow::Context;
use chrono::NaiveDate;
use dna_core::{ReturnSeries, TradeRecord};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Dated benchmark close
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// Everything the data collaborators deliver for one wallet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletInput {
    pub wallet_address: String,
    /// Daily wallet returns; derived from the ledger when empty
    pub wallet_returns: ReturnSeries,
    pub benchmark_returns: ReturnSeries,
    /// Benchmark closes, used when `benchmark_returns` is empty
    pub benchmark_prices: Vec<PricePoint>,
    pub trades: Vec<TradeRecord>,
    pub avg_minutes_before_pump: Option<f64>,
    /// Starting capital for ledger-derived returns; estimated when absent
    pub initial_capital: Option<f64>,
    /// Recompute `realized_pnl` with FIFO lot matching before analysis
    pub recompute_pnl: bool,
}

impl WalletInput {
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading wallet input {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing wallet input {}", path.display()))
    }

    /// Benchmark returns, falling back to pct-change over the price history.
    pub fn benchmark_series(&self) -> ReturnSeries {
        if !self.benchmark_returns.is_empty() || self.benchmark_prices.is_empty() {
            return self.benchmark_returns.clone();
        }
        let prices: Vec<(NaiveDate, f64)> = self
            .benchmark_prices
            .iter()
            .map(|p| (p.date, p.price))
            .collect();
        ReturnSeries::from_prices(&prices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_document_parses() {
        let input: WalletInput = serde_json::from_str(r#"{"wallet_address":"0xabc"}"#).unwrap();
        assert_eq!(input.wallet_address, "0xabc");
        assert!(input.trades.is_empty());
        assert!(input.wallet_returns.is_empty());
        assert!(!input.recompute_pnl);
    }

    #[test]
    fn test_trades_parse_from_json() {
        let json = r#"{
            "trades": [{
                "timestamp": "2024-06-01T10:00:00Z",
                "token_id": "So11111111111111111111111111111111111111112",
                "token_symbol": "SOL",
                "action": "buy",
                "amount": 2.5,
                "price": 160.0,
                "amount_usd": 400.0
            }]
        }"#;
        let input: WalletInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.trades.len(), 1);
        assert_eq!(input.trades[0].token_symbol, "SOL");
        assert!(input.trades[0].realized_pnl.is_zero());
    }

    #[test]
    fn test_benchmark_from_prices() {
        let json = r#"{
            "benchmark_prices": [
                {"date": "2024-06-01", "price": 3000.0},
                {"date": "2024-06-02", "price": 3300.0}
            ]
        }"#;
        let input: WalletInput = serde_json::from_str(json).unwrap();
        let series = input.benchmark_series();
        assert_eq!(series.len(), 1);
        assert!((series.values()[0] - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = WalletInput::from_json_file("/nonexistent/wallet.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/wallet.json"));
    }
}
