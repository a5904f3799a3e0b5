//! Trader DNA report: runs attribution, risk metrics, time decay and the
//! behavior classifier over one wallet and bundles the results.

pub mod input;
pub mod report;
mod tests;

pub use input::{PricePoint, WalletInput};
pub use report::{analyze_wallet, build_tag_inputs, DnaReport, LedgerSummary};
