//! Alpha / Beta attribution
//!
//! Splits a wallet's compounded return into the part explained by benchmark
//! exposure (beta) and the part left over for the trader's own decisions
//! (alpha), using a CAPM regression on daily excess returns.

pub mod attribution;
pub mod interpretation;

pub use attribution::{align_returns, AlignedReturns, AttributionCalculator, AttributionResult};
pub use interpretation::{
    interpret_attribution, AlphaBand, AttributionInterpretation, AttributionVerdict, BetaBand,
};
