//! News-blended combination strategies.
//!
//! Every strategy pairs one technical trigger with the shared news sentiment
//! aggregate and blends them through [`fusion::fuse`]. Only a technical
//! trigger can produce a BUY; news can raise or lower conviction but never
//! fire a trade on its own.

pub mod breakout;
pub mod fusion;
pub mod mean_reversion;
pub mod registry;
pub mod trend_pullback;

pub use breakout::BreakoutStrategy;
pub use fusion::{fuse, Fusion};
pub use mean_reversion::MeanReversionStrategy;
pub use registry::{build_combined_strategies, StrategyRegistry};
pub use trend_pullback::TrendPullbackStrategy;

/// Reason attached when a strategy has too little history to decide.
pub const NOT_ENOUGH_CANDLES: &str = "not_enough_candles";
