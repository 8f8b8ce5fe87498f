use crate::candle::Candle;
use crate::signal::StrategyResult;
use crate::timeframe::Timeframe;

/// A signal strategy: immutable metadata plus a pure signal function.
///
/// `generate_signal` never fails. Thin data degrades to a HOLD result with a
/// `reason` code in `extra`.
pub trait Strategy: Send + Sync {
    /// Stable slug used as the external identifier.
    fn code(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    fn timeframe(&self) -> Timeframe;

    /// Computes a signal from an ascending candle window.
    fn generate_signal(&self, symbol: &str, candles: &[Candle]) -> StrategyResult;
}
