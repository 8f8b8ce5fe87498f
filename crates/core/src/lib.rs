pub mod candle;
pub mod clock;
pub mod config;
pub mod config_loader;
pub mod news;
pub mod signal;
pub mod timeframe;
pub mod traits;

pub use candle::{closes, Candle};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{
    AppConfig, BreakoutConfig, DatabaseConfig, FusionConfig, MeanReversionConfig, RunnerConfig,
    SentimentConfig, StrategiesConfig, TrendPullbackConfig,
};
pub use config_loader::ConfigLoader;
pub use news::{NewsItem, NewsSource, StaticNewsSource};
pub use signal::{round_to, SignalType, StrategyResult};
pub use timeframe::Timeframe;
pub use traits::Strategy;
