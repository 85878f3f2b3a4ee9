pub mod anomaly;
pub mod atr;
pub mod flow_delta;
pub mod oi_shock;
pub mod setup;
pub mod trend;

pub use anomaly::{anomaly_score, AnomalyWeights};
pub use atr::{atr, Atr};
pub use flow_delta::{flow_delta, normalize_side, FlowDelta};
pub use oi_shock::oi_shock;
pub use setup::{classify, SetupParams};
pub use trend::{ema_last, rsi_last};
