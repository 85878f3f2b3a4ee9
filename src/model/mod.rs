pub mod mover;
pub mod series;
pub mod ticker;

pub use mover::{AnomalyEntry, Direction, MoverEntry, RankedList, SetupEntry, SetupTag};
pub use series::{KlineBar, OpenInterestPoint, TradePrint, TradeSide};
pub use ticker::{FundingRate, TickerSnapshot};
