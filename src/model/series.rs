/// One OHLC kline bar. Bars must be sorted chronologically ascending
/// before any indicator math; Bybit delivers them newest-first.
#[derive(Debug, Clone, Copy)]
pub struct KlineBar {
    pub open_time: u64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// One open-interest sample. The upstream list is newest-first.
#[derive(Debug, Clone, Copy)]
pub struct OpenInterestPoint {
    pub timestamp: u64,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeSide {
    Buy,
    Sell,
}

/// One executed trade with its normalized aggressor side.
#[derive(Debug, Clone, Copy)]
pub struct TradePrint {
    pub side: TradeSide,
    pub size: f64,
}
