use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{DataError, DataResult, IntervalSc, Symbol, TimestampMs};

pub const BAR_INTERVAL_SEC1: IntervalSc = 1;
pub const BAR_INTERVAL_MIN1: IntervalSc = 60;
pub const BAR_INTERVAL_MIN5: IntervalSc = 300;
pub const BAR_INTERVAL_MIN15: IntervalSc = 900;
pub const BAR_INTERVAL_H1: IntervalSc = 3600;
pub const BAR_INTERVAL_H4: IntervalSc = 14400;
pub const BAR_INTERVAL_D1: IntervalSc = 86400;

#[derive(Debug, Clone, PartialEq, strum::EnumDiscriminants)]
#[strum_discriminants(vis(pub), name(MarketDataType))]
#[strum_discriminants(derive(strum::EnumString, strum::Display, Serialize, Deserialize))]
#[strum_discriminants(strum(ascii_case_insensitive, serialize_all = "lowercase"))]
#[strum_discriminants(serde(rename_all = "lowercase"))]
pub enum MarketData {
    Quote(QuoteData),
    Trade(TradeData),
    Bar(BarData),
}

impl MarketData {
    pub fn symbol(&self) -> &Symbol {
        match self {
            MarketData::Quote(q) => &q.symbol,
            MarketData::Trade(t) => &t.symbol,
            MarketData::Bar(b) => &b.symbol,
        }
    }

    /// 报价和成交取事件时间，K线取开盘时间。
    pub fn timestamp_ms(&self) -> TimestampMs {
        match self {
            MarketData::Quote(q) => q.timestamp_ms,
            MarketData::Trade(t) => t.timestamp_ms,
            MarketData::Bar(b) => b.open_timestamp_ms,
        }
    }
}

impl From<QuoteData> for MarketData {
    fn from(data: QuoteData) -> Self {
        MarketData::Quote(data)
    }
}

impl From<TradeData> for MarketData {
    fn from(data: TradeData) -> Self {
        MarketData::Trade(data)
    }
}

impl From<BarData> for MarketData {
    fn from(data: BarData) -> Self {
        MarketData::Bar(data)
    }
}

/// 最优买卖报价
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuoteData {
    pub symbol: Symbol,
    pub timestamp_ms: TimestampMs,
    pub bid: f64,
    pub ask: f64,
    pub bid_size: f64,
    pub ask_size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeData {
    pub symbol: Symbol,
    pub timestamp_ms: TimestampMs,
    pub price: f64,
    pub quantity: f64,
    pub side: Side,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BarData {
    pub symbol: Symbol,
    pub interval_sc: IntervalSc,
    pub open_timestamp_ms: TimestampMs,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl BarData {
    pub(crate) fn new_with_trade(trade: &TradeData, interval_sc: IntervalSc) -> Self {
        Self {
            symbol: trade.symbol.clone(),
            interval_sc,
            open_timestamp_ms: floor_to_interval(trade.timestamp_ms, interval_sc),
            open: trade.price,
            high: trade.price,
            low: trade.price,
            close: trade.price,
            volume: trade.quantity,
        }
    }

    /// K线收盘时间（不含）
    #[inline]
    pub fn close_timestamp_ms(&self) -> TimestampMs {
        self.open_timestamp_ms.saturating_add(self.interval_sc.saturating_mul(1000))
    }

    #[inline]
    pub(crate) fn unchecked_agg_with_trade(&mut self, trade: &TradeData) {
        self.high = self.high.max(trade.price);
        self.low = self.low.min(trade.price);
        self.close = trade.price;
        self.volume += trade.quantity;
    }

    /// # Error
    ///
    /// - Return `DataError::MismatchedSymbol` if the symbol of the trade does not match the bar's symbol.
    /// - Return `DataError::UnexpectedTimestamp` if the trade happened before the bar's open timestamp.
    pub fn agg_with_trade(&mut self, trade: &TradeData) -> DataResult<()> {
        if self.symbol != trade.symbol {
            return Err(DataError::MismatchedSymbol {
                expected: self.symbol.clone(),
                found: trade.symbol.clone(),
            });
        }

        if trade.timestamp_ms < self.open_timestamp_ms {
            return Err(DataError::timestamp_should_be_after(
                self.open_timestamp_ms,
                trade.timestamp_ms,
            ));
        }

        self.unchecked_agg_with_trade(trade);
        Ok(())
    }
}

/// K线周期换算为毫秒
///
/// # Error
///
/// - Return `DataError::ZeroInterval` if `interval_sc` is 0.
/// - Return `DataError::IntervalTooLarge` if the interval in milliseconds overflows `u64`.
pub fn interval_ms(interval_sc: IntervalSc) -> DataResult<TimestampMs> {
    if interval_sc == 0 {
        return Err(DataError::ZeroInterval);
    }
    interval_sc
        .checked_mul(1000)
        .ok_or(DataError::IntervalTooLarge { interval_sc })
}

#[inline]
fn floor_to_interval(timestamp_ms: TimestampMs, interval_sc: IntervalSc) -> TimestampMs {
    timestamp_ms - (timestamp_ms % interval_sc.saturating_mul(1000))
}

/// 将逐笔成交聚合为固定周期K线
///
/// 当后一个周期的第一笔成交到达时，前一根K线才算完成并被返回。
#[derive(Debug, Clone)]
pub struct TradeBarAggregator {
    interval_sc: IntervalSc,
    current: Option<BarData>,
}

impl TradeBarAggregator {
    pub fn new(interval_sc: IntervalSc) -> DataResult<Self> {
        interval_ms(interval_sc)?;

        Ok(Self {
            interval_sc,
            current: None,
        })
    }

    pub fn interval_sc(&self) -> IntervalSc {
        self.interval_sc
    }

    /// 尚未完成的K线
    pub fn pending(&self) -> Option<&BarData> {
        self.current.as_ref()
    }

    /// # Error
    ///
    /// Same as [`BarData::agg_with_trade`]; the pending bar is left untouched on error.
    pub fn push(&mut self, trade: &TradeData) -> DataResult<Option<BarData>> {
        let Some(current) = self.current.as_mut() else {
            self.current = Some(BarData::new_with_trade(trade, self.interval_sc));
            return Ok(None);
        };

        if trade.timestamp_ms >= current.close_timestamp_ms() {
            if current.symbol != trade.symbol {
                return Err(DataError::MismatchedSymbol {
                    expected: current.symbol.clone(),
                    found: trade.symbol.clone(),
                });
            }

            let completed = self
                .current
                .replace(BarData::new_with_trade(trade, self.interval_sc));
            trace!(?completed, "bar completed");
            return Ok(completed);
        }

        current.agg_with_trade(trade)?;
        Ok(None)
    }

    /// 取出尚未完成的K线（例如数据流结束时）
    pub fn flush(&mut self) -> Option<BarData> {
        self.current.take()
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumString,
    strum::Display,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[strum(to_string = "buy", serialize = "bid")]
    #[serde(alias = "BUY", alias = "bid")]
    Buy,
    #[strum(to_string = "sell", serialize = "ask")]
    #[serde(alias = "SELL", alias = "ask")]
    Sell,
}
