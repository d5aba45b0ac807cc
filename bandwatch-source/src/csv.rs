use async_stream::stream;
use bandwatch_shared::*;
use bytestring::ByteString;
use eyre::{Context, OptionExt, Result};
use futures::{Stream, StreamExt};
use serde::de::DeserializeOwned;
use std::{path::Path, pin::Pin};
use tokio::fs::File;
use tracing::debug;

pub type RecordStream<T> = Pin<Box<dyn Stream<Item = Result<T>> + Send>>;

pub type MarketDataStream = RecordStream<MarketData>;

/// CSV 报价数据流
///
/// CSV 格式：timestamp_ms,symbol,bid,ask,bid_size,ask_size
pub async fn csv_quote_stream(path: impl AsRef<Path>) -> Result<RecordStream<QuoteData>> {
    csv_record_stream::<CsvQuoteRecord, QuoteData>(path.as_ref()).await
}

/// CSV 交易数据流
///
/// CSV 格式：timestamp_ms,symbol,price,quantity,side
pub async fn csv_trade_stream(path: impl AsRef<Path>) -> Result<RecordStream<TradeData>> {
    csv_record_stream::<CsvTradeRecord, TradeData>(path.as_ref()).await
}

/// CSV K线数据流
///
/// CSV 格式：open_timestamp_ms,symbol,interval_sc,open,high,low,close,volume
pub async fn csv_bar_stream(path: impl AsRef<Path>) -> Result<RecordStream<BarData>> {
    csv_record_stream::<CsvBarRecord, BarData>(path.as_ref()).await
}

/// 按数据类型打开对应的 CSV 数据流，统一输出 [`MarketData`]
pub async fn csv_market_data_stream(
    path: impl AsRef<Path>,
    kind: MarketDataType,
) -> Result<MarketDataStream> {
    let path = path.as_ref();
    let stream: MarketDataStream = match kind {
        MarketDataType::Quote => Box::pin(
            csv_record_stream::<CsvQuoteRecord, QuoteData>(path)
                .await?
                .map(|r| r.map(MarketData::from)),
        ),
        MarketDataType::Trade => Box::pin(
            csv_record_stream::<CsvTradeRecord, TradeData>(path)
                .await?
                .map(|r| r.map(MarketData::from)),
        ),
        MarketDataType::Bar => Box::pin(
            csv_record_stream::<CsvBarRecord, BarData>(path)
                .await?
                .map(|r| r.map(MarketData::from)),
        ),
    };

    Ok(stream)
}

async fn csv_record_stream<R, T>(path: &Path) -> Result<RecordStream<T>>
where
    R: DeserializeOwned + Send + 'static,
    T: TryFrom<R, Error = eyre::Error> + Send + 'static,
{
    let file = File::open(path)
        .await
        .with_context(|| format!("Failed to open file: {}", path.display()))?;
    debug!(path = %path.display(), "opened csv source");

    let stream = stream! {
        let mut reader = csv_async::AsyncReaderBuilder::new()
            .has_headers(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(file);

        let mut records = reader.deserialize::<R>();

        while let Some(record) = records.next().await {
            match record {
                Ok(rec) => yield T::try_from(rec),
                Err(e) => yield Err(e.into()),
            }
        }
    };

    Ok(Box::pin(stream))
}

// ========== CSV 记录结构 ==========

// 价格列允许为空，以便在转换时给出明确的缺失字段错误
fn required(value: Option<f64>, field: &'static str) -> Result<f64> {
    value.ok_or_eyre(format!("Missing field: {field}"))
}

#[derive(Debug, serde::Deserialize)]
struct CsvQuoteRecord {
    timestamp_ms: TimestampMs,
    symbol: String,
    bid: Option<f64>,
    ask: Option<f64>,
    #[serde(default)]
    bid_size: Option<f64>,
    #[serde(default)]
    ask_size: Option<f64>,
}

impl TryFrom<CsvQuoteRecord> for QuoteData {
    type Error = eyre::Error;

    fn try_from(rec: CsvQuoteRecord) -> Result<Self> {
        Ok(QuoteData {
            symbol: ByteString::from(rec.symbol),
            timestamp_ms: rec.timestamp_ms,
            bid: required(rec.bid, "bid")?,
            ask: required(rec.ask, "ask")?,
            bid_size: rec.bid_size.unwrap_or_default(),
            ask_size: rec.ask_size.unwrap_or_default(),
        })
    }
}

#[derive(Debug, serde::Deserialize)]
struct CsvTradeRecord {
    timestamp_ms: TimestampMs,
    symbol: String,
    price: Option<f64>,
    quantity: f64,
    side: String,
}

impl TryFrom<CsvTradeRecord> for TradeData {
    type Error = eyre::Error;

    fn try_from(rec: CsvTradeRecord) -> Result<Self> {
        let side = rec
            .side
            .parse::<Side>()
            .map_err(|_| eyre::eyre!("Invalid side: {}", rec.side))?;

        Ok(TradeData {
            symbol: ByteString::from(rec.symbol),
            timestamp_ms: rec.timestamp_ms,
            price: required(rec.price, "price")?,
            quantity: rec.quantity,
            side,
        })
    }
}

#[derive(Debug, serde::Deserialize)]
struct CsvBarRecord {
    open_timestamp_ms: TimestampMs,
    symbol: String,
    interval_sc: IntervalSc,
    open: Option<f64>,
    high: Option<f64>,
    low: Option<f64>,
    close: Option<f64>,
    volume: f64,
}

impl TryFrom<CsvBarRecord> for BarData {
    type Error = eyre::Error;

    fn try_from(rec: CsvBarRecord) -> Result<Self> {
        Ok(BarData {
            symbol: ByteString::from(rec.symbol),
            interval_sc: rec.interval_sc,
            open_timestamp_ms: rec.open_timestamp_ms,
            open: required(rec.open, "open")?,
            high: required(rec.high, "high")?,
            low: required(rec.low, "low")?,
            close: required(rec.close, "close")?,
            volume: rec.volume,
        })
    }
}
