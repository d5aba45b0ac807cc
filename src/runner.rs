use crate::config::{IndicatorConfig, Validate};
use bandwatch_indicator::{BollingerBands, Indicator};
use bandwatch_shared::{MarketData, Symbol, TimestampMs, TradeBarAggregator};
use eyre::Result;
use futures::{Stream, StreamExt};
use serde::Serialize;
use std::io;
use tracing::{debug, info, warn};

/// 输出 CSV 的一行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandRow {
    pub timestamp_ms: TimestampMs,
    pub symbol: String,
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
    pub initialized: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// 送入指标的数据条数
    pub processed: usize,
    /// 解析失败、标的不符或聚合失败而跳过的条数
    pub skipped: usize,
    /// 预热期内（窗口未满）输出的行数
    pub warm_up: usize,
}

/// 驱动数据流经过布林带指标并写出结果
#[derive(Debug)]
pub struct BandRunner {
    symbol: Symbol,
    indicator: BollingerBands,
    aggregator: Option<TradeBarAggregator>,
}

impl BandRunner {
    pub fn new(config: &IndicatorConfig) -> Result<Self> {
        config.validate()?;

        let aggregator = config
            .bar_interval_sc
            .map(TradeBarAggregator::new)
            .transpose()?;

        Ok(Self {
            symbol: Symbol::from(config.symbol.as_str()),
            indicator: config.build()?,
            aggregator,
        })
    }

    pub fn indicator(&self) -> &BollingerBands {
        &self.indicator
    }

    pub async fn run<S, W>(
        &mut self,
        mut stream: S,
        writer: &mut csv::Writer<W>,
    ) -> Result<RunSummary>
    where
        S: Stream<Item = Result<MarketData>> + Unpin,
        W: io::Write,
    {
        let mut summary = RunSummary::default();

        while let Some(item) = stream.next().await {
            let data = match item {
                Ok(data) => data,
                Err(e) => {
                    warn!(error = %e, "skipping malformed record");
                    summary.skipped += 1;
                    continue;
                }
            };

            if data.symbol() != &self.symbol {
                debug!(symbol = %data.symbol(), "skipping record of other symbol");
                summary.skipped += 1;
                continue;
            }

            let data = match self.aggregate(data) {
                Ok(Some(data)) => data,
                Ok(None) => continue,
                Err(e) => {
                    warn!(error = %e, "skipping trade rejected by bar aggregation");
                    summary.skipped += 1;
                    continue;
                }
            };

            let timestamp_ms = data.timestamp_ms();
            let Some(value) = self.indicator.update(data) else {
                continue;
            };

            let initialized = self.indicator.initialized();
            writer.serialize(BandRow {
                timestamp_ms,
                symbol: self.symbol.to_string(),
                upper: value.upper,
                middle: value.middle,
                lower: value.lower,
                initialized,
            })?;

            summary.processed += 1;
            if !initialized {
                summary.warm_up += 1;
            }
        }

        writer.flush()?;

        if let Some(pending) = self.aggregator.as_ref().and_then(|agg| agg.pending()) {
            debug!(open_timestamp_ms = pending.open_timestamp_ms, "dropping incomplete bar");
        }
        info!(
            indicator = %self.indicator,
            processed = summary.processed,
            skipped = summary.skipped,
            warm_up = summary.warm_up,
            "run finished"
        );

        Ok(summary)
    }

    // 只有成交数据在配置了聚合周期时才会被聚合
    fn aggregate(&mut self, data: MarketData) -> Result<Option<MarketData>> {
        match (&mut self.aggregator, data) {
            (Some(aggregator), MarketData::Trade(trade)) => {
                Ok(aggregator.push(&trade)?.map(MarketData::from))
            }
            (_, data) => Ok(Some(data)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup;
    use approx::assert_abs_diff_eq;
    use bandwatch_shared::{BAR_INTERVAL_MIN1, QuoteData, Side, TradeData};

    fn trade(symbol: &str, timestamp_ms: TimestampMs, price: f64) -> MarketData {
        MarketData::Trade(TradeData {
            symbol: Symbol::from(symbol),
            timestamp_ms,
            price,
            quantity: 1.0,
            side: Side::Buy,
        })
    }

    fn read_rows(bytes: &[u8]) -> Vec<csv::StringRecord> {
        csv::Reader::from_reader(bytes)
            .records()
            .collect::<std::result::Result<_, _>>()
            .unwrap()
    }

    #[tokio::test]
    async fn test_run_writes_one_row_per_update() {
        setup();

        let config = IndicatorConfig::new("BTC-USDT").with_period(2);
        let mut runner = BandRunner::new(&config).unwrap();

        let items = vec![
            Ok(trade("BTC-USDT", 1, 10.0)),
            Err(eyre::eyre!("Missing field: price")),
            Ok(trade("ETH-USDT", 2, 99.0)),
            Ok(trade("BTC-USDT", 3, 20.0)),
            Ok(trade("BTC-USDT", 4, 20.0)),
        ];

        let mut writer = csv::Writer::from_writer(vec![]);
        let summary = runner
            .run(futures::stream::iter(items), &mut writer)
            .await
            .unwrap();

        assert_eq!(
            summary,
            RunSummary {
                processed: 3,
                skipped: 2,
                warm_up: 1,
            }
        );

        let bytes = writer.into_inner().unwrap();
        let rows = read_rows(&bytes);
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][0], "1");
        assert_eq!(&rows[0][1], "BTC-USDT");
        assert_eq!(&rows[0][5], "false");
        assert_eq!(rows[1][2].parse::<f64>().unwrap(), 25.0);
        assert_eq!(&rows[1][5], "true");

        assert_abs_diff_eq!(runner.indicator().middle(), 20.0);
        assert_abs_diff_eq!(runner.indicator().upper(), 20.0);
    }

    #[tokio::test]
    async fn test_run_aggregates_trades_into_bars() {
        setup();

        let config = IndicatorConfig::new("BTC-USDT")
            .with_period(2)
            .with_bar_interval(BAR_INTERVAL_MIN1);
        let mut runner = BandRunner::new(&config).unwrap();

        let items = vec![
            Ok(trade("BTC-USDT", 0, 10.0)),
            Ok(trade("BTC-USDT", 30_000, 16.0)),
            Ok(trade("BTC-USDT", 59_000, 13.0)),
            // 第一根K线完成：high 16, low 10, close 13
            Ok(trade("BTC-USDT", 60_000, 20.0)),
            // 第二根K线完成：20/20/20
            Ok(trade("BTC-USDT", 120_000, 30.0)),
        ];

        let mut writer = csv::Writer::from_writer(vec![]);
        let summary = runner
            .run(futures::stream::iter(items), &mut writer)
            .await
            .unwrap();

        assert_eq!(summary.processed, 2);
        assert_eq!(summary.skipped, 0);

        let rows = read_rows(&writer.into_inner().unwrap());
        assert_eq!(&rows[0][0], "0");
        assert_eq!(&rows[1][0], "60000");
        assert_abs_diff_eq!(runner.indicator().middle(), 16.5);
    }

    #[tokio::test]
    async fn test_run_passes_quotes_through_aggregation() {
        setup();

        let config = IndicatorConfig::new("BTC-USDT").with_bar_interval(BAR_INTERVAL_MIN1);
        let mut runner = BandRunner::new(&config).unwrap();

        let quote = MarketData::Quote(QuoteData {
            symbol: Symbol::from("BTC-USDT"),
            timestamp_ms: 5,
            bid: 100.0,
            ask: 100.0,
            bid_size: 1.0,
            ask_size: 1.0,
        });

        let mut writer = csv::Writer::from_writer(vec![]);
        let summary = runner
            .run(futures::stream::iter(vec![Ok(quote)]), &mut writer)
            .await
            .unwrap();

        assert_eq!(summary.processed, 1);
        assert!(runner.indicator().has_inputs());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        assert!(BandRunner::new(&IndicatorConfig::new("BTC-USDT").with_k(0.0)).is_err());
        assert!(BandRunner::new(&IndicatorConfig::new("BTC-USDT").with_bar_interval(0)).is_err());
        assert!(
            BandRunner::new(&IndicatorConfig::new("BTC-USDT").with_bar_interval(u64::MAX / 100))
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_run_with_daily_bars_near_timestamp_limit() {
        setup();

        let config = IndicatorConfig::new("BTC-USDT")
            .with_period(2)
            .with_bar_interval(bandwatch_shared::BAR_INTERVAL_D1);
        let mut runner = BandRunner::new(&config).unwrap();

        let items = vec![
            Ok(trade("BTC-USDT", u64::MAX - 10, 10.0)),
            Ok(trade("BTC-USDT", u64::MAX - 5, 12.0)),
        ];

        let mut writer = csv::Writer::from_writer(vec![]);
        let summary = runner
            .run(futures::stream::iter(items), &mut writer)
            .await
            .unwrap();

        // 收盘时间饱和于 u64::MAX，两笔成交都留在未完成的K线里
        assert_eq!(summary.processed, 0);
        assert_eq!(summary.skipped, 0);
        assert!(!runner.indicator().has_inputs());
    }
}
