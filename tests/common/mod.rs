#![allow(dead_code)]

use bandwatch_shared::{BarData, IntervalSc, Symbol, TimestampMs};
use std::sync::OnceLock;

pub const SYMBOL: &str = "BTC-USDT";

pub fn setup() {
    static START: OnceLock<()> = OnceLock::new();

    START.get_or_init(|| {
        let level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let _ = bandwatch::logging::init_tracing(&level);
    });
}

pub fn bar(
    open_timestamp_ms: TimestampMs,
    interval_sc: IntervalSc,
    high: f64,
    low: f64,
    close: f64,
) -> BarData {
    BarData {
        symbol: Symbol::from(SYMBOL),
        interval_sc,
        open_timestamp_ms,
        open: close,
        high,
        low,
        close,
        volume: 1.0,
    }
}

/// 可复现的伪随机价格序列
pub fn price_path(len: usize) -> Vec<f64> {
    let mut price = 100.0;
    (0..len)
        .map(|i| {
            let step = ((i * 7919 % 113) as f64 - 56.0) / 40.0;
            price += step;
            price
        })
        .collect()
}
