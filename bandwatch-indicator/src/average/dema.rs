use super::{EMA, MovingAverage};

/// 双重指数移动平均线 (Double Exponential Moving Average)
///
/// `DEMA = 2 * EMA(price) - EMA(EMA(price))`，用来减小 EMA 的滞后。
#[derive(Debug, Clone)]
pub struct DEMA {
    period: usize,
    ema1: EMA,
    ema2: EMA,
    value: f64,
    count: usize,
}

impl DEMA {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            ema1: EMA::new(period),
            ema2: EMA::new(period),
            value: 0.0,
            count: 0,
        }
    }
}

impl MovingAverage for DEMA {
    fn period(&self) -> usize {
        self.period
    }

    fn value(&self) -> f64 {
        self.value
    }

    fn count(&self) -> usize {
        self.count
    }

    fn update_raw(&mut self, value: f64) {
        self.ema1.update_raw(value);
        self.ema2.update_raw(self.ema1.value());
        self.value = 2.0 * self.ema1.value() - self.ema2.value();
        self.count += 1;
    }

    fn reset(&mut self) {
        self.ema1.reset();
        self.ema2.reset();
        self.value = 0.0;
        self.count = 0;
    }
}
