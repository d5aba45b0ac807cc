use super::{MovingAverage, WMA};

/// 赫尔移动平均线 (Hull Moving Average)
///
/// `HMA = WMA(2 * WMA(price, n / 2) - WMA(price, n), sqrt(n))`
#[derive(Debug, Clone)]
pub struct HMA {
    period: usize,
    ma1: WMA,
    ma2: WMA,
    ma3: WMA,
    count: usize,
}

impl HMA {
    pub fn new(period: usize) -> Self {
        let half = (period / 2).max(1);
        let sqrt = ((period as f64).sqrt() as usize).max(1);

        Self {
            period,
            ma1: WMA::new(half),
            ma2: WMA::new(period),
            ma3: WMA::new(sqrt),
            count: 0,
        }
    }
}

impl MovingAverage for HMA {
    fn period(&self) -> usize {
        self.period
    }

    fn value(&self) -> f64 {
        self.ma3.value()
    }

    fn count(&self) -> usize {
        self.count
    }

    fn update_raw(&mut self, value: f64) {
        self.ma1.update_raw(value);
        self.ma2.update_raw(value);
        self.ma3.update_raw(2.0 * self.ma1.value() - self.ma2.value());
        self.count += 1;
    }

    fn reset(&mut self) {
        self.ma1.reset();
        self.ma2.reset();
        self.ma3.reset();
        self.count = 0;
    }
}
