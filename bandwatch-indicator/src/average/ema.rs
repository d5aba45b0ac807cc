use super::MovingAverage;

/// 指数移动平均线 (Exponential Moving Average)
///
/// 第一个输入直接作为初值，之后按 `value = alpha * input + (1 - alpha) * value` 平滑。
/// 标准 EMA 的 `alpha = 2 / (period + 1)`，Wilder 平滑的 `alpha = 1 / period`。
#[derive(Debug, Clone)]
pub struct EMA {
    period: usize,
    alpha: f64,
    value: f64,
    count: usize,
}

impl EMA {
    pub fn new(period: usize) -> Self {
        Self::with_alpha(period, 2.0 / (period + 1) as f64)
    }

    /// Wilder 平滑均线 (RMA / SMMA)
    pub fn wilder(period: usize) -> Self {
        Self::with_alpha(period, 1.0 / period as f64)
    }

    pub fn with_alpha(period: usize, alpha: f64) -> Self {
        Self {
            period,
            alpha,
            value: 0.0,
            count: 0,
        }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl MovingAverage for EMA {
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
        self.value = if self.count == 0 {
            value
        } else {
            self.alpha * value + (1.0 - self.alpha) * self.value
        };
        self.count += 1;
    }

    fn reset(&mut self) {
        self.value = 0.0;
        self.count = 0;
    }
}
