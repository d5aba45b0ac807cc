use super::MovingAverage;
use crate::RingBuffer;

/// 简单移动平均线 (Simple Moving Average, SMA)
///
/// # 原理
/// 计算最近 N 个输入的算术平均值。窗口未满时取已有输入的平均值，
/// 因此预热期间也有输出。
///
/// # 常见参数
/// - **MA20**: 短期趋势，布林带的中轨通常使用此参数。
/// - **MA50**: 中期趋势。
/// - **MA200**: 长期趋势，著名的 "牛熊分界线"。
#[derive(Debug, Clone)]
pub struct SMA {
    period: usize,
    values: RingBuffer,
    sum: f64,
    count: usize,
}

impl SMA {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            values: RingBuffer::new(period),
            sum: 0.0,
            count: 0,
        }
    }

    /// 布林带中轨 / 短期生命线
    pub fn ma20() -> Self {
        Self::new(20)
    }

    pub fn ma50() -> Self {
        Self::new(50)
    }

    pub fn ma200() -> Self {
        Self::new(200)
    }
}

impl MovingAverage for SMA {
    fn period(&self) -> usize {
        self.period
    }

    fn value(&self) -> f64 {
        if self.values.is_empty() {
            0.0
        } else {
            self.sum / self.values.len() as f64
        }
    }

    fn count(&self) -> usize {
        self.count
    }

    fn update_raw(&mut self, value: f64) {
        self.sum += value;
        if let Some(old_value) = self.values.push(value) {
            self.sum -= old_value;
        }
        self.count += 1;
    }

    fn reset(&mut self) {
        self.values.clear();
        self.sum = 0.0;
        self.count = 0;
    }
}
