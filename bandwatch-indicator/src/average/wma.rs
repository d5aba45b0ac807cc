use super::MovingAverage;
use crate::RingBuffer;

/// 加权移动平均线 (Weighted Moving Average)
///
/// 窗口内最旧的值权重为 1，最新的值权重为 n（n 为当前窗口长度）。
#[derive(Debug, Clone)]
pub struct WMA {
    period: usize,
    values: RingBuffer,
    value: f64,
    count: usize,
}

impl WMA {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            values: RingBuffer::new(period),
            value: 0.0,
            count: 0,
        }
    }

    fn weighted_mean(&self) -> f64 {
        let n = self.values.len();
        let weight_sum = (n * (n + 1) / 2) as f64;
        let weighted_sum: f64 = self
            .values
            .iter()
            .enumerate()
            .map(|(i, x)| x * (i + 1) as f64)
            .sum();
        weighted_sum / weight_sum
    }
}

impl MovingAverage for WMA {
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
        self.values.push(value);
        self.value = self.weighted_mean();
        self.count += 1;
    }

    fn reset(&mut self) {
        self.values.clear();
        self.value = 0.0;
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_wma() {
        let mut wma = WMA::new(3);

        wma.update_raw(1.0);
        assert_abs_diff_eq!(wma.value(), 1.0);
        // (1*1 + 2*2) / 3
        wma.update_raw(2.0);
        assert_abs_diff_eq!(wma.value(), 5.0 / 3.0);
        // (1*1 + 2*2 + 3*3) / 6
        wma.update_raw(3.0);
        assert_abs_diff_eq!(wma.value(), 14.0 / 6.0);
        // (2*1 + 3*2 + 4*3) / 6
        wma.update_raw(4.0);
        assert_abs_diff_eq!(wma.value(), 20.0 / 6.0);
    }
}
