use bandwatch_indicator::{BollingerBands, MovingAverageType};
use bandwatch_shared::{IntervalSc, interval_ms};
use eyre::{Result, WrapErr, eyre};
use serde::{Deserialize, Serialize};

/// 验证 trait，所有参数类型都需要实现
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 布林带参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorConfig {
    /// 交易标的，其余标的的数据会被跳过
    pub symbol: String,

    #[serde(default = "default_period")]
    pub period: usize,

    /// 标准差倍数
    #[serde(default = "default_k")]
    pub k: f64,

    #[serde(default)]
    pub ma_type: MovingAverageType,

    /// 设置后，成交数据先聚合为该周期的K线再计算
    #[serde(default)]
    pub bar_interval_sc: Option<IntervalSc>,
}

fn default_period() -> usize {
    20
}

fn default_k() -> f64 {
    2.0
}

impl IndicatorConfig {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            period: default_period(),
            k: default_k(),
            ma_type: MovingAverageType::default(),
            bar_interval_sc: None,
        }
    }

    pub fn with_period(mut self, period: usize) -> Self {
        self.period = period;
        self
    }

    pub fn with_k(mut self, k: f64) -> Self {
        self.k = k;
        self
    }

    pub fn with_ma_type(mut self, ma_type: MovingAverageType) -> Self {
        self.ma_type = ma_type;
        self
    }

    pub fn with_bar_interval(mut self, interval_sc: IntervalSc) -> Self {
        self.bar_interval_sc = Some(interval_sc);
        self
    }

    pub fn build(&self) -> Result<BollingerBands> {
        Ok(BollingerBands::new(self.period, self.k, Some(self.ma_type))?)
    }
}

impl Validate for IndicatorConfig {
    fn validate(&self) -> Result<()> {
        if self.period == 0 {
            return Err(eyre!("period must be greater than 0"));
        }
        if !(self.k.is_finite() && self.k > 0.0) {
            return Err(eyre!("k must be greater than 0, got {}", self.k));
        }
        if self.symbol.is_empty() {
            return Err(eyre!("symbol cannot be empty"));
        }
        if let Some(interval_sc) = self.bar_interval_sc {
            interval_ms(interval_sc).wrap_err("invalid bar_interval_sc")?;
        }
        Ok(())
    }
}
