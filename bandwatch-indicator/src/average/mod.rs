//! 移动平均线族
//!
//! 所有均线都实现 [`MovingAverage`]，通过 [`MovingAverageFactory`] 按 [`MovingAverageType`]
//! 在构造时选择具体实现，之后不再做类型分支。

pub mod dema;
pub mod ema;
pub mod hma;
pub mod sma;
pub mod wma;

pub use dema::*;
pub use ema::*;
pub use hma::*;
pub use sma::*;
pub use wma::*;

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::EnumString,
    strum::Display,
    strum::EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum MovingAverageType {
    #[default]
    Simple,
    Exponential,
    DoubleExponential,
    Weighted,
    Hull,
    Wilder,
}

/// 均线的公共接口
///
/// 在收到任何输入之前 `value()` 为 0；输入数量达到 `period()` 后视为已初始化。
pub trait MovingAverage: Debug + Send + Sync {
    fn period(&self) -> usize;

    fn value(&self) -> f64;

    /// 已处理的输入数量
    fn count(&self) -> usize;

    fn update_raw(&mut self, value: f64);

    fn has_inputs(&self) -> bool {
        self.count() > 0
    }

    fn initialized(&self) -> bool {
        self.count() >= self.period()
    }

    fn reset(&mut self);
}

pub struct MovingAverageFactory;

impl MovingAverageFactory {
    /// `period` 需由调用方保证大于 0。
    pub fn create(period: usize, ma_type: MovingAverageType) -> Box<dyn MovingAverage> {
        match ma_type {
            MovingAverageType::Simple => Box::new(SMA::new(period)),
            MovingAverageType::Exponential => Box::new(EMA::new(period)),
            MovingAverageType::DoubleExponential => Box::new(DEMA::new(period)),
            MovingAverageType::Weighted => Box::new(WMA::new(period)),
            MovingAverageType::Hull => Box::new(HMA::new(period)),
            MovingAverageType::Wilder => Box::new(EMA::wilder(period)),
        }
    }
}
