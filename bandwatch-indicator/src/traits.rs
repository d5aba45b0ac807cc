/// 技术指标trait
pub trait Indicator: Send + Sync {
    /// 输入数据类型
    type Input;
    /// 输出值类型
    type Output;

    /// 指标名称
    fn name(&self) -> &str;

    /// 更新指标值
    fn update(&mut self, input: Self::Input) -> Option<Self::Output>;

    /// 获取当前指标值，尚未收到任何输入时为 `None`
    fn value(&self) -> Option<Self::Output>;

    /// 是否已收到过输入
    fn has_inputs(&self) -> bool;

    /// 窗口是否已填满
    fn initialized(&self) -> bool;

    /// 重置指标
    fn reset(&mut self);
}

/// 指标的公共生命周期状态
///
/// `Uninitialized -> WarmingUp -> Ready`，只有 [`IndicatorState::reset`] 能回到起点。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndicatorState {
    has_inputs: bool,
    initialized: bool,
}

impl IndicatorState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn has_inputs(&self) -> bool {
        self.has_inputs
    }

    #[inline]
    pub fn initialized(&self) -> bool {
        self.initialized
    }

    #[inline]
    pub fn set_has_inputs(&mut self, value: bool) {
        self.has_inputs = value;
    }

    #[inline]
    pub fn set_initialized(&mut self, value: bool) {
        self.initialized = value;
    }

    pub fn reset(&mut self) {
        self.has_inputs = false;
        self.initialized = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_state() {
        let mut state = IndicatorState::new();
        assert!(!state.has_inputs());
        assert!(!state.initialized());

        state.set_has_inputs(true);
        state.set_initialized(true);
        assert!(state.has_inputs());
        assert!(state.initialized());

        state.reset();
        assert_eq!(state, IndicatorState::default());
    }
}
