pub type IndicatorResult<T> = std::result::Result<T, IndicatorError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IndicatorError {
    /// 构造参数不合法，例如周期为 0 或倍数不为正
    #[error("Invalid argument `{param}`: {reason}.")]
    InvalidArgument { param: &'static str, reason: String },

    /// 更新时缺少输入数据
    #[error("Argument `{param}` is missing.")]
    NullArgument { param: &'static str },
}

impl IndicatorError {
    pub fn invalid_argument(param: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            param,
            reason: reason.into(),
        }
    }
}
