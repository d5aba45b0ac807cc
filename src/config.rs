pub mod indicator;

pub use indicator::*;

use bandwatch_shared::MarketDataType;
use eyre::{Result, WrapErr};
use figment::providers::{Env, Format, Toml};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "bandwatch.toml";

#[derive(Deserialize, Debug, Clone)]
pub struct BandwatchConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// 输入 CSV 路径，可由命令行覆盖
    #[serde(default)]
    pub input_path: Option<PathBuf>,
    /// 输出 CSV 路径，缺省时写到标准输出
    #[serde(default)]
    pub output_path: Option<PathBuf>,
    #[serde(default = "default_data_kind")]
    pub data_kind: MarketDataType,
    pub indicator: IndicatorConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_data_kind() -> MarketDataType {
    MarketDataType::Bar
}

impl BandwatchConfig {
    pub fn load() -> Result<BandwatchConfig> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// 依次合并 TOML 文件与 `BANDWATCH_` 前缀的环境变量，嵌套字段用 `__` 分隔，
    /// 例如 `BANDWATCH_INDICATOR__PERIOD=30`。
    pub fn load_from(path: impl AsRef<Path>) -> Result<BandwatchConfig> {
        let path = path.as_ref();
        let config: BandwatchConfig = figment::Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("BANDWATCH_").split("__"))
            .extract()
            .wrap_err_with(|| format!("Failed to load config from {}", path.display()))?;

        config.indicator.validate()?;
        Ok(config)
    }
}
