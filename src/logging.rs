use eyre::{Result, eyre};
use tracing_subscriber::EnvFilter;

/// 安装全局 tracing subscriber。`RUST_LOG` 存在时优先于配置中的 `level`。
pub fn init_tracing(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| eyre!(e))
}
