use std::sync::OnceLock;

pub fn setup() {
    static START: OnceLock<()> = OnceLock::new();

    START.get_or_init(|| {
        let level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        // 其他测试二进制可能已经安装过 subscriber
        let _ = crate::logging::init_tracing(&level);
    });
}
