use anyhow::Result;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 滚动日志的文件名前缀
const LOG_FILE_PREFIX: &str = "pushbridge.log";

/// 初始化日志系统
pub fn init_logging(
    log_level: &str,
    log_format: Option<&str>,
    log_file: Option<&str>,
    quiet: bool,
) -> Result<()> {
    // 如果静默模式，只输出错误
    let level = if quiet { "error" } else { log_level };

    // 解析日志级别
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // 根据格式选择不同的输出方式；配置了日志目录时额外按天滚动写入文件
    match log_format {
        Some("json") => {
            // JSON 格式（适合生产环境）
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .with(log_file.map(|dir| {
                    fmt::layer()
                        .json()
                        .with_ansi(false)
                        .with_writer(rolling::daily(dir, LOG_FILE_PREFIX))
                }))
                .init();
        }
        Some("pretty") | Some("dev") => {
            // Pretty 格式（适合开发环境）
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .with(log_file.map(|dir| {
                    fmt::layer()
                        .with_ansi(false)
                        .with_writer(rolling::daily(dir, LOG_FILE_PREFIX))
                }))
                .init();
        }
        _ => {
            // Compact 格式（默认）
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().compact())
                .with(log_file.map(|dir| {
                    fmt::layer()
                        .with_ansi(false)
                        .with_writer(rolling::daily(dir, LOG_FILE_PREFIX))
                }))
                .init();
        }
    }

    Ok(())
}

/// 把 SDK 的数字日志级别（0-6）映射为 tracing 过滤指令
///
/// 0 = None, 1 = Fatal, 2 = Errors, 3 = Warnings,
/// 4 = Info, 5 = Debug, 6 = Verbose
pub fn verbosity_filter(level: u8) -> &'static str {
    match level {
        0 => "off",
        1 | 2 => "error",
        3 => "warn",
        4 => "info",
        5 => "debug",
        _ => "trace",
    }
}
