//! Tracing 初始化
//!
//! 按配置选择日志输出端（控制台 / 文件 / 按日轮转文件）并安装全局 subscriber。

use std::io::Write;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, LoggingConfig};

/// 根据日志配置构建底层写入端
///
/// 优先级：配置了文件且开启轮转 -> 按日轮转；仅配置文件 -> 追加写；
/// 其余情况落到 stdout。
fn build_writer(logging: &LoggingConfig) -> Box<dyn Write + Send + Sync> {
    let Some(log_file) = logging.file.as_deref().filter(|f| !f.is_empty()) else {
        return Box::new(std::io::stdout());
    };

    if logging.enable_rotation {
        let path = std::path::Path::new(log_file);
        let dir = path.parent().unwrap_or(std::path::Path::new("."));
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("adroit.log");

        let appender = rolling::Builder::new()
            .rotation(rolling::Rotation::DAILY)
            .filename_prefix(filename.trim_end_matches(".log"))
            .filename_suffix("log")
            .max_log_files(logging.max_backups as usize)
            .build(dir)
            .expect("Failed to create rolling log appender");
        Box::new(appender)
    } else {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)
            .expect("Failed to open log file");
        Box::new(file)
    }
}

/// Install the global tracing subscriber from the logging configuration.
///
/// Call once at startup, after the configuration is loaded. The returned
/// `WorkerGuard` must stay alive for the lifetime of the process so the
/// non-blocking writer can flush buffered records on shutdown.
///
/// # Panics
/// Panics when the log file cannot be opened or when a subscriber has
/// already been installed.
pub fn init_logging(config: &AppConfig) -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(build_writer(&config.logging));

    // 写入文件时关闭 ANSI 颜色码
    let to_console = config
        .logging
        .file
        .as_deref()
        .is_none_or(|f| f.is_empty());

    let builder = tracing_subscriber::fmt()
        .with_writer(writer)
        .with_env_filter(EnvFilter::new(config.logging.level.clone()))
        .with_level(true)
        .with_ansi(to_console);

    if config.logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }

    guard
}
