/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use tokio::fs;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::{AppResult, FileError};

/// 初始化 tracing 订阅器
///
/// 优先读取 `RUST_LOG`，否则按 `verbose` 选择 debug 或 info。
/// 重复调用不会报错（测试中会多次初始化）
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub async fn init_log_file(log_file_path: &str) -> AppResult<()> {
    let log_header = format!(
        "{}\n作业编辑日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)
        .await
        .map_err(|e| FileError::WriteFailed {
            path: log_file_path.to_string(),
            source: Box::new(e),
        })?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(config: &Config, backend: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 批量作业编辑模式");
    info!("📊 最大并发数: {}", config.max_concurrent_drafts);
    info!("📁 草稿目录: {}", config.draft_folder);
    info!("💾 存储后端: {}", backend);
    info!("{}", "=".repeat(60));
}

/// 记录草稿加载信息
///
/// # 参数
/// - `total`: 草稿总数
/// - `max_concurrent`: 最大并发数
pub fn log_drafts_loaded(total: usize, max_concurrent: usize) {
    info!("✓ 找到 {} 个待处理的草稿", total);
    info!("📋 将以每批 {} 个的方式处理", max_concurrent);
    info!("💡 每批完成后再开始下一批\n");
}

/// 记录批次开始信息
///
/// # 参数
/// - `batch_num`: 批次编号
/// - `total_batches`: 批次总数
/// - `start`: 起始草稿编号
/// - `end`: 结束草稿编号
/// - `total`: 草稿总数
pub fn log_batch_start(
    batch_num: usize,
    total_batches: usize,
    start: usize,
    end: usize,
    total: usize,
) {
    info!("\n{}", "=".repeat(60));
    info!("📦 开始处理第 {}/{} 批", batch_num, total_batches);
    info!("📄 本批草稿: {}-{} / 共 {} 个", start, end, total);
    info!("{}", "=".repeat(60));
}

/// 记录批次完成信息
pub fn log_batch_complete(batch_num: usize, success: usize, total: usize) {
    info!("\n{}", "─".repeat(60));
    info!("✓ 第 {} 批完成: 成功 {}/{}", batch_num, success, total);
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `success`: 成功数量
/// - `failed`: 失败数量
/// - `total`: 总数
/// - `config`: 配置（日志和 warn 文件路径）
pub fn print_final_stats(success: usize, failed: usize, total: usize, config: &Config) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", success, total);
    info!("❌ 失败: {}", failed);
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", config.output_log_file);
    if failed > 0 {
        info!("失败草稿见: {}", config.warn_file);
    }
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（按字符计）
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
