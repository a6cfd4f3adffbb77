//! 批量草稿处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量草稿的处理和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：校验配置、初始化日志文件、选择存储后端
//! 2. **批量加载**：扫描并加载所有待处理的草稿（`Vec<DraftFile>`）
//! 3. **并发控制**：使用 Semaphore 限制并发数量
//! 4. **分批处理**：将草稿分批次处理，每批完成后再开始下一批
//! 5. **全局统计**：汇总所有草稿的处理结果
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理单个草稿的细节
//! - **资源所有者**：唯一持有存储后端的模块
//! - **向下委托**：委托 draft_processor 处理单个草稿

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::infrastructure::AnyStore;
use crate::models::{load_all_drafts, DraftFile};
use crate::orchestrator::draft_processor;
use crate::services::WarnWriter;
use crate::utils::logging;
use crate::workflow::DraftCtx;

/// 应用主结构
pub struct App {
    config: Config,
    store: Arc<AnyStore>,
    warn_writer: WarnWriter,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> AppResult<Self> {
        let store = AnyStore::from_config(&config)?;
        Self::with_store(config, store).await
    }

    /// 使用指定的存储后端初始化
    pub async fn with_store(config: Config, store: AnyStore) -> AppResult<Self> {
        config.validate()?;

        // 初始化日志文件
        logging::init_log_file(&config.output_log_file).await?;

        logging::log_startup(&config, store.backend_name());

        let warn_writer = WarnWriter::with_path(config.warn_file.clone());

        Ok(Self {
            config,
            store: Arc::new(store),
            warn_writer,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> AppResult<ProcessingStats> {
        // 加载所有待处理的草稿
        let all_drafts = self.load_drafts().await?;

        if all_drafts.is_empty() {
            warn!("⚠️ 没有找到待处理的TOML文件，程序结束");
            return Ok(ProcessingStats::default());
        }

        logging::log_drafts_loaded(all_drafts.len(), self.config.max_concurrent_drafts);

        // 处理所有草稿
        let stats = self.process_all_drafts(all_drafts).await?;

        // 输出最终统计
        logging::print_final_stats(stats.success, stats.failed, stats.total, &self.config);

        Ok(stats)
    }

    /// 加载草稿
    async fn load_drafts(&self) -> AppResult<Vec<DraftFile>> {
        info!("\n📁 正在扫描待处理的草稿...");
        load_all_drafts(&self.config.draft_folder).await
    }

    /// 处理所有草稿
    async fn process_all_drafts(&self, all_drafts: Vec<DraftFile>) -> AppResult<ProcessingStats> {
        let batch_size = self.config.max_concurrent_drafts;
        let semaphore = Arc::new(Semaphore::new(batch_size));
        let total_drafts = all_drafts.len();
        let total_batches = total_drafts.div_ceil(batch_size);
        let mut stats = ProcessingStats {
            total: total_drafts,
            ..Default::default()
        };

        // 分批处理
        for (batch_idx, batch_drafts) in all_drafts.chunks(batch_size).enumerate() {
            let batch_start = batch_idx * batch_size;
            let batch_num = batch_idx + 1;

            logging::log_batch_start(
                batch_num,
                total_batches,
                batch_start + 1,
                batch_start + batch_drafts.len(),
                total_drafts,
            );

            // 处理本批
            let batch_result = self
                .process_batch(batch_drafts, batch_start, semaphore.clone())
                .await?;

            stats.success += batch_result.success;
            stats.failed += batch_result.failed;

            logging::log_batch_complete(
                batch_num,
                batch_result.success,
                batch_result.success + batch_result.failed,
            );
        }

        Ok(stats)
    }

    /// 处理单个批次
    async fn process_batch(
        &self,
        batch_drafts: &[DraftFile],
        batch_start: usize,
        semaphore: Arc<Semaphore>,
    ) -> AppResult<BatchResult> {
        let mut batch_handles = Vec::new();

        // 为本批创建并发任务
        for (idx, draft) in batch_drafts.iter().enumerate() {
            let ctx = DraftCtx::new(batch_start + idx + 1, draft.display_name());
            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|e| AppError::Other(format!("获取并发许可失败: {}", e)))?;

            let draft = draft.clone();
            let store = Arc::clone(&self.store);
            let warn_writer = self.warn_writer.clone();
            let config = self.config.clone();
            let task_ctx = ctx.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                let result = draft_processor::process_draft(
                    draft,
                    &task_ctx,
                    store.as_ref(),
                    &warn_writer,
                    &config,
                )
                .await;

                if let Err(e) = &result {
                    error!("{} ❌ 处理过程中发生错误: {}", task_ctx, e);
                }
                result
            });
            batch_handles.push((ctx, handle));
        }

        // 等待本批所有任务完成
        let mut result = BatchResult::default();

        for (ctx, handle) in batch_handles {
            match handle.await {
                Ok(Ok(outcome)) if outcome.is_submitted() => {
                    result.success += 1;
                }
                Ok(_) => {
                    result.failed += 1;
                }
                Err(e) => {
                    error!("{} 任务执行失败: {}", ctx, e);
                    result.failed += 1;
                }
            }
        }

        Ok(result)
    }
}

/// 处理统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingStats {
    pub success: usize,
    pub failed: usize,
    pub total: usize,
}

/// 批次处理结果
#[derive(Debug, Default)]
struct BatchResult {
    success: usize,
    failed: usize,
}
