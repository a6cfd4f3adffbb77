//! 单个草稿处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块把一份草稿文件完整地走一遍编辑流程，是草稿级别的编排器。
//!
//! ## 核心功能
//!
//! 1. **流程推进**：Title → Paragraph → Actions → Metadata → Review
//! 2. **动作挂载**：逐条解析地址并挂载单词动作，无效动作跳过
//! 3. **提交**：通过存储服务提交作业
//! 4. **兜底**：无法完成的草稿写入 warn.txt
//! 5. **统计输出**：记录动作成功/跳过数量

use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::infrastructure::AssignmentStore;
use crate::models::{ContentSummary, DraftFile, WordAddress};
use crate::services::{build_exercise, ExerciseItem, WarnWriter};
use crate::utils::logging::truncate_text;
use crate::workflow::{AuthoringSession, AuthoringStep, DraftCtx};

/// 单词动作统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ActionStats {
    pub applied: usize,
    pub rejected: usize,
}

/// 草稿处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftOutcome {
    /// 已提交
    Submitted {
        id: String,
        summary: ContentSummary,
        actions: ActionStats,
    },
    /// 停在某一步无法继续
    Rejected { step: AuthoringStep, reason: String },
}

impl DraftOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, DraftOutcome::Submitted { .. })
    }
}

/// 处理单个草稿
///
/// # 参数
/// - `draft`: 草稿数据
/// - `ctx`: 草稿上下文（用于日志）
/// - `store`: 作业存储
/// - `warn_writer`: 失败记录
/// - `config`: 配置
///
/// # 返回
/// 流程被拒绝时返回 `DraftOutcome::Rejected`，只有写 warn.txt 失败才返回错误
pub async fn process_draft<S: AssignmentStore>(
    draft: DraftFile,
    ctx: &DraftCtx,
    store: &S,
    warn_writer: &WarnWriter,
    config: &Config,
) -> AppResult<DraftOutcome> {
    log_draft_start(ctx, &draft);

    let mut session = AuthoringSession::new();

    let outcome = match run_session(&mut session, &draft, ctx, store, config).await {
        Ok((id, summary, actions)) => DraftOutcome::Submitted {
            id,
            summary,
            actions,
        },
        Err(e) => {
            let step = session.step();
            error!("{} ❌ 停在步骤 {}: {}", ctx, step, e);
            warn_writer
                .write(&ctx.draft_name, step.name(), &e.to_string())
                .await?;
            warn!("{} ⚠️ 已写入 warn.txt", ctx);
            DraftOutcome::Rejected {
                step,
                reason: e.to_string(),
            }
        }
    };

    log_draft_complete(ctx, &outcome);
    Ok(outcome)
}

/// 按步骤驱动会话，任一步失败立即返回
async fn run_session<S: AssignmentStore>(
    session: &mut AuthoringSession,
    draft: &DraftFile,
    ctx: &DraftCtx,
    store: &S,
    config: &Config,
) -> AppResult<(String, ContentSummary, ActionStats)> {
    // ========== Title ==========
    session.set_title(draft.title.as_str())?;
    session.advance()?;

    // ========== Paragraph ==========
    let document = session.load_paragraph(&draft.paragraph)?;
    info!(
        "{} 段落: {} 个句子, {} 个单词",
        ctx,
        document.sentence_count(),
        document.word_count()
    );
    session.advance()?;

    // ========== Actions ==========
    let mut stats = ActionStats::default();
    for entry in &draft.actions {
        let result = entry
            .address
            .parse::<WordAddress>()
            .map_err(AppError::from)
            .and_then(|address| session.attach_action(&address, entry.action.clone()));

        match result {
            Ok(()) => {
                debug!("{} ✓ {} → {}", ctx, entry.address, entry.action.kind());
                stats.applied += 1;
            }
            // 只有内容输入错误可以跳过
            Err(e) if !e.is_content_error() => return Err(e),
            Err(e) => {
                warn!("{} ⚠️ 跳过动作 {} ({}): {}", ctx, entry.address, entry.action.kind(), e);
                stats.rejected += 1;
            }
        }
    }
    info!(
        "{} 单词动作: 成功 {}, 跳过 {}",
        ctx, stats.applied, stats.rejected
    );
    session.advance()?;

    // ========== Metadata ==========
    session.set_metadata(draft.metadata.clone())?;
    session.advance()?;

    // ========== Review ==========
    let summary = match session.document() {
        Some(document) => {
            if config.verbose_logging {
                log_exercise_preview(ctx, &build_exercise(document, config.fill_placeholder));
            }
            document.summary()
        }
        None => ContentSummary::default(),
    };

    let stored = session.submit(store).await?;
    Ok((stored.id, summary, stats))
}

// ========== 日志辅助函数 ==========

fn log_draft_start(ctx: &DraftCtx, draft: &DraftFile) {
    info!("{} 开始处理", ctx);
    info!("{} 标题: {}", ctx, draft.title);
    info!("{} 段落: {}", ctx, truncate_text(&draft.paragraph, 60));
    info!("{} 动作总数: {}", ctx, draft.actions.len());
}

fn log_exercise_preview(ctx: &DraftCtx, items: &[ExerciseItem]) {
    for item in items {
        match item {
            ExerciseItem::Define { address, word, tiles } => {
                info!("{}   {} {} 释义乱序: {}", ctx, address, word, tiles.join(" / "));
            }
            ExerciseItem::Illustrate { address, word, images } => {
                info!("{}   {} {} 配图: {} 张", ctx, address, word, images.len());
            }
            ExerciseItem::Fill {
                address,
                word,
                cells,
                hidden_count,
            } => {
                info!(
                    "{}   {} {} 填字母: {} (隐藏 {} 个)",
                    ctx,
                    address,
                    word,
                    cells.iter().collect::<String>(),
                    hidden_count
                );
            }
        }
    }
}

fn log_draft_complete(ctx: &DraftCtx, outcome: &DraftOutcome) {
    match outcome {
        DraftOutcome::Submitted { id, summary, .. } => {
            info!(
                "{} 内容统计: {} 个句子, {} 个单词, 已配置 {} 个 (释义 {}, 配图 {}, 填字母 {})",
                ctx,
                summary.sentence_count,
                summary.word_count,
                summary.actioned_count,
                summary.define_count,
                summary.illustrate_count,
                summary.fill_count
            );
            info!("{} ✅ 作业已提交 (id: {})\n", ctx, id);
        }
        DraftOutcome::Rejected { step, .. } => {
            info!("{} ❌ 草稿未完成，停在步骤 {}\n", ctx, step);
        }
    }
}
