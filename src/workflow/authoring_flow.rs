//! 作业编辑流程 - 流程层
//!
//! 核心职责：定义"一份作业"从标题到提交的完整编辑流程
//!
//! 流程顺序：
//! 1. Title     → 标题非空
//! 2. Paragraph → 段落分词后至少一个句子
//! 3. Actions   → 至少一个单词配置了动作
//! 4. Metadata  → 无条件
//! 5. Review    → 提交到存储服务，成功后草稿重置

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult, ContentError, StoreError, WorkflowError};
use crate::infrastructure::AssignmentStore;
use crate::models::{
    ActionDraft, AssignmentMetadata, AssignmentPayload, ContentDocument, StoredAssignment, Word,
    WordAddress,
};
use crate::services::ContentBuilder;
use crate::workflow::authoring_step::AuthoringStep;

/// 编辑中的作业草稿
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentDraft {
    pub title: String,
    /// 最近一次构建的内容文档
    pub document: Option<ContentDocument>,
    pub metadata: AssignmentMetadata,
}

/// 作业编辑会话
///
/// - 每个会话独占一份草稿和一个流程状态
/// - 只能前进到下一步（需满足前置条件），后退不丢数据
/// - 同一时间最多一个提交在进行
pub struct AuthoringSession {
    step: AuthoringStep,
    draft: AssignmentDraft,
    submitting: bool,
    last_error: Option<String>,
    builder: ContentBuilder,
    rng: StdRng,
}

impl AuthoringSession {
    /// 创建新的编辑会话
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// 固定随机种子，释义乱序可复现
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            step: AuthoringStep::Title,
            draft: AssignmentDraft::default(),
            submitting: false,
            last_error: None,
            builder: ContentBuilder::new(),
            rng,
        }
    }

    pub fn step(&self) -> AuthoringStep {
        self.step
    }

    pub fn draft(&self) -> &AssignmentDraft {
        &self.draft
    }

    pub fn document(&self) -> Option<&ContentDocument> {
        self.draft.document.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// 最近一次提交失败的信息
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // ========== 编辑操作 ==========

    pub fn set_title(&mut self, title: impl Into<String>) -> AppResult<()> {
        self.ensure_idle()?;
        self.draft.title = title.into();
        Ok(())
    }

    /// 载入（或替换）段落，重新分词
    ///
    /// 之前的文档和所有单词动作都会被丢弃
    pub fn load_paragraph(&mut self, paragraph: &str) -> AppResult<&ContentDocument> {
        self.ensure_idle()?;

        if let Some(old) = &self.draft.document {
            let dropped = old.list_actioned_words().len();
            if dropped > 0 {
                warn!("段落已替换，丢弃 {} 个已配置的单词动作", dropped);
            }
        }

        let document = self.builder.build(paragraph);
        debug!(
            "段落已载入: {} 个句子, {} 个单词",
            document.sentence_count(),
            document.word_count()
        );
        let document = self.draft.document.insert(document);
        Ok(&*document)
    }

    pub fn get_word(&self, address: &WordAddress) -> AppResult<&Word> {
        let document = require_document(&self.draft.document, address)?;
        self.builder.get_word(document, address)
    }

    /// 校验并挂载单词动作；失败时文档不变
    pub fn attach_action(&mut self, address: &WordAddress, action: ActionDraft) -> AppResult<()> {
        self.ensure_idle()?;
        let document = require_document(&self.draft.document, address)?;
        let updated = self
            .builder
            .attach_action_with_rng(document, address, action, &mut self.rng)?;
        self.draft.document = Some(updated);
        Ok(())
    }

    pub fn remove_action(&mut self, address: &WordAddress) -> AppResult<()> {
        self.ensure_idle()?;
        let document = require_document(&self.draft.document, address)?;
        let updated = self.builder.remove_action(document, address)?;
        self.draft.document = Some(updated);
        Ok(())
    }

    pub fn set_metadata(&mut self, metadata: AssignmentMetadata) -> AppResult<()> {
        self.ensure_idle()?;
        self.draft.metadata = metadata;
        Ok(())
    }

    // ========== 步骤切换 ==========

    /// 前进到下一步
    pub fn advance(&mut self) -> AppResult<AuthoringStep> {
        self.ensure_idle()?;

        let next = match self.step {
            AuthoringStep::Review | AuthoringStep::Submitted => {
                return Err(AppError::precondition_unmet(self.step, "请通过提交完成作业"));
            }
            step => step.next().unwrap_or(step),
        };

        self.check_gate(self.step)
            .map_err(|reason| AppError::precondition_unmet(self.step, reason))?;

        debug!("步骤 {} → {}", self.step, next);
        self.step = next;
        Ok(next)
    }

    /// 后退一步，已填写的内容保留
    pub fn go_back(&mut self) -> AppResult<AuthoringStep> {
        self.ensure_idle()?;
        if let Some(previous) = self.step.previous() {
            debug!("步骤 {} → {}", self.step, previous);
            self.step = previous;
        }
        Ok(self.step)
    }

    /// 离开某个步骤前必须满足的条件
    fn check_gate(&self, step: AuthoringStep) -> Result<(), String> {
        match step {
            AuthoringStep::Title => {
                if self.draft.title.trim().is_empty() {
                    return Err("标题不能为空".to_string());
                }
            }
            AuthoringStep::Paragraph => match &self.draft.document {
                None => return Err("尚未载入段落".to_string()),
                Some(doc) if doc.is_empty() => {
                    return Err("段落中没有任何句子".to_string());
                }
                Some(_) => {}
            },
            AuthoringStep::Actions => {
                let configured = self
                    .draft
                    .document
                    .as_ref()
                    .map(|doc| doc.list_actioned_words().len())
                    .unwrap_or(0);
                if configured == 0 {
                    return Err("至少需要为一个单词配置动作".to_string());
                }
            }
            AuthoringStep::Metadata | AuthoringStep::Review | AuthoringStep::Submitted => {}
        }
        Ok(())
    }

    // ========== 提交 ==========

    /// 进入提交中状态并生成提交数据
    ///
    /// 提交未完成前再次调用会被拒绝
    pub fn begin_submission(&mut self) -> AppResult<AssignmentPayload> {
        self.ensure_idle()?;
        if self.step != AuthoringStep::Review {
            return Err(AppError::precondition_unmet(self.step, "只能在 Review 步骤提交"));
        }

        // 到达 Review 之后仍可编辑，提交前重新检查之前的每道门槛
        for step in [AuthoringStep::Title, AuthoringStep::Paragraph, AuthoringStep::Actions] {
            self.check_gate(step)
                .map_err(|reason| AppError::precondition_unmet(step, reason))?;
        }

        let document = self
            .draft
            .document
            .clone()
            .ok_or_else(|| AppError::precondition_unmet(self.step, "尚未载入段落"))?;

        self.submitting = true;
        self.last_error = None;

        Ok(AssignmentPayload::new(
            self.draft.title.trim(),
            document,
            self.draft.metadata.clone(),
        ))
    }

    /// 结束提交：成功则重置草稿，失败则停留在 Review 并记录错误
    pub fn complete_submission(
        &mut self,
        outcome: Result<StoredAssignment, StoreError>,
    ) -> AppResult<StoredAssignment> {
        if !self.submitting {
            return Err(AppError::precondition_unmet(self.step, "没有正在进行的提交"));
        }
        self.submitting = false;

        match outcome {
            Ok(stored) => {
                info!("✓ 作业《{}》提交成功 (id: {})", self.draft.title.trim(), stored.id);
                self.reset();
                Ok(stored)
            }
            Err(e) => {
                let message = e.to_string();
                warn!("⚠️ 作业提交失败: {}", message);
                self.last_error = Some(message.clone());
                Err(WorkflowError::SubmissionFailed { message }.into())
            }
        }
    }

    /// 提交到存储服务
    pub async fn submit<S: AssignmentStore>(&mut self, store: &S) -> AppResult<StoredAssignment> {
        let payload = self.begin_submission()?;
        info!(
            "📤 正在提交作业《{}》({} 个单词已配置)...",
            payload.title,
            payload.content.list_actioned_words().len()
        );
        let outcome = store.save(&payload).await;
        self.complete_submission(outcome)
    }

    /// 丢弃草稿，回到全新的 Title 状态
    pub fn reset(&mut self) {
        self.step = AuthoringStep::Title;
        self.draft = AssignmentDraft::default();
        self.submitting = false;
        self.last_error = None;
    }

    // ========== 辅助方法 ==========

    fn ensure_idle(&self) -> AppResult<()> {
        if self.submitting {
            return Err(WorkflowError::SubmissionInFlight.into());
        }
        Ok(())
    }
}

/// 还没有文档时，任何地址都不存在
fn require_document<'a>(
    document: &'a Option<ContentDocument>,
    address: &WordAddress,
) -> AppResult<&'a ContentDocument> {
    document.as_ref().ok_or_else(|| {
        ContentError::AddressNotFound {
            address: address.to_string(),
        }
        .into()
    })
}

impl Default for AuthoringSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ImageOption, ImageSource, WordAction};

    fn at_actions() -> AuthoringSession {
        let mut session = AuthoringSession::with_seed(5);
        session.set_title("The Cat").unwrap();
        session.advance().unwrap();
        session.load_paragraph("The cat sat. It was happy!").unwrap();
        session.advance().unwrap();
        session
    }

    fn is_precondition(err: &AppError) -> bool {
        matches!(err, AppError::Workflow(WorkflowError::PreconditionUnmet { .. }))
    }

    #[test]
    fn test_title_gate() {
        let mut session = AuthoringSession::with_seed(1);
        assert!(is_precondition(&session.advance().unwrap_err()));
        session.set_title("   ").unwrap();
        assert!(is_precondition(&session.advance().unwrap_err()));
        assert_eq!(session.step(), AuthoringStep::Title);

        session.set_title("Reading 1").unwrap();
        assert_eq!(session.advance().unwrap(), AuthoringStep::Paragraph);
    }

    #[test]
    fn test_paragraph_gate() {
        let mut session = AuthoringSession::with_seed(1);
        session.set_title("Reading").unwrap();
        session.advance().unwrap();

        assert!(is_precondition(&session.advance().unwrap_err()));
        session.load_paragraph("  ...  ").unwrap();
        assert!(is_precondition(&session.advance().unwrap_err()));
        assert_eq!(session.step(), AuthoringStep::Paragraph);

        session.load_paragraph("Now it has words.").unwrap();
        assert_eq!(session.advance().unwrap(), AuthoringStep::Actions);
    }

    #[test]
    fn test_actions_gate() {
        let mut session = at_actions();
        let err = session.advance().unwrap_err();
        assert!(is_precondition(&err));
        assert_eq!(session.step(), AuthoringStep::Actions);

        session
            .attach_action(&WordAddress::new(0, 1), ActionDraft::define("a small animal"))
            .unwrap();
        assert_eq!(session.advance().unwrap(), AuthoringStep::Metadata);
        assert_eq!(session.advance().unwrap(), AuthoringStep::Review);
    }

    #[test]
    fn test_address_not_found_is_a_no_op() {
        let mut session = at_actions();
        let before = session.document().cloned();

        let err = session
            .attach_action(&WordAddress::new(7, 0), ActionDraft::define("nothing"))
            .unwrap_err();
        assert!(matches!(err, AppError::Content(ContentError::AddressNotFound { .. })));
        assert_eq!(session.document().cloned(), before);

        let err = session
            .attach_action(
                &WordAddress::new(0, 0),
                ActionDraft::illustrate(vec![ImageOption::new("a.png", ImageSource::Url)]),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Content(ContentError::InvalidImageCount { count: 1 })
        ));
        assert_eq!(session.document().cloned(), before);
    }

    #[test]
    fn test_attach_before_paragraph_reports_missing_address() {
        let mut session = AuthoringSession::with_seed(1);
        let err = session
            .attach_action(&WordAddress::new(0, 0), ActionDraft::fill(["a"]))
            .unwrap_err();
        assert!(matches!(err, AppError::Content(ContentError::AddressNotFound { .. })));
    }

    #[test]
    fn test_going_back_keeps_data() {
        let mut session = at_actions();
        session
            .attach_action(&WordAddress::new(1, 2), ActionDraft::fill(["p"]))
            .unwrap();
        session.advance().unwrap();
        session
            .set_metadata(AssignmentMetadata {
                duration_minutes: Some(10),
                ..Default::default()
            })
            .unwrap();
        session.advance().unwrap();

        assert_eq!(session.go_back().unwrap(), AuthoringStep::Metadata);
        assert_eq!(session.go_back().unwrap(), AuthoringStep::Actions);
        assert_eq!(session.go_back().unwrap(), AuthoringStep::Paragraph);
        assert_eq!(session.go_back().unwrap(), AuthoringStep::Title);
        assert_eq!(session.go_back().unwrap(), AuthoringStep::Title);

        assert_eq!(session.draft().title, "The Cat");
        assert_eq!(session.draft().metadata.duration_minutes, Some(10));
        let word = session.get_word(&WordAddress::new(1, 2)).unwrap();
        assert!(matches!(word.action, Some(WordAction::Fill(_))));
    }

    #[test]
    fn test_reloading_paragraph_discards_actions() {
        let mut session = at_actions();
        session
            .attach_action(&WordAddress::new(0, 0), ActionDraft::fill(["t"]))
            .unwrap();
        session.load_paragraph("The cat sat. It was happy!").unwrap();
        assert!(session.document().unwrap().list_actioned_words().is_empty());
    }

    #[test]
    fn test_in_flight_submission_rejects_reentry() {
        let mut session = at_actions();
        session
            .attach_action(&WordAddress::new(0, 1), ActionDraft::define("a small animal"))
            .unwrap();
        session.advance().unwrap();
        session.advance().unwrap();

        let payload = session.begin_submission().unwrap();
        assert_eq!(payload.title, "The Cat");
        assert!(session.is_submitting());

        assert!(matches!(
            session.begin_submission().unwrap_err(),
            AppError::Workflow(WorkflowError::SubmissionInFlight)
        ));
        assert!(matches!(
            session.go_back().unwrap_err(),
            AppError::Workflow(WorkflowError::SubmissionInFlight)
        ));

        // 失败后停留在 Review，可以重试
        let err = session
            .complete_submission(Err(StoreError::NotFound { id: "x".to_string() }))
            .unwrap_err();
        assert!(matches!(err, AppError::Workflow(WorkflowError::SubmissionFailed { .. })));
        assert_eq!(session.step(), AuthoringStep::Review);
        assert!(!session.is_submitting());
        assert!(session.last_error().is_some());

        session.begin_submission().unwrap();
        assert!(session.last_error().is_none());
        let stored = session
            .complete_submission(Ok(StoredAssignment { id: "42".to_string() }))
            .unwrap();
        assert_eq!(stored.id, "42");
        assert_eq!(session.step(), AuthoringStep::Title);
        assert_eq!(session.draft(), &AssignmentDraft::default());
    }

    #[test]
    fn test_cannot_submit_before_review() {
        let mut session = at_actions();
        assert!(is_precondition(&session.begin_submission().unwrap_err()));
        assert!(!session.is_submitting());
    }

    fn at_review() -> AuthoringSession {
        let mut session = at_actions();
        session
            .attach_action(&WordAddress::new(0, 1), ActionDraft::define("a small animal"))
            .unwrap();
        session.advance().unwrap();
        session.advance().unwrap();
        assert_eq!(session.step(), AuthoringStep::Review);
        session
    }

    fn failed_gate(err: &AppError) -> Option<&str> {
        match err {
            AppError::Workflow(WorkflowError::PreconditionUnmet { step, .. }) => Some(step.as_str()),
            _ => None,
        }
    }

    #[test]
    fn test_submit_rechecks_actions_after_removing_last_action() {
        let mut session = at_review();
        session.remove_action(&WordAddress::new(0, 1)).unwrap();

        let err = session.begin_submission().unwrap_err();
        assert_eq!(failed_gate(&err), Some("Actions"));
        assert!(!session.is_submitting());
        assert_eq!(session.step(), AuthoringStep::Review);
    }

    #[test]
    fn test_submit_rechecks_paragraph_after_empty_reload() {
        let mut session = at_review();
        session.load_paragraph("").unwrap();

        let err = session.begin_submission().unwrap_err();
        assert_eq!(failed_gate(&err), Some("Paragraph"));
        assert!(!session.is_submitting());
    }

    #[test]
    fn test_submit_rechecks_actions_after_paragraph_replaced() {
        let mut session = at_review();
        session.load_paragraph("A brand new story.").unwrap();

        let err = session.begin_submission().unwrap_err();
        assert_eq!(failed_gate(&err), Some("Actions"));
    }

    #[test]
    fn test_submit_rechecks_title_after_blanking() {
        let mut session = at_review();
        session.set_title("  ").unwrap();

        let err = session.begin_submission().unwrap_err();
        assert_eq!(failed_gate(&err), Some("Title"));

        // 修好之后可以直接在 Review 提交
        session.set_title("The Cat").unwrap();
        assert!(session.begin_submission().is_ok());
    }

    #[test]
    fn test_advance_from_review_requires_submission() {
        let mut session = at_actions();
        session
            .attach_action(&WordAddress::new(0, 0), ActionDraft::fill(["t"]))
            .unwrap();
        session.advance().unwrap();
        session.advance().unwrap();
        assert!(is_precondition(&session.advance().unwrap_err()));
        assert_eq!(session.step(), AuthoringStep::Review);
    }
}
