//! 内容文档构建服务 - 业务能力层
//!
//! 负责：
//! - 段落 → 内容文档（委托分词器）
//! - 按地址查询单词
//! - 校验并挂载单词动作（不可变更新，返回新文档）
//! - 列出已配置动作的单词

use std::sync::Arc;

use rand::Rng;
use tracing::debug;

use crate::error::{AppResult, ContentError};
use crate::models::action::REQUIRED_IMAGE_COUNT;
use crate::models::{
    ActionDraft, ContentDocument, DefineAction, FillAction, IllustrateAction, ImageOption, Word,
    WordAction, WordAddress,
};
use crate::services::randomizer::shuffle_definition;
use crate::services::tokenizer::Tokenizer;

/// 内容文档构建服务
#[derive(Debug, Clone, Default)]
pub struct ContentBuilder {
    tokenizer: Tokenizer,
}

impl ContentBuilder {
    pub fn new() -> Self {
        Self {
            tokenizer: Tokenizer::new(),
        }
    }

    /// 从段落构建全新的文档
    pub fn build(&self, paragraph: &str) -> ContentDocument {
        self.tokenizer.tokenize(paragraph)
    }

    pub fn get_word<'a>(
        &self,
        document: &'a ContentDocument,
        address: &WordAddress,
    ) -> AppResult<&'a Word> {
        let word = document.get_word(address)?;
        Ok(Arc::as_ref(word))
    }

    /// 校验动作并挂到指定单词上，使用线程随机数生成释义乱序
    pub fn attach_action(
        &self,
        document: &ContentDocument,
        address: &WordAddress,
        draft: ActionDraft,
    ) -> AppResult<ContentDocument> {
        self.attach_action_with_rng(document, address, draft, &mut rand::thread_rng())
    }

    /// 同 [`attach_action`](Self::attach_action)，随机数由调用方提供
    pub fn attach_action_with_rng<R: Rng + ?Sized>(
        &self,
        document: &ContentDocument,
        address: &WordAddress,
        draft: ActionDraft,
        rng: &mut R,
    ) -> AppResult<ContentDocument> {
        let word = document.get_word(address)?;
        let action = validate_action(&word.text, draft, rng)?;

        debug!("单词 {} ({}) 挂载动作: {}", address, word.text, action.kind());

        Ok(document.with_action(address, Some(action))?)
    }

    /// 清除指定单词的动作
    pub fn remove_action(
        &self,
        document: &ContentDocument,
        address: &WordAddress,
    ) -> AppResult<ContentDocument> {
        Ok(document.with_action(address, None)?)
    }

    pub fn list_actioned_words<'a>(
        &self,
        document: &'a ContentDocument,
    ) -> Vec<(WordAddress, &'a WordAction)> {
        document.list_actioned_words()
    }
}

/// 把未校验的动作转换为完整动作
///
/// 释义乱序在这里生成并固定下来
pub fn validate_action<R: Rng + ?Sized>(
    word_text: &str,
    draft: ActionDraft,
    rng: &mut R,
) -> Result<WordAction, ContentError> {
    match draft {
        ActionDraft::Define { definition } => {
            let definition = definition.trim();
            if definition.is_empty() {
                return Err(ContentError::InvalidDefinition);
            }
            Ok(WordAction::Define(DefineAction {
                definition: definition.to_string(),
                randomized_words: shuffle_definition(definition, rng),
            }))
        }
        ActionDraft::Illustrate { images } => {
            let count = images.len();
            let images: [ImageOption; REQUIRED_IMAGE_COUNT] = images
                .try_into()
                .map_err(|_| ContentError::InvalidImageCount { count })?;
            Ok(WordAction::Illustrate(IllustrateAction { images }))
        }
        ActionDraft::Fill { letters_to_hide } => {
            let selected = letters_to_hide
                .iter()
                .flat_map(|letter| letter.trim().chars());
            FillAction::new(word_text, selected)
                .map(WordAction::Fill)
                .ok_or(ContentError::NoLettersSelected)
        }
    }
}
