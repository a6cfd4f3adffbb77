//! 阅读内容文档
//!
//! 文档 → 句子 → 单词 三层，每层节点用 `Arc` 持有。
//! 更新某个单词的动作时只重建目标句子的单词列表，其余句子和同句其他单词都复用原节点。

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ContentError;
use crate::models::action::{ActionKind, WordAction};
use crate::models::address::{sentence_id, WordAddress};

/// 单词
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub address: WordAddress,
    /// 原始大小写，不含空白
    pub text: String,
    pub action: Option<WordAction>,
}

impl Word {
    pub fn new(address: WordAddress, text: impl Into<String>) -> Self {
        Self {
            address,
            text: text.into(),
            action: None,
        }
    }
}

/// 句子
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// `s{N}`
    pub id: String,
    /// 去除首尾空白后的原句，保留结尾标点
    pub text: String,
    pub words: Vec<Arc<Word>>,
}

impl Sentence {
    pub fn new(sentence_index: usize, text: impl Into<String>, words: Vec<Arc<Word>>) -> Self {
        Self {
            id: sentence_id(sentence_index),
            text: text.into(),
            words,
        }
    }
}

/// 内容文档，作为作业的 `content` 字段整体保存
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDocument {
    pub original_paragraph: Arc<str>,
    pub sentences: Vec<Arc<Sentence>>,
}

impl ContentDocument {
    pub fn new(original_paragraph: impl Into<Arc<str>>, sentences: Vec<Arc<Sentence>>) -> Self {
        Self {
            original_paragraph: original_paragraph.into(),
            sentences,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    pub fn word_count(&self) -> usize {
        self.sentences.iter().map(|s| s.words.len()).sum()
    }

    /// 按文档顺序遍历所有单词
    pub fn words(&self) -> impl Iterator<Item = &Arc<Word>> {
        self.sentences.iter().flat_map(|s| s.words.iter())
    }

    /// 按地址查找单词
    pub fn get_word(&self, address: &WordAddress) -> Result<&Arc<Word>, ContentError> {
        self.sentences
            .get(address.sentence_index)
            .and_then(|sentence| sentence.words.get(address.word_index))
            .ok_or_else(|| ContentError::AddressNotFound {
                address: address.to_string(),
            })
    }

    /// 整体替换（或清除）某个单词的动作，返回新文档
    ///
    /// 只有目标句子和目标单词是新节点；`self` 保持不变。
    pub fn with_action(
        &self,
        address: &WordAddress,
        action: Option<WordAction>,
    ) -> Result<ContentDocument, ContentError> {
        let target = self.get_word(address)?;

        let word = Arc::new(Word {
            address: target.address,
            text: target.text.clone(),
            action,
        });

        let sentence = &self.sentences[address.sentence_index];
        let mut words = sentence.words.clone();
        words[address.word_index] = word;

        let mut sentences = self.sentences.clone();
        sentences[address.sentence_index] = Arc::new(Sentence {
            id: sentence.id.clone(),
            text: sentence.text.clone(),
            words,
        });

        Ok(ContentDocument {
            original_paragraph: Arc::clone(&self.original_paragraph),
            sentences,
        })
    }

    /// 所有已配置动作的单词，按文档顺序
    pub fn list_actioned_words(&self) -> Vec<(WordAddress, &WordAction)> {
        self.words()
            .filter_map(|word| word.action.as_ref().map(|action| (word.address, action)))
            .collect()
    }

    /// 汇总信息，用于作业列表的“已配置 N 个单词”
    pub fn summary(&self) -> ContentSummary {
        let mut summary = ContentSummary {
            sentence_count: self.sentence_count(),
            word_count: self.word_count(),
            ..Default::default()
        };

        for (_, action) in self.list_actioned_words() {
            summary.actioned_count += 1;
            match action.kind() {
                ActionKind::Define => summary.define_count += 1,
                ActionKind::Illustrate => summary.illustrate_count += 1,
                ActionKind::Fill => summary.fill_count += 1,
            }
        }

        summary
    }
}

/// 内容统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentSummary {
    pub sentence_count: usize,
    pub word_count: usize,
    pub actioned_count: usize,
    pub define_count: usize,
    pub illustrate_count: usize,
    pub fill_count: usize,
}
