//! 单词动作模型
//!
//! 每个单词最多挂一个动作：释义（Define）、配图（Illustrate）、填字母（Fill）。
//! `WordAction` 是校验通过后的完整动作，`ActionDraft` 是来自编辑界面的未校验输入。

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// 配图动作要求的图片数量
pub const REQUIRED_IMAGE_COUNT: usize = 3;

/// 已校验的单词动作
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WordAction {
    Define(DefineAction),
    Illustrate(IllustrateAction),
    Fill(FillAction),
}

impl WordAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            WordAction::Define(_) => ActionKind::Define,
            WordAction::Illustrate(_) => ActionKind::Illustrate,
            WordAction::Fill(_) => ActionKind::Fill,
        }
    }
}

/// 动作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Define,
    Illustrate,
    Fill,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionKind::Define => "define",
            ActionKind::Illustrate => "illustrate",
            ActionKind::Fill => "fill",
        };
        f.write_str(name)
    }
}

/// 释义动作
///
/// `randomized_words` 在挂载动作时生成并随作业一起保存，学生端看到的是固定的乱序。
/// 从存储读回时重新校验：释义非空，乱序结果是释义单词的一个排列
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawDefineAction")]
pub struct DefineAction {
    pub definition: String,
    pub randomized_words: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDefineAction {
    definition: String,
    randomized_words: Vec<String>,
}

impl TryFrom<RawDefineAction> for DefineAction {
    type Error = String;

    fn try_from(raw: RawDefineAction) -> Result<Self, Self::Error> {
        if raw.definition.trim().is_empty() {
            return Err("释义不能为空".to_string());
        }

        let mut expected: Vec<&str> = raw.definition.split_whitespace().collect();
        let mut actual: Vec<&str> = raw.randomized_words.iter().map(String::as_str).collect();
        expected.sort_unstable();
        actual.sort_unstable();
        if expected != actual {
            return Err(format!("randomizedWords 不是释义 '{}' 的排列", raw.definition));
        }

        Ok(Self {
            definition: raw.definition,
            randomized_words: raw.randomized_words,
        })
    }
}

impl DefineAction {
    /// 释义按空白切分后的原始顺序
    pub fn definition_words(&self) -> Vec<&str> {
        self.definition.split_whitespace().collect()
    }
}

/// 配图动作，固定三张图片
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IllustrateAction {
    pub images: [ImageOption; REQUIRED_IMAGE_COUNT],
}

/// 单张候选图片
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageOption {
    pub url: String,
    pub source: ImageSource,
    #[serde(default, alias = "alt_text", skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

impl ImageOption {
    pub fn new(url: impl Into<String>, source: ImageSource) -> Self {
        Self {
            url: url.into(),
            source,
            alt_text: None,
        }
    }

    pub fn with_alt_text(mut self, alt_text: impl Into<String>) -> Self {
        self.alt_text = Some(alt_text.into());
        self
    }
}

/// 图片来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSource {
    Url,
    PhoneUpload,
    Library,
}

/// 填字母动作
///
/// 反序列化时按 `original_word` 重新计算，字母集合或计数不一致的数据会被拒绝
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawFillAction")]
pub struct FillAction {
    /// 大写、去重、升序；只包含单词中出现过的字母
    pub letters_to_hide: BTreeSet<char>,
    /// 大写单词中属于 `letters_to_hide` 的字符出现次数
    pub hidden_letter_count: usize,
    pub original_word: String,
}

impl FillAction {
    /// 根据选中的字母构造填字母动作
    ///
    /// 字母不区分大小写，不在单词中的字母会被忽略。结果集合为空时返回 `None`。
    pub fn new(original_word: &str, selected: impl IntoIterator<Item = char>) -> Option<Self> {
        let present: BTreeSet<char> = original_word.chars().map(upper).collect();
        let letters_to_hide: BTreeSet<char> = selected
            .into_iter()
            .map(upper)
            .filter(|c| present.contains(c))
            .collect();

        if letters_to_hide.is_empty() {
            return None;
        }

        let hidden_letter_count = original_word
            .chars()
            .map(upper)
            .filter(|c| letters_to_hide.contains(c))
            .count();

        Some(Self {
            letters_to_hide,
            hidden_letter_count,
            original_word: original_word.to_string(),
        })
    }

    /// 该字符（不区分大小写）是否需要隐藏
    pub fn hides(&self, c: char) -> bool {
        self.letters_to_hide.contains(&upper(c))
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFillAction {
    letters_to_hide: BTreeSet<char>,
    hidden_letter_count: usize,
    original_word: String,
}

impl TryFrom<RawFillAction> for FillAction {
    type Error = String;

    fn try_from(raw: RawFillAction) -> Result<Self, Self::Error> {
        let rebuilt = FillAction::new(&raw.original_word, raw.letters_to_hide.iter().copied())
            .ok_or_else(|| format!("单词 '{}' 没有要隐藏的字母", raw.original_word))?;

        if rebuilt.letters_to_hide != raw.letters_to_hide {
            return Err(format!(
                "lettersToHide 必须是单词 '{}' 中出现的大写字母",
                raw.original_word
            ));
        }
        if rebuilt.hidden_letter_count != raw.hidden_letter_count {
            return Err(format!(
                "hiddenLetterCount 应为 {}，实际 {}",
                rebuilt.hidden_letter_count, raw.hidden_letter_count
            ));
        }
        Ok(rebuilt)
    }
}

/// 单个字符转大写；多字符大写形式只取首字符，保证与原单词逐字符对齐
///
/// 因此 `'ß'` 按 `'S'` 处理：选中 "s" 时 "ß" 也会被隐藏并计数
pub(crate) fn upper(c: char) -> char {
    c.to_uppercase().next().unwrap_or(c)
}

/// 编辑界面提交的未校验动作
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionDraft {
    Define {
        definition: String,
    },
    Illustrate {
        #[serde(default)]
        images: Vec<ImageOption>,
    },
    Fill {
        #[serde(default, alias = "lettersToHide")]
        letters_to_hide: Vec<String>,
    },
}

impl ActionDraft {
    pub fn define(definition: impl Into<String>) -> Self {
        ActionDraft::Define {
            definition: definition.into(),
        }
    }

    pub fn illustrate(images: Vec<ImageOption>) -> Self {
        ActionDraft::Illustrate { images }
    }

    pub fn fill<I, S>(letters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ActionDraft::Fill {
            letters_to_hide: letters.into_iter().map(Into::into).collect(),
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            ActionDraft::Define { .. } => ActionKind::Define,
            ActionDraft::Illustrate { .. } => ActionKind::Illustrate,
            ActionDraft::Fill { .. } => ActionKind::Fill,
        }
    }
}
