//! 单词地址
//!
//! `s{句子序号}_w{单词序号}`，两部分均从 0 开始，是对外稳定的字符串格式

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ContentError;

/// 单词在内容文档中的地址
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WordAddress {
    pub sentence_index: usize,
    pub word_index: usize,
}

impl WordAddress {
    pub fn new(sentence_index: usize, word_index: usize) -> Self {
        Self {
            sentence_index,
            word_index,
        }
    }

    /// 所属句子的 id（`s{N}`）
    pub fn sentence_id(&self) -> String {
        sentence_id(self.sentence_index)
    }
}

/// 句子 id 格式
pub fn sentence_id(sentence_index: usize) -> String {
    format!("s{}", sentence_index)
}

fn address_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // 不允许前导零，也不允许首尾空白
    PATTERN.get_or_init(|| {
        Regex::new(r"^s(0|[1-9][0-9]*)_w(0|[1-9][0-9]*)$").expect("地址正则表达式有效")
    })
}

impl fmt::Display for WordAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}_w{}", self.sentence_index, self.word_index)
    }
}

impl FromStr for WordAddress {
    type Err = ContentError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || ContentError::InvalidAddress {
            raw: raw.to_string(),
        };

        let caps = address_pattern().captures(raw).ok_or_else(invalid)?;
        let sentence_index = caps[1].parse().map_err(|_| invalid())?;
        let word_index = caps[2].parse().map_err(|_| invalid())?;

        Ok(Self::new(sentence_index, word_index))
    }
}

impl TryFrom<String> for WordAddress {
    type Error = ContentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WordAddress> for String {
    fn from(address: WordAddress) -> Self {
        address.to_string()
    }
}
