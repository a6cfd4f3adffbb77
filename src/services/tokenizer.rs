//! 分词服务 - 业务能力层
//!
//! 段落 → 句子 → 单词，为每个单词分配 `s{N}_w{M}` 地址。
//! 纯函数：同一段落多次分词得到结构完全相同的文档。

use std::sync::{Arc, OnceLock};

use regex::Regex;
use tracing::debug;

use crate::models::{ContentDocument, Sentence, Word, WordAddress};

const TERMINATORS: [char; 3] = ['.', '!', '?'];

fn sentence_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^.!?]+[.!?]+").expect("句子正则表达式有效"))
}

/// 把段落切分为候选句子（未去空白）
///
/// 最后一个句末标点之后的剩余文本也作为一个候选句子保留；
/// 全文没有句末标点时整段即为一个句子。
fn split_sentences(paragraph: &str) -> Vec<&str> {
    let mut candidates = Vec::new();
    let mut last_end = 0;

    for m in sentence_pattern().find_iter(paragraph) {
        candidates.push(m.as_str());
        last_end = m.end();
    }

    let rest = &paragraph[last_end..];
    if !rest.trim().is_empty() {
        candidates.push(rest);
    }

    candidates
}

/// 只由句末标点组成的句子（如 `"."`、`"?!"`）没有单词
fn is_punctuation_only(sentence: &str) -> bool {
    sentence
        .chars()
        .all(|c| c.is_whitespace() || TERMINATORS.contains(&c))
}

/// 分词器
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer;

impl Tokenizer {
    pub fn new() -> Self {
        Self
    }

    /// 把段落构建为内容文档，所有单词的动作均为空
    pub fn tokenize(&self, paragraph: &str) -> ContentDocument {
        let mut sentences = Vec::new();

        for candidate in split_sentences(paragraph) {
            let text = candidate.trim();
            if text.is_empty() || is_punctuation_only(text) {
                continue;
            }

            let tokens: Vec<&str> = text.split_whitespace().collect();
            if tokens.is_empty() {
                continue;
            }

            // 序号取自保留下来的句子，被丢弃的空句子不占用序号
            let sentence_index = sentences.len();
            let words = tokens
                .into_iter()
                .enumerate()
                .map(|(word_index, token)| {
                    Arc::new(Word::new(WordAddress::new(sentence_index, word_index), token))
                })
                .collect();

            sentences.push(Arc::new(Sentence::new(sentence_index, text, words)));
        }

        let document = ContentDocument::new(paragraph, sentences);
        debug!(
            "分词完成: {} 个句子, {} 个单词",
            document.sentence_count(),
            document.word_count()
        );
        document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn word_texts(doc: &ContentDocument) -> Vec<Vec<String>> {
        doc.sentences
            .iter()
            .map(|s| s.words.iter().map(|w| w.text.clone()).collect())
            .collect()
    }

    #[test]
    fn test_basic_paragraph() {
        let doc = Tokenizer::new().tokenize("The cat sat. It was happy!");

        assert_eq!(&*doc.original_paragraph, "The cat sat. It was happy!");
        assert_eq!(
            word_texts(&doc),
            vec![vec!["The", "cat", "sat."], vec!["It", "was", "happy!"]]
        );
        assert_eq!(doc.sentences[0].id, "s0");
        assert_eq!(doc.sentences[1].id, "s1");
        assert_eq!(doc.sentences[1].text, "It was happy!");
        assert_eq!(doc.sentences[1].words[2].address.to_string(), "s1_w2");
        assert!(doc.words().all(|w| w.action.is_none()));
    }

    #[test]
    fn test_empty_sentence_does_not_consume_index() {
        let doc = Tokenizer::new().tokenize("Hello.   . World!");

        assert_eq!(doc.sentence_count(), 2);
        assert_eq!(doc.sentences[0].id, "s0");
        assert_eq!(doc.sentences[0].text, "Hello.");
        assert_eq!(doc.sentences[1].id, "s1");
        assert_eq!(doc.sentences[1].text, "World!");
        assert_eq!(doc.sentences[1].words[0].address, WordAddress::new(1, 0));
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(Tokenizer::new().tokenize("").is_empty());
        assert!(Tokenizer::new().tokenize("   \n\t ").is_empty());
        assert!(Tokenizer::new().tokenize("?!...").is_empty());
    }

    #[test]
    fn test_no_terminator_is_single_sentence() {
        let doc = Tokenizer::new().tokenize("  just   some words\nhere ");
        assert_eq!(word_texts(&doc), vec![vec!["just", "some", "words", "here"]]);
        assert_eq!(doc.sentences[0].text, "just   some words\nhere");
    }

    #[test]
    fn test_trailing_text_after_last_terminator_is_kept() {
        let doc = Tokenizer::new().tokenize("Stop here. And then");
        assert_eq!(word_texts(&doc), vec![vec!["Stop", "here."], vec!["And", "then"]]);
    }

    #[test]
    fn test_terminator_runs_stay_with_sentence() {
        let doc = Tokenizer::new().tokenize("Really?! Yes... ok");
        assert_eq!(
            word_texts(&doc),
            vec![vec!["Really?!"], vec!["Yes..."], vec!["ok"]]
        );
    }

    #[test]
    fn test_tokenize_is_deterministic() {
        let paragraph = "One fish. Two fish!  Red fish? Blue fish";
        let tokenizer = Tokenizer::new();
        assert_eq!(tokenizer.tokenize(paragraph), tokenizer.tokenize(paragraph));
    }

    #[test]
    fn test_addresses_unique_and_resolvable() {
        let doc = Tokenizer::new().tokenize("A b c. D e! F? g h i j.");
        let mut seen = HashSet::new();
        for word in doc.words() {
            assert!(seen.insert(word.address), "重复地址 {}", word.address);
            assert_eq!(doc.get_word(&word.address).unwrap().text, word.text);
        }
        assert_eq!(seen.len(), doc.word_count());
    }

    #[test]
    fn test_flattened_words_match_normalized_paragraph() {
        let paragraph = "  The  quick fox.\nJumps over!   the dog  ";
        let doc = Tokenizer::new().tokenize(paragraph);
        let flattened: Vec<&str> = doc.words().map(|w| w.text.as_str()).collect();
        let normalized: Vec<&str> = paragraph.split_whitespace().collect();
        assert_eq!(flattened, normalized);
    }
}
