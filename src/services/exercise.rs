//! 学生端练习视图 - 业务能力层
//!
//! 在展示时才对每个已配置动作的单词做变换；释义乱序直接使用保存下来的结果

use crate::models::{ContentDocument, DefineAction, FillAction, ImageOption, WordAction, WordAddress};
use crate::services::randomizer::obscure_word;

/// 单个练习项
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExerciseItem {
    /// 按正确顺序排列释义单词
    Define {
        address: WordAddress,
        word: String,
        tiles: Vec<String>,
    },
    /// 三选一配图
    Illustrate {
        address: WordAddress,
        word: String,
        images: Vec<ImageOption>,
    },
    /// 补全被隐藏的字母
    Fill {
        address: WordAddress,
        word: String,
        cells: Vec<char>,
        hidden_count: usize,
    },
}

impl ExerciseItem {
    pub fn address(&self) -> WordAddress {
        match self {
            ExerciseItem::Define { address, .. }
            | ExerciseItem::Illustrate { address, .. }
            | ExerciseItem::Fill { address, .. } => *address,
        }
    }
}

/// 为整篇文档生成练习项，顺序与文档一致
pub fn build_exercise(document: &ContentDocument, placeholder: char) -> Vec<ExerciseItem> {
    document
        .words()
        .filter_map(|word| {
            let action = word.action.as_ref()?;
            let item = match action {
                WordAction::Define(define) => ExerciseItem::Define {
                    address: word.address,
                    word: word.text.clone(),
                    tiles: define.randomized_words.clone(),
                },
                WordAction::Illustrate(illustrate) => ExerciseItem::Illustrate {
                    address: word.address,
                    word: word.text.clone(),
                    images: illustrate.images.to_vec(),
                },
                WordAction::Fill(fill) => ExerciseItem::Fill {
                    address: word.address,
                    word: word.text.clone(),
                    cells: obscure_word(fill, placeholder),
                    hidden_count: fill.hidden_letter_count,
                },
            };
            Some(item)
        })
        .collect()
}

/// 学生排出的释义顺序是否正确
pub fn check_definition_order<S: AsRef<str>>(define: &DefineAction, attempt: &[S]) -> bool {
    let expected = define.definition_words();
    expected.len() == attempt.len()
        && expected
            .iter()
            .zip(attempt)
            .all(|(want, got)| *want == got.as_ref())
}

/// 学生补全的单词是否正确（不区分大小写）
pub fn check_fill_answer(fill: &FillAction, attempt: &str) -> bool {
    let attempt = attempt.trim();
    attempt.chars().count() == fill.original_word.chars().count()
        && attempt
            .chars()
            .zip(fill.original_word.chars())
            .all(|(got, want)| got.to_uppercase().eq(want.to_uppercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActionDraft, ImageSource};
    use crate::services::ContentBuilder;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn prepared() -> ContentDocument {
        let builder = ContentBuilder::new();
        let mut rng = StdRng::seed_from_u64(11);
        let doc = builder.build("The cat sat. It was happy!");
        let doc = builder
            .attach_action_with_rng(
                &doc,
                &WordAddress::new(1, 2),
                ActionDraft::fill(["p"]),
                &mut rng,
            )
            .unwrap();
        let doc = builder
            .attach_action_with_rng(
                &doc,
                &WordAddress::new(0, 1),
                ActionDraft::define("a small furry animal"),
                &mut rng,
            )
            .unwrap();
        builder
            .attach_action_with_rng(
                &doc,
                &WordAddress::new(0, 2),
                ActionDraft::illustrate(vec![
                    ImageOption::new("1.png", ImageSource::Url),
                    ImageOption::new("2.png", ImageSource::Library),
                    ImageOption::new("3.png", ImageSource::PhoneUpload),
                ]),
                &mut rng,
            )
            .unwrap()
    }

    #[test]
    fn test_exercise_follows_document_order() {
        let items = build_exercise(&prepared(), '_');
        let addresses: Vec<String> = items.iter().map(|i| i.address().to_string()).collect();
        assert_eq!(addresses, vec!["s0_w1", "s0_w2", "s1_w2"]);

        match &items[2] {
            ExerciseItem::Fill { cells, hidden_count, word, .. } => {
                assert_eq!(word, "happy!");
                assert_eq!(cells.iter().collect::<String>(), "ha__y!");
                assert_eq!(*hidden_count, 2);
            }
            other => panic!("unexpected item: {other:?}"),
        }
        match &items[1] {
            ExerciseItem::Illustrate { images, .. } => {
                assert_eq!(images.len(), 3);
                assert_eq!(images[0].url, "1.png");
            }
            other => panic!("unexpected item: {other:?}"),
        }
    }

    #[test]
    fn test_define_tiles_are_the_frozen_shuffle() {
        let doc = prepared();
        let items = build_exercise(&doc, '_');
        let frozen = match &doc.get_word(&WordAddress::new(0, 1)).unwrap().action {
            Some(WordAction::Define(define)) => define.randomized_words.clone(),
            other => panic!("unexpected action: {other:?}"),
        };
        // 多次渲染看到同一个乱序
        assert_eq!(items[0], build_exercise(&doc, '_')[0]);
        match &items[0] {
            ExerciseItem::Define { tiles, .. } => assert_eq!(tiles, &frozen),
            other => panic!("unexpected item: {other:?}"),
        }
    }

    #[test]
    fn test_check_answers() {
        let define = DefineAction {
            definition: "a small furry animal".to_string(),
            randomized_words: vec![],
        };
        assert!(check_definition_order(&define, &["a", "small", "furry", "animal"]));
        assert!(!check_definition_order(&define, &["small", "a", "furry", "animal"]));
        assert!(!check_definition_order(&define, &["a", "small", "furry"]));

        let fill = FillAction::new("Letter", ['e']).unwrap();
        assert!(check_fill_answer(&fill, "letter"));
        assert!(check_fill_answer(&fill, " LETTER "));
        assert!(!check_fill_answer(&fill, "latter"));
        assert!(!check_fill_answer(&fill, "letters"));
    }
}
