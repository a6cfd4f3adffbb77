//! 乱序与遮挡 - 业务能力层
//!
//! 为学生端生成每种动作的展示形式：释义乱序、填字母遮挡；配图原样展示。

use rand::Rng;

use crate::models::FillAction;

/// 默认占位符
pub const DEFAULT_PLACEHOLDER: char = '_';

/// 把释义按空白切分后做 Fisher–Yates 洗牌
pub fn shuffle_definition<R: Rng + ?Sized>(definition: &str, rng: &mut R) -> Vec<String> {
    let mut words: Vec<String> = definition.split_whitespace().map(String::from).collect();
    fisher_yates(&mut words, rng);
    words
}

/// i 从末尾递减到 1，j 在 [0, i] 中均匀抽取
fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// 生成填字母题面
///
/// 被隐藏的字符替换为占位符，其余保持原字符；长度和顺序与原单词一致
pub fn obscure_word(fill: &FillAction, placeholder: char) -> Vec<char> {
    fill.original_word
        .chars()
        .map(|c| if fill.hides(c) { placeholder } else { c })
        .collect()
}
