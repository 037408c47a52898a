//! 文本统计：字符、单词、句子与预计阅读时间

use crate::kernel::services::ports::LeafTextAccessor;
use regex::Regex;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

const WORDS_PER_MINUTE: usize = 200;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadingTime {
    pub minutes: usize,
    pub seconds: usize,
}

impl ReadingTime {
    pub fn for_words(words: usize) -> Self {
        let minutes = words / WORDS_PER_MINUTE;
        let rest = words % WORDS_PER_MINUTE;
        // 四舍五入到整秒
        let seconds = (60 * rest * 2 + WORDS_PER_MINUTE) / (2 * WORDS_PER_MINUTE);
        Self { minutes, seconds }
    }
}

impl std::fmt::Display for ReadingTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}m {}s", self.minutes, self.seconds)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStatistics {
    pub characters: usize,
    pub characters_excluding_spaces: usize,
    pub words: usize,
    pub sentences: usize,
    pub reading_time: ReadingTime,
}

impl TextStatistics {
    pub fn compute(text: &str) -> Self {
        let words = text.split_whitespace().count();
        Self {
            characters: text.graphemes(true).count(),
            characters_excluding_spaces: text.chars().filter(|c| !c.is_whitespace()).count(),
            words,
            sentences: sentence_regex().find_iter(text).count(),
            reading_time: ReadingTime::for_words(words),
        }
    }

    /// 叶子文本按文档顺序以 "\n\n" 连接后统计
    pub fn for_document<D: LeafTextAccessor>(doc: &D) -> Self {
        let text = doc
            .traverse_leaves()
            .iter()
            .map(|leaf| leaf.text)
            .collect::<Vec<_>>()
            .join("\n\n");
        Self::compute(&text)
    }
}

fn sentence_regex() -> &'static Regex {
    static SENTENCE: OnceLock<Regex> = OnceLock::new();
    SENTENCE.get_or_init(|| Regex::new(r"[^.!?]+[.!?]+").expect("valid sentence regex"))
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/statistics.rs"]
mod tests;
