//! 文档内搜索
//!
//! 每次调用都重新编译模式并完整遍历叶子，不维护任何跨调用状态。

use crate::kernel::match_set::MatchSet;
use crate::kernel::services::ports::search::{Match, Result as SearchResult, SearchOptions};
use crate::kernel::services::ports::LeafTextAccessor;
use regex::{Regex, RegexBuilder};

/// 编译好的搜索模式
#[derive(Debug, Clone)]
pub struct SearchConfig {
    regex: Regex,
}

impl SearchConfig {
    /// 空模式返回 Ok(None)
    pub fn compile(options: &SearchOptions) -> SearchResult<Option<Self>> {
        if options.pattern.is_empty() {
            return Ok(None);
        }

        let source = if options.whole_word {
            format!(r"\b(?:{})\b", options.pattern)
        } else {
            options.pattern.clone()
        };

        let regex = RegexBuilder::new(&source)
            .case_insensitive(!options.case_sensitive)
            .build()?;
        Ok(Some(Self { regex }))
    }

    pub fn as_regex(&self) -> &Regex {
        &self.regex
    }

    /// 单个文本内所有不重叠的匹配区间，跳过零长度匹配
    pub fn find_ranges<'a>(
        &'a self,
        text: &'a str,
    ) -> impl Iterator<Item = std::ops::Range<usize>> + 'a {
        self.regex
            .find_iter(text)
            .filter(|m| !m.is_empty())
            .map(|m| m.range())
    }
}

/// 按文档顺序搜索所有叶子
pub fn search<D: LeafTextAccessor>(doc: &D, options: &SearchOptions) -> SearchResult<MatchSet> {
    let Some(config) = SearchConfig::compile(options)? else {
        return Ok(MatchSet::default());
    };
    Ok(search_with(doc, &config))
}

pub fn search_with<D: LeafTextAccessor>(doc: &D, config: &SearchConfig) -> MatchSet {
    let mut matches = Vec::new();
    for leaf in doc.traverse_leaves() {
        matches.extend(
            config
                .find_ranges(leaf.text)
                .map(|r| Match::new(leaf.id, r.start, r.end - r.start)),
        );
    }

    tracing::debug!(total = matches.len(), "document search complete");
    MatchSet::new(matches)
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/search.rs"]
mod tests;
