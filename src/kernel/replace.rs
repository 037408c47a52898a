//! 替换：单个替换（带 offset 重定位）与全部替换

use crate::kernel::match_set::{focus_match, MatchSet};
use crate::kernel::search::SearchConfig;
use crate::kernel::services::ports::search::{Match, SearchError, SearchOptions};
use crate::kernel::services::ports::{DocumentError, LeafId, LeafTextAccessor, UpdateTags};
use rustc_hash::FxHashMap;

pub type Result<T> = std::result::Result<T, ReplaceError>;

#[derive(Debug)]
pub enum ReplaceError {
    NoMatchSelected,
    NoMatchesFound,
    /// 匹配不再对应叶子当前文本（叶子被删或外部编辑）
    StaleMatch(Match),
    Search(SearchError),
    Document(DocumentError),
}

impl std::fmt::Display for ReplaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplaceError::NoMatchSelected => write!(f, "No match selected to replace"),
            ReplaceError::NoMatchesFound => write!(f, "No matches found"),
            ReplaceError::StaleMatch(_) => {
                write!(f, "Document changed since the last search, search again")
            }
            ReplaceError::Search(e) => write!(f, "{}", e),
            ReplaceError::Document(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ReplaceError {}

impl From<SearchError> for ReplaceError {
    fn from(e: SearchError) -> Self {
        ReplaceError::Search(e)
    }
}

impl From<DocumentError> for ReplaceError {
    fn from(e: DocumentError) -> Self {
        ReplaceError::Document(e)
    }
}

/// 替换游标处的匹配，返回被替换的匹配。
///
/// 同一叶子内位于其后的匹配按 `replacement.len() - m.len` 平移，
/// 其它叶子的匹配不动。替换后聚焦到新的当前匹配；
/// 没有剩余匹配时把光标放回被修改的叶子。
pub fn replace_current<D: LeafTextAccessor>(
    doc: &mut D,
    matches: &mut MatchSet,
    replacement: &str,
) -> Result<Match> {
    let Some(current) = matches.current() else {
        return Err(ReplaceError::NoMatchSelected);
    };

    doc.mutate(UpdateTags::new(), |doc| -> Result<Match> {
        let text = doc
            .text(current.leaf)
            .ok_or(ReplaceError::StaleMatch(current))?;
        let new_text = splice(&text, std::iter::once(current.range()), replacement)
            .ok_or(ReplaceError::StaleMatch(current))?;
        doc.set_text(current.leaf, new_text)?;

        let removed = matches.remove_current_and_rebase(replacement.len());
        debug_assert_eq!(removed, Some(current));

        match matches.current() {
            Some(next) => focus_match(doc, &next),
            None => {
                if let Err(e) = doc.place_caret(current.leaf) {
                    tracing::debug!(error = %e, "place caret after replace failed");
                }
            }
        }
        Ok(current)
    })
}

/// 重新搜索后替换全部匹配，返回替换数量。
///
/// 每个叶子只写一次，使用本次搜索得到的区间列表。
pub fn replace_all<D: LeafTextAccessor>(
    doc: &mut D,
    matches: &mut MatchSet,
    options: &SearchOptions,
    replacement: &str,
) -> Result<usize> {
    let fresh = match SearchConfig::compile(options)? {
        Some(config) => crate::kernel::search::search_with(doc, &config),
        None => MatchSet::default(),
    };
    if fresh.is_empty() {
        return Err(ReplaceError::NoMatchesFound);
    }

    let mut order: Vec<LeafId> = Vec::new();
    let mut per_leaf: FxHashMap<LeafId, Vec<std::ops::Range<usize>>> = FxHashMap::default();
    for m in fresh.matches() {
        per_leaf
            .entry(m.leaf)
            .or_insert_with(|| {
                order.push(m.leaf);
                Vec::new()
            })
            .push(m.range());
    }

    let total = fresh.len();
    doc.mutate(UpdateTags::new(), |doc| -> Result<()> {
        for leaf in &order {
            let ranges = &per_leaf[leaf];
            let text = doc.text(*leaf).ok_or(DocumentError::UnknownLeaf(*leaf))?;
            let Some(new_text) = splice(&text, ranges.iter().cloned(), replacement) else {
                // 刚搜索过，区间必然有效
                return Err(DocumentError::InvalidRange {
                    leaf: *leaf,
                    start: ranges[0].start,
                    end: ranges[ranges.len() - 1].end,
                }
                .into());
            };
            doc.set_text(*leaf, new_text)?;
        }
        doc.clear_selection();
        Ok(())
    })?;

    matches.clear();
    tracing::info!(replaced = total, leaves = order.len(), "replace all complete");
    Ok(total)
}

/// 按升序、不重叠的区间拼接出新文本；区间越界或不在字符边界时返回 None
fn splice(
    text: &str,
    ranges: impl IntoIterator<Item = std::ops::Range<usize>>,
    replacement: &str,
) -> Option<String> {
    let mut out = String::with_capacity(text.len());
    let mut last = 0usize;
    for range in ranges {
        if range.start < last {
            return None;
        }
        out.push_str(text.get(last..range.start)?);
        text.get(range.clone())?;
        out.push_str(replacement);
        last = range.end;
    }
    out.push_str(text.get(last..)?);
    Some(out)
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/replace.rs"]
mod tests;
