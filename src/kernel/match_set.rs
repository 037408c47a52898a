//! 匹配集合与导航游标
//!
//! 匹配按文档顺序排列，同一叶子内按 offset 升序且互不重叠。
//! 非空时游标始终落在 [0, len) 内。

use crate::kernel::services::ports::search::Match;
use crate::kernel::services::ports::{LeafId, LeafTextAccessor};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    matches: Vec<Match>,
    cursor: Option<usize>,
}

impl MatchSet {
    pub fn new(matches: Vec<Match>) -> Self {
        let cursor = if matches.is_empty() { None } else { Some(0) };
        Self { matches, cursor }
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn current(&self) -> Option<Match> {
        self.cursor.and_then(|i| self.matches.get(i).copied())
    }

    pub fn clear(&mut self) {
        self.matches.clear();
        self.cursor = None;
    }

    /// 游标后移一位，末尾回绕到 0
    pub fn advance(&mut self) -> Option<Match> {
        let len = self.matches.len();
        if len == 0 {
            return None;
        }
        let next = match self.cursor {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.cursor = Some(next);
        Some(self.matches[next])
    }

    /// 游标前移一位，0 回绕到末尾
    pub fn retreat(&mut self) -> Option<Match> {
        let len = self.matches.len();
        if len == 0 {
            return None;
        }
        let prev = match self.cursor {
            Some(i) if i > 0 && i < len => i - 1,
            _ => len - 1,
        };
        self.cursor = Some(prev);
        Some(self.matches[prev])
    }

    pub fn next<D: LeafTextAccessor>(&mut self, doc: &mut D) -> Option<Match> {
        let m = self.advance()?;
        focus_match(doc, &m);
        Some(m)
    }

    pub fn prev<D: LeafTextAccessor>(&mut self, doc: &mut D) -> Option<Match> {
        let m = self.retreat()?;
        focus_match(doc, &m);
        Some(m)
    }

    /// 移除游标处的匹配，并把同一叶子后续匹配按 delta 平移。
    ///
    /// 返回被移除的匹配；游标按剩余数量收敛（越界回绕到 0），
    /// 集合变空时游标清空。
    pub(crate) fn remove_current_and_rebase(&mut self, replacement_len: usize) -> Option<Match> {
        let index = self.cursor?;
        if index >= self.matches.len() {
            return None;
        }
        let removed = self.matches.remove(index);
        self.rebase_after(removed.leaf, removed.offset, removed.len, replacement_len);

        self.cursor = if self.matches.is_empty() {
            None
        } else if index >= self.matches.len() {
            Some(0)
        } else {
            Some(index)
        };
        Some(removed)
    }

    fn rebase_after(&mut self, leaf: LeafId, offset: usize, old_len: usize, new_len: usize) {
        if old_len == new_len {
            return;
        }
        for m in self
            .matches
            .iter_mut()
            .filter(|m| m.leaf == leaf && m.offset > offset)
        {
            m.offset = m.offset + new_len - old_len;
        }
    }
}

/// 选中并滚动到匹配处；失败只记录日志，不影响匹配集合
pub(crate) fn focus_match<D: LeafTextAccessor>(doc: &mut D, m: &Match) {
    if let Err(e) = doc.select_range(m.leaf, m.offset, m.end()) {
        tracing::debug!(error = %e, leaf = ?m.leaf, "match focus skipped");
        return;
    }
    if let Err(e) = doc.scroll_into_selection() {
        tracing::debug!(error = %e, "scroll into selection failed");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/match_set.rs"]
mod tests;
