//! 查找替换会话：选项、匹配导航与替换命令

use crate::kernel::match_set::{focus_match, MatchSet};
use crate::kernel::replace::{self, ReplaceError};
use crate::kernel::search;
use crate::kernel::services::ports::search::{Match, SearchOptions};
use crate::kernel::services::ports::{LeafTextAccessor, SearchDefaults};

pub const MSG_EMPTY_PATTERN: &str = "Please enter at least one character in the search box";
pub const MSG_NO_MATCHES: &str = "No matches found";

/// 查找替换会话状态：选项、替换文本、匹配集合与提示信息
#[derive(Debug, Clone, Default)]
pub struct FindReplaceState {
    options: SearchOptions,
    replacement: String,
    matches: MatchSet,
    feedback: Option<String>,
}

impl FindReplaceState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults(defaults: &SearchDefaults) -> Self {
        Self {
            options: SearchOptions::default()
                .case_sensitive(defaults.case_sensitive)
                .whole_word(defaults.whole_word),
            ..Self::default()
        }
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    pub fn matches(&self) -> &MatchSet {
        &self.matches
    }

    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    /// 模式或选项变化时丢弃旧的匹配集合
    pub fn set_options(&mut self, options: SearchOptions) -> bool {
        if self.options == options {
            return false;
        }
        self.options = options;
        self.matches.clear();
        true
    }

    pub fn set_pattern(&mut self, pattern: impl Into<String>) -> bool {
        let options = SearchOptions {
            pattern: pattern.into(),
            ..self.options.clone()
        };
        self.set_options(options)
    }

    pub fn set_case_sensitive(&mut self, value: bool) -> bool {
        let options = self.options.clone().case_sensitive(value);
        self.set_options(options)
    }

    pub fn set_whole_word(&mut self, value: bool) -> bool {
        let options = self.options.clone().whole_word(value);
        self.set_options(options)
    }

    pub fn set_replacement(&mut self, replacement: impl Into<String>) {
        self.replacement = replacement.into();
    }

    /// 执行查找并聚焦第一个匹配，返回匹配数量
    pub fn find<D: LeafTextAccessor>(&mut self, doc: &mut D) -> usize {
        if self.options.pattern.is_empty() {
            self.matches.clear();
            self.feedback = Some(MSG_EMPTY_PATTERN.to_string());
            return 0;
        }

        self.matches = match search::search(doc, &self.options) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::debug!(error = %e, pattern = %self.options.pattern, "find failed");
                self.matches.clear();
                self.feedback = Some(e.to_string());
                return 0;
            }
        };

        let Some(first) = self.matches.current() else {
            self.feedback = Some(MSG_NO_MATCHES.to_string());
            return 0;
        };

        focus_match(doc, &first);
        self.feedback = None;
        self.matches.len()
    }

    pub fn next<D: LeafTextAccessor>(&mut self, doc: &mut D) -> Option<Match> {
        self.matches.next(doc)
    }

    pub fn prev<D: LeafTextAccessor>(&mut self, doc: &mut D) -> Option<Match> {
        self.matches.prev(doc)
    }

    pub fn replace_current<D: LeafTextAccessor>(&mut self, doc: &mut D) -> Option<Match> {
        match replace::replace_current(doc, &mut self.matches, &self.replacement) {
            Ok(m) => {
                self.feedback = None;
                Some(m)
            }
            Err(e) => {
                self.report(e);
                None
            }
        }
    }

    /// 返回替换数量；失败时写入提示信息并返回 0
    pub fn replace_all<D: LeafTextAccessor>(&mut self, doc: &mut D) -> usize {
        match replace::replace_all(doc, &mut self.matches, &self.options, &self.replacement) {
            Ok(n) => {
                self.feedback = None;
                n
            }
            Err(e) => {
                self.report(e);
                0
            }
        }
    }

    /// 形如 "2/5"，无匹配时为 "0/0"
    pub fn counter_label(&self) -> String {
        let current = self.matches.cursor().map(|i| i + 1).unwrap_or(0);
        format!("{}/{}", current, self.matches.len())
    }

    pub fn navigation_enabled(&self) -> bool {
        self.matches.len() >= 2
    }

    pub fn close(&mut self) {
        self.matches.clear();
        self.feedback = None;
    }

    fn report(&mut self, e: ReplaceError) {
        if let ReplaceError::Search(_) = &e {
            self.matches.clear();
        }
        tracing::debug!(error = %e, "find/replace command not applied");
        self.feedback = Some(e.to_string());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/find_replace.rs"]
mod tests;
