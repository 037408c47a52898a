//! 内存文档
//!
//! 扁平的段落列表，实现叶子访问与事务契约，用于嵌入与测试。
//! 每个最外层事务提交时记录一次 `DocumentUpdate`，宿主用 `take_updates` 取走。

use crate::kernel::services::ports::document::{
    DocumentError, DocumentState, DocumentUpdate, Leaf, LeafId, LeafTextAccessor,
    Result as DocumentResult, UpdateTags,
};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

const STATE_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub leaf: LeafId,
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn is_caret(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializedDocument {
    version: u32,
    leaves: Vec<String>,
}

#[derive(Debug, Default)]
struct Transaction {
    depth: usize,
    tags: UpdateTags,
    dirty_leaves: FxHashSet<LeafId>,
    dirty_elements: usize,
    previous_state_was_empty: bool,
}

#[derive(Debug, Default)]
pub struct MemoryDocument {
    leaves: SlotMap<LeafId, String>,
    order: Vec<LeafId>,
    selection: Option<Selection>,
    scrolled_to: Option<LeafId>,
    txn: Transaction,
    updates: Vec<DocumentUpdate>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// 直接构造初始内容，不产生更新通知
    pub fn from_paragraphs<S: AsRef<str>>(paragraphs: &[S]) -> Self {
        let mut doc = Self::new();
        for p in paragraphs {
            let id = doc.leaves.insert(p.as_ref().to_string());
            doc.order.push(id);
        }
        doc
    }

    pub fn leaf_ids(&self) -> &[LeafId] {
        &self.order
    }

    pub fn leaf_text(&self, leaf: LeafId) -> Option<&str> {
        self.leaves.get(leaf).map(String::as_str)
    }

    pub fn paragraphs(&self) -> Vec<&str> {
        self.order
            .iter()
            .filter_map(|id| self.leaves.get(*id).map(String::as_str))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn scrolled_to(&self) -> Option<LeafId> {
        self.scrolled_to
    }

    /// 取走已提交事务的更新通知
    pub fn take_updates(&mut self) -> Vec<DocumentUpdate> {
        std::mem::take(&mut self.updates)
    }

    pub fn push_leaf(&mut self, text: impl Into<String>) -> LeafId {
        let text = text.into();
        self.mutate(UpdateTags::new(), |doc| {
            let id = doc.leaves.insert(text);
            doc.order.push(id);
            doc.txn.dirty_elements += 1;
            doc.txn.dirty_leaves.insert(id);
            id
        })
    }

    pub fn remove_leaf(&mut self, leaf: LeafId) -> DocumentResult<String> {
        self.mutate(UpdateTags::new(), |doc| {
            let text = doc.leaves.remove(leaf).ok_or(DocumentError::UnknownLeaf(leaf))?;
            doc.order.retain(|id| *id != leaf);
            if doc.selection.map(|s| s.leaf) == Some(leaf) {
                doc.selection = None;
            }
            doc.txn.dirty_elements += 1;
            Ok(text)
        })
    }

    /// 模拟用户输入：整段替换叶子文本
    pub fn edit(&mut self, leaf: LeafId, text: impl Into<String>) -> DocumentResult<()> {
        self.set_text(leaf, text.into())
    }

    fn validate_range(&self, leaf: LeafId, start: usize, end: usize) -> DocumentResult<()> {
        let text = self
            .leaves
            .get(leaf)
            .ok_or(DocumentError::UnknownLeaf(leaf))?;
        if start > end || text.get(start..end).is_none() {
            return Err(DocumentError::InvalidRange { leaf, start, end });
        }
        Ok(())
    }

    fn commit(&mut self) {
        let txn = std::mem::take(&mut self.txn);
        self.updates.push(DocumentUpdate {
            changed_element_count: txn.dirty_elements,
            changed_leaf_count: txn.dirty_leaves.len(),
            previous_state_was_empty: txn.previous_state_was_empty,
            tags: txn.tags,
        });
    }
}

impl LeafTextAccessor for MemoryDocument {
    fn traverse_leaves(&self) -> Vec<Leaf<'_>> {
        self.order
            .iter()
            .filter_map(|id| {
                self.leaves.get(*id).map(|text| Leaf {
                    id: *id,
                    text: text.as_str(),
                })
            })
            .collect()
    }

    fn text(&self, leaf: LeafId) -> Option<String> {
        self.leaves.get(leaf).cloned()
    }

    fn set_text(&mut self, leaf: LeafId, text: String) -> DocumentResult<()> {
        if self.txn.depth == 0 {
            return self.mutate(UpdateTags::new(), |doc| doc.set_text(leaf, text));
        }
        let slot = self
            .leaves
            .get_mut(leaf)
            .ok_or(DocumentError::UnknownLeaf(leaf))?;
        if *slot != text {
            *slot = text;
            self.txn.dirty_leaves.insert(leaf);
        }
        // 文本变了，旧选区可能越界
        if let Some(sel) = self.selection {
            if sel.leaf == leaf && self.validate_range(leaf, sel.start, sel.end).is_err() {
                self.selection = None;
            }
        }
        Ok(())
    }

    fn select_range(&mut self, leaf: LeafId, start: usize, end: usize) -> DocumentResult<()> {
        self.validate_range(leaf, start, end)?;
        self.selection = Some(Selection { leaf, start, end });
        Ok(())
    }

    fn scroll_into_selection(&mut self) -> DocumentResult<()> {
        let Some(sel) = self.selection else {
            return Err(DocumentError::InvalidState("no selection".to_string()));
        };
        self.scrolled_to = Some(sel.leaf);
        Ok(())
    }

    fn place_caret(&mut self, leaf: LeafId) -> DocumentResult<()> {
        let len = self
            .leaves
            .get(leaf)
            .ok_or(DocumentError::UnknownLeaf(leaf))?
            .len();
        self.selection = Some(Selection {
            leaf,
            start: len,
            end: len,
        });
        Ok(())
    }

    fn clear_selection(&mut self) {
        self.selection = None;
    }

    fn mutate<R, F>(&mut self, tags: UpdateTags, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        if self.txn.depth == 0 {
            self.txn.previous_state_was_empty = self.order.is_empty();
        }
        for tag in tags.iter() {
            self.txn.tags.insert(tag);
        }
        self.txn.depth += 1;
        let result = f(self);
        self.txn.depth -= 1;
        if self.txn.depth == 0 {
            self.commit();
        }
        result
    }
}

impl DocumentState for MemoryDocument {
    fn serialize_state(&self) -> String {
        let state = SerializedDocument {
            version: STATE_VERSION,
            leaves: self.paragraphs().into_iter().map(str::to_string).collect(),
        };
        // Vec<String> 序列化不会失败
        serde_json::to_string(&state).unwrap_or_default()
    }

    fn install_state(&mut self, payload: &str) -> DocumentResult<()> {
        let state: SerializedDocument = serde_json::from_str(payload)
            .map_err(|e| DocumentError::InvalidState(e.to_string()))?;
        if state.version != STATE_VERSION {
            return Err(DocumentError::InvalidState(format!(
                "unsupported state version {}",
                state.version
            )));
        }

        let install = |doc: &mut Self| {
            doc.leaves.clear();
            doc.order.clear();
            doc.selection = None;
            doc.scrolled_to = None;
            for text in state.leaves {
                let id = doc.leaves.insert(text);
                doc.order.push(id);
                doc.txn.dirty_leaves.insert(id);
            }
            doc.txn.dirty_elements += 1;
        };
        if self.txn.depth == 0 {
            self.mutate(UpdateTags::new(), install);
        } else {
            install(self);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/document.rs"]
mod tests;
