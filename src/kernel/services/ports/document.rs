//! 文档引擎契约
//!
//! 叶子文本访问、事务边界与更新通知。文档树本身由外部引擎实现，
//! 这里只定义查找替换与持久化需要的最小接口。

use compact_str::CompactString;
use rustc_hash::FxHashSet;
use slotmap::new_key_type;

// 外部引擎可用 KeyData::from_ffi 把自己的节点 key 映射过来
new_key_type! { pub struct LeafId; }

pub type Result<T> = std::result::Result<T, DocumentError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    UnknownLeaf(LeafId),
    InvalidRange {
        leaf: LeafId,
        start: usize,
        end: usize,
    },
    InvalidState(String),
}

impl std::fmt::Display for DocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentError::UnknownLeaf(leaf) => write!(f, "Unknown leaf: {:?}", leaf),
            DocumentError::InvalidRange { leaf, start, end } => {
                write!(f, "Invalid range {}..{} in leaf {:?}", start, end, leaf)
            }
            DocumentError::InvalidState(msg) => write!(f, "Invalid document state: {}", msg),
        }
    }
}

impl std::error::Error for DocumentError {}

/// 事务标签：撤销合并
pub const TAG_HISTORY_MERGE: &str = "history-merge";
/// 事务标签：启动时装载已保存内容
pub const TAG_LOADED_CONTENT: &str = "loaded-content";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTags(FxHashSet<CompactString>);

impl UpdateTags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, tag: &str) -> Self {
        self.insert(tag);
        self
    }

    pub fn history_merge() -> Self {
        Self::new().with(TAG_HISTORY_MERGE)
    }

    pub fn loaded_content() -> Self {
        Self::new().with(TAG_LOADED_CONTENT)
    }

    pub fn insert(&mut self, tag: &str) -> bool {
        self.0.insert(CompactString::from(tag))
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|t| t.as_str())
    }
}

/// 每个已提交事务产生一次通知
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentUpdate {
    pub changed_element_count: usize,
    pub changed_leaf_count: usize,
    pub previous_state_was_empty: bool,
    pub tags: UpdateTags,
}

impl DocumentUpdate {
    pub fn has_changes(&self) -> bool {
        self.changed_element_count > 0 || self.changed_leaf_count > 0
    }
}

/// 文档顺序遍历得到的叶子快照
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leaf<'a> {
    pub id: LeafId,
    pub text: &'a str,
}

pub trait LeafTextAccessor {
    /// 按文档顺序返回所有文本叶子
    fn traverse_leaves(&self) -> Vec<Leaf<'_>>;

    fn text(&self, leaf: LeafId) -> Option<String>;

    fn set_text(&mut self, leaf: LeafId, text: String) -> Result<()>;

    /// 选中叶子内 [start, end) 字节区间
    fn select_range(&mut self, leaf: LeafId, start: usize, end: usize) -> Result<()>;

    fn scroll_into_selection(&mut self) -> Result<()>;

    /// 把光标放到叶子上（不选中文本）
    fn place_caret(&mut self, leaf: LeafId) -> Result<()>;

    fn clear_selection(&mut self);

    /// 事务边界：闭包内的读写作为一个整体提交，并附带标签
    fn mutate<R, F>(&mut self, tags: UpdateTags, f: F) -> R
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> R;
}

/// 文档序列化状态，对本 crate 是不透明字符串
pub trait DocumentState: LeafTextAccessor {
    fn serialize_state(&self) -> String;

    /// 装载序列化状态；调用方负责包在 loaded-content 事务里
    fn install_state(&mut self, payload: &str) -> Result<()>;
}
