//! zdoc - 富文本编辑器的无界面核心
//!
//! 模块结构：
//! - kernel: 查找替换、匹配集合、持久化调度、文本统计
//! - kernel::services::ports: 文档引擎、存储后端、执行器等契约
//! - kernel::services::adapters: 内存文档、本地/内存存储、tokio 执行器、配置
//! - logging: tracing 初始化

pub mod kernel;
pub mod logging;
