//! 模拟数据模型
//!
//! 包含问题、文档、变更记录、变更子任务、活动日志等记录结构。
//! 每类记录实现 [`TabularRecord`]，将多值关系（链接、关注人、状态流转）展开为子行。

pub mod activity;
pub mod change_record;
pub mod document;
pub mod issue;
pub mod subtask;

use std::fmt;

use serde::Serialize;

pub use activity::Activity;
pub use change_record::{ChangeRecord, ChangeState, StatusTransition};
pub use document::Document;
pub use issue::{Issue, IssueLink};
pub use subtask::Subtask;

/// 可写为表格的记录
///
/// 表头顺序和名称是下游工具依赖的兼容面，不可随意调整。
pub trait TabularRecord {
    /// 表头
    const HEADER: &'static [&'static str];

    /// 主 ID，子行共享同一主 ID
    fn primary_id(&self) -> &str;

    /// 展开为输出行，每行长度与表头一致
    fn rows(&self) -> Vec<Vec<String>>;
}

/// 实体族
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Issue,
    Document,
    ChangeRecord,
    Subtask,
    Activity,
}

impl EntityKind {
    /// 按写出顺序列出所有实体族
    pub const ALL: [EntityKind; 5] = [
        Self::Issue,
        Self::Document,
        Self::ChangeRecord,
        Self::Subtask,
        Self::Activity,
    ];

    /// 输出文件名
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Issue => "JIRA_Issues_Detailed.csv",
            Self::Document => "Confluence_Pages_Detailed.csv",
            Self::ChangeRecord => "CR_Main.csv",
            Self::Subtask => "CR_CTasks.csv",
            Self::Activity => "JIRA_Activities.csv",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Issue => "issue",
            Self::Document => "document",
            Self::ChangeRecord => "change_record",
            Self::Subtask => "subtask",
            Self::Activity => "activity",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
