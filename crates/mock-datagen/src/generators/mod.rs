//! 生成器模块
//!
//! 每个实体族一个生成器，按固定阶段顺序共享同一个 [`GenerationContext`](crate::context::GenerationContext)。

pub mod activity;
pub mod change_record;
pub mod document;
pub mod issue;
pub mod linking;
pub mod subtask;
pub mod traits;

pub use activity::ActivityGenerator;
pub use change_record::{ChangeRecordGenerator, TeamAssigner};
pub use document::DocumentGenerator;
pub use issue::{IssueGenerator, choose_prefix};
pub use linking::{CrossLinker, LinkStats};
pub use subtask::SubtaskGenerator;
pub use traits::{RecordGenerator, SkipReason, StageOutcome};
