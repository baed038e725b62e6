//! 记录生成器 trait 定义
//!
//! 定义统一的生成器接口，使各阶段在流水线中可以用相同方式驱动。

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use tracing::{info, warn};

use crate::context::GenerationContext;
use crate::models::{EntityKind, TabularRecord};

/// 生成器跳过原因
///
/// 依赖为空不是错误：对应生成器输出零行，其他生成器不受影响。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// 请求数量为零或负数
    NonPositiveVolume { requested: i64 },
    /// 用户池为空
    EmptyIdentityPool,
    /// 父实体的 ID 池为空
    EmptyParentPool { parent: EntityKind },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveVolume { requested } => write!(f, "请求数量为 {requested}"),
            Self::EmptyIdentityPool => f.write_str("用户池为空，请检查 generation.user_names_count"),
            Self::EmptyParentPool { parent } => write!(f, "没有可用的 {parent} ID"),
        }
    }
}

/// 单个阶段的生成结果
#[derive(Debug, Clone)]
pub struct StageOutcome<R> {
    pub entity: EntityKind,
    pub requested: i64,
    pub records: Vec<R>,
    pub skipped: Option<SkipReason>,
}

impl<R: TabularRecord> StageOutcome<R> {
    fn skipped(entity: EntityKind, requested: i64, reason: SkipReason) -> Self {
        Self {
            entity,
            requested,
            records: Vec::new(),
            skipped: Some(reason),
        }
    }

    /// 展开后的总行数（含子行）
    pub fn row_count(&self) -> usize {
        self.records.iter().map(|r| r.rows().len()).sum()
    }

    /// 不重复的主 ID 数量
    pub fn unique_ids(&self) -> usize {
        self.records
            .iter()
            .map(TabularRecord::primary_id)
            .collect::<HashSet<_>>()
            .len()
    }
}

/// 记录生成器 trait
///
/// 实现者只负责依赖检查和逐条生成；数量校验、跳过诊断和统计日志由 [`run`](Self::run) 统一处理。
pub trait RecordGenerator {
    type Record: TabularRecord;

    /// 该生成器产生的实体族
    fn entity(&self) -> EntityKind;

    /// 检查上游依赖
    ///
    /// 默认只要求用户池非空，挂在父实体下的生成器需额外检查父 ID 池。
    fn check_dependencies(&self, ctx: &GenerationContext) -> Result<(), SkipReason> {
        if ctx.identities().is_empty() {
            return Err(SkipReason::EmptyIdentityPool);
        }
        Ok(())
    }

    /// 生成 `count` 条记录，调用时依赖已满足
    fn generate(&self, ctx: &mut GenerationContext, count: usize) -> Vec<Self::Record>;

    /// 执行阶段：数量校验 -> 依赖检查 -> 生成
    fn run(&self, ctx: &mut GenerationContext, requested: i64) -> StageOutcome<Self::Record> {
        let entity = self.entity();

        let count = match usize::try_from(requested) {
            Ok(count) if count > 0 => count,
            _ => {
                let reason = SkipReason::NonPositiveVolume { requested };
                info!(%entity, %reason, "跳过生成");
                return StageOutcome::skipped(entity, requested, reason);
            }
        };

        if let Err(reason) = self.check_dependencies(ctx) {
            warn!(%entity, %reason, "依赖为空，跳过生成");
            return StageOutcome::skipped(entity, requested, reason);
        }

        let records = self.generate(ctx, count);
        let outcome = StageOutcome {
            entity,
            requested,
            records,
            skipped: None,
        };
        info!(
            %entity,
            records = outcome.records.len(),
            unique_ids = outcome.unique_ids(),
            rows = outcome.row_count(),
            "生成完成"
        );
        outcome
    }
}
