//! 变更子任务生成器

use chrono::Duration;
use fake::Fake;
use fake::faker::company::en::CatchPhrase;
use rand::Rng;

use super::traits::{RecordGenerator, SkipReason};
use crate::context::{GenerationContext, Pool};
use crate::models::{EntityKind, Subtask};

/// 子任务开始时间最多回溯的天数
const LOOKBACK_DAYS: i64 = 60;

/// 子任务生成器，父实体为变更记录
#[derive(Debug, Default)]
pub struct SubtaskGenerator;

impl RecordGenerator for SubtaskGenerator {
    type Record = Subtask;

    fn entity(&self) -> EntityKind {
        EntityKind::Subtask
    }

    fn check_dependencies(&self, ctx: &GenerationContext) -> Result<(), SkipReason> {
        if ctx.change_ids().is_empty() {
            return Err(SkipReason::EmptyParentPool {
                parent: EntityKind::ChangeRecord,
            });
        }
        if ctx.identities().is_empty() {
            return Err(SkipReason::EmptyIdentityPool);
        }
        Ok(())
    }

    fn generate(&self, ctx: &mut GenerationContext, count: usize) -> Vec<Subtask> {
        let now = ctx.now();
        (1..=count)
            .map(|seq| {
                let change_id = ctx.pick_id(Pool::Changes).unwrap_or_default();
                let assignee = ctx.pick_identity();

                let rng = ctx.rng();
                let start_time = now
                    - Duration::days(rng.random_range(0..LOOKBACK_DAYS))
                    - Duration::hours(rng.random_range(0..24));
                let end_time = start_time + Duration::hours(rng.random_range(2..=48));
                let description: String = CatchPhrase().fake_with_rng(rng);

                Subtask {
                    id: format!("CTASK{seq:03}"),
                    change_id,
                    assignee,
                    start_time,
                    end_time,
                    description,
                }
            })
            .collect()
    }
}
