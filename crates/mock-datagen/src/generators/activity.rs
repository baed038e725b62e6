//! 问题活动日志生成器

use chrono::Duration;
use fake::Fake;
use fake::faker::lorem::en::Words;
use rand::Rng;

use super::traits::{RecordGenerator, SkipReason};
use crate::context::{GenerationContext, Pool};
use crate::models::{Activity, EntityKind};
use crate::sampling::{capitalize, pick, random_datetime_between};
use crate::vocab::{CANNED_COMMENT, ISSUE_STATUSES};

/// 活动时间最多回溯的天数
const LOOKBACK_DAYS: i64 = 90;

/// 活动日志生成器，父实体为问题
#[derive(Debug, Default)]
pub struct ActivityGenerator;

impl ActivityGenerator {
    /// 三选一：随机句子、状态变更、固定评论
    fn comment<R: Rng + ?Sized>(rng: &mut R) -> String {
        match rng.random_range(0..3) {
            0 => {
                let words: Vec<String> = Words(7..8).fake_with_rng(rng);
                format!("{}.", capitalize(&words.join(" ")))
            }
            1 => format!("Status changed to {}", pick(rng, ISSUE_STATUSES)),
            _ => CANNED_COMMENT.to_string(),
        }
    }
}

impl RecordGenerator for ActivityGenerator {
    type Record = Activity;

    fn entity(&self) -> EntityKind {
        EntityKind::Activity
    }

    fn check_dependencies(&self, ctx: &GenerationContext) -> Result<(), SkipReason> {
        if ctx.issue_ids().is_empty() {
            return Err(SkipReason::EmptyParentPool {
                parent: EntityKind::Issue,
            });
        }
        if ctx.identities().is_empty() {
            return Err(SkipReason::EmptyIdentityPool);
        }
        Ok(())
    }

    fn generate(&self, ctx: &mut GenerationContext, count: usize) -> Vec<Activity> {
        let now = ctx.now();
        let earliest = now - Duration::days(LOOKBACK_DAYS);
        (1..=count)
            .map(|seq| {
                let issue_id = ctx.pick_id(Pool::Issues).unwrap_or_default();
                let user = ctx.pick_identity();
                let rng = ctx.rng();
                let timestamp = random_datetime_between(rng, earliest, now);
                let comment = Self::comment(rng);

                Activity {
                    id: format!("ACT{seq:03}"),
                    issue_id,
                    comment,
                    timestamp,
                    user,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::ymd;

    fn context() -> GenerationContext {
        let now = ymd(2025, 4, 1).and_hms_opt(10, 0, 0).unwrap();
        GenerationContext::with_seed_at(61, now)
    }

    #[test]
    fn test_skips_without_issues() {
        let mut ctx = context();
        ctx.set_identities(vec!["Ann_B".into()]);
        let outcome = ActivityGenerator.run(&mut ctx, 4);
        assert!(outcome.records.is_empty());
        assert_eq!(
            outcome.skipped,
            Some(SkipReason::EmptyParentPool {
                parent: EntityKind::Issue
            })
        );
    }

    #[test]
    fn test_timestamps_and_comments() {
        let mut ctx = context();
        ctx.set_identities(vec!["Ann_B".into()]);
        ctx.register_issue("NOVA-001");
        let now = ctx.now();

        let activities = ActivityGenerator.run(&mut ctx, 60).records;
        assert_eq!(activities.last().map(|a| a.id.as_str()), Some("ACT060"));
        for activity in &activities {
            assert!(activity.timestamp <= now);
            assert!(activity.timestamp >= now - Duration::days(LOOKBACK_DAYS));
            assert_eq!(activity.issue_id, "NOVA-001");
            assert_eq!(activity.user, "Ann_B");
            assert!(!activity.comment.is_empty());
        }
        assert!(activities.iter().any(|a| a.comment == CANNED_COMMENT));
        assert!(
            activities
                .iter()
                .any(|a| a.comment.starts_with("Status changed to "))
        );
    }
}
