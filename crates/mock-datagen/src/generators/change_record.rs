//! 变更记录生成器
//!
//! 团队分配采用公平配额：先在主开发团队之间轮转，直到每个主团队都拿到配额，
//! 之后在全部团队中均匀随机分配。

use chrono::{Duration, NaiveDate};
use datagen_shared::config::GenerationPolicy;
use fake::Fake;
use fake::faker::company::en::Bs;
use fake::faker::lorem::en::Words;
use rand::Rng;
use tracing::debug;

use super::traits::RecordGenerator;
use crate::context::{GenerationContext, Pool};
use crate::models::{ChangeRecord, ChangeState, EntityKind, StatusTransition};
use crate::sampling::{capitalize, pick, random_date_between, sample_words, ymd};
use crate::vocab::*;

/// 团队公平分配器
#[derive(Debug, Clone)]
pub struct TeamAssigner {
    quota: usize,
    assigned: Vec<usize>,
}

impl TeamAssigner {
    /// 根据本次请求数量推导每个主团队的配额
    ///
    /// 数量充足时使用 `target`，否则收缩为 `max(1, total / 主团队数)`
    pub fn new(total: usize, target: usize) -> Self {
        let teams = PRIMARY_TEAMS.len();
        let quota = if total < teams * target {
            (total / teams).max(1)
        } else {
            target
        };
        Self {
            quota,
            assigned: vec![0; teams],
        }
    }

    pub fn quota(&self) -> usize {
        self.quota
    }

    /// 分配下一个团队
    pub fn assign<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &'static str {
        // 配额未满的主团队中取已分配最少者，并列时按列表顺序
        let next = self
            .assigned
            .iter()
            .enumerate()
            .filter(|(_, count)| **count < self.quota)
            .min_by_key(|(idx, count)| (**count, *idx))
            .map(|(idx, _)| idx);

        match next {
            Some(idx) => {
                self.assigned[idx] += 1;
                PRIMARY_TEAMS[idx]
            }
            None => pick(rng, TEAM_NAMES),
        }
    }
}

/// 变更记录生成器
pub struct ChangeRecordGenerator<'a> {
    policy: &'a GenerationPolicy,
}

impl<'a> ChangeRecordGenerator<'a> {
    pub fn new(policy: &'a GenerationPolicy) -> Self {
        Self { policy }
    }

    fn transition(
        &self,
        ctx: &mut GenerationContext,
        state: ChangeState,
        created_at: NaiveDate,
    ) -> StatusTransition {
        let policy = self.policy;

        let linked_issue_id = if ctx.rng().random_bool(policy.change_issue_omit_probability) {
            None
        } else {
            ctx.pick_id(Pool::Issues)
        };
        let linked_document_id = if ctx.rng().random_bool(policy.change_document_omit_probability) {
            None
        } else {
            ctx.pick_id(Pool::Documents)
        };
        let requested_by = ctx.pick_identity();
        let assigned_to = ctx.pick_identity();
        let updated_by = ctx.pick_identity();

        let rng = ctx.rng();
        let end_span = rng.random_range(5..60);
        let end_date = random_date_between(rng, created_at, created_at + Duration::days(end_span));
        let environment = pick(rng, ENVIRONMENTS).to_string();
        let impacted_departments = sample_words(rng, DEPARTMENTS, MAX_DEPARTMENTS);
        let change_type = pick(rng, CHANGE_TYPES).to_string();
        let category = pick(rng, CHANGE_CATEGORIES).to_string();
        let risk = pick(rng, CHANGE_RISKS).to_string();
        let risk_percentage = rng
            .random_bool(policy.change_risk_percentage_probability)
            .then(|| rng.random_range(0..=100));
        let lead_time_days = rng.random_range(1..=90);
        let conflict_status = pick(rng, CONFLICT_STATUSES).to_string();

        let first: String = Bs().fake_with_rng(rng);
        let second: String = Bs().fake_with_rng(rng);
        let description = format!("{first} {second}");

        let implementation_plan = if rng.random_bool(policy.change_canned_plan_probability) {
            CANNED_PLAN.to_string()
        } else {
            lorem_sentence(rng, 6)
        };
        let backout_plan = if rng.random_bool(policy.change_canned_backout_probability) {
            CANNED_BACKOUT.to_string()
        } else {
            lorem_sentence(rng, 5)
        };

        StatusTransition {
            state,
            linked_issue_id,
            linked_document_id,
            requested_by,
            assigned_to,
            environment,
            impacted_departments,
            change_type,
            category,
            risk,
            risk_percentage,
            lead_time_days,
            conflict_status,
            description,
            end_date,
            implementation_plan,
            backout_plan,
            updated_by,
            created_at,
        }
    }
}

/// 由 `words` 个 lorem 单词组成的句子
fn lorem_sentence<R: Rng + ?Sized>(rng: &mut R, words: usize) -> String {
    let words: Vec<String> = Words(words..words + 1).fake_with_rng(rng);
    format!("{}.", capitalize(&words.join(" ")))
}

impl RecordGenerator for ChangeRecordGenerator<'_> {
    type Record = ChangeRecord;

    fn entity(&self) -> EntityKind {
        EntityKind::ChangeRecord
    }

    fn generate(&self, ctx: &mut GenerationContext, count: usize) -> Vec<ChangeRecord> {
        let today = ctx.today();
        let window_end = ymd(2024, 3, 1).min(today);
        let mut teams = TeamAssigner::new(count, self.policy.team_quota_target);
        debug!(quota = teams.quota(), "团队配额");

        let mut records = Vec::with_capacity(count);
        for seq in 1..=count {
            let id = format!("{CHANGE_ID_PREFIX}-{seq:03}");
            ctx.register_change(&id);

            let rng = ctx.rng();
            let team = teams.assign(rng).to_string();
            let title_words: Vec<String> = Words(3..6).fake_with_rng(rng);
            let title = capitalize(&title_words.join(" "));
            let start_date = random_date_between(rng, ymd(2023, 1, 1), window_end);
            let transition_count = rng.random_range(1..=MAX_TRANSITIONS);

            let mut transitions = Vec::with_capacity(transition_count);
            let mut state = Some(ChangeState::New);
            let mut last = start_date;
            for _ in 0..transition_count {
                let Some(current) = state else { break };
                let step = ctx.rng().random_range(1..30);
                let upper = (last + Duration::days(step)).min(today);
                let created_at = random_date_between(ctx.rng(), last, upper);

                transitions.push(self.transition(ctx, current, created_at));
                last = created_at;
                state = current.next();
            }

            records.push(ChangeRecord {
                id,
                title,
                team,
                start_date,
                transitions,
            });
        }

        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    fn now() -> NaiveDateTime {
        ymd(2025, 2, 20).and_hms_opt(11, 0, 0).unwrap()
    }

    fn context(seed: u64) -> GenerationContext {
        let mut ctx = GenerationContext::with_seed_at(seed, now());
        ctx.set_identities(vec!["Ann_B".into(), "Raj_K".into()]);
        ctx
    }

    #[test]
    fn test_quota_for_small_batch() {
        assert_eq!(TeamAssigner::new(5, 7).quota(), 1);
        assert_eq!(TeamAssigner::new(2, 7).quota(), 1);
        assert_eq!(TeamAssigner::new(12, 7).quota(), 4);
        assert_eq!(TeamAssigner::new(22, 7).quota(), 7);
    }

    #[test]
    fn test_round_robin_before_fallback() {
        let mut rng = StdRng::seed_from_u64(41);
        let mut assigner = TeamAssigner::new(5, 7);
        let first: Vec<_> = (0..3).map(|_| assigner.assign(&mut rng)).collect();
        assert_eq!(first, PRIMARY_TEAMS);

        for _ in 0..20 {
            assert!(TEAM_NAMES.contains(&assigner.assign(&mut rng)));
        }
    }

    #[test]
    fn test_primary_teams_reach_quota_evenly() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut assigner = TeamAssigner::new(21, 7);
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for _ in 0..21 {
            *counts.entry(assigner.assign(&mut rng)).or_default() += 1;
        }
        for team in PRIMARY_TEAMS {
            assert_eq!(counts[team], 7);
        }
    }

    #[test]
    fn test_transitions_walk_states_in_order() {
        let policy = GenerationPolicy::default();
        let mut ctx = context(43);
        let records = ChangeRecordGenerator::new(&policy).run(&mut ctx, 40).records;

        for record in &records {
            assert!((1..=MAX_TRANSITIONS).contains(&record.transitions.len()));
            for (i, t) in record.transitions.iter().enumerate() {
                assert_eq!(t.state, ChangeState::ORDERED[i]);
                assert!(t.end_date >= t.created_at);
                assert!(t.created_at >= record.start_date);
            }
            for pair in record.transitions.windows(2) {
                assert!(pair[0].created_at <= pair[1].created_at);
                assert!((pair[1].created_at - pair[0].created_at).num_days() < 30);
            }
        }
    }

    #[test]
    fn test_registered_before_transitions_and_unique() {
        let policy = GenerationPolicy::default();
        let mut ctx = context(44);
        let records = ChangeRecordGenerator::new(&policy).run(&mut ctx, 12).records;
        let ids: Vec<_> = records.iter().map(|r| r.id.clone()).collect();
        assert_eq!(ctx.change_ids(), ids.as_slice());
        assert_eq!(ids[0], "CR-FS-001");
        assert_eq!(ids[11], "CR-FS-012");
    }

    #[test]
    fn test_references_and_field_ranges() {
        let policy = GenerationPolicy::default();
        let mut ctx = context(45);
        ctx.register_issue("NOVA-001");
        ctx.register_issue("LOG-002");
        ctx.register_document("CONF-PN-001");
        let records = ChangeRecordGenerator::new(&policy).run(&mut ctx, 30).records;

        for t in records.iter().flat_map(|r| &r.transitions) {
            if let Some(issue) = &t.linked_issue_id {
                assert!(ctx.issue_ids().contains(issue));
            }
            if let Some(doc) = &t.linked_document_id {
                assert_eq!(doc, "CONF-PN-001");
            }
            assert!(t.risk_percentage.is_none_or(|p| p <= 100));
            assert!((1..=90).contains(&t.lead_time_days));
            assert!(t.impacted_departments.len() <= MAX_DEPARTMENTS);
            assert!(!t.implementation_plan.is_empty());
            assert!(!t.backout_plan.is_empty());
        }
    }

    #[test]
    fn test_canned_plans_when_probability_one() {
        let policy = GenerationPolicy {
            change_canned_plan_probability: 1.0,
            change_canned_backout_probability: 1.0,
            ..Default::default()
        };
        let mut ctx = context(46);
        let records = ChangeRecordGenerator::new(&policy).run(&mut ctx, 5).records;
        for t in records.iter().flat_map(|r| &r.transitions) {
            assert_eq!(t.implementation_plan, CANNED_PLAN);
            assert_eq!(t.backout_plan, CANNED_BACKOUT);
        }
    }
}
