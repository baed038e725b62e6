//! 问题生成器
//!
//! 每个问题在生成后立即登记到问题池，后续同批问题即可链接到它。

use chrono::{Duration, NaiveDate};
use datagen_shared::config::GenerationPolicy;
use fake::Fake;
use fake::faker::company::en::Bs;
use fake::faker::lorem::en::Sentences;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::traits::RecordGenerator;
use crate::context::{GenerationContext, Pool};
use crate::models::{EntityKind, Issue, IssueLink};
use crate::sampling::{capitalize, pick, random_date_between, sample_words, ymd};
use crate::vocab::*;

/// 问题创建日期窗口的起止日期
fn created_window() -> (NaiveDate, NaiveDate) {
    (ymd(2023, 1, 1), ymd(2024, 4, 1))
}

/// 按权重选择 ID 前缀：`alt_probability` 的概率均匀抽取备选前缀，否则使用默认前缀
pub fn choose_prefix<R: Rng + ?Sized>(rng: &mut R, alt_probability: f64) -> &'static str {
    if rng.random_bool(alt_probability) {
        pick(rng, ISSUE_ALT_PREFIXES)
    } else {
        ISSUE_DEFAULT_PREFIX
    }
}

/// 问题日期四元组
///
/// 满足 `created <= start <= end` 且 `created <= updated <= min(end, today)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssueDates {
    pub created: NaiveDate,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub updated: NaiveDate,
}

impl IssueDates {
    pub fn sample<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate) -> Self {
        let (window_start, window_end) = created_window();
        let created = random_date_between(rng, window_start, window_end.min(today));
        let start = random_date_between(rng, created, created + Duration::days(10));
        let end_span = rng.random_range(5..60);
        let end = random_date_between(rng, start, start + Duration::days(end_span));

        let updated_upper = if end < today {
            end
        } else {
            today - Duration::days(1)
        };
        let updated = random_date_between(rng, created, updated_upper).max(created);

        Self {
            created,
            start,
            end,
            updated,
        }
    }
}

/// 问题生成器
pub struct IssueGenerator<'a> {
    policy: &'a GenerationPolicy,
}

impl<'a> IssueGenerator<'a> {
    pub fn new(policy: &'a GenerationPolicy) -> Self {
        Self { policy }
    }

    fn generate_one(&self, ctx: &mut GenerationContext) -> Issue {
        let prefix = choose_prefix(ctx.rng(), self.policy.issue_alt_prefix_probability);
        let id = format!("{prefix}-{:03}", ctx.next_issue_sequence());
        ctx.register_issue(&id);

        let today = ctx.today();
        let dates = IssueDates::sample(ctx.rng(), today);

        let rng = ctx.rng();
        let issue_type = pick(rng, ISSUE_TYPES).to_string();
        let priority = pick(rng, ISSUE_PRIORITIES).to_string();
        let components = sample_words(rng, ISSUE_COMPONENTS, MAX_COMPONENTS);
        let labels = sample_words(rng, ISSUE_LABELS, MAX_LABELS);
        let sprint = format!(
            "Sprint {} - {}",
            rng.random_range(1..=5),
            pick(rng, SPRINT_STREAMS)
        );
        let app_name = if rng.random_bool(self.policy.issue_app_name_probability) {
            Some(pick(rng, APP_NAMES)).filter(|name| !name.is_empty())
        } else {
            None
        }
        .map(str::to_string);

        let status = pick(rng, ISSUE_STATUSES).to_string();
        let bs: String = Bs().fake_with_rng(rng);
        let title = capitalize(bs.trim());
        let sentences: Vec<String> = Sentences(1..2).fake_with_rng(rng);
        let description = sentences.join(" ");
        let fix_version = format!(
            "v{}.{}.{}{}",
            rng.random_range(0..3),
            rng.random_range(1..10),
            rng.random_range(0..6),
            pick(rng, VERSION_QUALIFIERS)
        );
        let team = pick(rng, PRIMARY_TEAMS).to_string();
        let confidence = rng
            .random_bool(self.policy.issue_confidence_probability)
            .then(|| rng.random_range(50..=100));
        let story_points = if rng.random_bool(self.policy.issue_story_points_probability) {
            STORY_POINTS.choose(rng).copied()
        } else {
            None
        };

        // 变更记录在问题之后生成，按固定阶段顺序这里的变更池总是为空，
        // 反向关联由交叉关联阶段补全
        let change_id = if !ctx.change_ids().is_empty()
            && ctx.rng().random_bool(self.policy.issue_change_link_probability)
        {
            ctx.pick_id(Pool::Changes)
        } else {
            None
        };

        let reporter = ctx.pick_identity();
        let assignee = ctx.pick_identity();

        let link_count = ctx.rng().random_range(0..=MAX_ISSUE_LINKS);
        let links = ctx
            .choose_issue_ids_excluding(link_count, &id)
            .into_iter()
            .map(|target_id| IssueLink {
                target_id,
                link_type: pick(ctx.rng(), ISSUE_LINK_TYPES).to_string(),
            })
            .collect();

        let watcher_count = ctx.rng().random_range(0..=MAX_WATCHERS);
        let watchers = ctx.choose_identities(watcher_count);

        Issue {
            id,
            issue_type,
            priority,
            components,
            labels,
            sprint,
            app_name,
            reporter,
            assignee,
            start_date: dates.start,
            end_date: dates.end,
            status,
            title,
            description,
            fix_version,
            team,
            confidence,
            created_date: dates.created,
            updated_date: dates.updated,
            story_points,
            change_id,
            links,
            watchers,
        }
    }
}

impl RecordGenerator for IssueGenerator<'_> {
    type Record = Issue;

    fn entity(&self) -> EntityKind {
        EntityKind::Issue
    }

    fn generate(&self, ctx: &mut GenerationContext, count: usize) -> Vec<Issue> {
        (0..count).map(|_| self.generate_one(ctx)).collect()
    }
}
