//! 文档生成器
//!
//! 维护一个"可作为父页面"的候选列表：新文档以一定概率在创建后立即加入候选，
//! 之后的文档才可能把它选为父页面，因此父子关系天然无环。

use std::collections::HashMap;

use chrono::NaiveDate;
use datagen_shared::config::GenerationPolicy;
use fake::Fake;
use fake::faker::company::en::CatchPhrase;
use fake::faker::lorem::en::Sentences;
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::debug;

use super::traits::RecordGenerator;
use crate::context::{GenerationContext, Pool};
use crate::models::{Document, EntityKind};
use crate::sampling::{pick, random_date_between, ymd};
use crate::vocab::*;

/// 文档生成器
pub struct DocumentGenerator<'a> {
    policy: &'a GenerationPolicy,
}

impl<'a> DocumentGenerator<'a> {
    pub fn new(policy: &'a GenerationPolicy) -> Self {
        Self { policy }
    }

    /// 按候选规则为 `id` 选择父页面，抽中自身时放弃
    fn choose_parent<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        id: &str,
        parentable: &[String],
    ) -> Option<String> {
        if parentable.is_empty() || !rng.random_bool(self.policy.document_parent_probability) {
            return None;
        }
        parentable
            .choose(rng)
            .filter(|candidate| candidate.as_str() != id)
            .cloned()
    }
}

impl RecordGenerator for DocumentGenerator<'_> {
    type Record = Document;

    fn entity(&self) -> EntityKind {
        EntityKind::Document
    }

    fn generate(&self, ctx: &mut GenerationContext, count: usize) -> Vec<Document> {
        let today = ctx.today();
        let window_start = ymd(2023, 1, 1);
        let window_end = ymd(2024, 5, 1).min(today);

        let mut parentable: Vec<String> = Vec::new();
        let mut created_by_id: HashMap<String, NaiveDate> = HashMap::with_capacity(count);
        let mut documents = Vec::with_capacity(count);

        for seq in 1..=count {
            let rng = ctx.rng();
            let id = format!("CONF-{}-{seq:03}", pick(rng, DOCUMENT_PREFIXES));

            if rng.random_bool(self.policy.document_parent_eligible_probability) {
                parentable.push(id.clone());
            }
            let parent_id = self.choose_parent(ctx.rng(), &id, &parentable);

            let rng = ctx.rng();
            let mut created = random_date_between(rng, window_start, window_end);
            if let Some(parent_created) = parent_id.as_ref().and_then(|p| created_by_id.get(p)) {
                created = created.max(*parent_created);
            }
            let modified = random_date_between(rng, created, today);

            let phrase: String = CatchPhrase().fake_with_rng(rng);
            let title = format!("{phrase} Documentation");
            let sentences: Vec<String> = Sentences(2..3).fake_with_rng(rng);
            let summary = sentences.join(" ");
            let space = pick(rng, DOCUMENT_SPACES).to_string();
            let team = pick(rng, TEAM_NAMES).to_string();

            let owner = ctx.pick_identity();
            let last_edited_by = ctx.pick_identity();
            let linked_issue_ids = ctx.sample_ids(Pool::Issues, MAX_DOCUMENT_ISSUE_REFS);
            let linked_change_ids = ctx.sample_ids(Pool::Changes, MAX_DOCUMENT_CHANGE_REFS);

            ctx.register_document(&id);
            created_by_id.insert(id.clone(), created);
            if let Some(parent) = &parent_id {
                debug!(document = %id, %parent, "关联父页面");
            }

            documents.push(Document {
                id,
                title,
                owner,
                last_edited_by,
                space,
                team,
                summary,
                linked_issue_ids,
                linked_change_ids,
                parent_id,
                created_date: created,
                modified_date: modified,
            });
        }

        documents
    }
}
