//! 交叉关联阶段
//!
//! 所有实体生成完毕后再补全指向变更记录的反向引用，消除单遍生成中
//! "问题和文档早于变更记录生成、因而永远无法引用变更记录"的顺序依赖。

use datagen_shared::config::GenerationPolicy;
use rand::Rng;
use serde::Serialize;
use tracing::{info, instrument};

use crate::context::{GenerationContext, Pool};
use crate::models::{Document, Issue};
use crate::vocab::MAX_DOCUMENT_CHANGE_REFS;

/// 关联统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LinkStats {
    pub issues_linked: usize,
    pub documents_linked: usize,
}

/// 交叉关联器
pub struct CrossLinker<'a> {
    policy: &'a GenerationPolicy,
}

impl<'a> CrossLinker<'a> {
    pub fn new(policy: &'a GenerationPolicy) -> Self {
        Self { policy }
    }

    /// 为尚无变更引用的问题和文档补全变更引用，已有引用保持不变
    #[instrument(skip_all, fields(issues = issues.len(), documents = documents.len()))]
    pub fn link(
        &self,
        ctx: &mut GenerationContext,
        issues: &mut [Issue],
        documents: &mut [Document],
    ) -> LinkStats {
        let mut stats = LinkStats::default();
        if ctx.change_ids().is_empty() {
            info!("变更池为空，跳过交叉关联");
            return stats;
        }

        for issue in issues.iter_mut().filter(|i| i.change_id.is_none()) {
            if ctx.rng().random_bool(self.policy.issue_change_link_probability) {
                issue.change_id = ctx.pick_id(Pool::Changes);
                stats.issues_linked += 1;
            }
        }

        for document in documents.iter_mut().filter(|d| d.linked_change_ids.is_empty()) {
            document.linked_change_ids = ctx.sample_ids(Pool::Changes, MAX_DOCUMENT_CHANGE_REFS);
            if !document.linked_change_ids.is_empty() {
                stats.documents_linked += 1;
            }
        }

        info!(
            issues_linked = stats.issues_linked,
            documents_linked = stats.documents_linked,
            "交叉关联完成"
        );
        stats
    }
}
