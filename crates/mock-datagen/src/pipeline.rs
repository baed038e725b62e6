//! 生成流水线
//!
//! 固定阶段顺序：用户池 -> 问题 -> 文档 -> 变更记录 -> 子任务 -> 活动日志，
//! 可选地追加交叉关联阶段，最后逐个写出文件和运行清单。

use std::path::{Path, PathBuf};

use datagen_shared::config::AppConfig;
use datagen_shared::error::Result;
use tracing::{error, info, info_span, warn};

use crate::context::GenerationContext;
use crate::generators::{
    ActivityGenerator, ChangeRecordGenerator, CrossLinker, DocumentGenerator, IssueGenerator,
    LinkStats, RecordGenerator, StageOutcome, SubtaskGenerator,
};
use crate::identity::build_identity_pool;
use crate::models::{Activity, ChangeRecord, Document, Issue, Subtask, TabularRecord};
use crate::output::{EntityReport, RunManifest, prepare_dir, write_table};

/// 一次运行生成的全部数据
#[derive(Debug, Clone)]
pub struct Dataset {
    pub identities: Vec<String>,
    pub issues: StageOutcome<Issue>,
    pub documents: StageOutcome<Document>,
    pub changes: StageOutcome<ChangeRecord>,
    pub subtasks: StageOutcome<Subtask>,
    pub activities: StageOutcome<Activity>,
    pub link_stats: Option<LinkStats>,
}

/// 运行结果
#[derive(Debug, Clone)]
pub struct RunReport {
    pub manifest: RunManifest,
    /// 清单写出失败时为 None
    pub manifest_path: Option<PathBuf>,
}

impl RunReport {
    /// 是否有任何文件写出失败
    pub fn has_failures(&self) -> bool {
        self.manifest_path.is_none() || self.manifest.failed_files().next().is_some()
    }
}

/// 生成流水线
pub struct Pipeline<'a> {
    config: &'a AppConfig,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a AppConfig) -> Self {
        Self { config }
    }

    /// 按配置的种子和时间基准创建上下文，未配置的部分分别取系统熵源和本地当前时间
    pub fn context(&self) -> GenerationContext {
        let generation = &self.config.generation;
        GenerationContext::resolve(generation.seed, generation.now)
    }

    /// 依次执行全部生成阶段
    ///
    /// 只有用户名空间不足会返回错误；依赖为空的阶段以跳过原因记录在结果中。
    pub fn generate(&self, ctx: &mut GenerationContext) -> Result<Dataset> {
        let generation = &self.config.generation;
        let policy = &self.config.policy;

        let identities = build_identity_pool(
            ctx.rng(),
            generation.user_names_count,
            policy.identity_attempts_per_handle,
        )?;
        if identities.is_empty() {
            warn!(
                requested = generation.user_names_count,
                "用户池为空，依赖用户的生成器将全部跳过"
            );
        }
        ctx.set_identities(identities.clone());

        let mut issues = IssueGenerator::new(policy).run(ctx, generation.unique_jiras);
        let mut documents = DocumentGenerator::new(policy).run(ctx, generation.confluence_pages);
        let changes = ChangeRecordGenerator::new(policy).run(ctx, generation.unique_crs);
        let subtasks = SubtaskGenerator.run(ctx, generation.cr_ctasks);
        let activities = ActivityGenerator.run(ctx, generation.jira_activities);

        let link_stats = generation.cross_link_pass.then(|| {
            CrossLinker::new(policy).link(ctx, &mut issues.records, &mut documents.records)
        });

        Ok(Dataset {
            identities,
            issues,
            documents,
            changes,
            subtasks,
            activities,
            link_stats,
        })
    }

    /// 生成并写出全部文件
    ///
    /// 输出目录无法创建时返回错误；单个文件写出失败只记录在清单中，其余文件照常写出。
    pub fn run(&self, ctx: &mut GenerationContext, output_dir: &Path) -> Result<RunReport> {
        let span = info_span!("run", seed = ctx.seed(), now = %ctx.now());
        let _guard = span.enter();

        let mut manifest = RunManifest::new(
            ctx.seed(),
            ctx.now(),
            output_dir.to_path_buf(),
            self.config.generation.cross_link_pass,
        );
        info!(output_dir = %output_dir.display(), "开始生成");

        let dataset = self.generate(ctx)?;
        let dir = prepare_dir(output_dir)?;

        manifest.link_stats = dataset.link_stats;
        manifest.entities = vec![
            write_stage(&dir, &dataset.issues),
            write_stage(&dir, &dataset.documents),
            write_stage(&dir, &dataset.changes),
            write_stage(&dir, &dataset.subtasks),
            write_stage(&dir, &dataset.activities),
        ];

        let manifest_path = match manifest.write_to(&dir) {
            Ok(path) => Some(path),
            Err(e) => {
                error!(error = %e, code = e.code(), "运行清单写出失败");
                None
            }
        };

        let report = RunReport {
            manifest,
            manifest_path,
        };
        info!(
            failed = report.manifest.failed_files().count(),
            run_id = %report.manifest.run_id,
            "运行结束"
        );
        Ok(report)
    }
}

fn write_stage<R: TabularRecord>(dir: &Path, outcome: &StageOutcome<R>) -> EntityReport {
    let file = dir.join(outcome.entity.file_name());
    let (rows_written, error) = match write_table(&file, &outcome.records) {
        Ok(rows) => (rows, None),
        Err(e) => {
            error!(entity = %outcome.entity, error = %e, code = e.code(), "文件写出失败");
            (0, Some(e.to_string()))
        }
    };

    EntityReport {
        entity: outcome.entity,
        file,
        requested: outcome.requested,
        generated: outcome.unique_ids(),
        rows_written,
        skipped: outcome.skipped.clone(),
        error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::ymd;

    fn config(yaml: &str) -> AppConfig {
        AppConfig::from_yaml_str(yaml).unwrap()
    }

    fn context(seed: u64) -> GenerationContext {
        GenerationContext::with_seed_at(seed, ymd(2025, 6, 1).and_hms_opt(9, 0, 0).unwrap())
    }

    #[test]
    fn test_generate_default_volumes() {
        let cfg = AppConfig::default();
        let dataset = Pipeline::new(&cfg).generate(&mut context(81)).unwrap();

        assert_eq!(dataset.identities.len(), 25);
        assert_eq!(dataset.issues.records.len(), 72);
        assert_eq!(dataset.documents.records.len(), 23);
        assert_eq!(dataset.changes.records.len(), 22);
        assert_eq!(dataset.subtasks.records.len(), 18);
        assert_eq!(dataset.activities.records.len(), 35);
        assert!(dataset.link_stats.is_some());
    }

    #[test]
    fn test_single_pass_keeps_issues_unlinked() {
        let cfg = config("generation:\n  cross_link_pass: false\n");
        let dataset = Pipeline::new(&cfg).generate(&mut context(82)).unwrap();
        assert!(dataset.link_stats.is_none());
        assert!(dataset.issues.records.iter().all(|i| i.change_id.is_none()));
        assert!(
            dataset
                .documents
                .records
                .iter()
                .all(|d| d.linked_change_ids.is_empty())
        );
    }

    #[test]
    fn test_run_reports_failure_when_file_unwritable() {
        let tmp = tempfile::tempdir().unwrap();
        // 用同名目录占住一个输出文件的位置
        std::fs::create_dir(tmp.path().join("CR_CTasks.csv")).unwrap();

        let cfg = AppConfig::default();
        let report = Pipeline::new(&cfg)
            .run(&mut context(83), tmp.path())
            .unwrap();

        assert!(report.has_failures());
        let failed: Vec<_> = report.manifest.failed_files().map(|e| e.entity).collect();
        assert_eq!(failed, vec![crate::models::EntityKind::Subtask]);
        // 其余文件照常写出
        assert!(tmp.path().join("CR_Main.csv").is_file());
        assert!(tmp.path().join("JIRA_Activities.csv").is_file());
        assert!(report.manifest_path.is_some());
    }

    #[test]
    fn test_write_stage_counts_distinct_primary_ids() {
        let tmp = tempfile::tempdir().unwrap();
        let mut ctx = context(84);
        ctx.set_identities(vec!["Ann_B".to_string()]);
        ctx.register_issue("NOVA-001");

        let mut outcome = ActivityGenerator.run(&mut ctx, 4);
        outcome.records[3].id = outcome.records[1].id.clone();

        let report = write_stage(tmp.path(), &outcome);
        assert_eq!(report.generated, 3);
        assert_eq!(report.rows_written, 4);
    }

    #[test]
    fn test_same_seed_and_now_replay_byte_identical() {
        let cfg = config("generation:\n  seed: 85\n  now: \"2025-06-01T09:00:00\"\n");
        let pipeline = Pipeline::new(&cfg);
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();

        let report = pipeline.run(&mut pipeline.context(), first.path()).unwrap();
        assert_eq!(report.manifest.seed, 85);
        assert_eq!(
            report.manifest.generation_now,
            ymd(2025, 6, 1).and_hms_opt(9, 0, 0).unwrap()
        );

        // 只凭清单中记录的种子和时间基准重放
        let mut replay = GenerationContext::resolve(
            Some(report.manifest.seed),
            Some(report.manifest.generation_now),
        );
        pipeline.run(&mut replay, second.path()).unwrap();

        for entity in crate::models::EntityKind::ALL {
            let name = entity.file_name();
            let a = std::fs::read(first.path().join(name)).unwrap();
            let b = std::fs::read(second.path().join(name)).unwrap();
            assert_eq!(a, b, "{name} 重放结果不一致");
        }
    }
}
