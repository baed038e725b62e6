//! 流水线端到端场景测试
//!
//! 通过真实写出的 CSV 文件验证空依赖跳过、公平配额、唯一 ID 和引用完整性。

use std::collections::{HashMap, HashSet};
use std::path::Path;

use chrono::NaiveDateTime;
use datagen_shared::config::AppConfig;
use mock_datagen::context::GenerationContext;
use mock_datagen::generators::SkipReason;
use mock_datagen::models::EntityKind;
use mock_datagen::pipeline::Pipeline;
use mock_datagen::sampling::{LIST_DELIMITER, ymd};
use mock_datagen::vocab::{PRIMARY_TEAMS, TEAM_NAMES};

fn fixed_now() -> NaiveDateTime {
    ymd(2025, 6, 1).and_hms_opt(9, 0, 0).unwrap()
}

fn config(generation: &str) -> AppConfig {
    AppConfig::from_yaml_str(&format!("generation:\n{generation}")).unwrap()
}

/// 读取 CSV，返回表头和数据行
fn read_csv(path: &Path) -> (Vec<String>, Vec<HashMap<String, String>>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let header: Vec<String> = reader.headers().unwrap().iter().map(str::to_string).collect();
    let rows = reader
        .records()
        .map(|r| {
            let record = r.unwrap();
            header
                .iter()
                .cloned()
                .zip(record.iter().map(str::to_string))
                .collect()
        })
        .collect();
    (header, rows)
}

fn split_list(value: &str) -> Vec<&str> {
    if value.is_empty() {
        Vec::new()
    } else {
        value.split(LIST_DELIMITER).collect()
    }
}

#[test]
fn test_zero_identities_completes_with_header_only_files() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = config("  user_names_count: 0\n");
    let mut ctx = GenerationContext::with_seed_at(101, fixed_now());

    let report = Pipeline::new(&cfg).run(&mut ctx, tmp.path()).unwrap();
    assert!(!report.has_failures());

    for entity in &report.manifest.entities {
        assert_eq!(entity.generated, 0, "{} 应为零行", entity.entity);
        assert_eq!(entity.rows_written, 0);
        assert!(entity.skipped.is_some());

        let (header, rows) = read_csv(&entity.file);
        assert!(!header.is_empty());
        assert!(rows.is_empty());
    }
    let issues = &report.manifest.entities[0];
    assert_eq!(issues.skipped, Some(SkipReason::EmptyIdentityPool));
}

#[test]
fn test_no_change_records_means_no_back_references() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = config("  unique_jiras: 3\n  unique_crs: 0\n");
    let mut ctx = GenerationContext::with_seed_at(102, fixed_now());

    let report = Pipeline::new(&cfg).run(&mut ctx, tmp.path()).unwrap();
    let changes = report
        .manifest
        .entities
        .iter()
        .find(|e| e.entity == EntityKind::ChangeRecord)
        .unwrap();
    assert_eq!(
        changes.skipped,
        Some(SkipReason::NonPositiveVolume { requested: 0 })
    );

    let (_, rows) = read_csv(&tmp.path().join(EntityKind::Issue.file_name()));
    assert!(!rows.is_empty());
    assert!(rows.iter().all(|r| r["CR_ID_Link_From_CSV_Example"].is_empty()));

    // 没有变更记录时子任务跳过
    let subtasks = &report.manifest.entities[3];
    assert_eq!(
        subtasks.skipped,
        Some(SkipReason::EmptyParentPool {
            parent: EntityKind::ChangeRecord
        })
    );
}

#[test]
fn test_fair_quota_for_five_change_records() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = config("  unique_crs: 5\n");
    let mut ctx = GenerationContext::with_seed_at(103, fixed_now());
    Pipeline::new(&cfg).run(&mut ctx, tmp.path()).unwrap();

    let (_, rows) = read_csv(&tmp.path().join(EntityKind::ChangeRecord.file_name()));
    let mut team_by_id: Vec<(String, String)> = Vec::new();
    for row in &rows {
        let id = row["CR_ID"].clone();
        if team_by_id.last().map(|(last, _)| last) != Some(&id) {
            team_by_id.push((id, row["CR_Team_Assignment_Group"].clone()));
        }
    }

    assert_eq!(team_by_id.len(), 5);
    let first_three: Vec<&str> = team_by_id[..3].iter().map(|(_, t)| t.as_str()).collect();
    assert_eq!(first_three, PRIMARY_TEAMS);
    assert!(
        team_by_id[3..]
            .iter()
            .all(|(_, t)| TEAM_NAMES.contains(&t.as_str()))
    );
}

#[test]
fn test_unique_primary_ids_and_reference_integrity() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = AppConfig::default();
    let mut ctx = GenerationContext::with_seed_at(104, fixed_now());
    let report = Pipeline::new(&cfg).run(&mut ctx, tmp.path()).unwrap();
    assert!(!report.has_failures());

    let ids_of = |entity: EntityKind, column: &str| -> HashSet<String> {
        let (_, rows) = read_csv(&tmp.path().join(entity.file_name()));
        rows.iter().map(|r| r[column].clone()).collect()
    };
    let issue_ids = ids_of(EntityKind::Issue, "JIRA_ID");
    let document_ids = ids_of(EntityKind::Document, "Confluence_ID");
    let change_ids = ids_of(EntityKind::ChangeRecord, "CR_ID");

    assert_eq!(issue_ids.len(), 72);
    assert_eq!(document_ids.len(), 23);
    assert_eq!(change_ids.len(), 22);
    assert_eq!(ids_of(EntityKind::Subtask, "CTASK_ID").len(), 18);
    assert_eq!(ids_of(EntityKind::Activity, "Activity_ID").len(), 35);

    let (_, issues) = read_csv(&tmp.path().join(EntityKind::Issue.file_name()));
    for row in &issues {
        let cr = &row["CR_ID_Link_From_CSV_Example"];
        assert!(cr.is_empty() || change_ids.contains(cr));
        let target = &row["JIRA_Linked_Issue_ID_Target"];
        assert!(target.is_empty() || issue_ids.contains(target));
        // 子行要么是链接要么是关注人
        assert!(target.is_empty() || row["JIRA_Watcher_User"].is_empty());
        for (column, max) in [("JIRA_Components", 3), ("JIRA_Labels", 3)] {
            let items = split_list(&row[column]);
            assert!(items.len() <= max);
            assert_eq!(items.iter().collect::<HashSet<_>>().len(), items.len());
        }
    }

    let (_, documents) = read_csv(&tmp.path().join(EntityKind::Document.file_name()));
    for row in &documents {
        let parent = &row["Confluence_Parent_Page_ID"];
        assert_ne!(parent, &row["Confluence_ID"]);
        assert!(parent.is_empty() || document_ids.contains(parent));
        for (column, pool, max) in [
            ("Confluence_Linked_Jira_ID", &issue_ids, 4),
            ("Confluence_Linked_CR_ID", &change_ids, 2),
        ] {
            let items = split_list(&row[column]);
            assert!(items.len() <= max);
            assert!(items.iter().all(|id| pool.contains(*id)));
        }
    }

    let (_, changes) = read_csv(&tmp.path().join(EntityKind::ChangeRecord.file_name()));
    for row in &changes {
        let issue = &row["Linked_Jira_ID"];
        assert!(issue.is_empty() || issue_ids.contains(issue));
        let doc = &row["Linked_Confluence_ID"];
        assert!(doc.is_empty() || document_ids.contains(doc));
        assert!(split_list(&row["CR_Impacted_Departments"]).len() <= 3);
    }

    let (_, subtasks) = read_csv(&tmp.path().join(EntityKind::Subtask.file_name()));
    assert!(subtasks.iter().all(|r| change_ids.contains(&r["CR_ID"])));
    let (_, activities) = read_csv(&tmp.path().join(EntityKind::Activity.file_name()));
    assert!(activities.iter().all(|r| issue_ids.contains(&r["JIRA_ID"])));
}

#[test]
fn test_same_seed_same_dataset() {
    let cfg = AppConfig::default();
    let pipeline = Pipeline::new(&cfg);

    let a = pipeline
        .generate(&mut GenerationContext::with_seed_at(105, fixed_now()))
        .unwrap();
    let b = pipeline
        .generate(&mut GenerationContext::with_seed_at(105, fixed_now()))
        .unwrap();

    assert_eq!(a.identities, b.identities);
    let titles = |d: &mock_datagen::pipeline::Dataset| -> Vec<String> {
        d.issues.records.iter().map(|i| i.title.clone()).collect()
    };
    assert_eq!(titles(&a), titles(&b));
}

#[test]
fn test_manifest_records_seed_and_files() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = config("  unique_jiras: 4\n");
    let mut ctx = GenerationContext::with_seed_at(106, fixed_now());
    let report = Pipeline::new(&cfg).run(&mut ctx, tmp.path()).unwrap();

    let manifest_path = report.manifest_path.unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(manifest_path).unwrap()).unwrap();
    assert_eq!(json["seed"], 106);
    assert_eq!(json["generation_now"], "2025-06-01T09:00:00");
    assert_eq!(json["entities"].as_array().unwrap().len(), 5);
    assert_eq!(json["entities"][0]["generated"], 4);
    assert_eq!(json["cross_link_pass"], true);
}

#[test]
fn test_replay_from_manifest_reproduces_files() {
    let cfg = AppConfig::default();
    let pipeline = Pipeline::new(&cfg);
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();

    // 种子和时间基准都不固定，完全依赖清单中记录的值
    let report = pipeline.run(&mut pipeline.context(), first.path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(report.manifest_path.unwrap()).unwrap(),
    )
    .unwrap();
    let seed = json["seed"].as_u64().unwrap();
    let now: NaiveDateTime = json["generation_now"].as_str().unwrap().parse().unwrap();

    let replay = config(&format!(
        "  seed: {seed}\n  now: \"{}\"\n",
        now.format("%Y-%m-%dT%H:%M:%S%.f")
    ));
    let replay_pipeline = Pipeline::new(&replay);
    replay_pipeline
        .run(&mut replay_pipeline.context(), second.path())
        .unwrap();

    for entity in EntityKind::ALL {
        let name = entity.file_name();
        let original = std::fs::read(first.path().join(name)).unwrap();
        let replayed = std::fs::read(second.path().join(name)).unwrap();
        assert_eq!(original, replayed, "{name} 重放结果不一致");
    }
}
