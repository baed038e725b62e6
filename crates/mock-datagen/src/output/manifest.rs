//! 运行清单
//!
//! 每次运行写出一份 `run_manifest.json`，记录种子、生成时间基准和各实体族的写出结果，
//! 以相同的种子和时间基准即可重放整次运行。

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDateTime};
use datagen_shared::error::{DataGenError, Result};
use serde::Serialize;
use uuid::Uuid;

use crate::generators::{LinkStats, SkipReason};
use crate::models::EntityKind;

pub const MANIFEST_FILE_NAME: &str = "run_manifest.json";

/// 单个实体族的写出结果
#[derive(Debug, Clone, Serialize)]
pub struct EntityReport {
    pub entity: EntityKind,
    pub file: PathBuf,
    pub requested: i64,
    /// 唯一主 ID 数量
    pub generated: usize,
    /// 写出的数据行数（含子行）
    pub rows_written: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<SkipReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EntityReport {
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// 运行清单
#[derive(Debug, Clone, Serialize)]
pub struct RunManifest {
    pub run_id: Uuid,
    pub seed: u64,
    /// 生成使用的"当前时间"，与种子一起决定全部输出
    pub generation_now: NaiveDateTime,
    pub started_at: DateTime<Local>,
    pub output_dir: PathBuf,
    pub cross_link_pass: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_stats: Option<LinkStats>,
    pub entities: Vec<EntityReport>,
}

impl RunManifest {
    pub fn new(
        seed: u64,
        generation_now: NaiveDateTime,
        output_dir: PathBuf,
        cross_link_pass: bool,
    ) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            seed,
            generation_now,
            started_at: Local::now(),
            output_dir,
            cross_link_pass,
            link_stats: None,
            entities: Vec::with_capacity(EntityKind::ALL.len()),
        }
    }

    pub fn failed_files(&self) -> impl Iterator<Item = &EntityReport> {
        self.entities.iter().filter(|e| e.is_failed())
    }

    /// 写出到 `dir/run_manifest.json`，返回文件路径
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(MANIFEST_FILE_NAME);
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json).map_err(|e| DataGenError::io(&path, e))?;
        Ok(path)
    }
}
