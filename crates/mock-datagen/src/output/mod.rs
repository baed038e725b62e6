//! 输出模块
//!
//! 负责创建输出目录、写出表格文件和运行清单。每个文件独立写出，
//! 单个文件失败不影响其他文件。

pub mod csv_writer;
pub mod manifest;

use std::fs;
use std::path::{Path, PathBuf};

use datagen_shared::error::{DataGenError, Result};
use tracing::debug;

pub use csv_writer::write_table;
pub use manifest::{EntityReport, MANIFEST_FILE_NAME, RunManifest};

/// 确保输出目录存在
pub fn prepare_dir(dir: impl AsRef<Path>) -> Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| DataGenError::io(dir, e))?;
    debug!(dir = %dir.display(), "输出目录就绪");
    Ok(dir.to_path_buf())
}
