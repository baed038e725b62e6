//! 表格写出
//!
//! 字段分隔符为逗号，含分隔符或引号的值按标准规则加引号转义。

use std::path::Path;

use datagen_shared::error::{DataGenError, Result};
use tracing::info;

use crate::models::TabularRecord;

/// 写出一个实体族的全部记录，返回写出的数据行数（不含表头）
///
/// 记录为空时仍写出表头。
pub fn write_table<R: TabularRecord>(path: &Path, records: &[R]) -> Result<usize> {
    let csv_error = |source| DataGenError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
    writer.write_record(R::HEADER).map_err(csv_error)?;

    let mut rows = 0;
    for record in records {
        for row in record.rows() {
            writer.write_record(&row).map_err(csv_error)?;
            rows += 1;
        }
    }
    writer.flush().map_err(|e| DataGenError::io(path, e))?;

    info!(path = %path.display(), rows, "文件写出完成");
    Ok(rows)
}
