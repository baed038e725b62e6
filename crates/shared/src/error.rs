//! 统一错误处理模块
//!
//! 定义数据生成流程中所有共享的错误类型，使用 thiserror 提供良好的错误信息。
//!
//! 依赖为空（如用户池为空）不属于错误，由各生成阶段以跳过原因记录。

use std::path::PathBuf;

use thiserror::Error;

/// 系统错误类型
#[derive(Debug, Error)]
pub enum DataGenError {
    // ==================== 配置错误 ====================
    #[error("配置加载失败: {0}")]
    Config(#[from] config::ConfigError),

    #[error("配置校验失败: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ==================== 生成错误 ====================
    #[error(
        "用户名空间不足: 需要 {requested} 个唯一用户名, 尝试 {attempts} 次后仅得到 {produced} 个"
    )]
    InsufficientNameSpace {
        requested: usize,
        produced: usize,
        attempts: usize,
    },

    // ==================== 输出错误 ====================
    #[error("IO 错误: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV 写入失败: {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("序列化失败: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// 错误结果类型别名
pub type Result<T> = std::result::Result<T, DataGenError>;

impl DataGenError {
    /// 获取错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InsufficientNameSpace { .. } => "INSUFFICIENT_NAME_SPACE",
            Self::Io { .. } => "IO_ERROR",
            Self::Csv { .. } => "CSV_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// 是否为致命错误
    ///
    /// 致命错误在任何生成开始前终止整个运行；输出错误只影响单个文件。
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::Validation(_) | Self::InsufficientNameSpace { .. }
        )
    }

    /// 构造带路径的 IO 错误
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
