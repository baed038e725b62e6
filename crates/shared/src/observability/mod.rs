//! 可观测性模块
//!
//! 数据生成是一次性的批处理任务，只需要结构化日志。
//! 所有入口通过 [`init`] 统一初始化，确保日志格式一致。

pub mod tracing;

use ::tracing::debug;
use anyhow::Result;

/// 可观测性配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// 日志级别（如 "info", "debug"）
    pub log_level: String,

    /// 是否启用 JSON 格式日志
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

/// 统一初始化日志
///
/// 重复初始化（如测试中多次调用）返回错误，由调用方决定是否忽略。
pub fn init(config: &ObservabilityConfig) -> Result<()> {
    tracing::init(config)?;
    debug!(
        log_level = %config.log_level,
        json_logs = config.json_logs,
        "日志已初始化"
    );
    Ok(())
}
