//! CLI 命令定义
//!
//! 使用 clap derive 宏定义命令行接口结构。

use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand};
use datagen_shared::config::DEFAULT_CONFIG_PATH;
use datagen_shared::observability::ObservabilityConfig;

/// 模拟数据生成工具
///
/// 生成相互关联的问题、文档、变更记录、变更子任务和活动日志。
/// 使用 `--help` 查看各子命令的详细说明。
#[derive(Parser, Debug)]
#[command(name = "datagen")]
#[command(version, about = "关联模拟数据集生成工具")]
#[command(propagate_version = true)]
pub struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,

    /// 输出 JSON 格式日志
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// 配置文件路径（YAML）
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// 由全局选项构造日志配置，RUST_LOG 仍优先于 `--log-level`
    pub fn observability(&self) -> ObservabilityConfig {
        ObservabilityConfig {
            log_level: self.log_level.clone(),
            json_logs: self.json_logs,
        }
    }
}

/// 子命令枚举
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 生成数据文件
    ///
    /// 按配置的数量依次生成各实体族，写出 CSV 文件和 run_manifest.json。
    /// 任一文件写出失败时以非零状态退出。
    Generate(GenerateArgs),

    /// 打印生效的配置（YAML）
    ShowConfig,
}

/// generate 子命令参数，均覆盖配置文件中的对应项
#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// 输出目录（覆盖配置中的 output.folder_name）
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 随机种子（覆盖配置中的 generation.seed）
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// 生成使用的当前时间，如 2025-06-01T09:00:00（覆盖配置中的 generation.now）
    #[arg(long)]
    pub now: Option<NaiveDateTime>,

    /// 关闭交叉关联阶段，保持单遍生成的引用关系
    #[arg(long)]
    pub no_cross_link: bool,
}

// ============================================================================
// 单元测试
// ============================================================================
