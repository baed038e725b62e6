//! 配置管理模块
//!
//! 支持 YAML 配置文件加载、环境变量覆盖，以及类型安全的配置访问。
//! 所有生成概率和可调常量集中在 [`GenerationPolicy`] 中，生成器内部不出现魔法数字。

use std::path::Path;

use chrono::NaiveDateTime;
use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::Result;

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config/datagen.yaml";

/// 环境变量前缀（DATAGEN_GENERATION__UNIQUE_JIRAS -> generation.unique_jiras）
pub const ENV_PREFIX: &str = "DATAGEN";

/// 输出配置
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct OutputConfig {
    /// 输出目录名
    #[validate(length(min = 1, message = "输出目录名不能为空"))]
    pub folder_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            folder_name: "mock_data".to_string(),
        }
    }
}

/// 生成数量配置
///
/// 数量使用有符号整数：零或负数表示跳过对应生成器，而不是致命错误。
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GenerationConfig {
    /// 唯一用户名数量
    pub user_names_count: i64,
    /// 唯一变更记录数量
    pub unique_crs: i64,
    /// 唯一问题数量
    pub unique_jiras: i64,
    /// 文档页数量
    pub confluence_pages: i64,
    /// 变更子任务行数
    pub cr_ctasks: i64,
    /// 问题活动日志行数
    pub jira_activities: i64,
    /// 随机种子，未指定时从系统熵源生成
    pub seed: Option<u64>,
    /// 生成使用的"当前时间"（如 2025-06-01T09:00:00），未指定时取本地当前时间
    ///
    /// 所有日期窗口都以它为上界，重放一次运行需要同时固定种子和该时间。
    pub now: Option<NaiveDateTime>,
    /// 是否在所有阶段之后执行交叉关联补全
    pub cross_link_pass: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            user_names_count: 25,
            unique_crs: 22,
            unique_jiras: 72,
            confluence_pages: 23,
            cr_ctasks: 18,
            jira_activities: 35,
            seed: None,
            now: None,
            cross_link_pass: true,
        }
    }
}

/// 生成策略
///
/// 集中管理所有随机分支的概率和阈值，便于审计和调整。
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GenerationPolicy {
    /// 问题 ID 使用备选前缀（LOG/PERF/BUG/FEAT）的概率
    #[validate(range(min = 0.0, max = 1.0))]
    pub issue_alt_prefix_probability: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub issue_app_name_probability: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub issue_confidence_probability: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub issue_story_points_probability: f64,
    /// 问题反向关联变更记录的概率（变更池非空时）
    #[validate(range(min = 0.0, max = 1.0))]
    pub issue_change_link_probability: f64,
    /// 新文档加入可作为父页面候选集的概率
    #[validate(range(min = 0.0, max = 1.0))]
    pub document_parent_eligible_probability: f64,
    /// 文档尝试挂到父页面下的概率
    #[validate(range(min = 0.0, max = 1.0))]
    pub document_parent_probability: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub change_issue_omit_probability: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub change_document_omit_probability: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub change_risk_percentage_probability: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub change_canned_plan_probability: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub change_canned_backout_probability: f64,
    /// 每个主团队的目标变更数（变更总数较少时收缩为 max(1, N/3)）
    #[validate(range(min = 1))]
    pub team_quota_target: usize,
    /// 每个唯一用户名允许的最大尝试次数
    #[validate(range(min = 1))]
    pub identity_attempts_per_handle: usize,
}

impl Default for GenerationPolicy {
    fn default() -> Self {
        Self {
            issue_alt_prefix_probability: 0.2,
            issue_app_name_probability: 0.7,
            issue_confidence_probability: 0.5,
            issue_story_points_probability: 0.8,
            issue_change_link_probability: 0.4,
            document_parent_eligible_probability: 0.7,
            document_parent_probability: 0.4,
            change_issue_omit_probability: 0.5,
            change_document_omit_probability: 0.7,
            change_risk_percentage_probability: 0.7,
            change_canned_plan_probability: 0.5,
            change_canned_backout_probability: 0.5,
            team_quota_target: 7,
            identity_attempts_per_handle: 50,
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(default)]
pub struct AppConfig {
    #[validate(nested)]
    pub output: OutputConfig,
    #[validate(nested)]
    pub generation: GenerationConfig,
    #[validate(nested)]
    pub policy: GenerationPolicy,
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 加载顺序（后加载的会覆盖先加载的同名配置项）：
    /// 1. 配置文件（必须存在，缺失即为致命错误）
    /// 2. 环境变量（DATAGEN_ 前缀，层级分隔符为双下划线）
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let builder = Config::builder()
            .add_source(File::from(path.as_ref()).required(true))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::finish(builder)
    }

    /// 从 YAML 字符串解析配置，不读取环境变量
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let builder = Config::builder().add_source(File::from_str(yaml, FileFormat::Yaml));
        Self::finish(builder)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}
