//! Mock Datagen
//!
//! 生成相互关联的模拟数据集（问题、文档、变更记录、变更子任务、活动日志），
//! 用于下游工具的演示和压测。
//!
//! # 主要模块
//!
//! - `context`: 单次运行的随机源和 ID 池
//! - `identity`: 唯一用户名池
//! - `generators`: 各实体族的生成器和交叉关联阶段
//! - `models`: 记录结构及其表格展开
//! - `output`: CSV 和运行清单写出
//! - `pipeline`: 按固定阶段顺序串联以上模块
//!
//! # 使用示例
//!
//! ```rust,no_run
//! use datagen_shared::config::AppConfig;
//! use mock_datagen::context::GenerationContext;
//! use mock_datagen::pipeline::Pipeline;
//!
//! let config = AppConfig::default();
//! let pipeline = Pipeline::new(&config);
//! // 固定种子和时间基准，输出可按 run_manifest.json 中的值重放
//! let now = "2025-06-01T09:00:00".parse().unwrap();
//! let mut ctx = GenerationContext::resolve(Some(42), Some(now));
//! let report = pipeline.run(&mut ctx, "mock_data".as_ref()).unwrap();
//! assert!(!report.has_failures());
//! ```

pub mod cli;
pub mod context;
pub mod generators;
pub mod identity;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod sampling;
pub mod vocab;
