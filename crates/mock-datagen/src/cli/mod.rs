//! CLI 模块
//!
//! 提供命令行接口，支持以下功能：
//!
//! - `generate` - 生成五类模拟数据文件和运行清单
//! - `show-config` - 打印生效的配置
//!
//! # 使用示例
//!
//! ```bash
//! # 使用默认配置生成
//! datagen generate
//!
//! # 固定种子，输出到指定目录，关闭交叉关联阶段
//! datagen generate --seed 42 -o out --no-cross-link
//!
//! # 按运行清单中的 seed 和 generation_now 重放一次运行
//! datagen generate --seed 42 --now 2025-06-01T09:00:00
//!
//! # 查看合并环境变量后的配置
//! DATAGEN_GENERATION__UNIQUE_JIRAS=10 datagen show-config
//! ```

pub mod commands;
pub mod runner;

pub use commands::{Cli, Commands, GenerateArgs};
pub use runner::CommandRunner;
