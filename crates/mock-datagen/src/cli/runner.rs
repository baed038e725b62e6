//! 命令执行器
//!
//! 负责执行各 CLI 子命令的具体逻辑：加载配置、应用命令行覆盖、驱动流水线。

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use datagen_shared::config::AppConfig;
use tracing::{error, info, warn};

use super::commands::{Commands, GenerateArgs};
use crate::pipeline::{Pipeline, RunReport};

/// 命令执行器
///
/// 封装配置文件路径和各命令的执行逻辑，简化 main 函数。
pub struct CommandRunner {
    config_path: PathBuf,
}

impl CommandRunner {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// 加载并校验配置，失败即为致命错误
    pub fn load_config(&self) -> Result<AppConfig> {
        AppConfig::load(&self.config_path)
            .with_context(|| format!("加载配置失败: {}", self.config_path.display()))
    }

    /// 执行子命令并给出进程退出码
    ///
    /// 致命错误以 `Err` 返回；generate 有任一文件写出失败时返回 [`ExitCode::FAILURE`]。
    pub fn execute(&self, command: Commands) -> Result<ExitCode> {
        match command {
            Commands::Generate(args) => {
                let report = self.run_generate(args)?;
                if report.has_failures() {
                    error!(run_id = %report.manifest.run_id, "部分文件写出失败");
                    return Ok(ExitCode::FAILURE);
                }
            }
            Commands::ShowConfig => {
                print!("{}", self.run_show_config()?);
            }
        }
        Ok(ExitCode::SUCCESS)
    }

    /// 执行 generate 命令
    ///
    /// 命令行参数优先于配置文件。返回的报告中记录了每个文件的写出结果。
    pub fn run_generate(&self, args: GenerateArgs) -> Result<RunReport> {
        let mut config = self.load_config()?;
        if let Some(seed) = args.seed {
            config.generation.seed = Some(seed);
        }
        if let Some(now) = args.now {
            config.generation.now = Some(now);
        }
        if args.no_cross_link {
            config.generation.cross_link_pass = false;
        }
        let output_dir = args
            .output
            .unwrap_or_else(|| PathBuf::from(&config.output.folder_name));

        let pipeline = Pipeline::new(&config);
        let mut ctx = pipeline.context();
        info!(
            seed = ctx.seed(),
            now = %ctx.now(),
            cross_link_pass = config.generation.cross_link_pass,
            "使用随机种子和时间基准"
        );

        let report = pipeline
            .run(&mut ctx, &output_dir)
            .context("生成数据失败")?;

        for failed in report.manifest.failed_files() {
            warn!(
                entity = %failed.entity,
                file = %failed.file.display(),
                error = failed.error.as_deref().unwrap_or_default(),
                "文件写出失败"
            );
        }
        print_summary(&report, &output_dir);
        Ok(report)
    }

    /// 执行 show-config 命令，返回生效配置的 YAML 文本
    pub fn run_show_config(&self) -> Result<String> {
        let config = self.load_config()?;
        serde_yaml::to_string(&config).context("序列化配置失败")
    }
}

fn print_summary(report: &RunReport, output_dir: &Path) {
    println!("\n生成结果 ({}):", output_dir.display());
    println!("{}", "-".repeat(60));
    for entity in &report.manifest.entities {
        let status = match (&entity.error, &entity.skipped) {
            (Some(_), _) => "失败".to_string(),
            (None, Some(reason)) => format!("跳过: {reason}"),
            (None, None) => "完成".to_string(),
        };
        println!(
            "  {:<32} {:>5} 条 {:>6} 行  {}",
            entity.entity.file_name(),
            entity.generated,
            entity.rows_written,
            status
        );
    }
    println!("{}", "-".repeat(60));
    println!(
        "  种子: {}  时间基准: {}  运行 ID: {}",
        report.manifest.seed, report.manifest.generation_now, report.manifest.run_id
    );
}
