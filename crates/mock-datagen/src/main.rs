//! datagen 命令行入口
//!
//! 初始化日志后分发子命令。致命错误（配置缺失或非法、用户名空间不足）
//! 和任一文件写出失败都以非零状态退出。

use std::process::ExitCode;

use clap::Parser;
use datagen_shared::observability;
use mock_datagen::cli::{Cli, CommandRunner};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    observability::init(&cli.observability())?;

    CommandRunner::new(cli.config).execute(cli.command)
}
