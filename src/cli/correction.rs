//! # correction 子命令 CLI 定义
//!
//! 热化学校正表查询参数。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/correction.rs`

use clap::Args;
use std::path::PathBuf;

/// correction 子命令参数
#[derive(Args, Debug)]
pub struct CorrectionArgs {
    /// Two-column thermochemical table file (temperature, correction)
    #[arg(short = 'f', long)]
    pub table: PathBuf,

    /// Temperature in K
    #[arg(short, long)]
    pub temperature: f64,
}
