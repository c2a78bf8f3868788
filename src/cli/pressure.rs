//! # pressure 子命令 CLI 定义
//!
//! 化学势 → 分压换算表参数。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/pressure.rs`

use clap::Args;

/// pressure 子命令参数
#[derive(Args, Debug)]
pub struct PressureArgs {
    /// Temperature in K
    #[arg(short, long)]
    pub temperature: f64,

    /// Chemical potential range 'start:stop' in eV
    #[arg(long, allow_hyphen_values = true, default_value = "-2:0")]
    pub range: String,

    /// Step in eV
    #[arg(long, default_value_t = 0.1)]
    pub step: f64,
}
