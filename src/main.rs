//! # surfdiag - 表面相图计算工具箱
//!
//! 从 DFT 表面能出发，在二维化学势网格上判定最稳定的表面终止相，
//! 输出相图数据（相编号网格 + 表面过剩能网格）供绘图端使用。
//!
//! ## 子命令
//! - `diagram`    - 计算表面相图（单文件或批量目录）
//! - `pressure`   - 化学势 → 分压换算表（理想气体关系）
//! - `correction` - 查询热化学校正表（温度插值）
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (相记录与热化学表解析)
//!   │     ├── thermo/    (相图计算引擎)
//!   │     └── models/    (数据模型)
//!   ├── batch/      (批量处理)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod models;
mod parsers;
mod thermo;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
