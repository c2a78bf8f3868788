//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `diagram`: 表面相图计算（单文件/批量）
//! - `pressure`: 化学势 → 分压换算表
//! - `correction`: 热化学校正表查询
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: diagram, pressure, correction

pub mod correction;
pub mod diagram;
pub mod pressure;

use clap::{Parser, Subcommand};

/// surfdiag - 表面相图计算工具箱
#[derive(Parser)]
#[command(name = "surfdiag")]
#[command(version)]
#[command(
    about = "A surface phase stability diagram toolkit for computational surface chemistry",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Compute surface phase stability diagrams over a 2-D chemical potential grid
    Diagram(diagram::DiagramArgs),

    /// Convert chemical potentials to partial pressures (ideal gas relation)
    Pressure(pressure::PressureArgs),

    /// Query a thermochemical correction table at a given temperature
    Correction(correction::CorrectionArgs),
}
