//! # diagram 子命令 CLI 定义
//!
//! 表面相图计算入口：体相参考、两条化学势轴、归一化策略与
//! 可选的温度校正。输入可以是单个相记录 CSV，也可以是目录（批量模式）。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/diagram.rs`

use crate::models::NormalisationScheme;

use clap::{Args, ValueEnum};
use regex::Regex;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────
// 归一化策略
// ─────────────────────────────────────────────────────────────

/// 体相参考能量归一化策略
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum NormalisationMode {
    /// Scale the bulk energy by phase cations over bulk cations
    #[default]
    ByCationRatio,
    /// Divide the bulk energy by the phase nSpecies count
    ByNSpecies,
}

impl NormalisationMode {
    pub fn to_scheme(self) -> NormalisationScheme {
        match self {
            NormalisationMode::ByCationRatio => NormalisationScheme::ByCationRatio,
            NormalisationMode::ByNSpecies => NormalisationScheme::ByNumSpecies,
        }
    }
}

impl std::fmt::Display for NormalisationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NormalisationMode::ByCationRatio => write!(f, "by-cation-ratio"),
            NormalisationMode::ByNSpecies => write!(f, "by-n-species"),
        }
    }
}

// ─────────────────────────────────────────────────────────────
// 轴范围解析
// ─────────────────────────────────────────────────────────────

/// 解析轴范围输入 "start:stop"
///
/// 化学势范围经常是负值（如 "-6:-2"），因此分隔符用冒号而非连字符，
/// 用正则一次性校验两个浮点边界。
pub fn parse_axis_range(input: &str) -> Result<(f64, f64), String> {
    let re = Regex::new(
        r"^\s*([+-]?\d+(?:\.\d+)?(?:[eE][+-]?\d+)?)\s*:\s*([+-]?\d+(?:\.\d+)?(?:[eE][+-]?\d+)?)\s*$",
    )
    .expect("axis range regex is valid");

    let caps = re.captures(input).ok_or_else(|| {
        format!(
            "Invalid range '{}'. Use 'start:stop' in eV, e.g. '-6:0' or '0:10'",
            input
        )
    })?;

    // 正则保证两个捕获组都是合法浮点字面量
    let start: f64 = caps[1].parse().unwrap();
    let stop: f64 = caps[2].parse().unwrap();
    Ok((start, stop))
}

// ─────────────────────────────────────────────────────────────
// diagram 子命令参数
// ─────────────────────────────────────────────────────────────

/// diagram 子命令参数
#[derive(Args, Debug)]
pub struct DiagramArgs {
    /// Input: surface phase CSV file or directory of CSV files (batch mode)
    pub input: PathBuf,

    /// Cation count of the bulk reference
    #[arg(long)]
    pub bulk_cation: u32,

    /// Anion count of the bulk reference
    #[arg(long)]
    pub bulk_anion: u32,

    /// Total energy of the bulk reference in eV
    #[arg(long, allow_hyphen_values = true)]
    pub bulk_energy: f64,

    /// Formula units represented by the bulk energy
    #[arg(long, default_value_t = 1)]
    pub bulk_funits: u32,

    /// X axis chemical potential range 'start:stop' in eV
    #[arg(long, allow_hyphen_values = true)]
    pub x_range: String,

    /// X axis species label
    #[arg(long, default_value = "O")]
    pub x_label: String,

    /// Y axis chemical potential range 'start:stop' in eV
    #[arg(long, allow_hyphen_values = true)]
    pub y_range: String,

    /// Y axis species label
    #[arg(long, default_value = "H_2O")]
    pub y_label: String,

    /// Grid step in eV (both axes)
    #[arg(long, default_value_t = 0.025)]
    pub step: f64,

    /// Chemical potential origin shift for the x species, in eV
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub x_shift: f64,

    /// Chemical potential origin shift for the y species, in eV
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub y_shift: f64,

    /// Bulk energy normalisation strategy
    #[arg(long, value_enum, default_value_t = NormalisationMode::ByCationRatio)]
    pub normalisation: NormalisationMode,

    /// Thermochemical correction table for the y species (two-column text file)
    #[arg(long, requires = "temperature")]
    pub correction_table: Option<PathBuf>,

    /// Temperature in K for the correction lookup
    #[arg(long, requires = "correction_table")]
    pub temperature: Option<f64>,

    /// Output CSV file (single mode) or output directory (batch mode)
    #[arg(short, long, default_value = "phase_diagram.csv")]
    pub output: PathBuf,

    // ─────────────────────────────────────────────────────────────
    // 批量处理参数
    // ─────────────────────────────────────────────────────────────
    /// Glob pattern for input files (batch mode)
    #[arg(long, default_value = "*.csv")]
    pub pattern: String,

    /// Number of parallel jobs (0 = auto, batch mode only)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Recurse into subdirectories (batch mode)
    #[arg(long, default_value_t = false)]
    pub recursive: bool,

    /// Overwrite existing output files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_axis_range() {
        assert_eq!(parse_axis_range("0:10").unwrap(), (0.0, 10.0));
        assert_eq!(parse_axis_range("-6:-2").unwrap(), (-6.0, -2.0));
        assert_eq!(parse_axis_range(" -3.5 : 0.5 ").unwrap(), (-3.5, 0.5));
        assert_eq!(parse_axis_range("1e-1:2.5e0").unwrap(), (0.1, 2.5));
    }

    #[test]
    fn test_parse_axis_range_rejects_garbage() {
        assert!(parse_axis_range("5").is_err());
        assert!(parse_axis_range("a:b").is_err());
        assert!(parse_axis_range("1-2").is_err());
        assert!(parse_axis_range("1:2:3").is_err());
        assert!(parse_axis_range("").is_err());
    }
}
