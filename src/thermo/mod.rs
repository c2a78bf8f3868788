//! # 相图计算模块
//!
//! 提供表面相稳定性判定的核心算法。
//!
//! ## 子模块
//! - `energy`: 表面过剩能基础公式与物理常数
//! - `diagram`: 网格扫描引擎
//! - `contour`: 等值线层级/色标刻度
//! - `export`: 数据导出
//!
//! ## 依赖关系
//! - 被 `commands/diagram.rs` 使用
//! - 使用 `models/` 数据模型

pub mod contour;
pub mod diagram;
pub mod energy;
pub mod export;

pub use contour::{get_levels, get_ticks};
pub use diagram::{evaluate_phases, DiagramCalculator};
