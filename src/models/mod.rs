//! # 数据模型模块
//!
//! 定义相图计算的输入记录、化学势轴、输出网格与热化学表。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `thermo/`, `commands/` 使用
//! - 子模块: phase, grid, table

pub mod grid;
pub mod phase;
pub mod table;

pub use grid::{AxisSpec, ChemicalPotentialAxis, DiagramResult, Grid2};
pub use phase::{BulkReference, NormalisationScheme, SurfacePhase};
pub use table::ThermodynamicTable;
