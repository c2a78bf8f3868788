//! # 解析器模块
//!
//! 提供相记录 CSV 与热化学校正表的解析器。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: phases, thermo_table

pub mod phases;
pub mod thermo_table;
