//! # 表面相与体相参考数据模型
//!
//! 定义相图计算的输入记录：体相参考物与候选表面终止相。
//! 字段名与 DFT 结果导出表格的领域惯例保持一致
//! (Cation / Anion / X / Y / Area / Energy / F-Units / Label / nSpecies)。
//!
//! ## 依赖关系
//! - 被 `parsers/phases.rs`, `thermo/` 使用
//! - 无外部模块依赖

use serde::{Deserialize, Serialize};

/// 体相参考物
///
/// 用于归一化表面组成的化学计量参考晶体。`energy` 是 `formula_units`
/// 个化学式单元的总能量 (eV)。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkReference {
    /// 阳离子数
    #[serde(rename = "Cation")]
    pub cation_count: u32,

    /// 阴离子数
    #[serde(rename = "Anion")]
    pub anion_count: u32,

    /// 总能量 (eV)
    #[serde(rename = "Energy")]
    pub energy: f64,

    /// 化学式单元数（除数，必须 > 0）
    #[serde(rename = "F-Units")]
    pub formula_units: u32,
}

impl BulkReference {
    pub fn new(cation_count: u32, anion_count: u32, energy: f64, formula_units: u32) -> Self {
        BulkReference {
            cation_count,
            anion_count,
            energy,
            formula_units,
        }
    }

    /// 每化学式单元能量 (eV)
    pub fn energy_per_formula_unit(&self) -> f64 {
        self.energy / self.formula_units as f64
    }
}

/// 候选表面终止相
///
/// 一个表面终止的 DFT 计算结果。`x_count`/`y_count` 是两个独立变化物种
/// （如吸附 O 与吸附 H2O）的数量，`area` 是板层单侧表面积 (Å²)。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfacePhase {
    /// 相标签
    #[serde(rename = "Label")]
    pub label: String,

    /// 阳离子数
    #[serde(rename = "Cation")]
    pub cation_count: u32,

    /// 第一变化物种数（x 轴物种）
    #[serde(rename = "X")]
    pub x_count: u32,

    /// 第二变化物种数（y 轴物种）
    #[serde(rename = "Y")]
    pub y_count: u32,

    /// 表面积 (Å²)，必须 > 0
    #[serde(rename = "Area")]
    pub area: f64,

    /// 板层总能量 (eV)
    #[serde(rename = "Energy")]
    pub energy: f64,

    /// 物种数除数（ByNumSpecies 归一化模式使用，必须 ≥ 1）
    #[serde(rename = "nSpecies", default = "default_n_species")]
    pub n_species: u32,
}

fn default_n_species() -> u32 {
    1
}

/// 体相参考能量的归一化策略
///
/// 决定 `bulk.energy / bulk.formula_units` 在表面过剩能公式中的缩放因子。
/// 两种策略显式命名，避免原始数据流程中 nSpecies 与阳离子数同时存在时的
/// 二义性。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NormalisationScheme {
    /// 按阳离子数配比缩放: `phase.cation_count / bulk.cation_count`
    #[default]
    ByCationRatio,

    /// 直接除以相的物种数: `1 / phase.n_species`
    ByNumSpecies,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_energy_per_formula_unit() {
        let bulk = BulkReference::new(24, 48, -570.0, 4);
        assert!((bulk.energy_per_formula_unit() - (-142.5)).abs() < 1e-12);
    }
}
