//! # 表面过剩能基础公式
//!
//! 相图引擎使用的派生量原语：过剩量、体相归一化、表面过剩能、
//! 化学势 → 分压换算。引擎内部逐格点调用的正是这里的函数，
//! 保证独立调用与网格扫描结果逐位一致。
//!
//! ## 单位约定
//! - 能量/化学势: eV
//! - 面积: Å²
//! - 表面过剩能: eV/Å²
//! - 压强: bar（参考压强 1 bar）
//!
//! ## 依赖关系
//! - 被 `thermo/diagram.rs`, `commands/pressure.rs` 调用
//! - 使用 `models/phase.rs` 的 BulkReference

use crate::error::{Result, SurfdiagError};
use crate::models::BulkReference;

/// Boltzmann 常数 (eV/K)，CODATA 推荐值
pub const BOLTZMANN_EV: f64 = 8.617333262e-5;

/// 理想气体分压换算的参考压强 (bar)
pub const REFERENCE_PRESSURE_BAR: f64 = 1.0;

/// 计算吸附物种的表面过剩量
///
/// - `n_species = None`: 直接按双表面面积归一，`count / (2·area)`
/// - `n_species = Some(n)`: 相对体相组成的过剩，板层阳离子按体相
///   阴/阳配比折算后除以物种数:
///   `(count − (slab_cations/bulk.cation)·(bulk.anion/n)) / (2·area)`
///
/// 两种模式显式区分，调用方不再依赖隐式标志位。
pub fn calculate_excess(
    count: f64,
    slab_cations: f64,
    area: f64,
    bulk: &BulkReference,
    n_species: Option<u32>,
) -> f64 {
    match n_species {
        Some(n) => {
            let bulk_ratio =
                (slab_cations / bulk.cation_count as f64) * (bulk.anion_count as f64 / n as f64);
            (count - bulk_ratio) / (2.0 * area)
        }
        None => count / (2.0 * area),
    }
}

/// 板层能量减去配比缩放后的体相参考能量，再除以双表面面积
///
/// 缩放因子与 `NormalisationScheme` 对应，由调用方给出。
pub(crate) fn normalised_slab_energy(
    slab_energy: f64,
    scale: f64,
    bulk: &BulkReference,
    area: f64,
) -> f64 {
    (slab_energy - scale * bulk.energy_per_formula_unit()) / (2.0 * area)
}

/// 按阳离子配比归一化板层能量
///
/// `(slab_energy − (slab_cations/bulk.cation)·(bulk.energy/bulk.formula_units)) / (2·area)`
pub fn calculate_normalisation(
    slab_energy: f64,
    slab_cations: f64,
    bulk: &BulkReference,
    area: f64,
) -> f64 {
    normalised_slab_energy(
        slab_energy,
        slab_cations / bulk.cation_count as f64,
        bulk,
        area,
    )
}

/// 单点表面过剩能
///
/// `normalised_bulk − (Δμx + Ex)·xexcess − (Δμy + Ey)·yexcess`
///
/// 过剩量参数已含双表面面积因子，本函数不再除以面积。
/// `x_energy`/`y_energy` 是两个物种的化学势原点平移（参考能量）。
pub fn calculate_surface_energy(
    dmu_x: f64,
    dmu_y: f64,
    x_energy: f64,
    y_energy: f64,
    xexcess: f64,
    yexcess: f64,
    normalised_bulk: f64,
) -> f64 {
    normalised_bulk - (dmu_x + x_energy) * xexcess - (dmu_y + y_energy) * yexcess
}

/// 化学势 → 分压 (bar)，理想气体关系 `P = exp(μ / kB·T) · P_ref`
///
/// 对固定 `T > 0` 关于 μ 严格单调递增；`T ≤ 0` 返回 `Domain` 错误。
pub fn pressure(mu: &[f64], temperature: f64) -> Result<Vec<f64>> {
    if !temperature.is_finite() || temperature <= 0.0 {
        return Err(SurfdiagError::Domain(format!(
            "temperature must be positive, got {} K",
            temperature
        )));
    }

    let kt = BOLTZMANN_EV * temperature;
    Ok(mu
        .iter()
        .map(|&m| (m / kt).exp() * REFERENCE_PRESSURE_BAR)
        .collect())
}
