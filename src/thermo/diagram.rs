//! # 相图计算引擎
//!
//! 在二维化学势网格上逐点计算每个候选相的表面过剩能，取最小者，
//! 产出相编号网格与过剩能网格。
//!
//! ## 算法概述
//! 1. 校验输入（非空相列表、正表面积、非零除数）
//! 2. 逐相预计算归一化体相能量与物种过剩量
//! 3. 按 y 行并行扫描网格，逐点取 argmin
//! 4. 组装行主序网格
//!
//! ## 平局规则
//! 过剩能相等时取序列下标最小的相（按输入顺序扫描、严格 `<` 比较）。
//! 这是显式约定而非迭代顺序的副产品，见单元测试。
//!
//! ## 依赖关系
//! - 被 `commands/diagram.rs` 调用
//! - 使用 `models/` 的 SurfacePhase, BulkReference, 网格类型
//! - 使用 `thermo/energy.rs` 的能量公式

use crate::error::{Result, SurfdiagError};
use crate::models::{
    BulkReference, ChemicalPotentialAxis, DiagramResult, Grid2, NormalisationScheme, SurfacePhase,
};
use crate::thermo::energy::{
    calculate_excess, calculate_normalisation, calculate_surface_energy, normalised_slab_energy,
};

use rayon::prelude::*;

/// 逐相预计算的能量项
struct PhaseTerms {
    normalised_bulk: f64,
    xexcess: f64,
    yexcess: f64,
}

/// 相图计算器
pub struct DiagramCalculator {
    /// 体相参考能量归一化策略
    scheme: NormalisationScheme,
    /// x 物种化学势原点平移 (eV)
    shift_x: f64,
    /// y 物种化学势原点平移 (eV)
    shift_y: f64,
}

impl DiagramCalculator {
    /// 创建新的相图计算器，原点平移默认为零
    pub fn new(scheme: NormalisationScheme) -> Self {
        Self {
            scheme,
            shift_x: 0.0,
            shift_y: 0.0,
        }
    }

    /// 设置化学势原点平移（加到对应轴的每个 Δμ 上）
    pub fn with_shifts(mut self, shift_x: f64, shift_y: f64) -> Self {
        self.shift_x = shift_x;
        self.shift_y = shift_y;
        self
    }

    /// 在 `len(y) × len(x)` 网格上判定最稳定相
    ///
    /// 纯函数：不修改输入，相同输入产出相同网格。输出网格全量填充。
    pub fn evaluate(
        &self,
        phases: &[SurfacePhase],
        bulk: &BulkReference,
        x: &ChemicalPotentialAxis,
        y: &ChemicalPotentialAxis,
    ) -> Result<DiagramResult> {
        self.validate(phases, bulk, x, y)?;

        let terms = self.precompute_terms(phases, bulk)?;
        let nx = x.len();
        let ny = y.len();

        // 行内 x 连续递增，与行主序存储一致；行间无依赖，按 y 并行
        let rows: Result<Vec<(Vec<usize>, Vec<f64>)>> = y
            .values
            .par_iter()
            .map(|&yj| {
                let mut ids = Vec::with_capacity(nx);
                let mut energies = Vec::with_capacity(nx);

                for &xi in &x.values {
                    let mut best_id = 0usize;
                    let mut best_se = f64::INFINITY;

                    for (k, t) in terms.iter().enumerate() {
                        let se = calculate_surface_energy(
                            xi,
                            yj,
                            self.shift_x,
                            self.shift_y,
                            t.xexcess,
                            t.yexcess,
                            t.normalised_bulk,
                        );
                        // 严格小于：平局保留最小下标
                        if se < best_se {
                            best_id = k;
                            best_se = se;
                        }
                    }

                    if !best_se.is_finite() {
                        return Err(SurfdiagError::InvalidInput(format!(
                            "non-finite surface energy at (dmu_x={}, dmu_y={})",
                            xi, yj
                        )));
                    }

                    ids.push(best_id);
                    energies.push(best_se);
                }

                Ok((ids, energies))
            })
            .collect();

        let mut phase_buf = Vec::with_capacity(nx * ny);
        let mut energy_buf = Vec::with_capacity(nx * ny);
        for (ids, energies) in rows? {
            phase_buf.extend(ids);
            energy_buf.extend(energies);
        }

        Ok(DiagramResult {
            x: x.clone(),
            y: y.clone(),
            phase_id: Grid2::from_raw(nx, ny, phase_buf),
            surface_energy: Grid2::from_raw(nx, ny, energy_buf),
            labels: phases.iter().map(|p| p.label.clone()).collect(),
        })
    }

    /// 输入校验：除数为零或非有限输入在这里挡下，避免 NaN/Inf 渗入网格
    fn validate(
        &self,
        phases: &[SurfacePhase],
        bulk: &BulkReference,
        x: &ChemicalPotentialAxis,
        y: &ChemicalPotentialAxis,
    ) -> Result<()> {
        if phases.is_empty() {
            return Err(SurfdiagError::InvalidInput(
                "phase list is empty".to_string(),
            ));
        }
        if x.is_empty() || y.is_empty() {
            return Err(SurfdiagError::InvalidInput(
                "chemical potential axis is empty".to_string(),
            ));
        }
        if bulk.formula_units == 0 {
            return Err(SurfdiagError::InvalidInput(
                "bulk reference formula_units must be positive".to_string(),
            ));
        }
        if !bulk.energy.is_finite() {
            return Err(SurfdiagError::InvalidInput(
                "bulk reference energy is not finite".to_string(),
            ));
        }
        if !self.shift_x.is_finite() || !self.shift_y.is_finite() {
            return Err(SurfdiagError::InvalidInput(
                "chemical potential shifts must be finite".to_string(),
            ));
        }
        if self.scheme == NormalisationScheme::ByCationRatio && bulk.cation_count == 0 {
            return Err(SurfdiagError::InvalidInput(
                "bulk reference cation_count must be positive for by-cation-ratio normalisation"
                    .to_string(),
            ));
        }

        for phase in phases {
            if !(phase.area > 0.0) || !phase.area.is_finite() {
                return Err(SurfdiagError::InvalidInput(format!(
                    "phase '{}': surface area must be positive, got {}",
                    phase.label, phase.area
                )));
            }
            if !phase.energy.is_finite() {
                return Err(SurfdiagError::InvalidInput(format!(
                    "phase '{}': energy is not finite",
                    phase.label
                )));
            }
            if self.scheme == NormalisationScheme::ByNumSpecies && phase.n_species == 0 {
                return Err(SurfdiagError::InvalidInput(format!(
                    "phase '{}': n_species must be positive for by-n-species normalisation",
                    phase.label
                )));
            }
        }

        Ok(())
    }

    fn precompute_terms(
        &self,
        phases: &[SurfacePhase],
        bulk: &BulkReference,
    ) -> Result<Vec<PhaseTerms>> {
        phases
            .iter()
            .map(|phase| {
                let normalised_bulk = match self.scheme {
                    NormalisationScheme::ByCationRatio => calculate_normalisation(
                        phase.energy,
                        phase.cation_count as f64,
                        bulk,
                        phase.area,
                    ),
                    NormalisationScheme::ByNumSpecies => normalised_slab_energy(
                        phase.energy,
                        1.0 / phase.n_species as f64,
                        bulk,
                        phase.area,
                    ),
                };

                let terms = PhaseTerms {
                    normalised_bulk,
                    xexcess: calculate_excess(
                        phase.x_count as f64,
                        phase.cation_count as f64,
                        phase.area,
                        bulk,
                        None,
                    ),
                    yexcess: calculate_excess(
                        phase.y_count as f64,
                        phase.cation_count as f64,
                        phase.area,
                        bulk,
                        None,
                    ),
                };

                if !terms.normalised_bulk.is_finite()
                    || !terms.xexcess.is_finite()
                    || !terms.yexcess.is_finite()
                {
                    return Err(SurfdiagError::InvalidInput(format!(
                        "phase '{}': non-finite energy terms",
                        phase.label
                    )));
                }

                Ok(terms)
            })
            .collect()
    }
}

/// 函数式入口：默认阳离子配比归一化
///
/// 返回 `(相编号网格, 表面过剩能网格)`，即绘图端消费的两个核心数组。
pub fn evaluate_phases(
    phases: &[SurfacePhase],
    bulk: &BulkReference,
    x: &ChemicalPotentialAxis,
    y: &ChemicalPotentialAxis,
    shift_x: f64,
    shift_y: f64,
) -> Result<(Grid2<usize>, Grid2<f64>)> {
    let result = DiagramCalculator::new(NormalisationScheme::ByCationRatio)
        .with_shifts(shift_x, shift_y)
        .evaluate(phases, bulk, x, y)?;
    Ok((result.phase_id, result.surface_energy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AxisSpec;

    fn bulk() -> BulkReference {
        BulkReference::new(1, 2, -100.0, 1)
    }

    fn phase(label: &str, y_count: u32, energy: f64) -> SurfacePhase {
        SurfacePhase {
            label: label.to_string(),
            cation_count: 24,
            x_count: 48,
            y_count,
            area: 60.22,
            energy,
            n_species: 1,
        }
    }

    fn axis(label: &str, start: f64, stop: f64, step: f64) -> ChemicalPotentialAxis {
        ChemicalPotentialAxis::from_spec(&AxisSpec {
            label: label.to_string(),
            start,
            stop,
            step,
        })
        .unwrap()
    }

    #[test]
    fn test_hydrated_phase_wins_everywhere() {
        // 水合相绝对能量足够低，在整个 Δμ ∈ [0,10)² 网格上都应获胜
        let phases = vec![phase("Stoich", 0, -570.0), phase("1 Water", 2, -600.0)];
        let x = axis("O", 0.0, 10.0, 0.025);
        let y = axis("H_2O", 0.0, 10.0, 0.025);

        let (ids, energies) = evaluate_phases(&phases, &bulk(), &x, &y, 0.0, 0.0).unwrap();

        assert_eq!(ids.nx(), 400);
        assert_eq!(ids.ny(), 400);
        assert!(ids.as_slice().iter().all(|&id| id == 1));
        assert!(energies.as_slice().iter().all(|se| se.is_finite()));
    }

    #[test]
    fn test_winning_energy_matches_direct_formula() {
        let phases = vec![phase("Stoich", 0, -570.0), phase("1 Water", 2, -600.0)];
        let b = bulk();
        let x = axis("O", 0.0, 1.0, 0.25);
        let y = axis("H_2O", 0.0, 1.0, 0.25);

        let result = DiagramCalculator::new(NormalisationScheme::ByCationRatio)
            .evaluate(&phases, &b, &x, &y)
            .unwrap();

        // 网格值应与独立调用的单点公式逐位一致
        let p = &phases[1];
        let norm = calculate_normalisation(p.energy, p.cation_count as f64, &b, p.area);
        let xex = calculate_excess(p.x_count as f64, p.cation_count as f64, p.area, &b, None);
        let yex = calculate_excess(p.y_count as f64, p.cation_count as f64, p.area, &b, None);
        let expected = calculate_surface_energy(0.5, 0.75, 0.0, 0.0, xex, yex, norm);

        assert_eq!(result.surface_energy.get(2, 3), expected);
        assert_eq!(result.phase_id.get(2, 3), 1);
    }

    #[test]
    fn test_tie_break_takes_lowest_index() {
        // 两个完全相同的相：全网格平局，必须全部判给下标 0
        let phases = vec![phase("A", 1, -580.0), phase("B", 1, -580.0)];
        let x = axis("O", 0.0, 1.0, 0.1);
        let y = axis("H_2O", 0.0, 1.0, 0.1);

        let (ids, _) = evaluate_phases(&phases, &bulk(), &x, &y, 0.0, 0.0).unwrap();
        assert!(ids.as_slice().iter().all(|&id| id == 0));
    }

    #[test]
    fn test_shift_translates_origin() {
        let phases = vec![phase("Stoich", 3, -570.0)];
        let b = bulk();
        let x = axis("O", 0.0, 1.0, 0.5);
        let y = axis("H_2O", 0.0, 1.0, 0.5);
        let x_shifted = axis("O", 2.0, 3.0, 0.5);

        let shifted = DiagramCalculator::new(NormalisationScheme::ByCationRatio)
            .with_shifts(2.0, 0.0)
            .evaluate(&phases, &b, &x, &y)
            .unwrap();
        let translated = DiagramCalculator::new(NormalisationScheme::ByCationRatio)
            .evaluate(&phases, &b, &x_shifted, &y)
            .unwrap();

        // μ + shift 与平移后的轴逐点等价
        assert_eq!(
            shifted.surface_energy.as_slice(),
            translated.surface_energy.as_slice()
        );
    }

    #[test]
    fn test_by_n_species_normalisation() {
        let mut p = phase("Stoich", 0, -570.0);
        p.n_species = 2;
        let b = bulk();
        let x = axis("O", 0.0, 0.5, 0.25);
        let y = axis("H_2O", 0.0, 0.5, 0.25);

        let result = DiagramCalculator::new(NormalisationScheme::ByNumSpecies)
            .evaluate(&[p.clone()], &b, &x, &y)
            .unwrap();

        // scale = 1/n_species 替代阳离子配比
        let norm = normalised_slab_energy(p.energy, 0.5, &b, p.area);
        let xex = calculate_excess(p.x_count as f64, p.cation_count as f64, p.area, &b, None);
        let yex = calculate_excess(p.y_count as f64, p.cation_count as f64, p.area, &b, None);
        let expected = calculate_surface_energy(0.0, 0.0, 0.0, 0.0, xex, yex, norm);
        assert_eq!(result.surface_energy.get(0, 0), expected);
    }

    #[test]
    fn test_empty_phase_list_rejected() {
        let x = axis("O", 0.0, 1.0, 0.5);
        let y = axis("H_2O", 0.0, 1.0, 0.5);
        assert!(matches!(
            evaluate_phases(&[], &bulk(), &x, &y, 0.0, 0.0),
            Err(SurfdiagError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_nonpositive_area_rejected() {
        let mut p = phase("Bad", 0, -570.0);
        p.area = 0.0;
        let x = axis("O", 0.0, 1.0, 0.5);
        let y = axis("H_2O", 0.0, 1.0, 0.5);
        assert!(matches!(
            evaluate_phases(&[p], &bulk(), &x, &y, 0.0, 0.0),
            Err(SurfdiagError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_zero_formula_units_rejected() {
        let b = BulkReference::new(1, 2, -100.0, 0);
        let p = phase("Stoich", 0, -570.0);
        let x = axis("O", 0.0, 1.0, 0.5);
        let y = axis("H_2O", 0.0, 1.0, 0.5);
        assert!(matches!(
            evaluate_phases(&[p], &b, &x, &y, 0.0, 0.0),
            Err(SurfdiagError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_grid_shape_y_outer() {
        let phases = vec![phase("Stoich", 0, -570.0)];
        let x = axis("O", 0.0, 1.0, 0.2); // 5 点
        let y = axis("H_2O", 0.0, 3.0, 1.0); // 3 点
        let (ids, energies) = evaluate_phases(&phases, &bulk(), &x, &y, 0.0, 0.0).unwrap();
        assert_eq!((ids.nx(), ids.ny()), (5, 3));
        assert_eq!(energies.as_slice().len(), 15);
    }
}
