//! # 化学势轴与二维网格数据模型
//!
//! 定义相图计算的独立变量轴（Δμ 序列）与输出网格。
//! 网格以扁平缓冲区行主序存储（y 为外层/慢索引），
//! 通过薄访问器做显式下标换算，保证扫描阶段的缓存友好性。
//!
//! ## 依赖关系
//! - 被 `thermo/` 使用
//! - 使用 `error.rs`

use crate::error::{Result, SurfdiagError};
use serde::{Deserialize, Serialize};

/// 轴规格：半开区间 [start, stop) + 固定步长
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxisSpec {
    /// 物种名（如 "O", "H_2O"）
    pub label: String,
    /// 区间起点 (eV)
    pub start: f64,
    /// 区间终点 (eV)，不含
    pub stop: f64,
    /// 步长 (eV)
    pub step: f64,
}

/// 二维扫描的一个独立变量轴
///
/// `values` 严格递增，由 `AxisSpec` 的半开 arange 生成，至少一个元素。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChemicalPotentialAxis {
    /// 物种名
    pub label: String,
    /// Δμ 序列 (eV)
    pub values: Vec<f64>,
}

impl ChemicalPotentialAxis {
    /// 从轴规格生成半开 arange: start, start+step, ..., < stop
    pub fn from_spec(spec: &AxisSpec) -> Result<Self> {
        if !spec.step.is_finite() || spec.step <= 0.0 {
            return Err(SurfdiagError::InvalidInput(format!(
                "axis '{}': step must be positive, got {}",
                spec.label, spec.step
            )));
        }
        if !spec.start.is_finite() || !spec.stop.is_finite() || spec.stop <= spec.start {
            return Err(SurfdiagError::InvalidInput(format!(
                "axis '{}': empty range [{}, {})",
                spec.label, spec.start, spec.stop
            )));
        }

        let n = ((spec.stop - spec.start) / spec.step).ceil() as usize;
        let values: Vec<f64> = (0..n).map(|i| spec.start + i as f64 * spec.step).collect();

        Ok(ChemicalPotentialAxis {
            label: spec.label.clone(),
            values,
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// 行主序二维网格
///
/// `data[iy * nx + ix]`，iy 为慢索引。尺寸在构造时固定。
#[derive(Debug, Clone, PartialEq)]
pub struct Grid2<T> {
    nx: usize,
    ny: usize,
    data: Vec<T>,
}

impl<T: Copy> Grid2<T> {
    /// 从行主序缓冲区构造；长度必须等于 nx*ny
    pub fn from_raw(nx: usize, ny: usize, data: Vec<T>) -> Self {
        assert_eq!(data.len(), nx * ny, "grid buffer size mismatch");
        Grid2 { nx, ny, data }
    }

    pub fn nx(&self) -> usize {
        self.nx
    }

    pub fn ny(&self) -> usize {
        self.ny
    }

    pub fn get(&self, ix: usize, iy: usize) -> T {
        self.data[iy * self.nx + ix]
    }

    /// 扁平行主序视图
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

/// 相图计算输出
///
/// `phase_id` 的每个元素是输入相序列的下标（该格点上表面过剩能最小的相），
/// `surface_energy` 是共索引的最小过剩能 (eV/Å²)。两个网格尺寸均为
/// `len(y) × len(x)`。
#[derive(Debug, Clone)]
pub struct DiagramResult {
    /// x 轴（快索引）
    pub x: ChemicalPotentialAxis,
    /// y 轴（慢索引）
    pub y: ChemicalPotentialAxis,
    /// 获胜相下标网格
    pub phase_id: Grid2<usize>,
    /// 获胜相表面过剩能网格 (eV/Å²)
    pub surface_energy: Grid2<f64>,
    /// 相标签，顺序与输入相序列一致
    pub labels: Vec<String>,
}

impl DiagramResult {
    /// 各相占据的格点比例（按输入相下标索引）
    pub fn stability_shares(&self) -> Vec<f64> {
        let mut counts = vec![0usize; self.labels.len()];
        for &id in self.phase_id.as_slice() {
            counts[id] += 1;
        }
        let total = (self.phase_id.nx() * self.phase_id.ny()) as f64;
        counts.iter().map(|&c| c as f64 / total).collect()
    }

    /// 各相在其稳定区内的最小表面过剩能；从未获胜的相为 None
    pub fn minimum_energies(&self) -> Vec<Option<f64>> {
        let mut minima = vec![None; self.labels.len()];
        for (&id, &se) in self
            .phase_id
            .as_slice()
            .iter()
            .zip(self.surface_energy.as_slice())
        {
            let entry = &mut minima[id];
            match entry {
                Some(current) if *current <= se => {}
                _ => *entry = Some(se),
            }
        }
        minima
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_arange_half_open() {
        let spec = AxisSpec {
            label: "O".to_string(),
            start: 0.0,
            stop: 10.0,
            step: 0.025,
        };
        let axis = ChemicalPotentialAxis::from_spec(&spec).unwrap();
        assert_eq!(axis.len(), 400);
        assert_eq!(axis.values[0], 0.0);
        assert!((axis.values[399] - 9.975).abs() < 1e-9);
        // 半开区间：终点不含
        assert!(*axis.values.last().unwrap() < 10.0);
    }

    #[test]
    fn test_axis_negative_range() {
        let spec = AxisSpec {
            label: "H_2O".to_string(),
            start: -6.0,
            stop: -2.0,
            step: 0.5,
        };
        let axis = ChemicalPotentialAxis::from_spec(&spec).unwrap();
        assert_eq!(axis.len(), 8);
        assert!((axis.values[7] - (-2.5)).abs() < 1e-12);
    }

    #[test]
    fn test_axis_empty_range_rejected() {
        let spec = AxisSpec {
            label: "O".to_string(),
            start: 1.0,
            stop: 1.0,
            step: 0.1,
        };
        assert!(ChemicalPotentialAxis::from_spec(&spec).is_err());

        let spec = AxisSpec {
            label: "O".to_string(),
            start: 0.0,
            stop: 1.0,
            step: -0.1,
        };
        assert!(ChemicalPotentialAxis::from_spec(&spec).is_err());
    }

    #[test]
    fn test_grid_row_major_indexing() {
        let grid = Grid2::from_raw(3, 2, vec![10i64, 11, 12, 20, 21, 22]);
        // iy * nx + ix: y 为慢索引
        assert_eq!(grid.get(0, 0), 10);
        assert_eq!(grid.get(2, 0), 12);
        assert_eq!(grid.get(0, 1), 20);
        assert_eq!(grid.get(2, 1), 22);
        assert_eq!((grid.nx(), grid.ny()), (3, 2));
    }
}
