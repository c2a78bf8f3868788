//! # 热化学校正表数据模型
//!
//! 温度 → 校正项的查找表，从两列文本文件加载后不可变。
//! 查询落在表行之间时线性插值；超出表覆盖范围不做外推，直接报错。
//!
//! ## 依赖关系
//! - 被 `parsers/thermo_table.rs`, `commands/` 使用
//! - 使用 `error.rs`

use crate::error::{Result, SurfdiagError};

/// 热化学校正表
///
/// 行按温度严格递增排列（加载时已校验）。
#[derive(Debug, Clone)]
pub struct ThermodynamicTable {
    rows: Vec<(f64, f64)>,
}

impl ThermodynamicTable {
    /// 从 (温度, 校正值) 行构造；行必须非空且温度严格递增
    pub fn new(rows: Vec<(f64, f64)>) -> Result<Self> {
        if rows.is_empty() {
            return Err(SurfdiagError::InvalidInput(
                "thermodynamic table has no rows".to_string(),
            ));
        }
        for pair in rows.windows(2) {
            if pair[1].0 <= pair[0].0 {
                return Err(SurfdiagError::InvalidInput(format!(
                    "table temperatures must be strictly increasing ({} after {})",
                    pair[1].0, pair[0].0
                )));
            }
        }
        Ok(ThermodynamicTable { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// 表覆盖的温度范围 [min, max]
    pub fn temperature_range(&self) -> (f64, f64) {
        (self.rows[0].0, self.rows[self.rows.len() - 1].0)
    }

    /// 查询给定温度下的校正值 (eV)
    ///
    /// 精确命中表行时返回行值，否则在相邻两行之间线性插值。
    /// 温度超出表范围时返回 `Domain` 错误（不做外推）。
    pub fn correction_at(&self, temperature: f64) -> Result<f64> {
        let (t_min, t_max) = self.temperature_range();
        if !temperature.is_finite() || temperature < t_min || temperature > t_max {
            return Err(SurfdiagError::Domain(format!(
                "temperature {} K outside table range [{} K, {} K]",
                temperature, t_min, t_max
            )));
        }

        for pair in self.rows.windows(2) {
            let (t0, v0) = pair[0];
            let (t1, v1) = pair[1];
            if temperature == t0 {
                return Ok(v0);
            }
            if temperature < t1 {
                let f = (temperature - t0) / (t1 - t0);
                return Ok(v0 + f * (v1 - v0));
            }
        }

        // 只剩末行精确命中
        Ok(self.rows[self.rows.len() - 1].1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ThermodynamicTable {
        ThermodynamicTable::new(vec![(100.0, 0.002), (200.0, 0.004), (300.0, 0.010)]).unwrap()
    }

    #[test]
    fn test_exact_row_lookup() {
        let t = table();
        assert_eq!(t.correction_at(100.0).unwrap(), 0.002);
        assert_eq!(t.correction_at(200.0).unwrap(), 0.004);
        assert_eq!(t.correction_at(300.0).unwrap(), 0.010);
    }

    #[test]
    fn test_linear_interpolation() {
        let t = table();
        assert!((t.correction_at(150.0).unwrap() - 0.003).abs() < 1e-12);
        assert!((t.correction_at(250.0).unwrap() - 0.007).abs() < 1e-12);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let t = table();
        assert!(matches!(
            t.correction_at(99.9),
            Err(SurfdiagError::Domain(_))
        ));
        assert!(matches!(
            t.correction_at(301.0),
            Err(SurfdiagError::Domain(_))
        ));
    }

    #[test]
    fn test_unsorted_rows_rejected() {
        assert!(ThermodynamicTable::new(vec![(200.0, 0.1), (100.0, 0.2)]).is_err());
        assert!(ThermodynamicTable::new(vec![]).is_err());
    }
}
