//! # 表面相记录解析器
//!
//! 从 CSV 文件读取候选表面相记录，表头使用领域惯例字段名
//! (Label, Cation, X, Y, Area, Energy, nSpecies)。
//!
//! ## 依赖关系
//! - 被 `commands/diagram.rs` 使用
//! - 使用 `models/phase.rs` 的 SurfacePhase
//! - 使用 `csv` + `serde` 反序列化

use crate::error::{Result, SurfdiagError};
use crate::models::SurfacePhase;

use std::path::Path;

/// 解析表面相 CSV 文件
///
/// 非法记录（无法反序列化、非正表面积、零物种数）立即报错，
/// 不返回部分结果。
pub fn load_phases(path: &Path) -> Result<Vec<SurfacePhase>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut phases = Vec::new();

    for (i, record) in reader.deserialize::<SurfacePhase>().enumerate() {
        let phase = record.map_err(|e| SurfdiagError::ParseError {
            format: "surface phase CSV".to_string(),
            path: path.display().to_string(),
            reason: format!("record {}: {}", i + 1, e),
        })?;

        if !(phase.area > 0.0) {
            return Err(SurfdiagError::InvalidInput(format!(
                "phase '{}': surface area must be positive, got {}",
                phase.label, phase.area
            )));
        }
        if phase.n_species == 0 {
            return Err(SurfdiagError::InvalidInput(format!(
                "phase '{}': nSpecies must be at least 1",
                phase.label
            )));
        }

        phases.push(phase);
    }

    if phases.is_empty() {
        return Err(SurfdiagError::InvalidInput(format!(
            "no surface phase records in '{}'",
            path.display()
        )));
    }

    Ok(phases)
}
