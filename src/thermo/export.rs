//! # 相图数据导出
//!
//! 把相图结果导出为长表 CSV（每格点一行），绘图端据此重建
//! 等值线图与色标。
//!
//! ## 依赖关系
//! - 被 `commands/diagram.rs` 调用
//! - 使用 `models/grid.rs` 的 DiagramResult
//! - 使用 `csv` 库写入 CSV 文件

use crate::error::{Result, SurfdiagError};
use crate::models::DiagramResult;

use std::path::Path;

/// 导出为长表 CSV: (Δμx, Δμy, 相下标, 相标签, 表面过剩能)
///
/// 行序与网格存储一致：y 外层、x 内层。
pub fn to_csv(result: &DiagramResult, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path).map_err(SurfdiagError::CsvError)?;

    wtr.write_record([
        format!("mu_{}_eV", result.x.label),
        format!("mu_{}_eV", result.y.label),
        "phase_index".to_string(),
        "phase_label".to_string(),
        "surface_energy_eV_A2".to_string(),
    ])
    .map_err(SurfdiagError::CsvError)?;

    for (iy, yj) in result.y.values.iter().enumerate() {
        for (ix, xi) in result.x.values.iter().enumerate() {
            let id = result.phase_id.get(ix, iy);
            wtr.write_record([
                format!("{:.6}", xi),
                format!("{:.6}", yj),
                id.to_string(),
                result.labels[id].clone(),
                format!("{:.10}", result.surface_energy.get(ix, iy)),
            ])
            .map_err(SurfdiagError::CsvError)?;
        }
    }

    wtr.flush().map_err(|e| SurfdiagError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
