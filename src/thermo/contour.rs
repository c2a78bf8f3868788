//! # 等值线层级与色标刻度
//!
//! 从整数相编号网格导出绘图端需要的离散等值线层级与色标刻度：
//! 层级是 `[min−0.5 .. max+0.5]` 的单位步长序列（每个相编号占一个色带），
//! 刻度是 `[min .. max]` 的整数中点。
//!
//! ## 依赖关系
//! - 被 `commands/diagram.rs` 与外部绘图端使用
//! - 使用 `models/grid.rs` 的 Grid2

use crate::models::Grid2;

fn id_range(z: &Grid2<usize>) -> (usize, usize) {
    let mut min = usize::MAX;
    let mut max = 0usize;
    for &id in z.as_slice() {
        min = min.min(id);
        max = max.max(id);
    }
    (min, max)
}

/// 离散等值线层级：每个出现的相编号落在一个 [id−0.5, id+0.5] 色带内
pub fn get_levels(z: &Grid2<usize>) -> Vec<f64> {
    let (min, max) = id_range(z);
    (min..=max + 1).map(|v| v as f64 - 0.5).collect()
}

/// 色标刻度：各色带的整数中点
pub fn get_ticks(z: &Grid2<usize>) -> Vec<f64> {
    let (min, max) = id_range(z);
    (min..=max).map(|v| v as f64).collect()
}
