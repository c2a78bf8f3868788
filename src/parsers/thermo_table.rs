//! # 热化学校正表解析器
//!
//! 解析两列纯文本表 (温度, 校正值)，跳过表头，产出
//! `ThermodynamicTable` 查找表。
//!
//! 文件格式约定：
//! - `#` 开头或空行忽略
//! - 首个数据行之前允许任意表头行（如列名）
//! - 数据区内的行必须是两个数值列，否则报 `ParseError`
//!
//! ## 依赖关系
//! - 被 `commands/diagram.rs`, `commands/correction.rs` 使用
//! - 使用 `models/table.rs`

use crate::error::{Result, SurfdiagError};
use crate::models::ThermodynamicTable;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// 解析热化学校正表文件
pub fn load_table(path: &Path) -> Result<ThermodynamicTable> {
    let file = File::open(path).map_err(|e| SurfdiagError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    let reader = BufReader::new(file);

    let mut rows: Vec<(f64, f64)> = Vec::new();

    for (lineno, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| SurfdiagError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match parse_row(trimmed) {
            Some(row) => rows.push(row),
            // 数据行之前的非数值行按表头跳过
            None if rows.is_empty() => continue,
            None => {
                return Err(SurfdiagError::ParseError {
                    format: "thermodynamic table".to_string(),
                    path: path.display().to_string(),
                    reason: format!(
                        "line {}: expected two numeric columns, got '{}'",
                        lineno + 1,
                        trimmed
                    ),
                });
            }
        }
    }

    if rows.is_empty() {
        return Err(SurfdiagError::ParseError {
            format: "thermodynamic table".to_string(),
            path: path.display().to_string(),
            reason: "no data rows found".to_string(),
        });
    }

    ThermodynamicTable::new(rows).map_err(|e| SurfdiagError::ParseError {
        format: "thermodynamic table".to_string(),
        path: path.display().to_string(),
        reason: match e {
            SurfdiagError::InvalidInput(msg) => msg,
            other => other.to_string(),
        },
    })
}

/// 查询给定温度下的校正值（加载 + 插值一步到位）
pub fn temperature_correction(path: &Path, temperature: f64) -> Result<f64> {
    load_table(path)?.correction_at(temperature)
}

fn parse_row(line: &str) -> Option<(f64, f64)> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 2 {
        return None;
    }
    match (fields[0].parse::<f64>(), fields[1].parse::<f64>()) {
        (Ok(t), Ok(v)) => Some((t, v)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn reference_table() -> PathBuf {
        PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/data/H2O.dat"))
    }

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("surfdiag-{}-{}", std::process::id(), name));
        let mut f = File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_reference_calibration_value() {
        let y = temperature_correction(&reference_table(), 100.0).unwrap();
        assert!((y - 0.006078349650349607).abs() < 1e-9);
    }

    #[test]
    fn test_reference_table_interpolates() {
        let table = load_table(&reference_table()).unwrap();
        let (t_min, t_max) = table.temperature_range();
        // 表中点插值应落在相邻行值之间（表单调递增）
        let mid = (t_min + t_max) / 2.0;
        let v = table.correction_at(mid).unwrap();
        let v_lo = table.correction_at(t_min).unwrap();
        let v_hi = table.correction_at(t_max).unwrap();
        assert!(v > v_lo && v < v_hi);
    }

    #[test]
    fn test_header_lines_skipped() {
        let path = write_temp(
            "header.dat",
            "# comment\nT value\n100 0.5\n200 0.75\n",
        );
        let table = load_table(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.correction_at(100.0).unwrap(), 0.5);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_malformed_data_row_rejected() {
        let path = write_temp("malformed.dat", "100 0.5\nnot a number\n");
        assert!(matches!(
            load_table(&path),
            Err(SurfdiagError::ParseError { .. })
        ));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_wrong_column_count_rejected() {
        let path = write_temp("columns.dat", "100 0.5\n200 0.75 extra\n");
        assert!(matches!(
            load_table(&path),
            Err(SurfdiagError::ParseError { .. })
        ));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_empty_file_rejected() {
        let path = write_temp("empty.dat", "# only comments\n\n");
        assert!(matches!(
            load_table(&path),
            Err(SurfdiagError::ParseError { .. })
        ));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_out_of_range_temperature_rejected() {
        assert!(matches!(
            temperature_correction(&reference_table(), 1.0),
            Err(SurfdiagError::Domain(_))
        ));
    }
}
