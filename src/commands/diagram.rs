//! # diagram 子命令实现
//!
//! 从相记录 CSV 计算表面相图并导出网格数据。
//!
//! ## 功能
//! - 支持单文件和批量目录处理
//! - 并行计算（rayon）
//! - 可选热化学温度校正（并入 y 物种的化学势平移）
//! - 终端打印各相稳定区占比汇总表
//! - 导出长表 CSV 供绘图端使用
//!
//! ## 依赖关系
//! - 使用 `cli/diagram.rs` 定义的 DiagramArgs
//! - 使用 `batch/` 模块进行批量处理
//! - 使用 `thermo/` 模块进行计算
//! - 使用 `parsers/` 读取相记录与校正表

use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::cli::diagram::{parse_axis_range, DiagramArgs};
use crate::error::{Result, SurfdiagError};
use crate::models::{AxisSpec, BulkReference, ChemicalPotentialAxis, DiagramResult};
use crate::parsers::{phases, thermo_table};
use crate::thermo::{self, DiagramCalculator};
use crate::utils::{output, progress};

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tabled::{Table, Tabled};

/// 汇总表行
#[derive(Debug, Tabled)]
struct PhaseRow {
    #[tabled(rename = "Index")]
    index: usize,
    #[tabled(rename = "Phase")]
    label: String,
    #[tabled(rename = "Stable share")]
    share: String,
    #[tabled(rename = "Min SE (eV/Å²)")]
    min_se: String,
}

/// 执行相图计算
pub fn execute(args: DiagramArgs) -> Result<()> {
    output::print_header("Surface Phase Stability Diagram");

    if args.input.is_file() {
        execute_single_file(&args)
    } else if args.input.is_dir() {
        execute_batch(&args)
    } else {
        Err(SurfdiagError::FileNotFound {
            path: args.input.display().to_string(),
        })
    }
}

/// 从参数组装一次计算的共享设置
struct DiagramSetup {
    bulk: BulkReference,
    x: ChemicalPotentialAxis,
    y: ChemicalPotentialAxis,
    calculator: DiagramCalculator,
}

impl DiagramSetup {
    fn from_args(args: &DiagramArgs) -> Result<Self> {
        let bulk = BulkReference::new(
            args.bulk_cation,
            args.bulk_anion,
            args.bulk_energy,
            args.bulk_funits,
        );

        let (x_start, x_stop) =
            parse_axis_range(&args.x_range).map_err(SurfdiagError::InvalidRange)?;
        let (y_start, y_stop) =
            parse_axis_range(&args.y_range).map_err(SurfdiagError::InvalidRange)?;

        let x = ChemicalPotentialAxis::from_spec(&AxisSpec {
            label: args.x_label.clone(),
            start: x_start,
            stop: x_stop,
            step: args.step,
        })?;
        let y = ChemicalPotentialAxis::from_spec(&AxisSpec {
            label: args.y_label.clone(),
            start: y_start,
            stop: y_stop,
            step: args.step,
        })?;

        // 温度校正并入 y 物种的化学势原点平移
        let mut y_shift = args.y_shift;
        if let (Some(table_path), Some(temperature)) = (&args.correction_table, args.temperature) {
            let correction = thermo_table::temperature_correction(table_path, temperature)?;
            output::print_info(&format!(
                "Thermochemical correction at {} K: {:.9} eV (added to y shift)",
                temperature, correction
            ));
            y_shift += correction;
        }

        let calculator = DiagramCalculator::new(args.normalisation.to_scheme())
            .with_shifts(args.x_shift, y_shift);

        Ok(DiagramSetup {
            bulk,
            x,
            y,
            calculator,
        })
    }

    fn evaluate(&self, input: &Path) -> Result<DiagramResult> {
        let phase_list = phases::load_phases(input)?;
        self.calculator
            .evaluate(&phase_list, &self.bulk, &self.x, &self.y)
    }
}

/// 单文件模式
fn execute_single_file(args: &DiagramArgs) -> Result<()> {
    output::print_info(&format!("Single file mode: '{}'", args.input.display()));

    let setup = DiagramSetup::from_args(args)?;
    output::print_info(&format!(
        "Grid: {} x {} points, step {} eV ({} vs {})",
        setup.x.len(),
        setup.y.len(),
        args.step,
        setup.x.label,
        setup.y.label
    ));
    output::print_info(&format!("Normalisation: {}", args.normalisation));

    let spinner = progress::create_spinner("Evaluating phase stability grid...");
    let evaluated = setup.evaluate(&args.input);
    spinner.finish_and_clear();
    let result = evaluated?;

    print_summary(&result);

    thermo::export::to_csv(&result, &args.output)?;
    output::print_success(&format!(
        "Diagram data saved to '{}'",
        args.output.display()
    ));

    Ok(())
}

/// 打印各相稳定区占比汇总表
fn print_summary(result: &DiagramResult) {
    let shares = result.stability_shares();
    let minima = result.minimum_energies();

    let rows: Vec<PhaseRow> = result
        .labels
        .iter()
        .enumerate()
        .map(|(i, label)| PhaseRow {
            index: i,
            label: label.clone(),
            share: format!("{:.1}%", shares[i] * 100.0),
            min_se: match minima[i] {
                Some(se) => format!("{:.6}", se),
                None => "-".to_string(),
            },
        })
        .collect();

    println!("{}", Table::new(&rows));

    let stable_count = shares.iter().filter(|&&s| s > 0.0).count();
    output::print_info(&format!(
        "{} of {} phases appear on the diagram",
        stable_count,
        result.labels.len()
    ));

    // 绘图端需要的离散色带边界与色标刻度
    output::print_info(&format!(
        "Contour levels: {:?}, colourbar ticks: {:?}",
        thermo::get_levels(&result.phase_id),
        thermo::get_ticks(&result.phase_id)
    ));
}

/// 批量处理模式
fn execute_batch(args: &DiagramArgs) -> Result<()> {
    output::print_info(&format!("Batch mode: directory '{}'", args.input.display()));

    let collector = FileCollector::new(args.input.clone())
        .with_pattern(&args.pattern)
        .recursive(args.recursive);

    let files = collector.collect();

    if files.is_empty() {
        output::print_warning(&format!(
            "No matching files found with pattern '{}'",
            args.pattern
        ));
        return Ok(());
    }

    output::print_info(&format!("Found {} phase record files", files.len()));

    fs::create_dir_all(&args.output).map_err(|e| SurfdiagError::FileWriteError {
        path: args.output.display().to_string(),
        source: e,
    })?;

    // 轴/体相/校正只解析一次，所有文件共享
    let setup = Arc::new(DiagramSetup::from_args(args)?);
    let output_dir = args.output.clone();
    let overwrite = args.overwrite;

    let runner = BatchRunner::new(args.jobs);
    let result = runner.run(files, |file| {
        process_batch_file(file, &setup, &output_dir, overwrite)
    });

    output::print_separator();
    output::print_success(&format!(
        "Batch complete: {} success, {} skipped, {} failed",
        result.success, result.skipped, result.failed
    ));

    if !result.failures.is_empty() {
        output::print_warning("Failed files:");
        for (path, err) in result.failures.iter().take(10) {
            output::print_error(&format!("  {}: {}", path, err));
        }
        if result.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
        }
    }

    Ok(())
}

/// 处理批量模式下的单个文件
fn process_batch_file(
    file: &PathBuf,
    setup: &DiagramSetup,
    output_dir: &Path,
    overwrite: bool,
) -> ProcessResult {
    let stem = file
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("diagram");
    let output_path = output_dir.join(format!("{}_diagram.csv", stem));

    if output_path.exists() && !overwrite {
        return ProcessResult::Skipped(format!(
            "'{}' exists (use --overwrite)",
            output_path.display()
        ));
    }

    let result = match setup.evaluate(file) {
        Ok(r) => r,
        Err(e) => return ProcessResult::Failed(file.display().to_string(), e.to_string()),
    };

    if let Err(e) = thermo::export::to_csv(&result, &output_path) {
        return ProcessResult::Failed(file.display().to_string(), e.to_string());
    }

    ProcessResult::Success(format!("'{}'", output_path.display()))
}
