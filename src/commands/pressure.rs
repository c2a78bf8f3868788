//! # pressure 子命令实现
//!
//! 按理想气体关系把一段化学势换算成分压表并打印。
//!
//! ## 依赖关系
//! - 使用 `cli/pressure.rs` 定义的参数
//! - 使用 `cli/diagram.rs` 的范围解析
//! - 使用 `thermo/energy.rs` 的 pressure
//! - 使用 `utils/output.rs`

use crate::cli::diagram::parse_axis_range;
use crate::cli::pressure::PressureArgs;
use crate::error::{Result, SurfdiagError};
use crate::models::{AxisSpec, ChemicalPotentialAxis};
use crate::thermo::energy;
use crate::utils::output;

use tabled::{Table, Tabled};

/// 换算表行
#[derive(Debug, Tabled)]
struct PressureRow {
    #[tabled(rename = "Δμ (eV)")]
    mu: String,
    #[tabled(rename = "P (bar)")]
    pressure: String,
}

/// 执行化学势 → 分压换算
pub fn execute(args: PressureArgs) -> Result<()> {
    output::print_header("Chemical Potential to Partial Pressure");

    let (start, stop) = parse_axis_range(&args.range).map_err(SurfdiagError::InvalidRange)?;
    let axis = ChemicalPotentialAxis::from_spec(&AxisSpec {
        label: "mu".to_string(),
        start,
        stop,
        step: args.step,
    })?;

    let pressures = energy::pressure(&axis.values, args.temperature)?;

    let rows: Vec<PressureRow> = axis
        .values
        .iter()
        .zip(&pressures)
        .map(|(mu, p)| PressureRow {
            mu: format!("{:.4}", mu),
            pressure: format!("{:.6e}", p),
        })
        .collect();

    println!("{}", Table::new(&rows));
    output::print_info(&format!(
        "Ideal gas relation at {} K, reference pressure {} bar",
        args.temperature,
        energy::REFERENCE_PRESSURE_BAR
    ));

    Ok(())
}
