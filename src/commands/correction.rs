//! # correction 子命令实现
//!
//! 加载热化学校正表并在给定温度插值查询。
//!
//! ## 依赖关系
//! - 使用 `cli/correction.rs` 定义的参数
//! - 使用 `parsers/thermo_table.rs`
//! - 使用 `utils/output.rs`

use crate::cli::correction::CorrectionArgs;
use crate::error::Result;
use crate::parsers::thermo_table;
use crate::utils::output;

/// 执行校正表查询
pub fn execute(args: CorrectionArgs) -> Result<()> {
    output::print_header("Thermochemical Correction Lookup");

    let table = thermo_table::load_table(&args.table)?;
    let (t_min, t_max) = table.temperature_range();
    output::print_info(&format!(
        "Table '{}': {} rows, {:.1} K - {:.1} K",
        args.table.display(),
        table.len(),
        t_min,
        t_max
    ));

    let value = table.correction_at(args.temperature)?;
    output::print_success(&format!(
        "Correction at {} K: {:.12} eV",
        args.temperature, value
    ));

    Ok(())
}
