//! Presentation of averages and the active grade scale.

use anyhow::Result;
use tracing::{debug, info};

use crate::analyzers::scale::GradeScale;
use crate::analyzers::types::AverageResult;

/// Logs both averages at info level.
pub fn print_pretty(result: &AverageResult) {
    debug!("{:#?}", result);
    info!("Your average on the 12-point scale is {:.3}", result.twelve_point);
    info!("Your average on the 4.0 scale is {:.3}", result.four_point);
}

/// Prints the averages as pretty JSON on stdout.
pub fn print_json(result: &AverageResult) -> Result<()> {
    println!("{}", render_json(result)?);
    Ok(())
}

fn render_json(result: &AverageResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Prints the conversion table, highest grade first.
pub fn print_scale(scale: &GradeScale) {
    println!("{}", render_scale(scale));
}

fn render_scale(scale: &GradeScale) -> String {
    let mut out = format!("{:<6}{:>6}{:>6}", "Grade", "12pt", "4pt");
    for (token, points) in scale.iter() {
        out.push_str(&format!(
            "\n{:<6}{:>6}{:>6.1}",
            token, points.twelve_point, points.four_point
        ));
    }
    out
}
