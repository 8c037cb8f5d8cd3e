//! Writes run results as YAML documents to a caller supplied sink.
use crate::gradient_descent::RunResult;
use crate::objective::Point;
use std::io::Write;

/// Appends one YAML document describing `result` to `out`.
pub fn write_report<W>(
    out: &mut W,
    name: &str,
    start: &Point,
    result: &RunResult,
) -> std::io::Result<()>
where
    W: Write + ?Sized,
{
    writeln!(out, "---")?;
    writeln!(out, "function: {}", name)?;
    writeln!(out, "start: [{:?}, {:?}]", start.x, start.y)?;
    writeln!(out, "x: {:?}", result.x())?;
    writeln!(out, "y: {:?}", result.y())?;
    writeln!(out, "iterations: {}", result.iterations)?;
    writeln!(out, "converged: {}", result.converged())?;
    out.flush()
}
