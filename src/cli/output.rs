//! CLI output formatting

use crate::{core::ExecutionStatus, execution::ExecutionEvent};
use console::Emoji;
use std::path::PathBuf;
use std::time::Duration;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static SPINNER: Emoji<'_, '_> = Emoji("⏳ ", "~ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "!");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");

const DEFAULT_WIDTH: usize = 80;

/// Program banner printed before a run
pub fn banner() -> String {
    format!("\n{}\n", style("Apiline").magenta().bold())
}

/// Horizontal rule spanning the terminal
pub fn separator() -> String {
    let width = term_size::dimensions()
        .map(|(width, _)| width)
        .filter(|width| *width > 0)
        .unwrap_or(DEFAULT_WIDTH);
    style("─".repeat(width)).dim().to_string()
}

/// The list of files about to run
pub fn format_file_list(files: &[PathBuf]) -> String {
    let mut out = format!("{} Files to execute:", INFO);
    for file in files {
        out.push_str(&format!("\n  {}", style(file.display()).cyan()));
    }
    out
}

/// Format an execution status for display
pub fn format_status(status: ExecutionStatus) -> String {
    match status {
        ExecutionStatus::Pending => style("PENDING").dim().to_string(),
        ExecutionStatus::Running => style("RUNNING").yellow().to_string(),
        ExecutionStatus::Completed => style("COMPLETED").green().to_string(),
        ExecutionStatus::Failed => style("FAILED").red().to_string(),
    }
}

/// Format an execution event for display
pub fn format_execution_event(event: &ExecutionEvent) -> String {
    match event {
        ExecutionEvent::PipelineStarted {
            execution_id,
            description,
            total_actions,
        } => {
            let name = if description.is_empty() {
                "pipeline"
            } else {
                description.as_str()
            };
            format!(
                "{} Starting {} ({} actions, {})",
                ROCKET,
                style(name).bold(),
                total_actions,
                style(&execution_id.to_string()[..8]).dim()
            )
        }
        ExecutionEvent::ActionStarted { position, label, .. } => {
            format!("{} #{} {}", SPINNER, position, style(label).cyan())
        }
        ExecutionEvent::EndpointResolved { url, .. } => {
            format!("   {} {}", style("URL:").dim(), url)
        }
        ExecutionEvent::RequestBody { body, .. } => {
            format!("   {}\n{}", style("Request:").dim(), indent(&body.to_pretty_string()))
        }
        ExecutionEvent::StatusReceived {
            status, expected, ..
        } => {
            let status = if status == expected {
                style(status).green()
            } else {
                style(status).red()
            };
            format!("   {} {}", style("Status:").dim(), status)
        }
        ExecutionEvent::ResponseBody { text, .. } => {
            if text.is_empty() {
                format!("   {} {}", style("Response:").dim(), style("empty").dim())
            } else {
                format!("   {}\n{}", style("Response:").dim(), indent(text))
            }
        }
        ExecutionEvent::VariableSet { name, value, .. } => format!(
            "   {} {} = {}",
            style("Set").dim(),
            style(name).cyan(),
            value
        ),
        ExecutionEvent::AssertionPassed { path, value, .. } => {
            format!("   {}{} == {}", CHECK, style(path).green(), value)
        }
        ExecutionEvent::ActionCompleted { position, status } => format!(
            "{} #{} {}",
            CHECK,
            position,
            style(format!("passed ({})", status)).green()
        ),
        ExecutionEvent::ActionFailed {
            position,
            phase,
            error,
        } => format!(
            "{} #{} failed during {}: {}",
            CROSS,
            position,
            phase,
            style(error).red()
        ),
        ExecutionEvent::PipelineCompleted {
            execution_id,
            status,
            completed_actions,
            total_actions,
            duration,
        } => {
            let elapsed = duration.map(format_duration).unwrap_or_default();
            format!(
                "{} Pipeline ({}) {} - {}/{} actions {}",
                INFO,
                style(&execution_id.to_string()[..8]).dim(),
                format_status(*status),
                completed_actions,
                total_actions,
                style(elapsed).dim()
            )
        }
    }
}

/// Human duration: milliseconds below a second
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs == 0 {
        format!("{}ms", duration.as_millis())
    } else if secs < 60 {
        format!("{}.{:01}s", secs, duration.subsec_millis() / 100)
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("     {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}
