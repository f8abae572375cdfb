//! Display formatting helpers shared by the TUI and CLI.

use chrono::{DateTime, Local};

/// Format an uptime in seconds as `XhYmZs`, omitting leading zero units.
///
/// 3725 seconds renders as "1h 2m 5s", 125 as "2m 5s", 42 as "42s".
pub fn format_uptime(seconds: f64) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total = seconds.max(0.0).floor() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}

/// Format a duration in milliseconds as seconds to two decimal places.
#[allow(clippy::cast_precision_loss)]
pub fn format_millis(ms: u64) -> String {
    format!("{:.2}s", ms as f64 / 1000.0)
}

/// Format a float duration in milliseconds as seconds to two decimals.
pub fn format_millis_f64(ms: f64) -> String {
    format!("{:.2}s", ms / 1000.0)
}

/// Format a timestamp as a 12-hour clock time ("02:05 PM").
pub fn format_clock(timestamp: DateTime<Local>) -> String {
    timestamp.format("%I:%M %p").to_string()
}

/// Join an agent chain with arrows ("router → research").
pub fn format_agent_chain(chain: &[String]) -> String {
    chain.join(" → ")
}
