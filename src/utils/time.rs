//! Time formatting utilities

/// Format seconds as a tool argument, e.g. `80`, `12.5`, `0.042`
pub fn format_seconds_arg(seconds: f64) -> String {
    let millis = (seconds * 1000.0).round() as i64;
    if millis % 1000 == 0 {
        return (millis / 1000).to_string();
    }
    let text = format!("{:.3}", millis as f64 / 1000.0);
    text.trim_end_matches('0').to_string()
}

/// Format seconds to HH:MM:SS.ms (hours omitted when zero)
pub fn format_clock(seconds: f64) -> String {
    let total_millis = (seconds.max(0.0) * 1000.0).round() as u64;
    let hours = total_millis / 3_600_000;
    let minutes = (total_millis % 3_600_000) / 60_000;
    let secs = (total_millis % 60_000) / 1000;
    let milliseconds = total_millis % 1000;

    if hours > 0 {
        format!(
            "{:02}:{:02}:{:02}.{:03}",
            hours, minutes, secs, milliseconds
        )
    } else {
        format!("{:02}:{:02}.{:03}", minutes, secs, milliseconds)
    }
}
