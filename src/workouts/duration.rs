//! Duration parsing and formatting.
//!
//! Every parser here degrades to zero on malformed input: a frozen timer
//! display is preferable to an aborted session.

/// Format seconds as `MM:SS` for countdown timers.
///
/// Minutes are not wrapped into hours, so 3600 seconds renders as `60:00`.
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Format seconds as `H:MM:SS` when at least an hour, otherwise `MM:SS`.
pub fn format_elapsed(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

/// Parse `HH:MM:SS`, `MM:SS` or a bare number of seconds.
///
/// Returns 0 if any component is not a non-negative integer.
pub fn parse_duration_to_seconds(duration: &str) -> u32 {
    let parts: Option<Vec<u32>> = duration
        .trim()
        .split(':')
        .map(|part| part.trim().parse::<u32>().ok())
        .collect();

    let Some(parts) = parts else {
        return 0;
    };

    match parts.as_slice() {
        [h, m, s] => h
            .saturating_mul(3600)
            .saturating_add(m.saturating_mul(60))
            .saturating_add(*s),
        [m, s] => m.saturating_mul(60).saturating_add(*s),
        [s] => *s,
        _ => 0,
    }
}

/// Format seconds back into the `HH:MM:SS` form used by step editors.
pub fn seconds_to_duration_string(seconds: u32) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}

/// Parse a rest selector value such as `"60s"`, `"90"`, `"2min"` or `"OFF"`.
pub fn parse_rest_to_seconds(rest: &str) -> u32 {
    let rest = rest.trim();
    if rest.is_empty() || rest.eq_ignore_ascii_case("off") {
        return 0;
    }

    if let Some(minutes) = rest.strip_suffix("min") {
        return minutes.trim().parse::<u32>().map_or(0, |m| m.saturating_mul(60));
    }

    rest.strip_suffix('s')
        .unwrap_or(rest)
        .trim()
        .parse::<u32>()
        .unwrap_or(0)
}

/// Render a rest value the way the rest selector labels it.
pub fn format_rest(seconds: u32) -> String {
    match seconds {
        0 => "OFF".to_string(),
        s if s >= 60 && s % 60 == 0 => format!("{}min", s / 60),
        s => format!("{}s", s),
    }
}

/// Compact human duration for summary panels: `1h 5min`, `2min 30s`, `45s`.
pub fn format_compact(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}h {}min", hours, minutes)
    } else if minutes > 0 {
        if secs > 0 {
            format!("{}min {}s", minutes, secs)
        } else {
            format!("{}min", minutes)
        }
    } else {
        format!("{}s", secs)
    }
}

/// Label for a step length on execution cards: `5min`, `1min 30s`, `45s`.
pub fn format_duration_label(seconds: u32) -> String {
    if seconds >= 60 {
        let minutes = seconds / 60;
        let secs = seconds % 60;
        if secs > 0 {
            format!("{}min {}s", minutes, secs)
        } else {
            format!("{}min", minutes)
        }
    } else {
        format!("{}s", seconds)
    }
}
