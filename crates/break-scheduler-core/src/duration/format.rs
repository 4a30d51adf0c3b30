/// Render seconds as editable duration text, e.g. `"1h 2m 3s"`.
///
/// Zero components are omitted; zero itself is `"0s"`. The output always
/// parses back to the same value.
pub fn format_duration_text(seconds: u64) -> String {
    if seconds == 0 {
        return "0s".into();
    }

    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    let mut parts = Vec::with_capacity(3);
    if hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if minutes > 0 {
        parts.push(format!("{minutes}m"));
    }
    if secs > 0 {
        parts.push(format!("{secs}s"));
    }
    parts.join(" ")
}

/// Countdown face: `MM:SS`, or `HH:MM:SS` once an hour or more remains.
pub fn format_clock(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_omits_zero_components() {
        assert_eq!(format_duration_text(0), "0s");
        assert_eq!(format_duration_text(3723), "1h 2m 3s");
        assert_eq!(format_duration_text(3600), "1h");
        assert_eq!(format_duration_text(90), "1m 30s");
        assert_eq!(format_duration_text(1440), "24m");
        assert_eq!(format_duration_text(3601), "1h 1s");
    }

    #[test]
    fn clock_switches_to_hours() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(1440), "24:00");
        assert_eq!(format_clock(3599), "59:59");
        assert_eq!(format_clock(3600), "01:00:00");
        assert_eq!(format_clock(3723), "01:02:03");
    }
}
