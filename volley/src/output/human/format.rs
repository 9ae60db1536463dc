use std::time::Duration;

pub(crate) fn format_rate(v: f64) -> String {
    if v.is_finite() {
        format!("{v:.2}")
    } else {
        "0".to_string()
    }
}

pub(crate) fn format_ms(v: f64) -> String {
    if !v.is_finite() {
        return "0ms".to_string();
    }
    if v >= 1000.0 {
        return format!("{:.2}s", v / 1000.0);
    }
    format!("{v:.2}ms")
}

pub(crate) fn format_percent(fraction: f64) -> String {
    if fraction.is_finite() {
        format!("{:.2}%", fraction * 100.0)
    } else {
        "0.00%".to_string()
    }
}

pub(crate) fn format_duration(d: Duration) -> String {
    // Always render as a single rounded component in one of: ms, s.
    // This keeps the output short and consistent for progress lines.

    let total_ms = d.as_millis();

    if total_ms >= 1_000 {
        return format!("{}s", (total_ms + 500) / 1_000);
    }

    format!("{total_ms}ms")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_ms_switches_units_at_one_second() {
        assert_eq!(format_ms(0.0), "0.00ms");
        assert_eq!(format_ms(12.345), "12.35ms");
        assert_eq!(format_ms(1500.0), "1.50s");
    }

    #[test]
    fn format_duration_rounds_to_single_unit() {
        assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
        assert_eq!(format_duration(Duration::from_millis(1499)), "1s");
        assert_eq!(format_duration(Duration::from_secs(10)), "10s");
    }

    #[test]
    fn format_percent_renders_fraction() {
        assert_eq!(format_percent(0.9967), "99.67%");
        assert_eq!(format_percent(0.0), "0.00%");
    }
}
