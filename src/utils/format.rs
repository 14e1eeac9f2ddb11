//! Display helpers for countdowns

/// Format a number of seconds as zero-padded `MM:SS`; minutes are not capped
pub fn format_time(total_seconds: u64) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

/// Render a progress percentage as a fixed-width text bar
pub fn format_progress(percent: f64, width: usize) -> String {
    let clamped = percent.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled.min(width)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(59), "00:59");
        assert_eq!(format_time(25 * 60), "25:00");
        assert_eq!(format_time(6000), "100:00");
    }

    #[test]
    fn test_format_progress() {
        assert_eq!(format_progress(0.0, 4), "[----]");
        assert_eq!(format_progress(50.0, 4), "[##--]");
        assert_eq!(format_progress(250.0, 4), "[####]");
    }
}
