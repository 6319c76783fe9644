//! Small formatting helpers

/// Format a second count as MM:SS
pub fn format_mm_ss(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Mask a secret for display, one bullet per character
pub fn mask(value: &str) -> String {
    "•".repeat(value.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_mm_ss() {
        assert_eq!(format_mm_ss(0), "00:00");
        assert_eq!(format_mm_ss(30), "00:30");
        assert_eq!(format_mm_ss(60), "01:00");
        assert_eq!(format_mm_ss(125), "02:05");
    }

    #[test]
    fn test_mask() {
        assert_eq!(mask(""), "");
        assert_eq!(mask("12345"), "•••••");
    }
}
