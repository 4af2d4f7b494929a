/// A reset period the allowance module UI offers, `value` in days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetTimeOption {
    pub label: &'static str,
    pub value: u32,
}

pub const RESET_TIME_OPTIONS: [ResetTimeOption; 3] = [
    ResetTimeOption { label: "1 day", value: 1 },
    ResetTimeOption { label: "1 week", value: 7 },
    ResetTimeOption { label: "1 month", value: 30 },
];

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Display label for a reset period given in minutes.
///
/// Only whole-day periods that appear in [`RESET_TIME_OPTIONS`] have a label;
/// anything else yields an empty string.
pub fn reset_time_label(reset_time_min: u32) -> &'static str {
    if reset_time_min % MINUTES_PER_DAY != 0 {
        return "";
    }
    let days = reset_time_min / MINUTES_PER_DAY;

    RESET_TIME_OPTIONS
        .iter()
        .find(|option| option.value == days)
        .map(|option| option.label)
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_periods() {
        assert_eq!(reset_time_label(1440), "1 day");
        assert_eq!(reset_time_label(1440), RESET_TIME_OPTIONS[0].label);
        assert_eq!(reset_time_label(7 * 1440), "1 week");
        assert_eq!(reset_time_label(30 * 1440), "1 month");
    }

    #[test]
    fn test_unmapped_periods_are_empty() {
        assert_eq!(reset_time_label(37), "");
        assert_eq!(reset_time_label(0), "");
        assert_eq!(reset_time_label(2 * 1440), "");
        assert_eq!(reset_time_label(1440 + 1), "");
    }
}
