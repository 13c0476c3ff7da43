pub const DEFAULT_SYSTEM_NAME: &str = "System Stats";
pub const DEFAULT_TIMEFRAME_MINUTES: u64 = 30;

/// Resolved run parameters. There is no config file; both values come from
/// CLI flags or interactive prompts.
#[derive(Clone, Debug)]
pub struct RunConfig {
    pub system_name: String,
    pub timeframe_minutes: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            system_name: DEFAULT_SYSTEM_NAME.to_string(),
            timeframe_minutes: DEFAULT_TIMEFRAME_MINUTES,
        }
    }
}

/// Empty or non-integer input falls back silently to the default.
pub fn parse_timeframe(input: &str) -> u64 {
    input.trim().parse().unwrap_or(DEFAULT_TIMEFRAME_MINUTES)
}

/// Whole seconds for a timeframe; `None` when the multiply would overflow.
pub fn timeframe_seconds(minutes: u64) -> Option<u64> {
    minutes.checked_mul(60)
}

/// Empty input falls back to the default label.
pub fn parse_system_name(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        DEFAULT_SYSTEM_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = RunConfig::default();
        assert_eq!(config.system_name, "System Stats");
        assert_eq!(config.timeframe_minutes, 30);
    }

    #[test]
    fn timeframe_parses_valid_integers() {
        assert_eq!(parse_timeframe("5"), 5);
        assert_eq!(parse_timeframe(" 1 "), 1);
        assert_eq!(parse_timeframe("0"), 0);
    }

    #[test]
    fn timeframe_falls_back_on_garbage() {
        assert_eq!(parse_timeframe("abc"), 30);
        assert_eq!(parse_timeframe(""), 30);
        assert_eq!(parse_timeframe("-3"), 30);
        assert_eq!(parse_timeframe("1.5"), 30);
    }

    #[test]
    fn timeframe_seconds_guards_overflow() {
        assert_eq!(timeframe_seconds(30), Some(1800));
        assert_eq!(timeframe_seconds(0), Some(0));
        assert_eq!(timeframe_seconds(u64::MAX), None);
        assert_eq!(timeframe_seconds(u64::MAX / 60 + 1), None);
    }

    #[test]
    fn system_name_defaults_when_blank() {
        assert_eq!(parse_system_name(""), "System Stats");
        assert_eq!(parse_system_name("   "), "System Stats");
        assert_eq!(parse_system_name(" web-01 "), "web-01");
    }
}
