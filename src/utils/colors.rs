/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Grey out empty descriptions, leave everything else untouched.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() {
        format!("{GREY}--{RESET}")
    } else {
        value.to_string()
    }
}

/// Zero earnings are shown grey, positive earnings green.
pub fn colorize_earnings(value: f64, currency: &str) -> String {
    if value > 0.0 {
        format!("{GREEN}{value:.2}{currency}{RESET}")
    } else {
        format!("{GREY}{value:.2}{currency}{RESET}")
    }
}
