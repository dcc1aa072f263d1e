/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Running rounds in green, idle groups in grey.
pub fn color_for_running(is_running: bool) -> &'static str {
    if is_running { GREEN } else { GREY }
}

/// Greys out the "nothing recorded" sentinels.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "Never" || value.trim() == "00:00:00" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
