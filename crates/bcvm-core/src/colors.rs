//! Terminal palette shared by dumps, traces and diagnostics.
//!
//! Colors are named by what they mark in bcvm output, not by hue:
//! - `symbol`: labels, function names, section headings
//! - `value`: literal operands, pushed words, program output
//! - `meta`: addresses, stack pointers, header words, comments

use std::fmt::Display;

/// Escape sequences for each role. Empty strings when color is off, so
/// callers can interpolate them unconditionally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Colors {
    pub symbol: &'static str,
    pub value: &'static str,
    pub meta: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    /// Blue symbols, green values, dim metadata.
    pub const ON: Self = Self {
        symbol: "\x1b[34m",
        value: "\x1b[32m",
        meta: "\x1b[2m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        symbol: "",
        value: "",
        meta: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    /// `text` wrapped in `role` and a reset.
    pub fn paint(&self, role: &str, text: impl Display) -> String {
        if role.is_empty() {
            return text.to_string();
        }
        format!("{role}{text}{}", self.reset)
    }
}
