use crate::domain::model::Assessment;
use colored::*;
use std::env;
use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub const NAMES: [&'static str; 3] = ["auto", "always", "never"];

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "always" => Some(Self::Always),
            "never" => Some(Self::Never),
            _ => None,
        }
    }

    /// Applies NO_COLOR, CLICOLOR and CLICOLOR_FORCE on top of an `Auto` choice.
    pub fn with_env_overrides(self) -> Self {
        if self != Self::Auto {
            return self;
        }
        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v == "1") {
            return Self::Always;
        }
        if env::var("NO_COLOR").is_ok() || env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return Self::Never;
        }
        self
    }

    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => detect_color_support(),
        }
    }
}

fn detect_color_support() -> bool {
    if env::var("TERM").is_ok_and(|term| term == "dumb") {
        return false;
    }
    std::io::stdout().is_terminal()
}

/// Terminal styling for report text. Favorable figures are green, unfavorable red.
#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    use_color: bool,
}

impl Formatter {
    pub fn new(mode: ColorMode) -> Self {
        let use_color = mode.with_env_overrides().should_use_color();
        colored::control::set_override(use_color);
        Self { use_color }
    }

    pub fn plain() -> Self {
        Self { use_color: false }
    }

    pub fn uses_color(&self) -> bool {
        self.use_color
    }

    pub fn assessed(&self, text: &str, assessment: Assessment) -> String {
        if !self.use_color {
            return text.to_string();
        }
        match assessment {
            Assessment::Favorable => text.green().to_string(),
            Assessment::Unfavorable => text.red().to_string(),
        }
    }

    pub fn header(&self, text: &str) -> String {
        if self.use_color {
            text.bright_yellow().bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn bold(&self, text: &str) -> String {
        if self.use_color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn dim(&self, text: &str) -> String {
        if self.use_color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}
