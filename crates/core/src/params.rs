//! Codec and combine parameters.
//!
//! Contains `CodecOptions` for controlling box file emission and
//! `CombineSymbols` for the character classes used when combining boxes.

use regex::Regex;

use crate::error::{BoxError, Result};

/// Line terminator written after each box line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// The host platform's terminator (`\r\n` on Windows, `\n` elsewhere).
    #[default]
    Native,
    Lf,
    CrLf,
}

impl LineEnding {
    pub const fn as_str(self) -> &'static str {
        match self {
            LineEnding::Native => {
                if cfg!(windows) {
                    "\r\n"
                } else {
                    "\n"
                }
            }
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Options for writing box files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodecOptions {
    pub line_ending: LineEnding,
}

impl CodecOptions {
    pub const fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }
}

/// Character classes that decide when neighbouring boxes are combined.
///
/// A box whose whole text is one character of the appending class is merged
/// into the box before it (a combining mark following its base). A box
/// whose whole text is one character of the prepending class absorbs the
/// box after it. Each class is given as the body of a regex character
/// class, e.g. `\x{0300}-\x{036F}`.
#[derive(Debug, Clone, Default)]
pub struct CombineSymbols {
    appending: Option<Regex>,
    prepending: Option<Regex>,
}

impl CombineSymbols {
    /// Compiles both classes. A blank class disables that side.
    pub fn new(appending: &str, prepending: &str) -> Result<Self> {
        Ok(Self {
            appending: compile_class(appending)?,
            prepending: compile_class(prepending)?,
        })
    }

    /// Parses the editor's single-setting form `"<appending>;<prepending>"`.
    /// Either part may be missing.
    pub fn parse(setting: &str) -> Result<Self> {
        let mut parts = setting.split(';');
        let appending = parts.next().unwrap_or("");
        let prepending = parts.next().unwrap_or("");
        Self::new(appending, prepending)
    }

    /// Returns true if `text` is exactly one appending symbol.
    pub fn is_appending(&self, text: &str) -> bool {
        self.appending.as_ref().is_some_and(|re| re.is_match(text))
    }

    /// Returns true if `text` is exactly one prepending symbol.
    pub fn is_prepending(&self, text: &str) -> bool {
        self.prepending.as_ref().is_some_and(|re| re.is_match(text))
    }

    /// Returns true when neither class is configured.
    pub fn is_empty(&self) -> bool {
        self.appending.is_none() && self.prepending.is_none()
    }
}

fn compile_class(class: &str) -> Result<Option<Regex>> {
    if class.trim().is_empty() {
        return Ok(None);
    }
    Regex::new(&format!("^[{class}]$"))
        .map(Some)
        .map_err(|source| BoxError::InvalidSymbols {
            symbols: class.to_string(),
            source,
        })
}
