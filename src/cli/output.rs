use std::str::FromStr;

use clap::ValueEnum;
use console::style;
use serde::Serialize;

use crate::error::{EsError, Result};

/// How command results are rendered on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Styled, human-readable text
    #[default]
    Human,
    /// Pretty-printed JSON document
    Json,
    /// One JSON object per line
    Jsonl,
    /// Tab-separated rows without a header
    Plain,
    /// Tab-separated rows with a header
    Tsv,
}

impl OutputFormat {
    #[must_use]
    pub const fn is_machine(self) -> bool {
        !matches!(self, Self::Human)
    }
}

impl FromStr for OutputFormat {
    type Err = EsError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "human" | "text" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            "jsonl" | "ndjson" => Ok(Self::Jsonl),
            "plain" => Ok(Self::Plain),
            "tsv" => Ok(Self::Tsv),
            _ => Err(EsError::Config(format!(
                "invalid output format {value} (expected human|json|jsonl|plain|tsv)"
            ))),
        }
    }
}

/// Anything that can render itself in every output format.
pub trait Formattable {
    fn format(&self, fmt: OutputFormat) -> String;
}

#[derive(Serialize)]
struct RobotError<'a> {
    error: bool,
    code: &'a str,
    message: String,
}

/// Render an error as the single-line JSON object robot consumers parse.
#[must_use]
pub fn robot_error_line(err: &EsError) -> String {
    let payload = RobotError {
        error: true,
        code: err.code(),
        message: err.to_string(),
    };
    serde_json::to_string(&payload).unwrap_or_default()
}

pub fn emit_json<T: Serialize>(value: &T) -> Result<()> {
    let payload = serde_json::to_string_pretty(value)?;
    println!("{payload}");
    Ok(())
}

pub fn emit(value: &impl Formattable, fmt: OutputFormat) {
    let rendered = value.format(fmt);
    if !rendered.is_empty() {
        println!("{rendered}");
    }
}

pub struct HumanLayout {
    lines: Vec<String>,
    key_width: usize,
    color: bool,
}

impl Default for HumanLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanLayout {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
            key_width: 14,
            color: true,
        }
    }

    #[must_use]
    pub const fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn title(&mut self, text: &str) -> &mut Self {
        let line = if self.color {
            style(text).bold().to_string()
        } else {
            text.to_string()
        };
        self.lines.push(line);
        self.lines.push(String::new());
        self
    }

    pub fn kv(&mut self, key: &str, value: &str) -> &mut Self {
        let width = self.key_width;
        let key = format!("{key:width$}");
        let key = if self.color {
            style(key).dim().to_string()
        } else {
            key
        };
        self.lines.push(format!("{key} {value}"));
        self
    }

    pub fn bullet(&mut self, text: &str) -> &mut Self {
        self.lines.push(format!("- {text}"));
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    pub fn push_line(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    #[must_use]
    pub fn build(self) -> String {
        self.lines.join("\n")
    }
}
