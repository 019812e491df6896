//! Decoding of dialog output into typed results
//!
//! zenity reports the user's choice through its exit status and stdout:
//! - exit 0: confirmed, stdout carries the value (if any)
//! - exit 1: cancelled or closed, stdout is meaningless
//! - anything else: failure (5 is a `--timeout` expiry)

use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

use crate::dialog::{DialogKind, ISO_DATE_FORMAT};
use crate::prelude::*;

pub const EXIT_CONFIRMED: i32 = 0;
pub const EXIT_CANCELLED: i32 = 1;

static RGB_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*([0-9]*\.?[0-9]+)\s*)?\)$")
        .expect("Invalid rgb pattern regex")
});

static HEX_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#([0-9a-fA-F]{6}|[0-9a-fA-F]{12})$").expect("Invalid hex colour regex")
});

/// Everything captured from a finished dialog process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Raw bytes: file names are passed through without re-encoding
    pub stdout: Vec<u8>,
    pub stderr: String,
    /// `None` when the process was killed by a signal
    pub code: Option<i32>,
}

impl ProcessOutput {
    pub fn new(stdout: impl Into<Vec<u8>>, code: Option<i32>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            code,
        }
    }

    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = stderr.into();
        self
    }

    /// stdout bytes without the single trailing newline zenity appends
    pub fn value_bytes(&self) -> &[u8] {
        let out = self.stdout.strip_suffix(b"\n").unwrap_or(self.stdout.as_slice());
        out.strip_suffix(b"\r").unwrap_or(out)
    }

    /// [`value_bytes`](Self::value_bytes) as text; fails on invalid UTF-8
    pub fn value(&self) -> Result<&str> {
        std::str::from_utf8(self.value_bytes())
            .map_err(|e| Error::protocol(format!("dialog output is not valid UTF-8: {}", e)))
    }

    /// stdout for display and logging
    pub fn stdout_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }
}

/// An RGBA colour as reported by the colour picker
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgba {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: f64,
}

impl Rgba {
    /// Parse `rgb(r,g,b)`, `rgba(r,g,b,a)`, `#rrggbb` or `#rrrrggggbbbb`
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();

        if let Some(caps) = RGB_PATTERN.captures(text) {
            let channel = |idx: usize| caps[idx].parse::<u8>().ok();
            let alpha = match caps.get(4) {
                Some(a) => a.as_str().parse::<f64>().ok()?,
                None => 1.0,
            };
            return Some(Self {
                red: channel(1)?,
                green: channel(2)?,
                blue: channel(3)?,
                alpha,
            });
        }

        let hex = HEX_PATTERN.captures(text)?.get(1)?.as_str();
        // 16-bit channels keep only their high byte
        let step = hex.len() / 3;
        let channel = |idx: usize| u8::from_str_radix(&hex[idx * step..idx * step + 2], 16).ok();
        Some(Self {
            red: channel(0)?,
            green: channel(1)?,
            blue: channel(2)?,
            alpha: 1.0,
        })
    }
}

/// Kind-specific value of a confirmed dialog
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DialogValue {
    /// Message dialogs, progress, notifications: nothing but "OK"
    Acknowledged,
    Answer(bool),
    Text(String),
    Password {
        username: Option<String>,
        password: String,
    },
    Paths(Vec<PathBuf>),
    Selection(Vec<String>),
    /// Whole rows of a list printed with `print_all_columns`
    Rows(Vec<Vec<String>>),
    Date(NaiveDate),
    Color(Rgba),
    Scale(i32),
    Fields(Vec<String>),
}

/// Outcome of a dialog that exited normally
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "result", rename_all = "snake_case")]
pub enum DialogResult {
    Confirmed(DialogValue),
    Cancelled,
}

impl DialogResult {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, DialogResult::Confirmed(_))
    }

    pub fn value(&self) -> Option<&DialogValue> {
        match self {
            DialogResult::Confirmed(value) => Some(value),
            DialogResult::Cancelled => None,
        }
    }

    /// Suggested process exit code when forwarding this result
    pub fn exit_code(&self) -> i32 {
        match self {
            DialogResult::Confirmed(_) => EXIT_CONFIRMED,
            DialogResult::Cancelled => EXIT_CANCELLED,
        }
    }
}

/// Decode a finished dialog's output according to its kind
pub fn decode(kind: &DialogKind, output: &ProcessOutput) -> Result<DialogResult> {
    match output.code {
        Some(EXIT_CONFIRMED) => decode_value(kind, output).map(DialogResult::Confirmed),
        Some(EXIT_CANCELLED) => Ok(DialogResult::Cancelled),
        code => Err(Error::execution(code, output.stderr.trim_end())),
    }
}

fn decode_value(kind: &DialogKind, output: &ProcessOutput) -> Result<DialogValue> {
    let value = match kind {
        DialogKind::Info(_)
        | DialogKind::Warning(_)
        | DialogKind::Error(_)
        | DialogKind::Progress(_)
        | DialogKind::Notification(_) => DialogValue::Acknowledged,
        DialogKind::Question(_) => DialogValue::Answer(true),
        DialogKind::Entry(_) | DialogKind::TextInfo(_) => {
            DialogValue::Text(output.value()?.to_string())
        }
        DialogKind::Password(options) => {
            let out = output.value()?;
            if options.username {
                let (username, password) = out
                    .split_once('|')
                    .ok_or_else(|| Error::protocol("password output lacks user|password"))?;
                DialogValue::Password {
                    username: Some(username.to_string()),
                    password: password.to_string(),
                }
            } else {
                DialogValue::Password {
                    username: None,
                    password: out.to_string(),
                }
            }
        }
        DialogKind::FileSelection(options) => {
            DialogValue::Paths(split_paths(output.value_bytes(), options.separator())?)
        }
        DialogKind::List(options) => {
            let values = split_values(output.value()?, options.separator());
            if options.print_all_columns {
                DialogValue::Rows(chunk_rows(values, options.printed_columns())?)
            } else {
                DialogValue::Selection(values)
            }
        }
        DialogKind::Calendar(_) => {
            let out = output.value()?;
            let date = NaiveDate::parse_from_str(out.trim(), ISO_DATE_FORMAT)
                .map_err(|e| Error::protocol(format!("invalid date '{}': {}", out, e)))?;
            DialogValue::Date(date)
        }
        DialogKind::Color(_) => {
            let out = output.value()?;
            DialogValue::Color(
                Rgba::parse(out)
                    .ok_or_else(|| Error::protocol(format!("invalid colour '{}'", out)))?,
            )
        }
        DialogKind::Scale(_) => {
            // With --print-partial every intermediate value precedes the final one
            let last = output.value()?.lines().last().unwrap_or_default().trim();
            let value = last
                .parse::<i32>()
                .map_err(|e| Error::protocol(format!("invalid scale value '{}': {}", last, e)))?;
            DialogValue::Scale(value)
        }
        DialogKind::Forms(options) => {
            // Forms always emit one value per field, even when all are empty
            let out = output.value()?;
            DialogValue::Fields(out.split(options.separator()).map(str::to_string).collect())
        }
    };

    trace!("decoded {} output as {:?}", kind.selector(), value);
    Ok(value)
}

/// Split multi-value output; empty output means nothing was selected
pub fn split_values(out: &str, separator: &str) -> Vec<String> {
    if out.is_empty() {
        return Vec::new();
    }
    out.split(separator).map(str::to_string).collect()
}

/// Group a flat `print_all_columns` selection into rows of `columns` values
fn chunk_rows(values: Vec<String>, columns: usize) -> Result<Vec<Vec<String>>> {
    if values.is_empty() {
        return Ok(Vec::new());
    }
    if columns == 0 || values.len() % columns != 0 {
        return Err(Error::protocol(format!(
            "{} printed values do not fill rows of {} columns",
            values.len(),
            columns
        )));
    }
    Ok(values.chunks(columns).map(<[String]>::to_vec).collect())
}

/// Split selected file names without requiring them to be UTF-8
fn split_paths(out: &[u8], separator: &str) -> Result<Vec<PathBuf>> {
    if out.is_empty() {
        return Ok(Vec::new());
    }
    split_bytes(out, separator.as_bytes())
        .into_iter()
        .map(path_from_bytes)
        .collect()
}

fn split_bytes<'a>(out: &'a [u8], separator: &[u8]) -> Vec<&'a [u8]> {
    if separator.is_empty() {
        return vec![out];
    }

    let mut parts = Vec::new();
    let mut rest = out;
    while let Some(pos) = rest
        .windows(separator.len())
        .position(|window| window == separator)
    {
        parts.push(&rest[..pos]);
        rest = &rest[pos + separator.len()..];
    }
    parts.push(rest);
    parts
}

#[cfg(unix)]
fn path_from_bytes(bytes: &[u8]) -> Result<PathBuf> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    Ok(PathBuf::from(OsStr::from_bytes(bytes)))
}

#[cfg(not(unix))]
fn path_from_bytes(bytes: &[u8]) -> Result<PathBuf> {
    std::str::from_utf8(bytes)
        .map(PathBuf::from)
        .map_err(|e| Error::protocol(format!("file name is not valid UTF-8: {}", e)))
}
