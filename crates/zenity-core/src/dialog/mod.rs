//! Dialog descriptions and their rendering into zenity arguments
//!
//! A [`DialogSpec`] is the complete, immutable description of one dialog:
//! presentation options shared by every dialog plus a [`DialogKind`]
//! carrying the kind-specific options. It is rendered exactly once, at
//! launch time, via [`DialogSpec::to_flags`].

pub mod flags;
pub mod kinds;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, ResultExt};

pub use flags::{flag_name, FlagList, REPEATABLE_FLAGS};
pub use kinds::{
    CalendarOptions, ColorOptions, EntryOptions, FileSelectionOptions, FormField, FormsOptions,
    ListColumn, ListOptions, MessageOptions, NotificationOptions, PasswordOptions,
    ProgressOptions, QuestionOptions, ScaleOptions, TextInfoOptions, DEFAULT_SEPARATOR,
    ISO_DATE_FORMAT,
};

/// Presentation options understood by every dialog kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct CommonOptions {
    pub title: Option<String>,
    pub window_icon: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Seconds before the dialog closes itself (exit code 5)
    pub timeout: Option<u32>,
    pub ok_label: Option<String>,
    pub cancel_label: Option<String>,
    pub modal: bool,
}

impl CommonOptions {
    fn render(&self, flags: &mut FlagList) {
        flags
            .value("title", self.title.as_deref())
            .value("window-icon", self.window_icon.as_deref())
            .value("width", self.width)
            .value("height", self.height)
            .value("timeout", self.timeout)
            .value("ok-label", self.ok_label.as_deref())
            .value("cancel-label", self.cancel_label.as_deref())
            .switch("modal", self.modal);
    }
}

/// Which dialog to show, with its kind-specific options
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum DialogKind {
    Info(MessageOptions),
    Warning(MessageOptions),
    Error(MessageOptions),
    Question(QuestionOptions),
    Entry(EntryOptions),
    Password(PasswordOptions),
    FileSelection(FileSelectionOptions),
    List(ListOptions),
    Progress(ProgressOptions),
    Notification(NotificationOptions),
    TextInfo(TextInfoOptions),
    Calendar(CalendarOptions),
    Color(ColorOptions),
    Scale(ScaleOptions),
    Forms(FormsOptions),
}

impl DialogKind {
    /// The zenity selector flag name (without dashes)
    pub fn selector(&self) -> &'static str {
        match self {
            DialogKind::Info(_) => "info",
            DialogKind::Warning(_) => "warning",
            DialogKind::Error(_) => "error",
            DialogKind::Question(_) => "question",
            DialogKind::Entry(_) => "entry",
            DialogKind::Password(_) => "password",
            DialogKind::FileSelection(_) => "file-selection",
            DialogKind::List(_) => "list",
            DialogKind::Progress(_) => "progress",
            DialogKind::Notification(_) => "notification",
            DialogKind::TextInfo(_) => "text-info",
            DialogKind::Calendar(_) => "calendar",
            DialogKind::Color(_) => "color-selection",
            DialogKind::Scale(_) => "scale",
            DialogKind::Forms(_) => "forms",
        }
    }

    /// Whether the dialog reads records from stdin after launch
    pub fn is_line_fed(&self) -> bool {
        match self {
            DialogKind::List(_) | DialogKind::Progress(_) | DialogKind::TextInfo(_) => true,
            DialogKind::Notification(options) => options.listen,
            _ => false,
        }
    }

    /// Whether the dialog stays open until explicitly terminated
    pub fn is_persistent(&self) -> bool {
        matches!(self, DialogKind::Notification(options) if options.listen)
    }

    fn render(&self, flags: &mut FlagList) {
        match self {
            DialogKind::Info(o) | DialogKind::Warning(o) | DialogKind::Error(o) => o.render(flags),
            DialogKind::Question(o) => o.render(flags),
            DialogKind::Entry(o) => o.render(flags),
            DialogKind::Password(o) => o.render(flags),
            DialogKind::FileSelection(o) => o.render(flags),
            DialogKind::List(o) => o.render(flags),
            DialogKind::Progress(o) => o.render(flags),
            DialogKind::Notification(o) => o.render(flags),
            DialogKind::TextInfo(o) => o.render(flags),
            DialogKind::Calendar(o) => o.render(flags),
            DialogKind::Color(o) => o.render(flags),
            DialogKind::Scale(o) => o.render(flags),
            DialogKind::Forms(o) => o.render(flags),
        }
    }

    /// Lines written to stdin right after launch (list rows, text body)
    pub fn initial_lines(&self) -> Vec<String> {
        match self {
            DialogKind::List(options) => options.rows.iter().flatten().cloned().collect(),
            DialogKind::TextInfo(TextInfoOptions {
                body: Some(body),
                filename: None,
                ..
            }) => body.lines().map(str::to_string).collect(),
            _ => Vec::new(),
        }
    }
}

/// Complete description of one dialog invocation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DialogSpec {
    #[serde(flatten)]
    pub options: CommonOptions,
    pub kind: DialogKind,
}

impl DialogSpec {
    pub fn new(kind: DialogKind) -> Self {
        Self {
            options: CommonOptions::default(),
            kind,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(DialogKind::Info(MessageOptions::new(text)))
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(DialogKind::Warning(MessageOptions::new(text)))
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(DialogKind::Error(MessageOptions::new(text)))
    }

    pub fn question(text: impl Into<String>) -> Self {
        Self::new(DialogKind::Question(QuestionOptions::new(text)))
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.options.title = Some(title.into());
        self
    }

    pub fn window_icon(mut self, icon: impl Into<String>) -> Self {
        self.options.window_icon = Some(icon.into());
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.options.width = Some(width);
        self.options.height = Some(height);
        self
    }

    pub fn timeout(mut self, seconds: u32) -> Self {
        self.options.timeout = Some(seconds);
        self
    }

    pub fn ok_label(mut self, label: impl Into<String>) -> Self {
        self.options.ok_label = Some(label.into());
        self
    }

    pub fn cancel_label(mut self, label: impl Into<String>) -> Self {
        self.options.cancel_label = Some(label.into());
        self
    }

    pub fn modal(mut self, modal: bool) -> Self {
        self.options.modal = modal;
        self
    }

    /// Parse a dialog description written in TOML
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a dialog description from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::config(format!(
                "dialog file not found: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read dialog file {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Render into the argument vector passed to the binary
    pub fn to_flags(&self) -> Vec<String> {
        let mut flags = FlagList::new(self.kind.selector());
        self.options.render(&mut flags);
        self.kind.render(&mut flags);
        flags.into_vec()
    }
}
