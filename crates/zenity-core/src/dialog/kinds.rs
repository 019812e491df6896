//! Per-kind dialog options and their flag rendering
//!
//! Each options struct maps one-to-one onto zenity flags. Rendering only
//! ever omits what is unset; there is no other conditional logic here.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::flags::FlagList;

/// Separator zenity uses between multiple values unless told otherwise
pub const DEFAULT_SEPARATOR: &str = "|";

/// Date format requested from calendar and form dialogs so results parse
/// independently of the user's locale.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Options shared by info, warning and error dialogs
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct MessageOptions {
    pub text: Option<String>,
    pub icon_name: Option<String>,
    pub no_wrap: bool,
    pub no_markup: bool,
}

impl MessageOptions {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub(crate) fn render(&self, flags: &mut FlagList) {
        flags
            .value("text", self.text.as_deref())
            .value("icon-name", self.icon_name.as_deref())
            .switch("no-wrap", self.no_wrap)
            .switch("no-markup", self.no_markup);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct QuestionOptions {
    pub text: Option<String>,
    pub no_wrap: bool,
    pub no_markup: bool,
    /// Give the cancel button focus instead of OK
    pub default_cancel: bool,
}

impl QuestionOptions {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub(crate) fn render(&self, flags: &mut FlagList) {
        flags
            .value("text", self.text.as_deref())
            .switch("no-wrap", self.no_wrap)
            .switch("no-markup", self.no_markup)
            .switch("default-cancel", self.default_cancel);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct EntryOptions {
    pub text: Option<String>,
    /// Prefilled entry value
    pub entry_text: Option<String>,
    pub hide_text: bool,
}

impl EntryOptions {
    pub(crate) fn render(&self, flags: &mut FlagList) {
        flags
            .value("text", self.text.as_deref())
            .value("entry-text", self.entry_text.as_deref())
            .switch("hide-text", self.hide_text);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct PasswordOptions {
    /// Also ask for a user name; output becomes `user|password`
    pub username: bool,
}

impl PasswordOptions {
    pub(crate) fn render(&self, flags: &mut FlagList) {
        flags.switch("username", self.username);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct FileSelectionOptions {
    /// Preselected file or directory
    pub filename: Option<PathBuf>,
    pub multiple: bool,
    pub directory: bool,
    pub save: bool,
    pub confirm_overwrite: bool,
    pub separator: Option<String>,
    /// Filters such as `Images | *.png *.jpg`
    pub file_filters: Vec<String>,
}

impl FileSelectionOptions {
    pub fn separator(&self) -> &str {
        self.separator.as_deref().unwrap_or(DEFAULT_SEPARATOR)
    }

    pub(crate) fn render(&self, flags: &mut FlagList) {
        flags
            .value("filename", self.filename.as_ref().map(|p| p.display()))
            .switch("multiple", self.multiple)
            .switch("directory", self.directory)
            .switch("save", self.save)
            .switch("confirm-overwrite", self.confirm_overwrite)
            .value("separator", self.separator.as_deref());
        for filter in &self.file_filters {
            flags.repeat("file-filter", filter);
        }
    }
}

/// A list column header
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ListColumn {
    pub name: String,
    /// Hidden columns still exist in the model and can be printed
    pub hidden: bool,
}

impl ListColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hidden: false,
        }
    }

    pub fn hidden(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hidden: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ListOptions {
    pub text: Option<String>,
    pub columns: Vec<ListColumn>,
    pub checklist: bool,
    pub radiolist: bool,
    pub editable: bool,
    pub multiple: bool,
    pub separator: Option<String>,
    /// 1-based column whose value is printed for each selected row
    pub print_column: Option<u32>,
    /// Print every column of each selected row; overrides `print_column`
    pub print_all_columns: bool,
    pub hide_header: bool,
    /// Rows written to stdin right after launch, one cell per line
    pub rows: Vec<Vec<String>>,
}

impl ListOptions {
    pub fn separator(&self) -> &str {
        self.separator.as_deref().unwrap_or(DEFAULT_SEPARATOR)
    }

    /// Values printed per selected row with `print_all_columns`; the
    /// checklist/radiolist toggle column is not printed
    pub fn printed_columns(&self) -> usize {
        let toggle = usize::from(self.checklist || self.radiolist);
        self.columns.len().saturating_sub(toggle)
    }

    pub(crate) fn render(&self, flags: &mut FlagList) {
        flags.value("text", self.text.as_deref());
        for column in &self.columns {
            flags.repeat("column", &column.name);
        }
        flags
            .switch("checklist", self.checklist)
            .switch("radiolist", self.radiolist)
            .switch("editable", self.editable)
            .switch("multiple", self.multiple)
            .value("separator", self.separator.as_deref())
            .value("print-column", self.print_column)
            .value("print-column", self.print_all_columns.then_some("ALL"))
            .value("hide-column", self.hidden_columns())
            .switch("hide-header", self.hide_header);
    }

    fn hidden_columns(&self) -> Option<String> {
        let hidden: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, column)| column.hidden)
            .map(|(idx, _)| (idx + 1).to_string())
            .collect();

        (!hidden.is_empty()).then(|| hidden.join(","))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ProgressOptions {
    pub text: Option<String>,
    /// Initial percentage (0-100)
    pub percentage: Option<u8>,
    pub pulsate: bool,
    pub auto_close: bool,
    pub auto_kill: bool,
    pub no_cancel: bool,
}

impl ProgressOptions {
    pub(crate) fn render(&self, flags: &mut FlagList) {
        flags
            .value("text", self.text.as_deref())
            .value("percentage", self.percentage.map(|p| p.min(100)))
            .switch("pulsate", self.pulsate)
            .switch("auto-close", self.auto_close)
            .switch("auto-kill", self.auto_kill)
            .switch("no-cancel", self.no_cancel);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct NotificationOptions {
    pub text: Option<String>,
    /// Icon shown in the tray and the balloon
    pub icon_name: Option<String>,
    /// Keep running and accept `icon:`/`message:`/`tooltip:`/`visible:`
    /// commands on stdin
    pub listen: bool,
}

impl NotificationOptions {
    pub(crate) fn render(&self, flags: &mut FlagList) {
        flags
            .value("text", self.text.as_deref())
            .value("icon-name", self.icon_name.as_deref())
            .switch("listen", self.listen);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct TextInfoOptions {
    /// Show this file instead of reading the body from stdin
    pub filename: Option<PathBuf>,
    pub editable: bool,
    /// Label of an "I agree" style checkbox that gates the OK button
    pub checkbox: Option<String>,
    pub font: Option<String>,
    pub html: bool,
    pub url: Option<String>,
    /// Body written to stdin right after launch
    pub body: Option<String>,
}

impl TextInfoOptions {
    pub(crate) fn render(&self, flags: &mut FlagList) {
        flags
            .value("filename", self.filename.as_ref().map(|p| p.display()))
            .switch("editable", self.editable)
            .value("checkbox", self.checkbox.as_deref())
            .value("font", self.font.as_deref())
            .switch("html", self.html)
            .value("url", self.url.as_deref());
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct CalendarOptions {
    pub text: Option<String>,
    pub day: Option<u32>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

impl CalendarOptions {
    pub(crate) fn render(&self, flags: &mut FlagList) {
        flags
            .value("text", self.text.as_deref())
            .value("day", self.day)
            .value("month", self.month)
            .value("year", self.year)
            .value("date-format", Some(ISO_DATE_FORMAT));
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ColorOptions {
    /// Initial colour, e.g. `#ff8800` or `rgb(255,136,0)`
    pub color: Option<String>,
    pub show_palette: bool,
}

impl ColorOptions {
    pub(crate) fn render(&self, flags: &mut FlagList) {
        flags
            .value("color", self.color.as_deref())
            .switch("show-palette", self.show_palette);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ScaleOptions {
    pub text: Option<String>,
    pub value: Option<i32>,
    pub min_value: Option<i32>,
    pub max_value: Option<i32>,
    pub step: Option<i32>,
    /// Print every intermediate value while the slider moves
    pub print_partial: bool,
    pub hide_value: bool,
}

impl ScaleOptions {
    pub(crate) fn render(&self, flags: &mut FlagList) {
        flags
            .value("text", self.text.as_deref())
            .value("value", self.value)
            .value("min-value", self.min_value)
            .value("max-value", self.max_value)
            .value("step", self.step)
            .switch("print-partial", self.print_partial)
            .switch("hide-value", self.hide_value);
    }
}

/// A single field of a forms dialog
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Entry(String),
    Password(String),
    Calendar(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct FormsOptions {
    pub text: Option<String>,
    pub fields: Vec<FormField>,
    pub separator: Option<String>,
}

impl FormsOptions {
    pub fn separator(&self) -> &str {
        self.separator.as_deref().unwrap_or(DEFAULT_SEPARATOR)
    }

    pub(crate) fn render(&self, flags: &mut FlagList) {
        flags.value("text", self.text.as_deref());
        for field in &self.fields {
            match field {
                FormField::Entry(label) => flags.repeat("add-entry", label),
                FormField::Password(label) => flags.repeat("add-password", label),
                FormField::Calendar(label) => flags.repeat("add-calendar", label),
            };
        }
        flags.value("separator", self.separator.as_deref());
        if self
            .fields
            .iter()
            .any(|f| matches!(f, FormField::Calendar(_)))
        {
            flags.value("forms-date-format", Some(ISO_DATE_FORMAT));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(render: impl FnOnce(&mut FlagList)) -> Vec<String> {
        let mut flags = FlagList::new("test");
        render(&mut flags);
        flags.into_vec().split_off(1)
    }

    #[test]
    fn test_default_options_render_nothing() {
        assert!(rendered(|f| MessageOptions::default().render(f)).is_empty());
        assert!(rendered(|f| QuestionOptions::default().render(f)).is_empty());
        assert!(rendered(|f| EntryOptions::default().render(f)).is_empty());
        assert!(rendered(|f| FileSelectionOptions::default().render(f)).is_empty());
        assert!(rendered(|f| ListOptions::default().render(f)).is_empty());
        assert!(rendered(|f| ProgressOptions::default().render(f)).is_empty());
        assert!(rendered(|f| ScaleOptions::default().render(f)).is_empty());
    }

    #[test]
    fn test_list_hidden_columns_are_one_based() {
        let options = ListOptions {
            columns: vec![
                ListColumn::new(" "),
                ListColumn::hidden("Id"),
                ListColumn::new("Value"),
            ],
            radiolist: true,
            print_column: Some(2),
            hide_header: true,
            ..Default::default()
        };

        assert_eq!(
            rendered(|f| options.render(f)),
            vec![
                "--column= ",
                "--column=Id",
                "--column=Value",
                "--radiolist",
                "--print-column=2",
                "--hide-column=2",
                "--hide-header",
            ]
        );
    }

    #[test]
    fn test_print_all_columns_wins_over_index() {
        let options = ListOptions {
            print_column: Some(1),
            print_all_columns: true,
            ..Default::default()
        };
        assert_eq!(rendered(|f| options.render(f)), vec!["--print-column=ALL"]);
    }

    #[test]
    fn test_notification_icon_and_listen() {
        let options = NotificationOptions {
            text: Some("Build finished".into()),
            icon_name: Some("dialog-information".into()),
            listen: false,
        };
        assert_eq!(
            rendered(|f| options.render(f)),
            vec!["--text=Build finished", "--icon-name=dialog-information"]
        );
        assert!(rendered(|f| NotificationOptions::default().render(f)).is_empty());
    }

    #[test]
    fn test_columns_with_equal_labels_stay_separate() {
        let options = ListOptions {
            columns: vec![ListColumn::new(" "), ListColumn::new(" ")],
            ..Default::default()
        };
        assert_eq!(
            rendered(|f| options.render(f)),
            vec!["--column= ", "--column= "]
        );
    }

    #[test]
    fn test_progress_percentage_is_clamped() {
        let options = ProgressOptions {
            percentage: Some(150),
            ..Default::default()
        };
        assert_eq!(rendered(|f| options.render(f)), vec!["--percentage=100"]);
    }

    #[test]
    fn test_calendar_always_requests_iso_dates() {
        let options = CalendarOptions {
            year: Some(2024),
            ..Default::default()
        };
        assert_eq!(
            rendered(|f| options.render(f)),
            vec!["--year=2024", "--date-format=%Y-%m-%d"]
        );
    }

    #[test]
    fn test_forms_date_format_only_with_calendar_field() {
        let plain = FormsOptions {
            fields: vec![FormField::Entry("Name".into())],
            ..Default::default()
        };
        assert_eq!(rendered(|f| plain.render(f)), vec!["--add-entry=Name"]);

        let dated = FormsOptions {
            fields: vec![
                FormField::Entry("Name".into()),
                FormField::Calendar("Birthday".into()),
            ],
            ..Default::default()
        };
        assert_eq!(
            rendered(|f| dated.render(f)),
            vec![
                "--add-entry=Name",
                "--add-calendar=Birthday",
                "--forms-date-format=%Y-%m-%d",
            ]
        );
    }

    #[test]
    fn test_file_selection_filters_repeat() {
        let options = FileSelectionOptions {
            multiple: true,
            file_filters: vec!["Images | *.png".into(), "All | *".into()],
            ..Default::default()
        };
        assert_eq!(
            rendered(|f| options.render(f)),
            vec![
                "--multiple",
                "--file-filter=Images | *.png",
                "--file-filter=All | *",
            ]
        );
        assert_eq!(options.separator(), "|");
    }
}
