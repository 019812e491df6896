//! Records written to line-fed dialogs after launch
//!
//! Lists and text-info dialogs read one cell / body line per record.
//! Progress dialogs read percentages and `#`-prefixed status text.
//! Notifiers started with `--listen` read `command:argument` records.

use serde::{Deserialize, Serialize};
use zenity_core::prelude::*;
use zenity_core::DialogKind;

use crate::handle::DialogHandle;

/// One typed record for a line-fed dialog
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FeedLine {
    /// List cell or text-info body line
    Cell(String),
    /// Progress bar position, clamped to 100
    Percentage(u8),
    /// Progress status text
    ProgressText(String),
    Pulsate(bool),
    /// Notifier icon name or path
    Icon(String),
    /// Notifier balloon message
    Message(String),
    Tooltip(String),
    Visible(bool),
}

impl FeedLine {
    /// Render as the text of a single stdin record
    pub fn to_line(&self) -> String {
        match self {
            FeedLine::Cell(text) => text.clone(),
            FeedLine::Percentage(value) => (*value).min(100).to_string(),
            FeedLine::ProgressText(text) => format!("# {}", text),
            FeedLine::Pulsate(on) => format!("pulsate:{}", on),
            FeedLine::Icon(icon) => format!("icon:{}", icon),
            FeedLine::Message(text) => format!("message:{}", text),
            FeedLine::Tooltip(text) => format!("tooltip:{}", text),
            FeedLine::Visible(on) => format!("visible:{}", on),
        }
    }

    /// Whether a dialog of `kind` understands this record
    pub fn accepted_by(&self, kind: &DialogKind) -> bool {
        match self {
            FeedLine::Cell(_) => matches!(kind, DialogKind::List(_) | DialogKind::TextInfo(_)),
            FeedLine::Percentage(_) | FeedLine::ProgressText(_) | FeedLine::Pulsate(_) => {
                matches!(kind, DialogKind::Progress(_))
            }
            FeedLine::Icon(_) | FeedLine::Message(_) | FeedLine::Tooltip(_) | FeedLine::Visible(_) => {
                kind.is_persistent()
            }
        }
    }

    pub(crate) fn check(&self, kind: &DialogKind) -> Result<()> {
        if self.accepted_by(kind) {
            Ok(())
        } else {
            Err(Error::protocol(format!(
                "{:?} cannot be sent to a --{} dialog",
                self,
                kind.selector()
            )))
        }
    }
}

/// Writes list rows cell by cell and keeps count of complete rows.
///
/// zenity fills a list row-major, one cell per line, so a row is complete
/// once `columns` cells have been written.
pub struct ListFeeder<'a> {
    handle: &'a mut DialogHandle,
    columns: usize,
    cells: usize,
}

impl<'a> ListFeeder<'a> {
    pub(crate) fn new(handle: &'a mut DialogHandle) -> Result<Self> {
        let columns = match handle.kind() {
            DialogKind::List(options) => options.columns.len(),
            other => {
                return Err(Error::protocol(format!(
                    "rows can only be added to --list dialogs, not --{}",
                    other.selector()
                )))
            }
        };
        if columns == 0 {
            return Err(Error::protocol("list dialog has no columns"));
        }

        // Rows written at launch count towards the table
        let cells = handle.lines_written();
        Ok(Self {
            handle,
            columns,
            cells,
        })
    }

    /// Write a single cell
    pub async fn push_cell(&mut self, cell: impl AsRef<str>) -> Result<()> {
        self.handle.write_line(cell.as_ref()).await?;
        self.cells += 1;
        Ok(())
    }

    /// Write a complete row; it must have exactly one cell per column
    pub async fn push_row<S: AsRef<str>>(&mut self, row: &[S]) -> Result<()> {
        if row.len() != self.columns {
            return Err(Error::protocol(format!(
                "row has {} cells, list has {} columns",
                row.len(),
                self.columns
            )));
        }
        if self.cells % self.columns != 0 {
            return Err(Error::protocol(
                "previous row is incomplete; finish it with push_cell",
            ));
        }
        for cell in row {
            self.push_cell(cell).await?;
        }
        Ok(())
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cells(&self) -> usize {
        self.cells
    }

    /// Complete rows written so far
    pub fn rows(&self) -> usize {
        self.cells / self.columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zenity_core::{ListOptions, NotificationOptions, ProgressOptions, TextInfoOptions};

    #[test]
    fn test_rendering() {
        assert_eq!(FeedLine::Cell("abc".into()).to_line(), "abc");
        assert_eq!(FeedLine::Percentage(42).to_line(), "42");
        assert_eq!(FeedLine::Percentage(200).to_line(), "100");
        assert_eq!(
            FeedLine::ProgressText("Copying".into()).to_line(),
            "# Copying"
        );
        assert_eq!(FeedLine::Pulsate(true).to_line(), "pulsate:true");
        assert_eq!(FeedLine::Icon("dialog-warning".into()).to_line(), "icon:dialog-warning");
        assert_eq!(FeedLine::Message("Hi".into()).to_line(), "message:Hi");
        assert_eq!(FeedLine::Tooltip("Busy".into()).to_line(), "tooltip:Busy");
        assert_eq!(FeedLine::Visible(false).to_line(), "visible:false");
    }

    #[test]
    fn test_acceptance_by_kind() {
        let list = DialogKind::List(ListOptions::default());
        let text = DialogKind::TextInfo(TextInfoOptions::default());
        let progress = DialogKind::Progress(ProgressOptions::default());
        let notifier = DialogKind::Notification(NotificationOptions {
            listen: true,
            ..Default::default()
        });
        let one_shot = DialogKind::Notification(NotificationOptions::default());

        assert!(FeedLine::Cell("x".into()).accepted_by(&list));
        assert!(FeedLine::Cell("x".into()).accepted_by(&text));
        assert!(!FeedLine::Cell("x".into()).accepted_by(&progress));

        assert!(FeedLine::Percentage(1).accepted_by(&progress));
        assert!(!FeedLine::Percentage(1).accepted_by(&list));

        assert!(FeedLine::Tooltip("t".into()).accepted_by(&notifier));
        assert!(!FeedLine::Tooltip("t".into()).accepted_by(&one_shot));
    }

    #[test]
    fn test_check_names_the_dialog() {
        let list = DialogKind::List(ListOptions::default());
        let err = FeedLine::Visible(true).check(&list).unwrap_err();
        assert!(err.to_string().contains("--list"));
    }
}
