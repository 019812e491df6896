//! A launched dialog bound to the [`DialogSpec`] it was started from

use tokio::sync::mpsc;

use zenity_core::prelude::*;
use zenity_core::{decode, DialogKind, DialogResult, DialogSpec, ProcessOutput};

use crate::feed::{FeedLine, ListFeeder};
use crate::process::ZenityProcess;

/// A running dialog.
///
/// Owns the dialog process for its whole life and remembers the
/// [`DialogSpec`] it was launched from, which decides how its output is
/// decoded and which [`FeedLine`]s it accepts. Input stays open until the
/// handle is consumed by [`read_all`](Self::read_all),
/// [`finish`](Self::finish) or [`terminate`](Self::terminate), so every row
/// written through the handle reaches the dialog.
pub struct DialogHandle {
    spec: DialogSpec,
    process: ZenityProcess,
    lines_written: usize,
}

impl DialogHandle {
    pub(crate) fn new(spec: DialogSpec, process: ZenityProcess) -> Self {
        Self {
            spec,
            process,
            lines_written: 0,
        }
    }

    pub fn spec(&self) -> &DialogSpec {
        &self.spec
    }

    pub fn kind(&self) -> &DialogKind {
        &self.spec.kind
    }

    /// Get the process ID
    pub fn id(&self) -> Option<u32> {
        self.process.id()
    }

    pub fn has_exited(&self) -> bool {
        self.process.has_exited()
    }

    /// Records written since launch, including initial rows
    pub fn lines_written(&self) -> usize {
        self.lines_written
    }

    /// Write a raw record to the dialog's input
    pub async fn write_line(&mut self, text: &str) -> Result<()> {
        self.process.write_line(text).await?;
        self.lines_written += 1;
        Ok(())
    }

    /// Write a typed record, rejecting ones this dialog does not understand
    pub async fn feed(&mut self, line: FeedLine) -> Result<()> {
        line.check(self.kind())?;
        self.write_line(&line.to_line()).await
    }

    /// Row writer for list dialogs
    pub fn list_feeder(&mut self) -> Result<ListFeeder<'_>> {
        ListFeeder::new(self)
    }

    pub async fn set_percentage(&mut self, percentage: u8) -> Result<()> {
        self.feed(FeedLine::Percentage(percentage)).await
    }

    pub async fn set_progress_text(&mut self, text: impl Into<String>) -> Result<()> {
        self.feed(FeedLine::ProgressText(text.into())).await
    }

    pub async fn set_icon(&mut self, icon: impl Into<String>) -> Result<()> {
        self.feed(FeedLine::Icon(icon.into())).await
    }

    pub async fn set_message(&mut self, message: impl Into<String>) -> Result<()> {
        self.feed(FeedLine::Message(message.into())).await
    }

    pub async fn set_tooltip(&mut self, tooltip: impl Into<String>) -> Result<()> {
        self.feed(FeedLine::Tooltip(tooltip.into())).await
    }

    pub async fn set_visible(&mut self, visible: bool) -> Result<()> {
        self.feed(FeedLine::Visible(visible)).await
    }

    /// Forward a live stream of records until the sender side closes.
    ///
    /// Returns the number of records written. Stops early with
    /// [`Error::BrokenPipe`] if the dialog goes away (e.g. the user closed
    /// it) or on the first record the dialog does not accept.
    pub async fn pump(&mut self, mut rx: mpsc::Receiver<FeedLine>) -> Result<usize> {
        let mut forwarded = 0;
        while let Some(line) = rx.recv().await {
            self.feed(line).await?;
            forwarded += 1;
        }
        debug!("feed stream closed after {} records", forwarded);
        Ok(forwarded)
    }

    /// Wait until the dialog closes without consuming the handle
    pub async fn wait_exited(&self) {
        self.process.wait_exited().await
    }

    /// Close input, wait for the dialog to close and collect its output
    pub async fn read_all(self) -> Result<ProcessOutput> {
        self.process.read_all().await
    }

    /// Close input, wait for the dialog and decode its result
    pub async fn finish(self) -> Result<DialogResult> {
        let output = self.process.read_all().await?;
        let result = decode(&self.spec.kind, &output);
        match &result {
            Ok(decoded) => debug!("--{} finished: {:?}", self.spec.kind.selector(), decoded),
            Err(e) => warn!("--{} failed: {}", self.spec.kind.selector(), e),
        }
        result
    }

    /// Close the dialog (e.g. a persistent notifier). Closing a dialog that
    /// already exited, or that never received input, is not an error.
    pub async fn terminate(self) -> Result<()> {
        self.process.terminate().await
    }
}

impl std::fmt::Debug for DialogHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogHandle")
            .field("kind", &self.spec.kind.selector())
            .field("pid", &self.process.id())
            .field("lines_written", &self.lines_written)
            .finish()
    }
}
