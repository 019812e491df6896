//! Starting dialogs with an explicit configuration

use zenity_core::prelude::*;
use zenity_core::{DialogResult, DialogSpec};

use crate::config::LauncherConfig;
use crate::handle::DialogHandle;
use crate::process::ZenityProcess;
use crate::tool_availability::resolve_binary;

/// Starts dialog processes.
///
/// Holds no state besides its configuration; one launcher can show any
/// number of dialogs, sequentially or at the same time.
#[derive(Debug, Clone, Default)]
pub struct Launcher {
    config: LauncherConfig,
}

impl Launcher {
    pub fn new(config: LauncherConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LauncherConfig {
        &self.config
    }

    /// Start the binary with raw flags
    pub fn launch(&self, flags: &[String]) -> Result<ZenityProcess> {
        let binary = resolve_binary(&self.config.binary)?;

        let mut args = self.config.binary_args.clone();
        args.extend(flags.iter().cloned());

        ZenityProcess::spawn(&binary, &args, &self.config.env)
    }

    /// Start a dialog and write its initial rows (list rows, text body).
    ///
    /// The returned handle keeps input open for further records. A dialog
    /// that closes before taking all initial rows (the user answered early,
    /// or zenity failed to start its window) is still returned, so
    /// [`DialogHandle::finish`] reports its real exit status.
    pub async fn launch_dialog(&self, mut spec: DialogSpec) -> Result<DialogHandle> {
        if spec.options.title.is_none() {
            spec.options.title = self.config.default_title.clone();
        }

        let flags = spec.to_flags();
        let initial = spec.kind.initial_lines();
        let process = self.launch(&flags)?;
        let mut handle = DialogHandle::new(spec, process);

        for line in &initial {
            match handle.write_line(line).await {
                Ok(()) => {}
                Err(Error::BrokenPipe) => {
                    warn!(
                        "dialog closed after {} of {} initial records",
                        handle.lines_written(),
                        initial.len()
                    );
                    break;
                }
                Err(e) => return Err(e),
            }
        }
        if !initial.is_empty() {
            debug!("wrote {} initial records", handle.lines_written());
        }

        Ok(handle)
    }

    /// Show a dialog and wait for the user's answer
    #[instrument(skip_all, fields(kind = spec.kind.selector()))]
    pub async fn run(&self, spec: DialogSpec) -> Result<DialogResult> {
        self.launch_dialog(spec).await?.finish().await
    }
}
