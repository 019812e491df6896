//! # zenity-process - Dialog Process Management
//!
//! Spawns the external `zenity` binary, streams records to its stdin and
//! collects its stdout/stderr/exit code for decoding.
//!
//! Depends on [`zenity_core`] for dialog types, decoding and error handling.
//!
//! ## Public API
//!
//! ### Launching
//! - [`Launcher`] - Start dialogs with an explicit [`LauncherConfig`]
//! - [`DialogHandle`] - A running dialog bound to its spec
//! - [`ZenityProcess`] - Raw process handle (write lines, read all, terminate)
//!
//! ### Line-fed dialogs
//! - [`FeedLine`] - Typed stdin records (list cells, progress, notifier commands)
//! - [`ListFeeder`] - Row-by-row writer for list dialogs
//!
//! ### Configuration and tooling
//! - [`LauncherConfig`], [`load_config()`], [`try_load_config()`]
//! - [`ToolAvailability`], [`resolve_binary()`] - Check the binary can be started

pub mod config;
pub mod feed;
pub mod handle;
pub mod launcher;
pub mod process;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;
pub mod tool_availability;

// Public API re-exports
pub use config::{
    default_config_path, load_config, try_load_config, LauncherConfig, BINARY_ENV_VAR,
};
pub use feed::{FeedLine, ListFeeder};
pub use handle::DialogHandle;
pub use launcher::Launcher;
pub use process::{ZenityProcess, TERMINATE_GRACE_PERIOD};
pub use tool_availability::{resolve_binary, ToolAvailability};
