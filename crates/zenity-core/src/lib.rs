//! # zenity-core - Dialog Types and Result Decoding
//!
//! Foundation crate for zenity-launcher. Describes dialogs, renders them into
//! zenity command-line flags and decodes zenity's stdout/exit-code protocol
//! back into typed results. Nothing in here spawns a process; see
//! `zenity-process` for that.
//!
//! ## Public API
//!
//! ### Dialogs (`dialog`)
//! - [`DialogSpec`] - Common presentation options plus a [`DialogKind`]
//! - [`DialogKind`] - Tagged variant over every supported dialog
//! - [`FlagList`] - Ordered flag list that never repeats a single-valued flag
//!
//! ### Results (`result`)
//! - [`ProcessOutput`] - Captured stdout, stderr and exit code
//! - [`decode()`] - Turn a [`ProcessOutput`] into a [`DialogResult`]
//! - [`DialogResult`], [`DialogValue`], [`Rgba`]
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Launch, broken pipe, execution and protocol errors
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! ```rust
//! use zenity_core::prelude::*;
//! ```

pub mod dialog;
pub mod error;
pub mod logging;
pub mod prelude;
pub mod result;

pub use dialog::{
    CalendarOptions, ColorOptions, CommonOptions, DialogKind, DialogSpec, EntryOptions,
    FileSelectionOptions, FlagList, FormField, FormsOptions, ListColumn, ListOptions,
    MessageOptions, NotificationOptions, PasswordOptions, ProgressOptions, QuestionOptions,
    ScaleOptions, TextInfoOptions, DEFAULT_SEPARATOR,
};
pub use error::{Error, Result, ResultExt, TIMEOUT_EXIT_CODE};
pub use result::{
    decode, split_values, DialogResult, DialogValue, ProcessOutput, Rgba, EXIT_CANCELLED,
    EXIT_CONFIRMED,
};
