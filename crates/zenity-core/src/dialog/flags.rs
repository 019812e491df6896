//! Ordered command-line flag list with replace-on-set semantics

use std::fmt::Display;

/// Flags whose name may legitimately appear more than once.
///
/// Each occurrence declares its own column or form field, so equal values
/// are kept: two `--column= ` flags are two columns.
pub const REPEATABLE_FLAGS: &[&str] = &[
    "column",
    "add-entry",
    "add-password",
    "add-calendar",
    "file-filter",
];

/// An ordered list of `--name` / `--name=value` arguments.
///
/// Setting a single-valued flag twice replaces the earlier occurrence in
/// place, so a rendered list never carries the same single-valued flag
/// twice. Repeatable flags are appended as given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagList {
    flags: Vec<String>,
}

impl FlagList {
    /// Start a list with the dialog selector (e.g. `question` -> `--question`)
    pub fn new(selector: &str) -> Self {
        Self {
            flags: vec![format!("--{}", selector)],
        }
    }

    /// Add `--name` when `on` is true
    pub fn switch(&mut self, name: &str, on: bool) -> &mut Self {
        if on {
            self.set(name, format!("--{}", name));
        }
        self
    }

    /// Add `--name=value` when `value` is set; omitted otherwise
    pub fn value<T: Display>(&mut self, name: &str, value: Option<T>) -> &mut Self {
        if let Some(value) = value {
            self.set(name, format!("--{}={}", name, value));
        }
        self
    }

    /// Append `--name=value` without replacing earlier occurrences, even
    /// ones with the same value
    pub fn repeat<T: Display>(&mut self, name: &str, value: T) -> &mut Self {
        debug_assert!(
            REPEATABLE_FLAGS.contains(&name),
            "--{} is not a repeatable flag",
            name
        );
        self.flags.push(format!("--{}={}", name, value));
        self
    }

    fn set(&mut self, name: &str, rendered: String) {
        match self.flags.iter().position(|f| flag_name(f) == name) {
            Some(idx) => self.flags[idx] = rendered,
            None => self.flags.push(rendered),
        }
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.flags.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.flags
    }
}

/// Name of a rendered flag without leading dashes or value
/// (`--title=Hello` -> `title`).
pub fn flag_name(flag: &str) -> &str {
    let flag = flag.trim_start_matches("--");
    flag.split_once('=').map_or(flag, |(name, _)| name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_comes_first() {
        let flags = FlagList::new("info");
        assert_eq!(flags.into_vec(), vec!["--info"]);
    }

    #[test]
    fn test_unset_values_are_omitted() {
        let mut flags = FlagList::new("entry");
        flags
            .value("text", None::<&str>)
            .switch("hide-text", false)
            .value("width", Some(300));
        assert_eq!(flags.into_vec(), vec!["--entry", "--width=300"]);
    }

    #[test]
    fn test_setting_twice_replaces_in_place() {
        let mut flags = FlagList::new("question");
        flags
            .value("title", Some("first"))
            .value("text", Some("body"))
            .value("title", Some("second"));
        assert_eq!(
            flags.into_vec(),
            vec!["--question", "--title=second", "--text=body"]
        );
    }

    #[test]
    fn test_repeat_keeps_every_value() {
        let mut flags = FlagList::new("list");
        flags.repeat("column", "Id").repeat("column", "Name");
        assert_eq!(
            flags.into_vec(),
            vec!["--list", "--column=Id", "--column=Name"]
        );
    }

    #[test]
    fn test_flag_name() {
        assert_eq!(flag_name("--title=a=b"), "title");
        assert_eq!(flag_name("--multiple"), "multiple");
    }
}
