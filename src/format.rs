//! Formatting of list- and dict-shaped setup.cfg values into python literal
//! syntax for `setup.py`.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use cruet::Inflector;
use regex::Regex;

use crate::settings_file::Entries;

static PYTHON_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Programming Language :: Python :: (\d+)(?:\.(\d+))?$")
        .expect("classifier pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatMode {
    /// One quoted item per line, aligned under the opening bracket
    MultiLineList,
    /// Quoted items on one line
    SingleLineList,
    /// `key: value` items, one per line, emitted as given
    Dict,
}

/// Joins the items of a setup.cfg value. Items are separated by `;` when the
/// text contains one, by newlines otherwise; blank items are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueFormatter {
    pub indent: usize,
    pub separator: String,
    pub quote: bool,
}

impl ValueFormatter {
    pub fn new(mode: FormatMode) -> Self {
        match mode {
            FormatMode::MultiLineList => Self { indent: 8, separator: ",\n".into(), quote: true },
            FormatMode::SingleLineList => Self { indent: 0, separator: ", ".into(), quote: true },
            FormatMode::Dict => Self { indent: 8, separator: ",\n".into(), quote: false },
        }
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_separator<S: Into<String>>(mut self, separator: S) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn format(&self, text: &str) -> String {
        let joint = format!("{}{}", self.separator, " ".repeat(self.indent));
        split_items(text)
            .into_iter()
            .map(|item| if self.quote { quote(item) } else { item.to_string() })
            .collect::<Vec<_>>()
            .join(&joint)
    }
}

pub fn format_value(text: &str, mode: FormatMode) -> String {
    ValueFormatter::new(mode).format(text)
}

pub fn split_items(text: &str) -> Vec<&str> {
    let items: Vec<&str> = if text.contains(';') {
        text.split(';').collect()
    } else {
        text.lines().collect()
    };
    items.into_iter().map(str::trim).filter(|item| !item.is_empty()).collect()
}

/// Single-quoted python string literal.
pub fn quote(item: &str) -> String {
    format!("'{}'", escape(item))
}

/// Escapes backslashes and single quotes for a single-quoted literal.
pub fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'")
}

/// `extras_require` dict body from the `[options.extras_require]` section.
pub fn format_extras(extras: &Entries) -> String {
    let lines: Vec<String> = extras
        .iter()
        .map(|(name, requires)| {
            format!("{}: [{}]", quote(name), format_value(requires, FormatMode::SingleLineList))
        })
        .collect();
    format_value(&lines.join("\n"), FormatMode::Dict)
}

/// Derives `python_requires` from a classifiers block.
///
/// Several distinct `X.Y` classifiers give `>=<lowest X>`, exactly one gives
/// `==X.Y`. Without `X.Y` classifiers a bare `X` classifier gives `>=X`.
pub fn python_requires(classifiers: &str) -> String {
    let mut minors = BTreeSet::new();
    let mut majors = BTreeSet::new();
    for line in classifiers.lines() {
        let Some(caps) = PYTHON_VERSION.captures(line.trim()) else {
            continue;
        };
        let Ok(major) = caps[1].parse::<u32>() else {
            continue;
        };
        match caps.get(2).and_then(|m| m.as_str().parse::<u32>().ok()) {
            Some(minor) => {
                minors.insert((major, minor));
            }
            None => {
                majors.insert(major);
            }
        }
    }

    match minors.len() {
        0 => majors.first().map(|major| format!(">={major}")).unwrap_or_default(),
        1 => {
            let (major, minor) = minors.first().copied().unwrap_or_default();
            format!("=={major}.{minor}")
        }
        _ => {
            let lowest = minors.iter().map(|(major, _)| *major).min().unwrap_or_default();
            format!(">={lowest}")
        }
    }
}

/// Importable package name for a project name.
pub fn package_name(project_name: &str) -> String {
    project_name.to_snake_case()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_value() {
        assert_eq!(format_value("", FormatMode::MultiLineList), "");
        assert_eq!(format_value(" ; \n", FormatMode::SingleLineList), "");
    }

    #[test]
    fn test_custom_indent_and_separator() {
        let formatter = ValueFormatter::new(FormatMode::MultiLineList)
            .with_indent(4)
            .with_separator(" |\n");
        assert_eq!(formatter.format("a\nb"), "'a' |\n    'b'");
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("O'Brien"), r"'O\'Brien'");
    }

    #[test]
    fn test_major_only_classifier() {
        assert_eq!(python_requires("Programming Language :: Python :: 3"), ">=3");
        assert_eq!(python_requires("Topic :: Utilities"), "");
    }

    #[test]
    fn test_package_name() {
        assert_eq!(package_name("My Awesome Project"), "my_awesome_project");
        assert_eq!(package_name("demo-app"), "demo_app");
    }
}
