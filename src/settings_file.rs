//! Reading and in-place editing of INI-style settings files (`setup.cfg`,
//! the interactive info form) and key retargeting in `setup.py`.
//!
//! The reader never fails on content: malformed lines are skipped or kept
//! with an empty value. A missing file is reported as `None`.

use std::fs;
use std::io;
use std::ops::Range;
use std::path::Path;

use indexmap::IndexMap;
use log::debug;
use regex::Regex;

use crate::error::{Error, Result};

/// Key/value pairs of one section, or of a whole flattened file.
pub type Entries = IndexMap<String, String>;

/// Sections in file order. Lines before the first header land in `""`.
pub type Sections = IndexMap<String, Entries>;

/// Assignment syntax of a file, picked from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStyle {
    /// `key = value`
    Config,
    /// `key='value'`
    Script,
}

impl FileStyle {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("py") => FileStyle::Script,
            _ => FileStyle::Config,
        }
    }
}

fn is_comment(trimmed: &str) -> bool {
    trimmed.starts_with('#') || trimmed.starts_with(';')
}

/// Parses `text` keeping its section structure.
pub fn parse_sections(text: &str) -> Sections {
    let mut sections = Sections::new();
    let mut section = String::new();
    let mut current_key: Option<String> = None;

    for line in text.lines() {
        let trimmed = line.trim();
        // blank lines inside a multi-line value do not end it
        if trimmed.is_empty() || is_comment(trimmed) {
            continue;
        }

        let indented = line.starts_with([' ', '\t']);
        if indented {
            if let Some(key) = &current_key {
                if let Some(value) = sections.get_mut(&section).and_then(|s| s.get_mut(key)) {
                    value.push('\n');
                    value.push_str(trimmed);
                    continue;
                }
            }
        }

        if trimmed.starts_with('[') {
            if let Some(end) = trimmed.find(']') {
                section = trimmed[1..end].trim().to_string();
                sections.entry(section.clone()).or_default();
                current_key = None;
                continue;
            }
        }

        let (key, value) = match trimmed.find(['=', ':']) {
            Some(pos) => (&trimmed[..pos], &trimmed[pos + 1..]),
            None => (trimmed, ""),
        };
        let key = key.trim().to_lowercase();
        if key.is_empty() {
            debug!("Ignoring line without a key: '{trimmed}'");
            current_key = None;
            continue;
        }
        sections
            .entry(section.clone())
            .or_default()
            .insert(key.clone(), value.trim().to_string());
        current_key = Some(key);
    }

    for entries in sections.values_mut() {
        for value in entries.values_mut() {
            let trimmed = value.trim();
            if trimmed.len() != value.len() {
                *value = trimmed.to_string();
            }
        }
    }
    sections
}

/// Parses `text` into one mapping; later sections win on key collisions.
pub fn parse(text: &str) -> Entries {
    flatten(parse_sections(text))
}

/// Collapses sections into one mapping; later sections win.
pub fn flatten(sections: Sections) -> Entries {
    let mut entries = Entries::new();
    for (_, section) in sections {
        entries.extend(section);
    }
    entries
}

fn read_text(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("Settings file '{}' does not exist", path.display());
            Ok(None)
        }
        Err(e) => Err(Error::IoError(e)),
    }
}

/// Reads a settings file keeping its sections. `None` if it does not exist.
pub fn read_sections<P: AsRef<Path>>(path: P) -> Result<Option<Sections>> {
    Ok(read_text(path.as_ref())?.map(|text| parse_sections(&text)))
}

/// Reads a settings file into one flattened mapping. `None` if it does not exist.
pub fn read<P: AsRef<Path>>(path: P) -> Result<Option<Entries>> {
    Ok(read_sections(path)?.map(flatten))
}

/// Byte range of the value assigned to `key` in `text`, plus the quote
/// character around it for script-style files.
fn locate_value(text: &str, key: &str, style: FileStyle) -> Option<(Range<usize>, Option<char>)> {
    let key = regex::escape(key);
    match style {
        FileStyle::Config => {
            let pattern = format!(r"(?miR)^[ \t]*{key}[ \t]*[=:][ \t]*(?P<value>.*?)(?:[ \t]+[#;].*)?$");
            let re = Regex::new(&pattern).ok()?;
            let value = re.captures(text)?.name("value")?;
            Some((value.range(), None))
        }
        FileStyle::Script => {
            let pattern = format!(
                r#"(?R)\b{key}[ \t]*=[ \t]*(?:'(?P<single>[^'\r\n]*)'|"(?P<double>[^"\r\n]*)")"#
            );
            let re = Regex::new(&pattern).ok()?;
            let caps = re.captures(text)?;
            match (caps.name("single"), caps.name("double")) {
                (Some(value), _) => Some((value.range(), Some('\''))),
                (_, Some(value)) => Some((value.range(), Some('"'))),
                _ => None,
            }
        }
    }
}

/// Replaces the value of the first assignment of `key` in `text`.
pub fn replace_value_in_str(text: &str, key: &str, new_value: &str, style: FileStyle) -> Option<String> {
    let (range, quote) = locate_value(text, key, style)?;
    let value = match quote {
        Some(quote) => new_value.replace(quote, &format!("\\{quote}")),
        None => new_value.to_string(),
    };
    let mut out = String::with_capacity(text.len() + value.len());
    out.push_str(&text[..range.start]);
    out.push_str(&value);
    out.push_str(&text[range.end..]);
    Some(out)
}

/// Rewrites the value of `key` in the file at `path`, leaving every other
/// byte untouched. Returns whether an assignment was found and replaced;
/// a missing file counts as not found.
pub fn replace_value<P: AsRef<Path>>(path: P, key: &str, new_value: &str) -> Result<bool> {
    let path = path.as_ref();
    let Some(text) = read_text(path)? else {
        return Ok(false);
    };
    match replace_value_in_str(&text, key, new_value, FileStyle::from_path(path)) {
        Some(updated) => {
            fs::write(path, updated).map_err(|source| Error::WriteError {
                path: path.display().to_string(),
                source,
            })?;
            Ok(true)
        }
        None => {
            debug!("No '{key}' assignment in '{}'", path.display());
            Ok(false)
        }
    }
}
