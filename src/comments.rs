//! Line-oriented removal of whole-line comments.
//!
//! Rules, applied to each line with the line order kept:
//! - `##text` and `!!text` survive with one marker removed (`#text`, `!text`);
//!   indentation in front of the marker is kept.
//! - Any other line whose first non-blank character is `#` or `!` is deleted
//!   together with its line break, except on the first line (shebang) and for
//!   an encoding declaration on the first or second line.
//! - Everything else, blank lines and inline comments included, is copied
//!   verbatim.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

// PEP 263 encoding declaration
static CODING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t\f]*#.*?coding[:=][ \t]*[-_.a-zA-Z0-9]+").expect("coding pattern is valid")
});

#[derive(Debug, PartialEq, Eq)]
enum LineKind {
    Survivor,
    Comment,
    Keep,
}

fn classify(line: &str, index: usize) -> LineKind {
    let trimmed = line.trim_start();
    if trimmed.starts_with("##") || trimmed.starts_with("!!") {
        LineKind::Survivor
    } else if trimmed.starts_with('#') || trimmed.starts_with('!') {
        if index == 0 || (index == 1 && CODING.is_match(line)) {
            LineKind::Keep
        } else {
            LineKind::Comment
        }
    } else {
        LineKind::Keep
    }
}

/// Removes comment lines from `text` and unescapes survivor comments.
pub fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (index, line) in text.split_inclusive('\n').enumerate() {
        match classify(line, index) {
            LineKind::Keep => out.push_str(line),
            LineKind::Comment => {}
            LineKind::Survivor => {
                let indent = line.len() - line.trim_start().len();
                out.push_str(&line[..indent]);
                out.push_str(&line[indent + 1..]);
            }
        }
    }
    out
}

/// Strips comments from the file at `source`. The result goes to `dest`, or
/// back into `source` when no destination is given.
pub fn strip_comments_in_file<P: AsRef<Path>>(source: P, dest: Option<&Path>) -> Result<()> {
    let source = source.as_ref();
    let content = fs::read_to_string(source).map_err(Error::IoError)?;
    let target = dest.unwrap_or(source);
    fs::write(target, strip_comments(&content)).map_err(|source| Error::WriteError {
        path: target.display().to_string(),
        source,
    })
}
