//! Common constants used throughout pyskel.

/// Mode of every directory pyskel creates (rwxr-xr-x).
pub const DIR_MODE: u32 = 0o755;

/// Build descriptor, INI style
pub const SETUP_CFG: &str = "setup.cfg";

/// Build descriptor, script style
pub const SETUP_PY: &str = "setup.py";

pub const LICENSE_FILE: &str = "LICENSE";
pub const README_FILE: &str = "README.rst";
pub const GITIGNORE_FILE: &str = ".gitignore";

pub const DOCS_DIR: &str = "docs";

/// Subdirectories of the docs root, each created independently
pub const DOCS_SUBDIRS: [&str; 3] = ["_build", "_static", "_templates"];

pub const TESTS_DIR: &str = "tests";

/// License used when the requested one is unsupported
pub const DEFAULT_LICENSE: &str = "MIT";

pub const DEFAULT_VERSION: &str = "1.0.0";
pub const DEFAULT_DESCRIPTION: &str = "ADD SHORT DESCRIPTION ON THE PROJECT HERE";

/// Hint appended to "file exists" refusals
pub const FORCE_HINT: &str = "skipping... To overwrite, try -f/--force option";

/// Hint appended to "directory exists" refusals
pub const MERGE_HINT: &str = "To reuse the existing directory, try -m/--merge option";

/// Version-control tool whose presence gates the ignore file
pub const VCS_COMMAND: &str = "git";
