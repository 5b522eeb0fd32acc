//! pyskel creates the skeleton of a python project: build descriptor,
//! license, readme, docs and test stubs, rendered from built-in templates.

/// Command-line interface module for the pyskel application
pub mod cli;

/// Line-oriented comment removal for rendered config files
pub mod comments;

pub mod constants;

/// Error types and handling for the pyskel application
pub mod error;

/// Python literal formatting of list- and dict-shaped settings
pub mod format;

/// Generators, their shared base and the generator registry
pub mod generator;

/// Editor launching, command probing and user identity
pub mod host;

pub mod logger;

/// `$name` / `${name}` substitution that leaves unknown placeholders alone
pub mod renderer;

/// Run-scoped settings registry
pub mod settings;

/// INI-style settings file reading and in-place value replacement
pub mod settings_file;

/// Built-in template catalogue
pub mod templates;
