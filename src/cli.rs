//! Command-line interface for pyskel.
//! Provides argument parsing, project directory resolution and the mapping
//! from sub-commands to generator options.

use std::env;
use std::path::{Component, Path, PathBuf};

use clap::{error::ErrorKind, Args as ClapArgs, CommandFactory, Parser, Subcommand};

use crate::error::{Error, Result};
use crate::generator::{Descriptor, GeneratorOptions, Layout, TestFramework};

/// Command-line arguments structure for pyskel.
#[derive(Parser, Debug)]
#[command(author, version, about = "pyskel: python project skeleton generator", long_about = None)]
pub struct Args {
    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new project
    New(NewArgs),
    /// Change the license of an existing project
    License(LicenseArgs),
    /// Add a Sphinx documentation skeleton
    Docs(DocsArgs),
    /// Add a test-stub skeleton
    Tests(TestsArgs),
}

#[derive(ClapArgs, Debug)]
pub struct NewArgs {
    /// Project directory, the current directory if omitted
    #[arg(value_name = "PROJECT_DIR")]
    pub project_dir: Option<PathBuf>,

    /// Source layout
    #[arg(long = "format", value_enum, default_value_t = Layout::Basic)]
    pub layout: Layout,

    /// Build descriptor style
    #[arg(long, value_enum, default_value_t = Descriptor::Cfg)]
    pub descriptor: Descriptor,

    /// Test framework of the generated project
    #[arg(short, long, value_enum, default_value_t = TestFramework::Pytest)]
    pub test: TestFramework,

    /// Do not open the project information form
    #[arg(short, long)]
    pub quiet: bool,

    /// Reuse an existing project directory
    #[arg(short, long)]
    pub merge: bool,

    /// Overwrite existing files
    #[arg(short, long)]
    pub force: bool,

    /// License id, see 'pyskel license --list'
    #[arg(short, long)]
    pub license: Option<String>,

    /// Short description of the project
    #[arg(short, long)]
    pub description: Option<String>,

    #[arg(long)]
    pub author: Option<String>,

    #[arg(long)]
    pub author_email: Option<String>,
}

#[derive(ClapArgs, Debug)]
pub struct LicenseArgs {
    /// New license id
    #[arg(value_name = "LICENSE", required_unless_present = "list")]
    pub license: Option<String>,

    /// Print the supported licenses
    #[arg(long)]
    pub list: bool,

    /// Project directory, the current directory if omitted
    #[arg(short, long, value_name = "PROJECT_DIR")]
    pub project_dir: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
pub struct DocsArgs {
    /// Project directory, the current directory if omitted
    #[arg(value_name = "PROJECT_DIR")]
    pub project_dir: Option<PathBuf>,

    /// Reuse an existing docs directory
    #[arg(short, long)]
    pub merge: bool,

    /// Overwrite existing files
    #[arg(short, long)]
    pub force: bool,
}

#[derive(ClapArgs, Debug)]
pub struct TestsArgs {
    /// Project directory, the current directory if omitted
    #[arg(value_name = "PROJECT_DIR")]
    pub project_dir: Option<PathBuf>,

    /// Test framework
    #[arg(short, long, value_enum, default_value_t = TestFramework::Pytest)]
    pub test: TestFramework,

    /// Reuse an existing tests directory
    #[arg(short, long)]
    pub merge: bool,

    /// Overwrite existing files
    #[arg(short, long)]
    pub force: bool,
}

impl Commands {
    /// Registered name of the generator that serves this sub-command.
    pub fn generator_name(&self) -> &'static str {
        match self {
            Commands::New(_) => "project",
            Commands::License(_) => "license_change",
            Commands::Docs(_) => "docs",
            Commands::Tests(_) => "tests",
        }
    }

    /// Resolves the project directory and builds the generator options.
    ///
    /// # Errors
    /// * `Error::ProjectDirError` when `new` targets a filesystem root
    pub fn to_options(&self) -> Result<GeneratorOptions> {
        let options = match self {
            Commands::New(args) => {
                let (dir, name) = parse_project_dir(args.project_dir.as_deref())?;
                if name.is_empty() {
                    return Err(Error::ProjectDirError(dir.display().to_string()));
                }
                GeneratorOptions {
                    layout: args.layout,
                    descriptor: args.descriptor,
                    test: args.test,
                    quiet: args.quiet,
                    merge: args.merge,
                    force: args.force,
                    license: args.license.clone(),
                    description: args.description.clone(),
                    author: args.author.clone(),
                    author_email: args.author_email.clone(),
                    ..GeneratorOptions::new(dir, name)
                }
            }
            Commands::License(args) => {
                let (dir, name) = parse_project_dir(args.project_dir.as_deref())?;
                GeneratorOptions {
                    license: args.license.clone(),
                    list: args.list,
                    ..GeneratorOptions::new(dir, name)
                }
            }
            Commands::Docs(args) => {
                let (dir, name) = parse_project_dir(args.project_dir.as_deref())?;
                GeneratorOptions {
                    merge: args.merge,
                    force: args.force,
                    ..GeneratorOptions::new(dir, name)
                }
            }
            Commands::Tests(args) => {
                let (dir, name) = parse_project_dir(args.project_dir.as_deref())?;
                GeneratorOptions {
                    test: args.test,
                    merge: args.merge,
                    force: args.force,
                    ..GeneratorOptions::new(dir, name)
                }
            }
        };
        Ok(options)
    }
}

/// Resolves `.` and `..` without touching the filesystem.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() && !normalized.has_root() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Turns the project directory argument into an absolute directory and the
/// project name (its last component, empty for a filesystem root).
///
/// # Arguments
/// * `arg` - Directory given on the command line; absent or empty means the
///   current directory
pub fn parse_project_dir(arg: Option<&Path>) -> Result<(PathBuf, String)> {
    let cwd = env::current_dir()?;
    let dir = match arg {
        Some(path) if !path.as_os_str().is_empty() => normalize_path(&cwd.join(path)),
        _ => cwd,
    };
    let name = dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok((dir, name))
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if no sub-command is given, after printing the help
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if matches!(
                e.kind(),
                ErrorKind::MissingSubcommand | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(Path::new("/a/b/../c/./d/")), PathBuf::from("/a/c/d"));
        assert_eq!(normalize_path(Path::new("/..")), PathBuf::from("/"));
    }

    #[test]
    fn test_new_defaults() {
        let args = Args::try_parse_from(["pyskel", "new", "demo"]).unwrap();
        let Commands::New(new) = &args.command else {
            panic!("expected the new sub-command");
        };
        assert_eq!(new.layout, Layout::Basic);
        assert_eq!(new.descriptor, Descriptor::Cfg);
        assert_eq!(new.test, TestFramework::Pytest);
        assert_eq!(args.command.generator_name(), "project");
    }

    #[test]
    fn test_license_requires_id_unless_listing() {
        assert!(Args::try_parse_from(["pyskel", "license"]).is_err());
        assert!(Args::try_parse_from(["pyskel", "license", "--list"]).is_ok());
    }
}
