//! Generators render templates into files, one artifact family each.
//!
//! Every generator implements [`Generator`]; shared capabilities (directory
//! creation with merge policy, file writing with force policy) live in
//! [`base::Base`]. Generators are looked up by name through
//! [`get_generator`].

use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_DESCRIPTION, DEFAULT_LICENSE, DEFAULT_VERSION};
use crate::error::Result;
use crate::host::Host;
use crate::settings::Settings;
use crate::settings_file;

pub mod base;
pub mod docs;
pub mod license;
pub mod license_change;
pub mod project;
pub mod readme;
pub mod setup;
pub mod setup_cfg;
pub mod test_stubs;

pub use base::{Base, DirStatus, PostAction, WriteStatus};
pub use docs::DocsGenerator;
pub use license::LicenseGenerator;
pub use license_change::LicenseChangeGenerator;
pub use project::{generate_project, ProjectGenerator};
pub use readme::ReadmeGenerator;
pub use setup::SetupGenerator;
pub use setup_cfg::SetupCfgGenerator;
pub use test_stubs::TestsGenerator;

pub trait Generator {
    /// Type name, used as the log target.
    fn name(&self) -> &'static str;

    /// Runs the generator. `Ok(false)` is a handled failure such as an
    /// existing directory without merge or an existing file without force.
    fn generate(&mut self, ctx: &mut Context) -> Result<bool>;
}

/// State of one run: the settings registry and the host services.
pub struct Context {
    pub settings: Settings,
    host: Box<dyn Host>,
}

impl Context {
    pub fn new(host: Box<dyn Host>) -> Self {
        Self { settings: Settings::new(), host }
    }

    pub fn host(&self) -> &dyn Host {
        self.host.as_ref()
    }

    /// Clears the settings registry.
    pub fn reset(&mut self) {
        self.settings.clear();
    }

    /// Merges the values of an existing settings file into the registry.
    /// Values still holding `${...}` placeholders are ignored. Returns whether
    /// the file exists.
    pub fn seed_from_settings_file<P: AsRef<Path>>(&mut self, path: P) -> Result<bool> {
        let Some(entries) = settings_file::read(path)? else {
            return Ok(false);
        };
        for (key, value) in entries {
            if value.contains("${") {
                continue;
            }
            if key == "name" {
                self.settings.insert("projectName", value.clone());
            }
            self.settings.insert(key, value);
        }
        Ok(true)
    }

    /// Fills identity and metadata keys that have no value yet.
    pub fn apply_defaults(&mut self) {
        if !self.settings.contains("author") {
            let author = self.host.user_name();
            self.settings.insert("author", author);
        }
        if !self.settings.contains("author_email") {
            let email = self.host.user_email();
            self.settings.insert("author_email", email);
        }
        self.settings.insert_default("version", DEFAULT_VERSION);
        self.settings.insert_default("license", DEFAULT_LICENSE);
        self.settings.insert_default("description", DEFAULT_DESCRIPTION);
        self.settings.insert_default("url", "");
        self.settings.insert_default("year", chrono::Local::now().format("%Y").to_string());
    }
}

/// Source layout of the generated project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Layout {
    /// Package at the project root
    #[default]
    Basic,
    /// Package under `src/`
    Src,
}

impl Layout {
    pub fn as_str(self) -> &'static str {
        match self {
            Layout::Basic => "basic",
            Layout::Src => "src",
        }
    }

    pub fn package_dir(self) -> &'static str {
        match self {
            Layout::Basic => ".",
            Layout::Src => "src",
        }
    }
}

/// Style of the build descriptor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Descriptor {
    /// setup.cfg
    #[default]
    Cfg,
    /// setup.py
    Script,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum TestFramework {
    #[default]
    Pytest,
    Unittest,
}

impl TestFramework {
    pub fn as_str(self) -> &'static str {
        match self {
            TestFramework::Pytest => "pytest",
            TestFramework::Unittest => "unittest",
        }
    }
}

/// Options shared by all generators of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub project_dir: PathBuf,
    pub project_name: String,
    pub layout: Layout,
    pub descriptor: Descriptor,
    pub test: TestFramework,
    pub quiet: bool,
    pub merge: bool,
    pub force: bool,
    pub license: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub author_email: Option<String>,
    /// License change: print the supported licenses instead of changing
    pub list: bool,
}

impl GeneratorOptions {
    pub fn new<P: Into<PathBuf>, S: Into<String>>(project_dir: P, project_name: S) -> Self {
        Self {
            project_dir: project_dir.into(),
            project_name: project_name.into(),
            ..Self::default()
        }
    }
}

type Constructor = fn(&GeneratorOptions) -> Box<dyn Generator>;

macro_rules! constructor {
    ($generator:ty) => {{
        fn construct(options: &GeneratorOptions) -> Box<dyn Generator> {
            Box::new(<$generator>::new(options))
        }
        construct as Constructor
    }};
}

static GENERATORS: &[(&str, Constructor)] = &[
    ("project", constructor!(ProjectGenerator)),
    ("setup_cfg", constructor!(SetupCfgGenerator)),
    ("setup", constructor!(SetupGenerator)),
    ("license", constructor!(LicenseGenerator)),
    ("license_change", constructor!(LicenseChangeGenerator)),
    ("readme", constructor!(ReadmeGenerator)),
    ("docs", constructor!(DocsGenerator)),
    ("tests", constructor!(TestsGenerator)),
];

/// Builds the generator registered under `name`.
pub fn get_generator(name: &str, options: &GeneratorOptions) -> Option<Box<dyn Generator>> {
    GENERATORS
        .iter()
        .find(|(registered, _)| *registered == name)
        .map(|(_, construct)| construct(options))
}

/// Registered generator names.
pub fn generator_names() -> impl Iterator<Item = &'static str> {
    GENERATORS.iter().map(|(name, _)| *name)
}
