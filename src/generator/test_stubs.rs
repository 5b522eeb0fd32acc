use std::path::PathBuf;

use super::{Base, Context, DirStatus, Generator, GeneratorOptions, TestFramework};
use crate::constants::TESTS_DIR;
use crate::error::Result;
use crate::format::package_name;

pub const NAME: &str = "TestsGenerator";

/// Creates `tests/` with a package marker and a first test module.
pub struct TestsGenerator {
    base: Base,
    project_dir: PathBuf,
    project_name: String,
    test: TestFramework,
}

impl TestsGenerator {
    pub fn new(options: &GeneratorOptions) -> Self {
        Self {
            base: Base::new(NAME, options.merge, options.force),
            project_dir: options.project_dir.clone(),
            project_name: options.project_name.clone(),
            test: options.test,
        }
    }

    pub fn tests_dir(&self) -> PathBuf {
        self.project_dir.join(TESTS_DIR)
    }

    /// Template of `test_main.py` for the selected framework.
    pub fn main_template(&self) -> &'static str {
        match self.test {
            TestFramework::Pytest => "test_main_pytest",
            TestFramework::Unittest => "test_main_unittest",
        }
    }

    pub fn update_settings(&self, ctx: &mut Context) {
        ctx.settings.insert_default("projectName", self.project_name.as_str());
        ctx.apply_defaults();
        let package = package_name(ctx.settings.get_or_empty("projectName"));
        ctx.settings.insert_default("package", package);
        ctx.settings.insert("test", self.test.as_str());
        ctx.settings.insert("testsDir", self.tests_dir().display().to_string());
    }
}

impl Generator for TestsGenerator {
    fn name(&self) -> &'static str {
        NAME
    }

    fn generate(&mut self, ctx: &mut Context) -> Result<bool> {
        let tests_dir = self.tests_dir();
        if self.base.create_dir(&tests_dir, true)? == DirStatus::Exists {
            return Ok(false);
        }

        self.update_settings(ctx);
        let init = self.base.write_file(&ctx.settings, "test_init", &tests_dir.join("__init__.py"), &[])?;
        let main = self
            .base
            .write_file(&ctx.settings, self.main_template(), &tests_dir.join("test_main.py"), &[])?;
        Ok(init.is_written() && main.is_written())
    }
}
