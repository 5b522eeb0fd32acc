use std::path::{Path, PathBuf};

use super::{Base, Context, Generator, GeneratorOptions, Layout, PostAction, TestFramework};
use crate::comments::strip_comments_in_file;
use crate::constants::SETUP_CFG;
use crate::error::Result;
use crate::format::package_name;

pub const NAME: &str = "SetupCfgGenerator";

/// Writes setup.cfg, the INI-style build descriptor.
pub struct SetupCfgGenerator {
    base: Base,
    project_dir: PathBuf,
    project_name: String,
    layout: Layout,
    test: TestFramework,
}

impl SetupCfgGenerator {
    pub fn new(options: &GeneratorOptions) -> Self {
        Self {
            base: Base::new(NAME, options.merge, options.force),
            project_dir: options.project_dir.clone(),
            project_name: options.project_name.clone(),
            layout: options.layout,
            test: options.test,
        }
    }

    /// Layout and test-framework dependent values of the setup.cfg template.
    pub fn update_settings(&self, ctx: &mut Context) {
        apply_descriptor_settings(ctx, &self.project_name, self.layout, self.test);
    }
}

pub(crate) fn apply_descriptor_settings(
    ctx: &mut Context,
    project_name: &str,
    layout: Layout,
    test: TestFramework,
) {
    ctx.settings.insert_default("projectName", project_name);
    ctx.apply_defaults();

    let package = package_name(ctx.settings.get_or_empty("projectName"));
    let settings = &mut ctx.settings;
    settings.insert("package", package);
    settings.insert("format", layout.as_str());
    settings.insert("test", test.as_str());
    settings.insert("package_dir", layout.package_dir());
    let (tests_require, setup_requires, addopts) = match test {
        TestFramework::Pytest => ("pytest", "pytest-runner", "tests --verbose"),
        TestFramework::Unittest => ("", "", ""),
    };
    settings.insert("tests_require", tests_require);
    settings.insert("setup_requires", setup_requires);
    settings.insert("test_addopts", addopts);
}

impl Generator for SetupCfgGenerator {
    fn name(&self) -> &'static str {
        NAME
    }

    fn generate(&mut self, ctx: &mut Context) -> Result<bool> {
        self.update_settings(ctx);
        let target = self.project_dir.join(SETUP_CFG);
        let strip: PostAction = &|path: &Path| strip_comments_in_file(path, None);
        let status = self.base.write_file(&ctx.settings, "setup_cfg", &target, &[strip])?;
        Ok(status.is_written())
    }
}
