use std::path::PathBuf;

use super::{Base, Context, Generator, GeneratorOptions};
use crate::constants::README_FILE;
use crate::error::Result;

pub const NAME: &str = "ReadmeGenerator";

/// Writes README.rst with a title decoration as wide as the project name.
pub struct ReadmeGenerator {
    base: Base,
    project_dir: PathBuf,
    project_name: String,
}

impl ReadmeGenerator {
    pub fn new(options: &GeneratorOptions) -> Self {
        Self {
            base: Base::new(NAME, options.merge, options.force),
            project_dir: options.project_dir.clone(),
            project_name: options.project_name.clone(),
        }
    }

    pub fn update_settings(&self, ctx: &mut Context) {
        ctx.settings.insert_default("projectName", self.project_name.as_str());
        ctx.apply_defaults();
        let width = ctx.settings.get_or_empty("projectName").chars().count();
        ctx.settings.insert("line", "*".repeat(width));
    }
}

impl Generator for ReadmeGenerator {
    fn name(&self) -> &'static str {
        NAME
    }

    fn generate(&mut self, ctx: &mut Context) -> Result<bool> {
        self.update_settings(ctx);
        let target = self.project_dir.join(README_FILE);
        let status = self.base.write_file(&ctx.settings, "readme", &target, &[])?;
        Ok(status.is_written())
    }
}
