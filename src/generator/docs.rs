use std::path::PathBuf;

use super::{Base, Context, DirStatus, Generator, GeneratorOptions};
use crate::constants::{DOCS_DIR, DOCS_SUBDIRS};
use crate::error::Result;

pub const NAME: &str = "DocsGenerator";

/// Template name and file name of every docs skeleton file.
const DOCS_FILES: [(&str, &str); 4] = [
    ("docs_conf", "conf.py"),
    ("docs_index", "index.rst"),
    ("docs_makefile", "Makefile"),
    ("docs_make_bat", "make.bat"),
];

/// Creates the `docs/` tree of a Sphinx project.
pub struct DocsGenerator {
    base: Base,
    project_dir: PathBuf,
    project_name: String,
}

impl DocsGenerator {
    pub fn new(options: &GeneratorOptions) -> Self {
        Self {
            base: Base::new(NAME, options.merge, options.force),
            project_dir: options.project_dir.clone(),
            project_name: options.project_name.clone(),
        }
    }

    pub fn docs_dir(&self) -> PathBuf {
        self.project_dir.join(DOCS_DIR)
    }

    pub fn update_settings(&self, ctx: &mut Context) {
        ctx.settings.insert_default("projectName", self.project_name.as_str());
        ctx.apply_defaults();
        let title = format!("{} Documentation", ctx.settings.get_or_empty("projectName"));
        let settings = &mut ctx.settings;
        settings.insert("docsDir", self.docs_dir().display().to_string());
        settings.insert("doc_line", "=".repeat(title.chars().count()));
        settings.insert("doc_title", title);
    }
}

impl Generator for DocsGenerator {
    fn name(&self) -> &'static str {
        NAME
    }

    fn generate(&mut self, ctx: &mut Context) -> Result<bool> {
        let docs_dir = self.docs_dir();
        if self.base.create_dir(&docs_dir, true)? == DirStatus::Exists {
            return Ok(false);
        }
        for subdir in DOCS_SUBDIRS {
            if !self.base.create_dir(&docs_dir.join(subdir), false)?.is_usable() {
                return Ok(false);
            }
        }

        self.update_settings(ctx);
        let mut done = true;
        for (template, file) in DOCS_FILES {
            let status = self.base.write_file(&ctx.settings, template, &docs_dir.join(file), &[])?;
            done &= status.is_written();
        }
        Ok(done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::tests::FakeHost;

    #[test]
    fn test_doc_title_underline() {
        let options = GeneratorOptions::new("/tmp/demo", "demo");
        let generator = DocsGenerator::new(&options);
        let mut ctx = Context::new(Box::new(FakeHost::default()));
        generator.update_settings(&mut ctx);

        assert_eq!(ctx.settings.get("doc_title"), Some("demo Documentation"));
        assert_eq!(ctx.settings.get_or_empty("doc_line").len(), "demo Documentation".len());
    }
}
