//! The project generator: creates the project directory, collects project
//! information and drives the per-artifact generators in a fixed order.

use std::path::Path;

use log::{debug, error, warn};
use tempfile::TempDir;

use super::license::{license_ids, resolve_license};
use super::{get_generator, Base, Context, Descriptor, DirStatus, Generator, GeneratorOptions, PostAction};
use crate::comments::strip_comments_in_file;
use crate::constants::{GITIGNORE_FILE, SETUP_CFG, VCS_COMMAND};
use crate::error::Result;
use crate::format::package_name;
use crate::settings_file;

pub const NAME: &str = "ProjectGenerator";

/// Keys of an existing setup.cfg that survive into a merged run.
const INHERITED_KEYS: [&str; 6] = ["author", "author_email", "version", "license", "description", "url"];

const INFO_FORM: &str = "info.txt";

pub struct ProjectGenerator {
    base: Base,
    options: GeneratorOptions,
}

impl ProjectGenerator {
    pub fn new(options: &GeneratorOptions) -> Self {
        Self {
            base: Base::new(NAME, options.merge, options.force),
            options: options.clone(),
        }
    }

    /// Seeds the registry: run options, defaults, values of an existing
    /// setup.cfg, then command-line overrides.
    pub fn update_settings(&self, ctx: &mut Context) -> Result<()> {
        let options = &self.options;
        let settings = &mut ctx.settings;
        settings.insert("projectName", options.project_name.as_str());
        settings.insert("projectDir", options.project_dir.display().to_string());
        settings.insert("package", package_name(&options.project_name));
        settings.insert("format", options.layout.as_str());
        settings.insert("test", options.test.as_str());
        settings.insert("licenses", license_ids());
        ctx.apply_defaults();

        if let Some(existing) = settings_file::read(options.project_dir.join(SETUP_CFG))? {
            for key in INHERITED_KEYS {
                match existing.get(key) {
                    Some(value) if !value.contains("${") => ctx.settings.insert(key, value.as_str()),
                    _ => {}
                }
            }
        }

        let overrides = [
            ("license", &options.license),
            ("description", &options.description),
            ("author", &options.author),
            ("author_email", &options.author_email),
        ];
        for (key, value) in overrides {
            if let Some(value) = value {
                ctx.settings.insert(key, value.as_str());
            }
        }
        Ok(())
    }

    /// Lets the user edit the project information in their editor. Every
    /// failure along the way leaves the current values in place.
    pub fn get_info(&self, ctx: &mut Context) -> Result<()> {
        if self.options.quiet {
            return Ok(());
        }

        let temp_dir = TempDir::new()?;
        let form = temp_dir.path().join(INFO_FORM);
        let writer = Base::new(NAME, false, true);
        let strip: PostAction = &|path: &Path| strip_comments_in_file(path, None);
        if !writer.write_file(&ctx.settings, "info", &form, &[strip])?.is_written() {
            return Ok(());
        }

        if ctx.host().open(&form, true) == -1 {
            warn!(target: NAME, "cannot open '{}', using default project information", form.display());
            return Ok(());
        }

        match settings_file::read(&form) {
            Ok(Some(entries)) => ctx.settings.update(entries),
            Ok(None) => warn!(target: NAME, "'{}' was removed, using default project information", form.display()),
            Err(e) => warn!(target: NAME, "cannot read '{}': {e}", form.display()),
        }
        Ok(())
    }

    /// Replaces an unsupported license with the default and stores supported
    /// ones in canonical form.
    pub fn check_license(&self, ctx: &mut Context) {
        let requested = ctx.settings.get_or_empty("license").to_string();
        let license = resolve_license(&requested, NAME);
        ctx.settings.insert("license", license.id);
    }

    /// Build descriptor, LICENSE and README.rst, in that order. A refused
    /// artifact does not stop the others.
    pub fn create_config_files(&self, ctx: &mut Context) -> Result<bool> {
        let descriptor = match self.options.descriptor {
            Descriptor::Cfg => "setup_cfg",
            Descriptor::Script => "setup",
        };
        // the registry already holds the validated license
        let options = GeneratorOptions { license: None, ..self.options.clone() };

        let mut done = true;
        for name in [descriptor, "license", "readme"] {
            let Some(mut generator) = get_generator(name, &options) else {
                warn!(target: NAME, "generator not found: '{name}' skipping...");
                continue;
            };
            done &= generator.generate(ctx)?;
        }
        Ok(done)
    }

    /// Optional files. Failures are logged and reported, never propagated.
    pub fn create_miscellaneous(&self, ctx: &mut Context) -> bool {
        if !ctx.host().has_command(VCS_COMMAND) {
            debug!(target: NAME, "'{VCS_COMMAND}' not found, no {GITIGNORE_FILE}");
            return true;
        }
        let target = self.options.project_dir.join(GITIGNORE_FILE);
        match self.base.write_file(&ctx.settings, GITIGNORE_FILE, &target, &[]) {
            Ok(status) => status.is_written(),
            Err(e) => {
                error!(target: NAME, "cannot create '{}': {e}", target.display());
                false
            }
        }
    }
}

impl Generator for ProjectGenerator {
    fn name(&self) -> &'static str {
        NAME
    }

    fn generate(&mut self, ctx: &mut Context) -> Result<bool> {
        ctx.reset();
        if self.base.create_dir(&self.options.project_dir, true)? == DirStatus::Exists {
            return Ok(false);
        }

        self.update_settings(ctx)?;
        self.get_info(ctx)?;
        self.check_license(ctx);
        debug!(target: NAME, "settings:\n{}", ctx.settings.to_json());

        let config = self.create_config_files(ctx)?;
        let misc = self.create_miscellaneous(ctx);
        Ok(config && misc)
    }
}

/// Generates a whole project as described by `options`.
pub fn generate_project(ctx: &mut Context, options: &GeneratorOptions) -> Result<bool> {
    ProjectGenerator::new(options).generate(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::tests::FakeHost;

    fn context() -> Context {
        Context::new(Box::new(FakeHost::default()))
    }

    #[test]
    fn test_check_license() {
        let generator = ProjectGenerator::new(&GeneratorOptions::new("/tmp/project", "project"));
        let mut ctx = context();

        ctx.settings.insert("license", "INVALID");
        generator.check_license(&mut ctx);
        assert_eq!(ctx.settings.get("license"), Some("MIT"));

        ctx.settings.insert("license", "new-bsd");
        generator.check_license(&mut ctx);
        assert_eq!(ctx.settings.get("license"), Some("NEW-BSD"));
    }

    #[test]
    fn test_cli_overrides_defaults() {
        let mut options = GeneratorOptions::new("/nonexistent/my-project", "my-project");
        options.description = Some("A demo".to_string());
        options.license = Some("gpl3".to_string());
        let generator = ProjectGenerator::new(&options);
        let mut ctx = context();
        generator.update_settings(&mut ctx).unwrap();

        assert_eq!(ctx.settings.get("description"), Some("A demo"));
        assert_eq!(ctx.settings.get("license"), Some("gpl3"));
        assert_eq!(ctx.settings.get("author"), Some("Jane Doe"));
        assert_eq!(ctx.settings.get("package"), Some("my_project"));
    }

    #[test]
    fn test_get_info_without_editor_keeps_defaults() {
        let generator = ProjectGenerator::new(&GeneratorOptions::new("/tmp/project", "project"));
        let mut ctx = context();
        generator.update_settings(&mut ctx).unwrap();
        let before = ctx.settings.clone();

        generator.get_info(&mut ctx).unwrap();
        assert_eq!(ctx.settings, before);
    }
}
