use std::path::PathBuf;

use log::info;

use super::setup_cfg::apply_descriptor_settings;
use super::{Base, Context, Generator, GeneratorOptions, Layout, TestFramework};
use crate::comments::strip_comments;
use crate::constants::{SETUP_CFG, SETUP_PY};
use crate::error::Result;
use crate::format::{escape, format_extras, format_value, package_name, python_requires, FormatMode};
use crate::settings::Settings;
use crate::settings_file::{self, Entries, Sections};
use crate::templates::get_template;

pub const NAME: &str = "SetupGenerator";

/// setup.cfg keys copied into setup.py as plain string literals
const SCALAR_KEYS: [&str; 7] = ["name", "version", "url", "author", "author_email", "description", "license"];

/// Writes setup.py. Its values come from the project's setup.cfg when there
/// is one, otherwise from the setup.cfg template rendered in memory.
pub struct SetupGenerator {
    base: Base,
    project_dir: PathBuf,
    project_name: String,
    layout: Layout,
    test: TestFramework,
}

impl SetupGenerator {
    pub fn new(options: &GeneratorOptions) -> Self {
        Self {
            base: Base::new(NAME, options.merge, options.force),
            project_dir: options.project_dir.clone(),
            project_name: options.project_name.clone(),
            layout: options.layout,
            test: options.test,
        }
    }

    fn descriptor_sections(&self, ctx: &Context) -> Result<Sections> {
        let cfg_path = self.project_dir.join(SETUP_CFG);
        if let Some(sections) = settings_file::read_sections(&cfg_path)? {
            info!(target: NAME, "reading settings from '{}'", cfg_path.display());
            return Ok(sections);
        }
        let rendered = get_template("setup_cfg")
            .map(|template| strip_comments(&template.substitute(&ctx.settings)))
            .unwrap_or_default();
        Ok(settings_file::parse_sections(&rendered))
    }

    /// Settings for setup.py: a copy of the registry with the setup.cfg
    /// values converted into python literal syntax. The registry itself only
    /// receives the descriptor settings shared with setup.cfg.
    pub fn literal_settings(&self, ctx: &mut Context) -> Result<Settings> {
        apply_descriptor_settings(ctx, &self.project_name, self.layout, self.test);
        let sections = self.descriptor_sections(ctx)?;
        let extras = sections.get("options.extras_require").cloned().unwrap_or_default();
        let entries = settings_file::flatten(sections);
        let value = |key: &str| entries.get(key).map(String::as_str).unwrap_or("");

        let mut settings = ctx.settings.clone();
        for key in SCALAR_KEYS {
            let raw = entries.get(key).map(String::as_str).or_else(|| settings.get(key));
            if let Some(literal) = raw.map(escape) {
                settings.insert(key, literal);
            }
        }
        if !entries.contains_key("name") && !ctx.settings.contains("name") {
            let name = escape(settings.get_or_empty("projectName"));
            settings.insert("name", name);
        }
        let package = package_name(entries.get("name").map(String::as_str).unwrap_or(&self.project_name));
        settings.insert("package", package);

        let package_dir = package_dir_value(&entries);
        let where_ = entries
            .get("where")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| package_dir.clone());
        settings.insert("package_dir", escape(&package_dir));
        settings.insert("where", escape(&where_));

        settings.insert("python_requires", python_requires(value("classifiers")));
        settings.insert("classifiers", format_value(value("classifiers"), FormatMode::MultiLineList));
        settings.insert("exclude", format_value(value("exclude"), FormatMode::SingleLineList));
        for key in ["install_requires", "setup_requires", "tests_require"] {
            settings.insert(key, format_value(value(key), FormatMode::MultiLineList));
        }
        settings.insert("extras_require", format_extras(&extras));
        settings.insert("zip_safe", python_bool(value("zip_safe"), false));
        settings.insert("include_package_data", python_bool(value("include_package_data"), true));
        Ok(settings)
    }
}

/// `package_dir` is written as a mapping (`= src`); only the directory matters.
fn package_dir_value(entries: &Entries) -> String {
    entries
        .get("package_dir")
        .map(|v| v.lines().last().unwrap_or("").trim_start_matches('=').trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| ".".to_string())
}

fn python_bool(value: &str, default: bool) -> &'static str {
    let truthy = match value.trim().to_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => true,
        "0" | "no" | "false" | "off" => false,
        _ => default,
    };
    if truthy {
        "True"
    } else {
        "False"
    }
}

impl Generator for SetupGenerator {
    fn name(&self) -> &'static str {
        NAME
    }

    fn generate(&mut self, ctx: &mut Context) -> Result<bool> {
        let settings = self.literal_settings(ctx)?;
        let target = self.project_dir.join(SETUP_PY);
        let status = self.base.write_file(&settings, "setup", &target, &[])?;
        Ok(status.is_written())
    }
}
