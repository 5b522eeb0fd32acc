//! Built-in template catalogue.
//!
//! Templates are embedded at compile time from the `templates/` directory
//! and looked up by symbolic name. An unknown name yields `None`; callers
//! warn and skip the artifact.

use crate::renderer::safe_substitute;
use crate::settings::Settings;

/// A named, immutable text template with `${token}` placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub name: &'static str,
    pub text: &'static str,
}

impl Template {
    /// Renders the template, leaving unresolved placeholders untouched.
    pub fn substitute(&self, settings: &Settings) -> String {
        safe_substitute(self.text, settings)
    }
}

macro_rules! catalogue {
    ($($name:literal => $file:literal),+ $(,)?) => {
        &[$(Template { name: $name, text: include_str!(concat!("../templates/", $file)) }),+]
    };
}

static TEMPLATES: &[Template] = catalogue! {
    "info" => "info.tpl",
    "setup_cfg" => "setup_cfg.tpl",
    "setup" => "setup.tpl",
    "readme" => "readme.tpl",
    ".gitignore" => "gitignore.tpl",
    "docs_conf" => "docs_conf.tpl",
    "docs_index" => "docs_index.tpl",
    "docs_makefile" => "docs_makefile.tpl",
    "docs_make_bat" => "docs_make_bat.tpl",
    "test_init" => "test_init.tpl",
    "test_main_pytest" => "test_main_pytest.tpl",
    "test_main_unittest" => "test_main_unittest.tpl",
    "license_apache_2.0" => "license_apache_2.0.tpl",
    "license_cc0_1.0" => "license_cc0_1.0.tpl",
    "license_gpl_2.0" => "license_gpl_2.0.tpl",
    "license_gpl_3.0" => "license_gpl_3.0.tpl",
    "license_lgpl_2.1" => "license_lgpl_2.1.tpl",
    "license_lgpl_3.0" => "license_lgpl_3.0.tpl",
    "license_mit" => "license_mit.tpl",
    "license_mozilla" => "license_mozilla.tpl",
    "license_new-bsd" => "license_new-bsd.tpl",
    "license_simplified-bsd" => "license_simplified-bsd.tpl",
};

/// Looks up a template by name.
pub fn get_template(name: &str) -> Option<Template> {
    TEMPLATES.iter().find(|template| template.name == name).copied()
}

/// Names of every template in the catalogue.
pub fn template_names() -> impl Iterator<Item = &'static str> {
    TEMPLATES.iter().map(|template| template.name)
}
