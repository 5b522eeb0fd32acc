use std::path::PathBuf;

use log::warn;

use super::{Base, Context, Generator, GeneratorOptions};
use crate::constants::{DEFAULT_LICENSE, LICENSE_FILE};
use crate::error::Result;

pub const NAME: &str = "LicenseGenerator";

/// A supported license: canonical id, template and full name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LicenseInfo {
    pub id: &'static str,
    pub template: &'static str,
    pub title: &'static str,
}

pub const LICENSES: &[LicenseInfo] = &[
    LicenseInfo { id: "APACHE", template: "license_apache_2.0", title: "Apache License 2.0" },
    LicenseInfo { id: "CC0", template: "license_cc0_1.0", title: "Creative Commons Zero v1.0 Universal" },
    LicenseInfo { id: "GPL2", template: "license_gpl_2.0", title: "GNU General Public License v2.0" },
    LicenseInfo { id: "GPL3", template: "license_gpl_3.0", title: "GNU General Public License v3.0" },
    LicenseInfo { id: "LGPL2", template: "license_lgpl_2.1", title: "GNU Lesser General Public License v2.1" },
    LicenseInfo { id: "LGPL3", template: "license_lgpl_3.0", title: "GNU Lesser General Public License v3.0" },
    LicenseInfo { id: "MIT", template: "license_mit", title: "MIT License" },
    LicenseInfo { id: "MOZILLA", template: "license_mozilla", title: "Mozilla Public License 2.0" },
    LicenseInfo { id: "NEW-BSD", template: "license_new-bsd", title: "BSD 3-Clause \"New\" or \"Revised\" License" },
    LicenseInfo { id: "SIMPLE-BSD", template: "license_simplified-bsd", title: "BSD 2-Clause \"Simplified\" License" },
];

/// Case-insensitive catalogue lookup.
pub fn find_license(id: &str) -> Option<&'static LicenseInfo> {
    let id = id.trim();
    LICENSES.iter().find(|license| license.id.eq_ignore_ascii_case(id))
}

pub fn is_supported_license(id: &str) -> bool {
    find_license(id).is_some()
}

/// Canonical uppercase id of a supported license.
pub fn canonical_license(id: &str) -> Option<&'static str> {
    find_license(id).map(|license| license.id)
}

/// Comma separated ids, for the info form.
pub fn license_ids() -> String {
    LICENSES.iter().map(|license| license.id).collect::<Vec<_>>().join(", ")
}

/// One `ID  title` line per supported license.
pub fn license_table() -> String {
    let width = LICENSES.iter().map(|license| license.id.len()).max().unwrap_or_default();
    LICENSES
        .iter()
        .map(|license| format!("{:<width$}  {}", license.id, license.title))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Resolves `requested` against the catalogue, falling back to the default
/// license with a warning when it is unsupported.
pub fn resolve_license(requested: &str, target: &str) -> &'static LicenseInfo {
    if let Some(license) = find_license(requested) {
        return license;
    }
    warn!(
        target: target,
        "Invalid license: '{requested}'\n\
         default '{DEFAULT_LICENSE}' license will be used.\n\
         * You can change the license later with 'license' sub-command.\n\
         For help, see 'pyskel license -h/--help'."
    );
    find_license(DEFAULT_LICENSE).unwrap_or(&LICENSES[6])
}

/// Writes LICENSE.
pub struct LicenseGenerator {
    base: Base,
    project_dir: PathBuf,
    license: Option<String>,
}

impl LicenseGenerator {
    pub fn new(options: &GeneratorOptions) -> Self {
        Self {
            base: Base::new(NAME, options.merge, options.force),
            project_dir: options.project_dir.clone(),
            license: options.license.clone(),
        }
    }

    pub fn license_file(&self) -> PathBuf {
        self.project_dir.join(LICENSE_FILE)
    }

    /// Validated license for this run; also stored in the settings.
    pub fn update_settings(&self, ctx: &mut Context) -> &'static LicenseInfo {
        ctx.apply_defaults();
        let requested = match &self.license {
            Some(license) => license.clone(),
            None => ctx.settings.get_or_empty("license").to_string(),
        };
        let license = resolve_license(&requested, NAME);
        ctx.settings.insert("license", license.id);
        license
    }
}

impl Generator for LicenseGenerator {
    fn name(&self) -> &'static str {
        NAME
    }

    fn generate(&mut self, ctx: &mut Context) -> Result<bool> {
        let license = self.update_settings(ctx);
        let status = self.base.write_file(&ctx.settings, license.template, &self.license_file(), &[])?;
        Ok(status.is_written())
    }
}
