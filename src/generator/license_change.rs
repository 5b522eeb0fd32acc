use std::path::PathBuf;

use log::{error, info, warn};

use super::license::{find_license, license_table, LicenseInfo};
use super::{Base, Context, Generator, GeneratorOptions};
use crate::constants::{LICENSE_FILE, SETUP_CFG, SETUP_PY};
use crate::error::Result;
use crate::settings_file;

pub const NAME: &str = "LicenseChangeGenerator";

/// Switches an existing project to another license: retargets the `license`
/// field of its build descriptors and rewrites LICENSE.
pub struct LicenseChangeGenerator {
    base: Base,
    project_dir: PathBuf,
    project_name: String,
    license: Option<String>,
    list: bool,
}

impl LicenseChangeGenerator {
    pub fn new(options: &GeneratorOptions) -> Self {
        Self {
            // LICENSE is always replaced
            base: Base::new(NAME, options.merge, true),
            project_dir: options.project_dir.clone(),
            project_name: options.project_name.clone(),
            license: options.license.clone(),
            list: options.list,
        }
    }

    fn requested(&self) -> Option<&'static LicenseInfo> {
        let Some(requested) = self.license.as_deref() else {
            error!(target: NAME, "no license given, try 'pyskel license --list'");
            return None;
        };
        let license = find_license(requested);
        if license.is_none() {
            warn!(
                target: NAME,
                "Invalid license: '{requested}'. Supported licenses:\n{}",
                license_table()
            );
        }
        license
    }

    pub fn update_settings(&self, ctx: &mut Context, license: &LicenseInfo) {
        ctx.settings.insert_default("projectName", self.project_name.as_str());
        ctx.settings.insert("license", license.id);
        ctx.settings.insert("today", chrono::Local::now().format("%Y-%m-%d").to_string());
        ctx.apply_defaults();
    }

    /// Rewrites `license` in whichever descriptors exist. Returns how many
    /// files were changed.
    fn retarget_descriptors(&self, license: &LicenseInfo) -> Result<usize> {
        let mut changed = 0;
        for file in [SETUP_CFG, SETUP_PY] {
            let path = self.project_dir.join(file);
            if settings_file::replace_value(&path, "license", license.id)? {
                info!(target: NAME, "license set to '{}' in '{}'", license.id, path.display());
                changed += 1;
            }
        }
        Ok(changed)
    }
}

impl Generator for LicenseChangeGenerator {
    fn name(&self) -> &'static str {
        NAME
    }

    fn generate(&mut self, ctx: &mut Context) -> Result<bool> {
        if self.list {
            println!("{}", license_table());
            return Ok(true);
        }
        let Some(license) = self.requested() else {
            return Ok(false);
        };

        self.update_settings(ctx, license);
        if self.retarget_descriptors(license)? == 0 {
            warn!(target: NAME, "no build descriptor found in '{}'", self.project_dir.display());
        }
        let target = self.project_dir.join(LICENSE_FILE);
        let status = self.base.write_file(&ctx.settings, license.template, &target, &[])?;
        Ok(status.is_written())
    }
}
