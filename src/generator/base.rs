use std::fs::{DirBuilder, File};
use std::io::{self, Write};
use std::path::Path;

use log::{error, info, warn};

use crate::constants::{DIR_MODE, FORCE_HINT, MERGE_HINT};
use crate::error::{Error, Result};
use crate::settings::Settings;
use crate::templates::get_template;

/// Outcome of [`Base::create_dir`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirStatus {
    Created,
    /// Existed already and merging was allowed
    Merged,
    /// Existed already and merging was not allowed
    Exists,
}

impl DirStatus {
    pub fn is_usable(self) -> bool {
        self != DirStatus::Exists
    }
}

/// Outcome of [`Base::write_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    Created,
    Overwritten,
    /// Existed already and force was not set; the file was not touched
    Skipped,
    /// The template name is not in the catalogue
    TemplateNotFound,
}

impl WriteStatus {
    pub fn is_written(self) -> bool {
        matches!(self, WriteStatus::Created | WriteStatus::Overwritten)
    }
}

/// Runs on a freshly written file, in order, after it has been synced and
/// closed.
pub type PostAction<'a> = &'a dyn Fn(&Path) -> Result<()>;

/// Capabilities shared by every generator: directory creation under the
/// merge policy and template rendering under the force policy. Log records
/// carry the owning generator's name as target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Base {
    name: &'static str,
    pub merge: bool,
    pub force: bool,
}

impl Base {
    pub fn new(name: &'static str, merge: bool, force: bool) -> Self {
        Self { name, merge, force }
    }

    /// Creates `path` with mode 0755. An existing directory is reused when
    /// merging and refused otherwise; neither case touches the filesystem.
    pub fn create_dir(&self, path: &Path, recursive: bool) -> Result<DirStatus> {
        if path.exists() {
            if self.merge {
                info!(target: self.name, "directory exists: '{}' merging...", path.display());
                return Ok(DirStatus::Merged);
            }
            error!(
                target: self.name,
                "directory already exists: '{}'\n{MERGE_HINT}",
                path.display()
            );
            return Ok(DirStatus::Exists);
        }

        if let Err(e) = make_dir(path, recursive) {
            error!(target: self.name, "cannot create directory '{}': {e}", path.display());
            return Err(Error::IoError(e));
        }
        info!(target: self.name, "created directory: '{}'", path.display());
        Ok(DirStatus::Created)
    }

    /// Renders `template_name` into `target`. An existing target is only
    /// replaced when forcing. Write, sync and post-action failures are
    /// logged and returned.
    pub fn write_file(
        &self,
        settings: &Settings,
        template_name: &str,
        target: &Path,
        post_actions: &[PostAction],
    ) -> Result<WriteStatus> {
        let Some(template) = get_template(template_name) else {
            warn!(target: self.name, "template not found: '{template_name}' skipping...");
            return Ok(WriteStatus::TemplateNotFound);
        };

        let status = if target.exists() {
            info!(target: self.name, "file exists: '{}'", target.display());
            if !self.force {
                info!(target: self.name, "{FORCE_HINT}");
                return Ok(WriteStatus::Skipped);
            }
            info!(target: self.name, "overwriting...");
            WriteStatus::Overwritten
        } else {
            WriteStatus::Created
        };

        let content = template.substitute(settings);
        if let Err(source) = write_synced(target, &content) {
            error!(target: self.name, "cannot write '{}': {source}", target.display());
            return Err(Error::WriteError { path: target.display().to_string(), source });
        }

        for action in post_actions {
            if let Err(e) = action(target) {
                error!(target: self.name, "post-processing of '{}' failed: {e}", target.display());
                return Err(e);
            }
        }

        info!(target: self.name, "created file: '{}'", target.display());
        Ok(status)
    }
}

fn write_synced(path: &Path, content: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    file.flush()?;
    file.sync_all()
}

fn make_dir(path: &Path, recursive: bool) -> io::Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(recursive);
    #[cfg(unix)]
    {
        use std::os::unix::fs::{DirBuilderExt, PermissionsExt};
        builder.mode(DIR_MODE);
        builder.create(path)?;
        // the umask may have narrowed the mode
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(DIR_MODE))
    }
    #[cfg(not(unix))]
    {
        let _ = DIR_MODE;
        builder.create(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_dir_status_is_usable() {
        assert!(DirStatus::Created.is_usable());
        assert!(DirStatus::Merged.is_usable());
        assert!(!DirStatus::Exists.is_usable());
    }

    #[test]
    fn test_missing_template_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("out.txt");
        let base = Base::new("Demo", false, true);

        let status = base.write_file(&Settings::new(), "invalid", &target, &[]).unwrap();
        assert_eq!(status, WriteStatus::TemplateNotFound);
        assert!(!target.exists());
    }
}
