//! Deploy manifest narrowing
//!
//! An SDF project deploys whatever `src/deploy.xml` enumerates. To deploy a
//! single object, the manifest is backed up and overwritten with a template
//! whose configuration/files/translation globs point at sentinel
//! do-not-deploy paths, leaving only the staging subfolder in scope.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CabinetError, CabinetResult};

/// Scratch subfolder under `src/Objects/` holding the one staged object.
pub const STAGING_DIR: &str = ".cabinet-staging";

/// Manifest location relative to the project root.
pub const MANIFEST_RELATIVE: &str = "src/deploy.xml";

pub fn manifest_path(project_root: &Path) -> PathBuf {
    project_root.join(MANIFEST_RELATIVE)
}

pub fn manifest_backup_path(project_root: &Path) -> PathBuf {
    project_root.join("src/deploy.xml.bak")
}

/// The narrowed manifest: only objects in the staging subfolder deploy.
pub fn scoped_manifest() -> String {
    format!(
        r#"<deploy>
    <configuration>
        <path>~/AccountConfiguration/do-not-deploy/*</path>
    </configuration>
    <files>
        <path>~/FileCabinet/do-not-deploy/*</path>
    </files>
    <objects>
        <path>~/Objects/{staging}/*</path>
    </objects>
    <translationimports>
        <path>~/Translations/do-not-deploy/*</path>
    </translationimports>
</deploy>
"#,
        staging = STAGING_DIR
    )
}

/// Copy the manifest to `deploy.xml.bak`, overwriting any prior backup.
pub fn backup_manifest(project_root: &Path) -> CabinetResult<()> {
    let manifest = manifest_path(project_root);
    if !manifest.is_file() {
        return Err(CabinetError::ManifestNotFound { path: manifest });
    }
    fs::copy(&manifest, manifest_backup_path(project_root))?;
    Ok(())
}

/// Overwrite the live manifest with the narrowed template.
pub fn write_scoped_manifest(project_root: &Path) -> CabinetResult<()> {
    fs::write(manifest_path(project_root), scoped_manifest())?;
    Ok(())
}

/// Rename the backup back onto the live manifest.
///
/// A distinct step so the restore can be asserted on independently of
/// staging teardown.
pub fn restore_manifest(project_root: &Path) -> CabinetResult<()> {
    fs::rename(manifest_backup_path(project_root), manifest_path(project_root))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const ORIGINAL_MANIFEST: &str = "<deploy>\n    <files>\n        <path>~/FileCabinet/*</path>\n    </files>\n</deploy>\n";

    fn project_with_manifest() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(manifest_path(dir.path()), ORIGINAL_MANIFEST).unwrap();
        dir
    }

    #[test]
    fn scoped_manifest_targets_only_the_staging_folder() {
        let xml = scoped_manifest();
        assert!(xml.contains("<objects>"));
        assert!(xml.contains(&format!("~/Objects/{}/*", STAGING_DIR)));
        assert_eq!(xml.matches("do-not-deploy").count(), 3);
    }

    #[test]
    fn backup_then_restore_round_trips() {
        let dir = project_with_manifest();

        backup_manifest(dir.path()).unwrap();
        write_scoped_manifest(dir.path()).unwrap();
        assert_eq!(
            fs::read_to_string(manifest_path(dir.path())).unwrap(),
            scoped_manifest()
        );

        restore_manifest(dir.path()).unwrap();
        assert_eq!(
            fs::read_to_string(manifest_path(dir.path())).unwrap(),
            ORIGINAL_MANIFEST
        );
        assert!(!manifest_backup_path(dir.path()).exists());
    }

    #[test]
    fn backup_overwrites_stale_backup() {
        let dir = project_with_manifest();
        fs::write(manifest_backup_path(dir.path()), "stale").unwrap();

        backup_manifest(dir.path()).unwrap();

        assert_eq!(
            fs::read_to_string(manifest_backup_path(dir.path())).unwrap(),
            ORIGINAL_MANIFEST
        );
    }

    #[test]
    fn backup_fails_without_manifest() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();

        let err = backup_manifest(dir.path()).unwrap_err();
        assert!(matches!(err, CabinetError::ManifestNotFound { .. }));
    }
}
