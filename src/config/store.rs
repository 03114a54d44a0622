use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{AppError, AppResult};

use super::paths;
use super::rc_file::{ConfigFile, Section};

/// Load/merge/save access to one `.astrarc` file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn discover() -> AppResult<Self> {
        Ok(Self::at(paths::default_config_file()?))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Creates an empty file when none is present. Returns whether one was created.
    pub fn ensure_exists(&self) -> AppResult<bool> {
        if self.exists() {
            return Ok(false);
        }

        let mut options = OpenOptions::new();
        options.write(true).create_new(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;

            options.mode(0o600);
        }

        match options.open(&self.path) {
            Ok(_) => {
                info!(path = %self.path.display(), "created empty configuration file");
                Ok(true)
            }
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => Ok(false),
            Err(err) => Err(AppError::file(&self.path, err)),
        }
    }

    pub fn load(&self) -> AppResult<ConfigFile> {
        self.ensure_exists()?;
        load_from(&self.path)
    }

    /// Raw value of `key` in `section`; `None` when either is unknown.
    pub fn read(&self, section: &str, key: &str) -> AppResult<Option<String>> {
        let file = self.load()?;
        Ok(file.get(section, key).map(ToOwned::to_owned))
    }

    pub fn save(&self, updates: &ConfigFile) -> AppResult<ConfigFile> {
        save_to(updates, &self.path)
    }

    pub fn save_value(&self, section: &str, key: &str, value: &str) -> AppResult<ConfigFile> {
        let mut updates = ConfigFile::new();
        updates.insert_section(section, Section::from_iter([(key, value)]));
        self.save(&updates)
    }
}

/// Parses an existing file. A missing file is an error here.
pub fn load_from(path: &Path) -> AppResult<ConfigFile> {
    debug!(path = %path.display(), "loading configuration file");
    let raw = fs::read_to_string(path).map_err(|err| AppError::file(path, err))?;
    ConfigFile::parse(&raw, &source_name(path))
}

/// Merges `updates` into `destination` (or writes them as-is when it does not
/// exist yet) and returns what ended up on disk.
pub fn save_to(updates: &ConfigFile, destination: &Path) -> AppResult<ConfigFile> {
    updates.validate()?;

    let merged = if destination.exists() {
        let mut existing = load_from(destination)?;
        for name in updates.section_names() {
            info!("+ updating [{name}]");
        }
        existing.merge(updates);
        existing
    } else {
        updates.clone()
    };

    write_file(destination, &merged.serialize())?;
    info!(
        path = %destination.display(),
        "configuration file has been successfully updated"
    );

    Ok(merged)
}

fn write_file(path: &Path, payload: &str) -> AppResult<()> {
    fs::write(path, payload).map_err(|err| AppError::file(path, err))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let mut perms = fs::metadata(path)
            .map_err(|err| AppError::file(path, err))?
            .permissions();
        perms.set_mode(0o600);
        fs::set_permissions(path, perms).map_err(|err| AppError::file(path, err))?;
    }

    Ok(())
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> ConfigStore {
        ConfigStore::at(dir.path().join(".astrarc"))
    }

    #[test]
    fn ensure_exists_creates_once() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);

        assert!(!store.exists());
        assert!(store.ensure_exists().expect("first call"));
        assert!(!store.ensure_exists().expect("second call"));
        assert!(store.exists());
    }

    #[test]
    fn ensure_exists_reports_unwritable_location() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ConfigStore::at(dir.path().join("missing-dir").join(".astrarc"));

        let error = store.ensure_exists().unwrap_err();
        assert!(matches!(error, AppError::File { .. }));
    }

    #[test]
    fn load_of_absent_file_is_empty_and_creates_it() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);

        let file = store.load().expect("load");
        assert!(file.is_empty());
        assert!(store.exists());
    }

    #[test]
    fn load_from_missing_path_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let error = load_from(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(error, AppError::File { .. }));
    }

    #[test]
    fn read_returns_none_for_unknown_data() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        store.save_value("default", "TOKEN", "T").expect("save");

        assert_eq!(store.read("nonexistent", "k").expect("read"), None);
        assert_eq!(store.read("default", "missing_key").expect("read"), None);
        assert_eq!(store.read("default", "TOKEN").expect("read").as_deref(), Some("T"));
    }

    #[test]
    fn save_merges_into_existing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        fs::write(store.path(), "[p]\na=1\nb=2\n").expect("seed");

        let mut updates = ConfigFile::new();
        updates.set("p", "b", "9");
        updates.set("p", "c", "3");
        store.save(&updates).expect("save");

        let reloaded = store.load().expect("reload");
        let p = reloaded.section("p").expect("p");
        assert_eq!(p.iter().collect::<Vec<_>>(), [("a", "1"), ("b", "9"), ("c", "3")]);
    }

    #[test]
    fn save_appends_unknown_profile() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        fs::write(store.path(), "[default]\nTOKEN=T\n").expect("seed");

        store.save_value("q", "x", "1").expect("save");

        let reloaded = store.load().expect("reload");
        assert_eq!(reloaded.section_names().collect::<Vec<_>>(), ["default", "q"]);
        assert_eq!(reloaded.get("default", "TOKEN"), Some("T"));
        assert_eq!(reloaded.get("q", "x"), Some("1"));
    }

    #[test]
    fn save_to_new_destination_writes_updates_only() {
        let dir = tempfile::tempdir().expect("tempdir");
        let destination = dir.path().join("other-rc");

        let mut updates = ConfigFile::new();
        updates.set("default", "TOKEN", "T");
        let written = save_to(&updates, &destination).expect("save");

        assert_eq!(written, updates);
        assert_eq!(load_from(&destination).expect("load"), updates);
    }

    #[test]
    fn save_refuses_to_overwrite_malformed_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        fs::write(store.path(), "[default]\nbroken\n").expect("seed");

        let error = store.save_value("default", "TOKEN", "T").unwrap_err();
        assert!(matches!(error, AppError::Format { .. }));
        assert_eq!(
            fs::read_to_string(store.path()).expect("read"),
            "[default]\nbroken\n"
        );
    }

    #[test]
    fn save_rejects_values_the_parser_cannot_read_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        fs::write(store.path(), "[default]\nTOKEN=T\n").expect("seed");

        let rejected = [
            ("default", "ASTRA_DB_APPLICATION_TOKEN", "AstraCS:a\nb"),
            ("default", "TOKEN", "T\r"),
            ("p", "a=b", "1"),
            ("p", " ", "1"),
            ("p", "#k", "1"),
            ("p", "[k", "1"),
            ("p\nq", "k", "1"),
            (" p", "k", "1"),
        ];
        for (section, key, value) in rejected {
            let error = store.save_value(section, key, value).unwrap_err();
            assert!(
                matches!(error, AppError::InvalidInput(_)),
                "expected invalid input for [{section:?}] {key:?}={value:?}, got {error:?}"
            );
        }

        assert_eq!(
            fs::read_to_string(store.path()).expect("read"),
            "[default]\nTOKEN=T\n"
        );
        store.save_value("default", "K", "v").expect("valid save still works");
        assert_eq!(store.read("default", "TOKEN").expect("read").as_deref(), Some("T"));
    }

    #[test]
    fn rejected_save_does_not_create_destination() {
        let dir = tempfile::tempdir().expect("tempdir");
        let destination = dir.path().join("fresh-rc");

        let mut updates = ConfigFile::new();
        updates.set("default", "TOKEN", "a\nb");
        assert!(save_to(&updates, &destination).is_err());
        assert!(!destination.exists());
    }

    #[cfg(unix)]
    #[test]
    fn saved_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        store.save_value("default", "TOKEN", "T").expect("save");

        let mode = fs::metadata(store.path()).expect("meta").permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
