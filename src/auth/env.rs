use std::collections::HashMap;
use std::ffi::OsString;

use crate::config::keys;

/// Snapshot of the credential environment variables, injectable for tests.
#[derive(Debug, Clone, Default)]
pub struct Env {
    vars: HashMap<String, String>,
}

impl Env {
    pub fn from_system() -> Self {
        Self::from_os_vars(std::env::vars_os())
    }

    /// Keeps recognized keys only; entries that are not valid UTF-8 are skipped.
    pub fn from_os_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let vars = vars
            .into_iter()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .filter(|(key, _)| keys::ALL.contains(&key.as_str()))
            .collect();
        Self { vars }
    }

    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let vars = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        Self { vars }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_recognized_keys() {
        let env = Env::from_os_vars([
            (OsString::from("ASTRA_DB_ID"), OsString::from("d1")),
            (OsString::from("PATH"), OsString::from("/usr/bin")),
        ]);

        assert_eq!(env.get("ASTRA_DB_ID"), Some("d1"));
        assert_eq!(env.get("PATH"), None);
    }

    #[cfg(unix)]
    #[test]
    fn skips_non_utf8_entries() {
        use std::os::unix::ffi::OsStringExt;

        let env = Env::from_os_vars([
            (OsString::from("OTHER"), OsString::from_vec(b"f\xffo".to_vec())),
            (
                OsString::from("ASTRA_DB_REGION"),
                OsString::from_vec(b"eu\xff".to_vec()),
            ),
            (OsString::from("ASTRA_DB_KEYSPACE"), OsString::from("ks")),
        ]);

        assert_eq!(env.get("ASTRA_DB_REGION"), None);
        assert_eq!(env.get("ASTRA_DB_KEYSPACE"), Some("ks"));
    }

    #[test]
    fn system_snapshot_does_not_panic() {
        let env = Env::from_system();
        assert_eq!(env.get("PATH"), None);
    }
}
