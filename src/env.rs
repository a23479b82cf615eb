use std::{collections::HashMap, env};

use tracing::debug;

use crate::constants::{
    AWS_CONTAINER_CREDENTIALS_RELATIVE_URI, AWS_CRED_CONTAINER_RELATIVE_URI, SHARED_CONFIG_VARS,
};

/// Environment that the bridge and clear steps read from and write to
pub trait Environment {
    /// Get a variable, treating non-unicode values as unset
    fn var(&self, key: &str) -> Option<String>;

    /// Whether the variable is present at all, whatever its encoding
    fn is_set(&self, key: &str) -> bool {
        self.var(key).is_some()
    }

    fn set_var(&mut self, key: &str, value: &str);

    fn remove_var(&mut self, key: &str);
}

/// The real process environment
///
/// Writes are only sound while no other thread reads the environment. The
/// binary uses this before any SDK client is built; tests that use it are
/// `#[serial]`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }

    fn is_set(&self, key: &str) -> bool {
        env::var_os(key).is_some()
    }

    fn set_var(&mut self, key: &str, value: &str) {
        // SAFETY: std serializes its own environment access, so the hazard is
        // foreign code calling getenv on another thread. The binary writes on
        // its only runtime thread before any SDK client exists. Under libtest
        // the runner is multi-threaded: every test using `ProcessEnv` or
        // touching these variables is `#[serial]`, and non-serial tests never
        // reach foreign code that reads the environment.
        unsafe { env::set_var(key, value) }
    }

    fn remove_var(&mut self, key: &str) {
        // SAFETY: see `set_var`.
        unsafe { env::remove_var(key) }
    }
}

/// In-memory environment
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryEnv {
    vars: HashMap<String, String>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl Environment for MemoryEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn set_var(&mut self, key: &str, value: &str) {
        self.vars.insert(key.to_string(), value.to_string());
    }

    fn remove_var(&mut self, key: &str) {
        self.vars.remove(key);
    }
}

/// Copy `AWS_CRED_CONTAINER_RELATIVE_URI` into the variable the ECS provider reads
///
/// Returns the bridged value, or `None` when the source is unset or empty and
/// nothing was written. The source variable is left in place.
pub fn bridge_container_uri(env: &mut impl Environment) -> Option<String> {
    let uri = env
        .var(AWS_CRED_CONTAINER_RELATIVE_URI)
        .filter(|uri| !uri.is_empty())?;

    debug!(
        "Bridging {} into {}",
        AWS_CRED_CONTAINER_RELATIVE_URI, AWS_CONTAINER_CREDENTIALS_RELATIVE_URI
    );
    env.set_var(AWS_CONTAINER_CREDENTIALS_RELATIVE_URI, &uri);
    Some(uri)
}

/// Remove `AWS_ACCESS_KEY_ID` and `AWS_PROFILE`, returning the names that were set
pub fn clear_shared_config_vars(env: &mut impl Environment) -> Vec<&'static str> {
    let mut cleared = Vec::new();
    for name in SHARED_CONFIG_VARS {
        if env.is_set(name) {
            debug!("Clearing {}", name);
            env.remove_var(name);
            cleared.push(name);
        }
    }
    cleared
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_bridge_copies_non_empty_uri() {
        let mut env =
            MemoryEnv::from_pairs([(AWS_CRED_CONTAINER_RELATIVE_URI, "/v2/credentials/abc")]);

        let bridged = bridge_container_uri(&mut env);

        assert_eq!(bridged.as_deref(), Some("/v2/credentials/abc"));
        assert_eq!(
            env.var(AWS_CONTAINER_CREDENTIALS_RELATIVE_URI).as_deref(),
            Some("/v2/credentials/abc")
        );
        assert_eq!(
            env.var(AWS_CRED_CONTAINER_RELATIVE_URI).as_deref(),
            Some("/v2/credentials/abc")
        );
    }

    #[test]
    fn test_bridge_overwrites_existing_target() {
        let mut env = MemoryEnv::from_pairs([
            (AWS_CRED_CONTAINER_RELATIVE_URI, "/new"),
            (AWS_CONTAINER_CREDENTIALS_RELATIVE_URI, "/old"),
        ]);

        bridge_container_uri(&mut env);

        assert_eq!(
            env.var(AWS_CONTAINER_CREDENTIALS_RELATIVE_URI).as_deref(),
            Some("/new")
        );
    }

    #[test]
    fn test_bridge_unset_source_writes_nothing() {
        let mut env = MemoryEnv::new();

        assert_eq!(bridge_container_uri(&mut env), None);
        assert!(env.is_empty());
    }

    #[test]
    fn test_bridge_empty_source_writes_nothing() {
        let mut env = MemoryEnv::from_pairs([
            (AWS_CRED_CONTAINER_RELATIVE_URI, ""),
            (AWS_CONTAINER_CREDENTIALS_RELATIVE_URI, "/kept"),
        ]);

        assert_eq!(bridge_container_uri(&mut env), None);
        assert_eq!(
            env.var(AWS_CONTAINER_CREDENTIALS_RELATIVE_URI).as_deref(),
            Some("/kept")
        );
        assert_eq!(env.len(), 2);
    }

    #[test]
    fn test_clear_shared_config_vars() {
        let mut env = MemoryEnv::from_pairs([
            ("AWS_ACCESS_KEY_ID", "AKIDEXAMPLE"),
            ("AWS_PROFILE", "dev"),
            ("AWS_SECRET_ACCESS_KEY", "secret"),
        ]);

        let cleared = clear_shared_config_vars(&mut env);

        assert_eq!(cleared, vec!["AWS_ACCESS_KEY_ID", "AWS_PROFILE"]);
        assert!(!env.contains("AWS_ACCESS_KEY_ID"));
        assert!(!env.contains("AWS_PROFILE"));
        assert!(env.contains("AWS_SECRET_ACCESS_KEY"));
    }

    #[test]
    fn test_clear_shared_config_vars_reports_only_present() {
        let mut env = MemoryEnv::from_pairs([("AWS_PROFILE", "dev")]);

        assert_eq!(clear_shared_config_vars(&mut env), vec!["AWS_PROFILE"]);
        assert!(env.is_empty());
    }

    #[test]
    #[serial]
    fn test_process_env_bridge() {
        let original_source = env::var(AWS_CRED_CONTAINER_RELATIVE_URI).ok();
        let original_target = env::var(AWS_CONTAINER_CREDENTIALS_RELATIVE_URI).ok();

        unsafe {
            env::set_var(AWS_CRED_CONTAINER_RELATIVE_URI, "/v2/credentials/process");
            env::remove_var(AWS_CONTAINER_CREDENTIALS_RELATIVE_URI);
        }

        let mut process = ProcessEnv;
        bridge_container_uri(&mut process);
        assert_eq!(
            env::var(AWS_CONTAINER_CREDENTIALS_RELATIVE_URI).ok().as_deref(),
            Some("/v2/credentials/process")
        );

        unsafe {
            match original_source {
                Some(val) => env::set_var(AWS_CRED_CONTAINER_RELATIVE_URI, val),
                None => env::remove_var(AWS_CRED_CONTAINER_RELATIVE_URI),
            }
            match original_target {
                Some(val) => env::set_var(AWS_CONTAINER_CREDENTIALS_RELATIVE_URI, val),
                None => env::remove_var(AWS_CONTAINER_CREDENTIALS_RELATIVE_URI),
            }
        }
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn test_process_env_clear_non_unicode() {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

        let original = env::var_os("AWS_PROFILE");
        let value = OsStr::from_bytes(b"prof\xffile");

        unsafe {
            env::set_var("AWS_PROFILE", value);
        }

        let mut process = ProcessEnv;
        assert!(process.var("AWS_PROFILE").is_none());
        assert!(process.is_set("AWS_PROFILE"));

        let cleared = clear_shared_config_vars(&mut process);
        assert!(cleared.contains(&"AWS_PROFILE"));
        assert!(env::var_os("AWS_PROFILE").is_none());

        unsafe {
            if let Some(val) = original {
                env::set_var("AWS_PROFILE", val);
            }
        }
    }

    #[test]
    #[serial]
    fn test_process_env_clear() {
        let original_key = env::var("AWS_ACCESS_KEY_ID").ok();
        let original_profile = env::var("AWS_PROFILE").ok();

        unsafe {
            env::set_var("AWS_ACCESS_KEY_ID", "AKIDEXAMPLE");
            env::set_var("AWS_PROFILE", "leaked");
        }

        let mut process = ProcessEnv;
        let cleared = clear_shared_config_vars(&mut process);
        assert_eq!(cleared.len(), 2);
        assert!(env::var("AWS_ACCESS_KEY_ID").is_err());
        assert!(env::var("AWS_PROFILE").is_err());

        unsafe {
            if let Some(val) = original_key {
                env::set_var("AWS_ACCESS_KEY_ID", val);
            }
            if let Some(val) = original_profile {
                env::set_var("AWS_PROFILE", val);
            }
        }
    }
}
