use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DATA_HOME_VAR: &str = "XDG_DATA_HOME";
pub const APPDATA_VAR: &str = "APPDATA";
pub const APP_DIR_NAME: &str = "opencode";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Windows,
    Unix,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }
}

/// Snapshot of environment variables passed explicitly through the crate.
///
/// Variables whose name or value is not valid Unicode are dropped when reading
/// the process environment, so they behave exactly like unset variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Env {
    vars: BTreeMap<String, String>,
}

impl Env {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_process() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Value of `name`, treating empty and whitespace-only values as unset.
    pub fn non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.trim().is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Env {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

pub fn resolve_data_dir(platform: Platform, env: &Env, home: &Path) -> PathBuf {
    if let Some(base) = env.non_empty(DATA_HOME_VAR) {
        return Path::new(base).join(APP_DIR_NAME);
    }

    match platform {
        Platform::MacOs => home
            .join("Library")
            .join("Application Support")
            .join(APP_DIR_NAME),
        Platform::Windows => {
            let appdata = env
                .non_empty(APPDATA_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| home.join("AppData").join("Roaming"));
            appdata.join(APP_DIR_NAME)
        }
        Platform::Unix => home.join(".local").join("share").join(APP_DIR_NAME),
    }
}

pub fn lombok_jar_path(data_dir: &Path) -> PathBuf {
    data_dir
        .join("bin")
        .join("jdtls")
        .join("bin")
        .join("lombok.jar")
}

pub fn env_flag(env: &Env, name: &str) -> bool {
    env.get(name).is_some_and(|raw| {
        let v = raw.trim();
        v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes")
    })
}
