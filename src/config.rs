use anyhow::{Result, bail};
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::platform::{DATA_HOME_VAR, Env, Platform, env_flag, lombok_jar_path, resolve_data_dir};
use crate::provision::LOMBOK_JAR_URL;

pub const DISABLE_DOWNLOAD_VAR: &str = "OPENCODE_DISABLE_LSP_DOWNLOAD";
pub const DEFAULT_OPTIONS_VAR: &str = "JAVA_TOOL_OPTIONS";

/// Everything one lifecycle run needs, resolved up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub jar_path: PathBuf,
    pub download_disabled: bool,
    pub download_url: String,
    pub options_var: String,
    pub existing_options: Option<String>,
}

impl Settings {
    /// Defaults derived only from the injected platform, environment and home.
    pub fn from_env(platform: Platform, env: &Env, home: &Path) -> Self {
        let data_dir = resolve_data_dir(platform, env, home);
        let jar_path = lombok_jar_path(&data_dir);
        let options_var = DEFAULT_OPTIONS_VAR.to_string();
        Self {
            existing_options: env.get(&options_var).map(str::to_string),
            data_dir,
            jar_path,
            download_disabled: env_flag(env, DISABLE_DOWNLOAD_VAR),
            download_url: LOMBOK_JAR_URL.to_string(),
            options_var,
        }
    }

    /// Applies CLI overrides on top of [`Settings::from_env`].
    ///
    /// `home` is only required when neither `--data-dir` nor `XDG_DATA_HOME`
    /// decides the data directory.
    pub fn resolve(cli: &Cli, platform: Platform, env: &Env, home: Option<&Path>) -> Result<Self> {
        let covered = cli.data_dir.is_some() || env.non_empty(DATA_HOME_VAR).is_some();
        let home = match home {
            Some(home) => home,
            None if covered => Path::new(""),
            None => bail!("Failed to resolve home directory"),
        };
        let mut settings = Self::from_env(platform, env, home);

        if let Some(dir) = cli.data_dir.clone() {
            settings.jar_path = lombok_jar_path(&dir);
            settings.data_dir = dir;
        }
        if let Some(jar) = cli.jar.clone() {
            settings.jar_path = jar;
        }
        if cli.no_download {
            settings.download_disabled = true;
        }
        if let Some(url) = cli.url.clone() {
            settings.download_url = url;
        }
        if let Some(var) = cli.options_var.clone() {
            settings.existing_options = env.get(&var).map(str::to_string);
            settings.options_var = var;
        }

        Ok(settings)
    }
}

/// Name of the JVM options variable, without resolving anything else.
pub fn options_var(cli: &Cli) -> &str {
    cli.options_var.as_deref().unwrap_or(DEFAULT_OPTIONS_VAR)
}
