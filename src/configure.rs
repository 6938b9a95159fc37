use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::agent::merge_options;
use crate::config::Settings;
use crate::provision::{ArtifactSource, ensure_jar};
use crate::scan::project_uses_lombok;

/// Result of one scan → provision → merge run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    NotDetected,
    Unavailable {
        download_disabled: bool,
    },
    Configured {
        jar: PathBuf,
        options_var: String,
        options: String,
    },
    AlreadyConfigured {
        jar: PathBuf,
        options_var: String,
        options: String,
    },
}

impl Outcome {
    /// The `(variable, value)` pair to install, if the run produced one.
    pub fn env_assignment(&self) -> Option<(&str, &str)> {
        match self {
            Outcome::Configured {
                options_var,
                options,
                ..
            }
            | Outcome::AlreadyConfigured {
                options_var,
                options,
                ..
            } => Some((options_var.as_str(), options.as_str())),
            Outcome::NotDetected | Outcome::Unavailable { .. } => None,
        }
    }
}

pub fn configure(root: &Path, settings: &Settings, source: &dyn ArtifactSource) -> Outcome {
    if !project_uses_lombok(root) {
        tracing::debug!(root = %root.display(), "no lombok dependency found");
        return Outcome::NotDetected;
    }
    tracing::info!(root = %root.display(), "lombok dependency detected");

    let Some(jar) = ensure_jar(
        &settings.jar_path,
        settings.download_disabled,
        source,
        &settings.download_url,
    ) else {
        tracing::warn!(
            download_disabled = settings.download_disabled,
            "lombok jar unavailable"
        );
        return Outcome::Unavailable {
            download_disabled: settings.download_disabled,
        };
    };

    let Some(jar_str) = jar.to_str() else {
        tracing::warn!(jar = %jar.display(), "lombok jar path is not valid UTF-8");
        return Outcome::Unavailable {
            download_disabled: settings.download_disabled,
        };
    };

    let existing = settings.existing_options.as_deref();
    let options = merge_options(existing, jar_str);
    let options_var = settings.options_var.clone();

    if options == existing.map(str::trim).unwrap_or_default() {
        tracing::info!(jar = %jar.display(), "lombok javaagent already configured");
        Outcome::AlreadyConfigured {
            jar,
            options_var,
            options,
        }
    } else {
        tracing::info!(jar = %jar.display(), "lombok javaagent configured");
        Outcome::Configured {
            jar,
            options_var,
            options,
        }
    }
}
