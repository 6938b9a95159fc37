//! Ensure-once provisioning of `lombok.jar`.
//!
//! The jar is either present on disk or fetched exactly once from
//! [`LOMBOK_JAR_URL`]. Every failure collapses to `None` so callers only need
//! to distinguish "ready" from "unavailable".

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ProvisionError;

pub const LOMBOK_JAR_URL: &str = "https://projectlombok.org/downloads/lombok.jar";

const MAX_JAR_BYTES: u64 = 64 * 1024 * 1024;

/// Something that can hand back the bytes behind a URL.
pub trait ArtifactSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, ProvisionError>;
}

#[derive(Debug, Clone)]
pub struct HttpSource {
    agent: ureq::Agent,
}

impl HttpSource {
    pub fn new(timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .into();
        Self { agent }
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ArtifactSource for HttpSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, ProvisionError> {
        let mut response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| ProvisionError::http(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProvisionError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .body_mut()
            .with_config()
            .limit(MAX_JAR_BYTES)
            .read_to_vec()
            .map_err(|e| ProvisionError::http(url, e))
    }
}

/// Returns `target` once a jar is known to exist there, downloading it from
/// `url` on a miss unless `download_disabled` is set.
pub fn ensure_jar(
    target: &Path,
    download_disabled: bool,
    source: &dyn ArtifactSource,
    url: &str,
) -> Option<PathBuf> {
    if target.is_file() {
        return Some(target.to_path_buf());
    }

    if download_disabled {
        tracing::debug!(target = %target.display(), "lombok.jar missing and downloads are disabled");
        return None;
    }

    match download(target, source, url) {
        Ok(()) => Some(target.to_path_buf()),
        Err(e) => {
            tracing::warn!(
                target = %target.display(),
                error = %error_chain(&e),
                "failed to download lombok.jar"
            );
            None
        }
    }
}

fn download(target: &Path, source: &dyn ArtifactSource, url: &str) -> Result<(), ProvisionError> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| ProvisionError::io("failed to create directory", parent, e))?;
    }

    tracing::info!(url, target = %target.display(), "downloading lombok.jar");
    let bytes = source.fetch(url)?;
    if bytes.is_empty() {
        return Err(ProvisionError::EmptyBody {
            url: url.to_string(),
        });
    }

    let partial = partial_path(target);
    if let Err(e) = write_then_rename(&partial, target, &bytes) {
        let _ = fs::remove_file(&partial);
        return Err(e);
    }

    if !target.is_file() {
        return Err(ProvisionError::Missing(target.to_path_buf()));
    }

    tracing::debug!(bytes = bytes.len(), target = %target.display(), "lombok.jar written");
    Ok(())
}

fn write_then_rename(partial: &Path, target: &Path, bytes: &[u8]) -> Result<(), ProvisionError> {
    fs::write(partial, bytes).map_err(|e| ProvisionError::io("failed to write", partial, e))?;
    fs::rename(partial, target).map_err(|e| ProvisionError::io("failed to move into place", target, e))
}

fn partial_path(target: &Path) -> PathBuf {
    let mut os = target.as_os_str().to_os_string();
    os.push(".part");
    PathBuf::from(os)
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut cause = err.source();
    while let Some(inner) = cause {
        out.push_str(": ");
        out.push_str(&inner.to_string());
        cause = inner.source();
    }
    out
}
