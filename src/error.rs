use std::path::PathBuf;

use thiserror::Error;

/// Reasons a lombok.jar download did not produce a usable file.
///
/// These never leave the provisioner: they are logged and the caller sees
/// `None`.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("request to {url} failed")]
    Http {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("{url} returned an empty body")]
    EmptyBody { url: String },

    #[error("{action} {}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is still missing after the write reported success", .0.display())]
    Missing(PathBuf),
}

impl ProvisionError {
    pub fn http(url: &str, source: ureq::Error) -> Self {
        Self::Http {
            url: url.to_string(),
            source: Box::new(source),
        }
    }

    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
