//! # opencode-lombok
//!
//! Wires Lombok into jdtls for Java projects that use it.
//!
//! ## Architecture
//!
//! - **scan**: Recursive build-file walk looking for Lombok signatures
//! - **agent**: `-javaagent:` formatting and idempotent JVM option merging
//! - **provision**: Ensure-once download of lombok.jar
//! - **platform**: Platform data directory resolution and env flags
//! - **config**: Settings resolved from CLI flags and the environment
//! - **configure**: The scan → provision → merge lifecycle
//! - **error**: Provisioning failure reasons
//! - **logging**: tracing subscriber setup

pub mod agent;
pub mod cli;
pub mod config;
pub mod configure;
pub mod error;
pub mod logging;
pub mod platform;
pub mod provision;
pub mod scan;
