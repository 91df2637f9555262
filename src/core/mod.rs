//! Core library components.
//!
//! This module contains the dispatch pipeline: target resolution, key
//! retrieval, sealing, concurrent submission, and result aggregation.

pub mod api;
pub mod cipher;
pub mod config;
pub mod constants;
pub mod dispatch;
pub mod encrypted;
pub mod key;
pub mod orchestrator;
pub mod outcome;
pub mod secret;
pub mod secrets;
pub mod target;
pub mod types;

pub use api::{GitHubClient, SecretsApi, Visibility};
pub use config::{Config, Settings};
pub use dispatch::Dispatcher;
pub use encrypted::EncryptedSecret;
pub use key::PublicKey;
pub use orchestrator::Orchestrator;
pub use outcome::{DispatchOutcome, RunReport, SecretResult};
pub use secrets::SecretSet;
pub use target::Target;
