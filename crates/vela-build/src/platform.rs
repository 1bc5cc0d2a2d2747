//! Platform bootstrap handle.
//!
//! Dependency-injection bootstrapping happens outside this crate; the
//! pipeline only hands the configured providers to whoever loads the
//! compiled application.

use serde::{Deserialize, Serialize};

/// A provider made available to the bootstrapped application
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Provider {
    /// Injection token
    pub token: String,
    /// Opaque provider value
    pub value: serde_json::Value,
}

/// Handle over a bootstrapped platform
#[derive(Debug)]
pub struct PlatformHandle {
    providers: Vec<Provider>,
}

impl PlatformHandle {
    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    /// Tear the platform down
    pub fn destroy(self) {}
}

/// Create a platform handle over the given providers
pub fn create_platform(providers: Vec<Provider>) -> PlatformHandle {
    PlatformHandle { providers }
}
