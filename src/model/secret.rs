//! Secret-store settings: zero or one active store per pipeline.
//!
//! Settings reference secrets as `@{store:key}` tokens inside string values;
//! the compiler passes those through untouched, so the `secrets` mapping here
//! is documentation/preview only and never required at compile time.

use crate::model::pipeline::Settings;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Supported secret-store plugin kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecretStoreKind {
    Os,
    Http,
    Docker,
    Jose,
    Systemd,
}

impl SecretStoreKind {
    /// Section name in the compiled document: `[[secretstores.<kind>]]`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SecretStoreKind::Os => "os",
            SecretStoreKind::Http => "http",
            SecretStoreKind::Docker => "docker",
            SecretStoreKind::Jose => "jose",
            SecretStoreKind::Systemd => "systemd",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecretStore {
    #[serde(rename = "plugin")]
    pub kind: SecretStoreKind,
    #[serde(default)]
    pub config: Settings,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub secrets: BTreeMap<String, String>,
}

/// Entry shape of the legacy plural `secretStores` array: `{id, type, data}`.
/// Upgraded to [`SecretStore`] once at load.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LegacySecretStore {
    #[allow(dead_code)]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: SecretStoreKind,
    #[serde(rename = "data", default)]
    pub config: Settings,
}

impl From<LegacySecretStore> for SecretStore {
    fn from(legacy: LegacySecretStore) -> Self {
        Self {
            kind: legacy.kind,
            config: legacy.config,
            secrets: BTreeMap::new(),
        }
    }
}
