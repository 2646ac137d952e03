use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Subject of a bearer token (the `sub` claim).
///
/// Catalog operations are not scoped by principal; the id is carried through
/// request extensions for logging.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(Uuid);

impl PrincipalId {
    /// Fresh time-ordered subject (token minting in dev tooling and tests).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for PrincipalId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for PrincipalId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl std::fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
