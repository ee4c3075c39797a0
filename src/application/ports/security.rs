// src/application/ports/security.rs
use crate::{application::ApplicationResult, domain::tenant::Actor};
use async_trait::async_trait;

#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Verify a bearer token and resolve the actor it was issued to.
    ///
    /// Fails with `ApplicationError::Unauthorized` for malformed, expired or
    /// foreign tokens.
    async fn authenticate(&self, token: &str) -> ApplicationResult<Actor>;
}
