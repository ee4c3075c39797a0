// src/infrastructure/security/token.rs
use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::security::Authenticator,
};
use crate::domain::tenant::Actor;
use async_trait::async_trait;
use biscuit_auth::{
    Biscuit, PublicKey,
    builder::{Algorithm, AuthorizerBuilder},
};

/// Verifies biscuit bearer tokens signed by the configured root key.
/// Tokens are issued elsewhere; this side only checks them.
#[derive(Clone)]
pub struct BiscuitAuthenticator {
    public: PublicKey,
}

impl BiscuitAuthenticator {
    pub fn new(public_key_hex: &str) -> ApplicationResult<Self> {
        let public = PublicKey::from_bytes_hex(public_key_hex, Algorithm::Ed25519)
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        Ok(Self { public })
    }

    pub fn from_public_key(public: PublicKey) -> Self {
        Self { public }
    }
}

#[async_trait]
impl Authenticator for BiscuitAuthenticator {
    async fn authenticate(&self, token: &str) -> ApplicationResult<Actor> {
        let biscuit = Biscuit::from_base64(token, self.public)
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;

        // Token checks (expiry) run against the current time.
        let mut authorizer = AuthorizerBuilder::new()
            .time()
            .code("allow if user($id);")
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?
            .build(&biscuit)
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;

        authorizer
            .authorize()
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;

        let view = biscuit
            .authorizer()
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;
        let (facts, _, _, _) = view.dump();

        crate::infrastructure::security::claims::parse_claims(facts)
    }
}
