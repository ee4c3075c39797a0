// tests/support/mocks/security.rs
use async_trait::async_trait;
use campus_core::application::{
    ApplicationResult, error::ApplicationError, ports::security::Authenticator,
};
use campus_core::domain::tenant::{Actor, ActorId, Role, TenantId};

pub const PLANTEL_A: i64 = 7;
pub const PLANTEL_B: i64 = 8;

pub const ADMIN_TOKEN: &str = "admin-token";
pub const CONTADOR_TOKEN: &str = "contador-token";
pub const CONSULTA_TOKEN: &str = "consulta-token";
pub const OTHER_PLANTEL_TOKEN: &str = "other-plantel-token";
pub const UNASSIGNED_TOKEN: &str = "unassigned-token";
pub const EXPIRED_TOKEN: &str = "expired-token";

pub fn actor(id: i64, role: Role, plantel: Option<i64>) -> Actor {
    Actor::new(
        ActorId::new(id).expect("invalid actor id"),
        role,
        plantel.map(|p| TenantId::new(p).expect("invalid plantel id")),
    )
}

/// Maps the fixed tokens above onto actors.
#[derive(Clone, Debug, Default)]
pub struct StaticAuthenticator;

#[async_trait]
impl Authenticator for StaticAuthenticator {
    async fn authenticate(&self, token: &str) -> ApplicationResult<Actor> {
        match token {
            ADMIN_TOKEN => Ok(actor(1, Role::Admin, None)),
            CONTADOR_TOKEN => Ok(actor(2, Role::Contador, Some(PLANTEL_A))),
            CONSULTA_TOKEN => Ok(actor(3, Role::Consulta, Some(PLANTEL_A))),
            OTHER_PLANTEL_TOKEN => Ok(actor(4, Role::Contador, Some(PLANTEL_B))),
            UNASSIGNED_TOKEN => Ok(actor(5, Role::Contador, None)),
            EXPIRED_TOKEN => Err(ApplicationError::unauthorized("token expired")),
            _ => Err(ApplicationError::unauthorized("invalid token")),
        }
    }
}
