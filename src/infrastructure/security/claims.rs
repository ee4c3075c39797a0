// src/infrastructure/security/claims.rs
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::tenant::{Actor, ActorId, Role, TenantId};
use biscuit_auth::builder::{Fact, Predicate, Term};

/// Build the actor from the facts of a verified token: `user(id)`,
/// `role(name)` and an optional `plantel(id)`.
pub fn parse_claims(facts: Vec<Fact>) -> ApplicationResult<Actor> {
    let ctx = ClaimsContext::from_facts(facts);
    build_actor(ctx)
}

fn build_actor(ctx: ClaimsContext) -> ApplicationResult<Actor> {
    let user_id = ctx
        .user_id
        .ok_or_else(|| ApplicationError::unauthorized("missing user id"))?;
    let role = ctx
        .role
        .ok_or_else(|| ApplicationError::unauthorized("missing role"))?;

    let id = ActorId::new(user_id).map_err(|_| ApplicationError::unauthorized("invalid user id"))?;
    let tenant = ctx
        .plantel_id
        .map(TenantId::new)
        .transpose()
        .map_err(|_| ApplicationError::unauthorized("invalid plantel id"))?;

    Ok(Actor::new(id, role, tenant))
}

#[derive(Default)]
struct ClaimsContext {
    user_id: Option<i64>,
    role: Option<Role>,
    plantel_id: Option<i64>,
}

impl ClaimsContext {
    fn from_facts(facts: Vec<Fact>) -> Self {
        let mut ctx = ClaimsContext::default();
        for fact in facts {
            ctx.apply_predicate(fact.predicate);
        }
        ctx
    }

    fn apply_predicate(&mut self, predicate: Predicate) {
        match predicate.name.as_str() {
            "user" => self.user_id = first_integer(&predicate),
            "role" => self.handle_role(&predicate),
            "plantel" => self.plantel_id = first_integer(&predicate),
            _ => {}
        }
    }

    fn handle_role(&mut self, predicate: &Predicate) {
        if let Some(Term::Str(role_name)) = predicate.terms.first() {
            if let Ok(parsed) = role_name.parse() {
                self.role = Some(parsed);
            }
        }
    }
}

fn first_integer(predicate: &Predicate) -> Option<i64> {
    match predicate.terms.first() {
        Some(Term::Integer(value)) => Some(*value),
        _ => None,
    }
}
