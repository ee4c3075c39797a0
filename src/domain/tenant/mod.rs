mod scope;
mod value_objects;

pub use scope::{TenantContext, TenantScope, UNRESOLVED_TENANT_ID};
pub use value_objects::{Actor, ActorId, Role, TenantId};
