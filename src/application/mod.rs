pub mod context;
pub mod dto;
pub mod error;
pub mod ports;
pub mod queries;
pub mod scope;
pub mod services;

pub use context::{ClientInfo, RequestContext};
pub use error::ApplicationResult;
