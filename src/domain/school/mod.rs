//! Entity descriptors of the school billing domain.

mod payment;
mod plantel;
mod student;
mod user;

pub use payment::Payment;
pub use plantel::Plantel;
pub use student::Student;
pub use user::User;

use crate::domain::entity::validate_schema;
use crate::domain::errors::DomainResult;

/// Check every descriptor; run once at startup.
pub fn validate_all() -> DomainResult<()> {
    validate_schema::<Plantel>()?;
    validate_schema::<User>()?;
    validate_schema::<Student>()?;
    validate_schema::<Payment>()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #[test]
    fn shipped_descriptors_are_valid() {
        super::validate_all().expect("all school entities validate");
    }
}
