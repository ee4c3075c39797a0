use crate::domain::errors::DomainError;

const CNT_PLANTEL_CODE: &str = "planteles_code_key";
const CNT_USER_EMAIL: &str = "users_email_key";
const CNT_STUDENT_CODE: &str = "students_student_id_key";
const CNT_PAYMENT_RECEIPT: &str = "payments_receipt_number_key";
const CNT_PAYMENT_REFERENCE: &str = "payments_reference_number_key";
const CNT_STUDENT_PLANTEL: &str = "students_plantel_id_fkey";
const CNT_PAYMENT_PLANTEL: &str = "payments_plantel_id_fkey";
const CNT_PAYMENT_STUDENT: &str = "payments_student_id_fkey";
const CNT_PAYMENT_USER: &str = "payments_user_id_fkey";

fn map_constraint(constraint: &str) -> Option<DomainError> {
    let err = match constraint {
        CNT_PLANTEL_CODE => DomainError::Conflict("plantel code already exists".into()),
        CNT_USER_EMAIL => DomainError::Conflict("email already exists".into()),
        CNT_STUDENT_CODE => DomainError::Conflict("student_id already exists".into()),
        CNT_PAYMENT_RECEIPT => DomainError::Conflict("receipt_number already exists".into()),
        CNT_PAYMENT_REFERENCE => {
            DomainError::Conflict("reference_number already exists".into())
        }
        CNT_STUDENT_PLANTEL | CNT_PAYMENT_PLANTEL => {
            DomainError::NotFound("plantel not found".into())
        }
        CNT_PAYMENT_STUDENT => DomainError::NotFound("student not found".into()),
        CNT_PAYMENT_USER => DomainError::NotFound("user not found".into()),
        _ => return None,
    };
    Some(err)
}

/// Known constraints get a specific message; anything else is mapped by SQLSTATE.
pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(mapped) = db_err.constraint().and_then(map_constraint) {
                return mapped;
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    "23502" => {
                        return DomainError::Validation("required column is missing".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        sqlx::Error::ColumnDecode { index, source } => {
            DomainError::Persistence(format!("failed to decode column {index}: {source}"))
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_constraints_get_specific_errors() {
        assert!(matches!(
            map_constraint(CNT_STUDENT_CODE),
            Some(DomainError::Conflict(msg)) if msg.contains("student_id")
        ));
        assert!(matches!(
            map_constraint(CNT_PAYMENT_STUDENT),
            Some(DomainError::NotFound(_))
        ));
        assert!(matches!(
            map_constraint(CNT_PAYMENT_REFERENCE),
            Some(DomainError::Conflict(msg)) if msg.contains("reference_number")
        ));
        assert!(map_constraint("students_status_check").is_none());
    }

    #[test]
    fn non_database_errors_are_persistence_failures() {
        assert!(matches!(
            map_sqlx(sqlx::Error::RowNotFound),
            DomainError::Persistence(_)
        ));
    }
}
