//! Classification helpers for database errors.

/// Returns true when the error is a unique violation on the named constraint.
pub fn is_unique_violation(e: &sqlx::Error, constraint: &str) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(c) if c == constraint)
}

/// Returns true when the error is a foreign key violation.
///
/// Used to detect deletion of a product that still has order lines
/// pointing at it.
pub fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db_err| db_err.is_foreign_key_violation())
}
