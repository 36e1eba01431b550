//! Typed failures for the persistence layer.

use thiserror::Error;

/// Errors returned by [`Store`](crate::Store) operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying SQLite call failed.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A cost-model or analysis snapshot failed to (de)serialise.
    #[error("snapshot serialisation failed: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// Preparing the database file on disk failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// No organization exists with the given id.
    #[error("organization {org_id} not found")]
    OrganizationNotFound {
        /// The organization id that was looked up.
        org_id: String,
    },

    /// A caller panicked while holding the connection lock.
    #[error("store connection is no longer usable")]
    Poisoned,
}

impl StoreError {
    /// `true` for lookups of ids that do not exist.
    ///
    /// Service layers map these to a 404 instead of a 500.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::OrganizationNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display_names_the_organization() {
        let err = StoreError::OrganizationNotFound {
            org_id: "11111111-2222-3333-4444-555555555555".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "organization 11111111-2222-3333-4444-555555555555 not found"
        );
        assert!(err.is_not_found());
    }

    #[test]
    fn test_database_errors_are_not_not_found() {
        let err = StoreError::Database(rusqlite::Error::QueryReturnedNoRows);
        assert!(!err.is_not_found());
        assert!(err.to_string().starts_with("database error"));
    }
}
