//! Access-control core: category lookups, the per-course access decision,
//! and the course-listing visibility filter.
//!
//! Everything here is a pure function over its inputs plus the two
//! [`CategoryIndex`] reads; handlers and tests supply their own index.

mod evaluator;
mod visibility;

use std::collections::HashSet;

use async_trait::async_trait;
use uuid::Uuid;

use crate::db::{DatabaseError, Role};

pub use evaluator::can_view;
pub use visibility::filter_visible;

/// The resolved identity of the current request. Token parsing happens in
/// the auth middleware; the core only ever sees id and role.
#[derive(Debug, Clone, Copy)]
pub struct Principal {
    pub account_id: Uuid,
    pub role: Role,
}

/// Result of a category lookup, three states by construction:
/// a concrete (possibly empty) restriction set, "feature not provisioned",
/// or a genuine storage error carried in the surrounding `Result`.
///
/// `Unrestricted` must never be collapsed into an empty set: an empty set
/// means "this course/account has no categories assigned", while
/// `Unrestricted` means the restriction feature does not exist in this
/// deployment and imposes no restriction at all. Storage errors, in turn,
/// must never be coerced into either value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryLookup {
    Restricted(HashSet<Uuid>),
    Unrestricted,
}

/// Read-only category lookups for accounts and courses.
#[async_trait]
pub trait CategoryIndex: Send + Sync {
    async fn account_categories(&self, account_id: Uuid) -> Result<CategoryLookup, DatabaseError>;
    async fn course_categories(&self, course_id: Uuid) -> Result<CategoryLookup, DatabaseError>;
}

/// Tunable access rules. `teacher_own_courses_only` restricts teachers to
/// the courses they own; off by default, in which case teachers see
/// everything, same as admins.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessPolicy {
    pub teacher_own_courses_only: bool,
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;

    use super::*;

    /// Test double for the category index. Ids absent from a map resolve to
    /// an empty restriction set; `unavailable` simulates the feature not
    /// being provisioned; `failing` simulates a storage outage.
    #[derive(Default)]
    pub struct InMemoryCategoryIndex {
        pub accounts: HashMap<Uuid, HashSet<Uuid>>,
        pub courses: HashMap<Uuid, HashSet<Uuid>>,
        pub accounts_unavailable: bool,
        pub courses_unavailable: bool,
        pub failing: bool,
    }

    #[async_trait]
    impl CategoryIndex for InMemoryCategoryIndex {
        async fn account_categories(
            &self,
            account_id: Uuid,
        ) -> Result<CategoryLookup, DatabaseError> {
            if self.failing {
                return Err(DatabaseError::Unknown("storage outage".into()));
            }
            if self.accounts_unavailable {
                return Ok(CategoryLookup::Unrestricted);
            }
            Ok(CategoryLookup::Restricted(
                self.accounts.get(&account_id).cloned().unwrap_or_default(),
            ))
        }

        async fn course_categories(
            &self,
            course_id: Uuid,
        ) -> Result<CategoryLookup, DatabaseError> {
            if self.failing {
                return Err(DatabaseError::Unknown("storage outage".into()));
            }
            if self.courses_unavailable {
                return Ok(CategoryLookup::Unrestricted);
            }
            Ok(CategoryLookup::Restricted(
                self.courses.get(&course_id).cloned().unwrap_or_default(),
            ))
        }
    }

    pub fn course(teacher_id: Uuid) -> crate::db::Course {
        let now = time::OffsetDateTime::now_utc();
        crate::db::Course {
            id: Uuid::new_v4(),
            teacher_id,
            title: "course".into(),
            description: None,
            created_at: now,
            updated_at: now,
        }
    }
}
