use crate::db::{Course, DatabaseError, Role};

use super::{AccessPolicy, CategoryIndex, CategoryLookup, Principal};

/// Decide whether `viewer` may see `course`. Ordered rules, first match
/// wins:
///
/// 1. admins see everything;
/// 2. teachers see everything, unless the strict policy flag is on, in
///    which case they see their own courses only;
/// 3. a course whose category lookup is `Unrestricted` (feature not
///    provisioned) is visible;
/// 4. a course with an empty category set is public;
/// 5. an account whose category lookup is `Unrestricted` is unrestricted;
/// 6. otherwise the two category sets must intersect.
///
/// Storage errors propagate unchanged; callers decide what a failed read
/// means for the request (the HTTP layer fails closed). `Unrestricted` is
/// not an error and always fails open. Collapsing the two would turn a
/// partially-provisioned feature into an access outage, or an outage into
/// an access grant.
pub async fn can_view(
    policy: AccessPolicy,
    viewer: &Principal,
    course: &Course,
    index: &dyn CategoryIndex,
) -> Result<bool, DatabaseError> {
    match viewer.role {
        Role::Admin => return Ok(true),
        Role::Teacher => {
            if !policy.teacher_own_courses_only {
                return Ok(true);
            }
            return Ok(course.teacher_id == viewer.account_id);
        }
        Role::Student => {}
    }

    let course_categories = match index.course_categories(course.id).await? {
        CategoryLookup::Unrestricted => return Ok(true),
        CategoryLookup::Restricted(set) if set.is_empty() => return Ok(true),
        CategoryLookup::Restricted(set) => set,
    };

    match index.account_categories(viewer.account_id).await? {
        CategoryLookup::Unrestricted => Ok(true),
        CategoryLookup::Restricted(mine) => Ok(!mine.is_disjoint(&course_categories)),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use uuid::Uuid;

    use super::super::testing::{course, InMemoryCategoryIndex};
    use super::*;

    fn principal(role: Role) -> Principal {
        Principal {
            account_id: Uuid::new_v4(),
            role,
        }
    }

    fn set(ids: &[Uuid]) -> HashSet<Uuid> {
        ids.iter().copied().collect()
    }

    #[tokio::test]
    async fn admin_sees_any_course() {
        let index = InMemoryCategoryIndex::default();
        let viewer = principal(Role::Admin);
        let restricted = course(Uuid::new_v4());

        let allowed = can_view(AccessPolicy::default(), &viewer, &restricted, &index)
            .await
            .unwrap();
        assert!(allowed);
    }

    #[tokio::test]
    async fn teacher_sees_any_course_by_default() {
        let mut index = InMemoryCategoryIndex::default();
        let viewer = principal(Role::Teacher);
        let other = course(Uuid::new_v4());
        index.courses.insert(other.id, set(&[Uuid::new_v4()]));

        let allowed = can_view(AccessPolicy::default(), &viewer, &other, &index)
            .await
            .unwrap();
        assert!(allowed);
    }

    #[tokio::test]
    async fn strict_policy_limits_teacher_to_own_courses() {
        let index = InMemoryCategoryIndex::default();
        let viewer = principal(Role::Teacher);
        let own = course(viewer.account_id);
        let other = course(Uuid::new_v4());
        let policy = AccessPolicy {
            teacher_own_courses_only: true,
        };

        assert!(can_view(policy, &viewer, &own, &index).await.unwrap());
        assert!(!can_view(policy, &viewer, &other, &index).await.unwrap());
    }

    #[tokio::test]
    async fn public_course_is_visible_to_every_student() {
        let mut index = InMemoryCategoryIndex::default();
        let viewer = principal(Role::Student);
        index
            .accounts
            .insert(viewer.account_id, set(&[Uuid::new_v4()]));
        let public = course(Uuid::new_v4());

        let allowed = can_view(AccessPolicy::default(), &viewer, &public, &index)
            .await
            .unwrap();
        assert!(allowed);
    }

    #[tokio::test]
    async fn unprovisioned_course_side_fails_open() {
        let index = InMemoryCategoryIndex {
            courses_unavailable: true,
            ..Default::default()
        };
        let viewer = principal(Role::Student);
        let restricted = course(Uuid::new_v4());

        let allowed = can_view(AccessPolicy::default(), &viewer, &restricted, &index)
            .await
            .unwrap();
        assert!(allowed);
    }

    #[tokio::test]
    async fn unprovisioned_account_side_fails_open() {
        let mut index = InMemoryCategoryIndex {
            accounts_unavailable: true,
            ..Default::default()
        };
        let viewer = principal(Role::Student);
        let restricted = course(Uuid::new_v4());
        index.courses.insert(restricted.id, set(&[Uuid::new_v4()]));

        let allowed = can_view(AccessPolicy::default(), &viewer, &restricted, &index)
            .await
            .unwrap();
        assert!(allowed);
    }

    #[tokio::test]
    async fn student_needs_a_shared_category() {
        let premium = Uuid::new_v4();
        let vip = Uuid::new_v4();

        let mut index = InMemoryCategoryIndex::default();
        let viewer = principal(Role::Student);
        index.accounts.insert(viewer.account_id, set(&[premium]));

        let premium_course = course(Uuid::new_v4());
        index.courses.insert(premium_course.id, set(&[premium, vip]));
        let vip_course = course(Uuid::new_v4());
        index.courses.insert(vip_course.id, set(&[vip]));

        let policy = AccessPolicy::default();
        assert!(can_view(policy, &viewer, &premium_course, &index)
            .await
            .unwrap());
        assert!(!can_view(policy, &viewer, &vip_course, &index)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn student_with_no_categories_is_denied_restricted_courses() {
        let mut index = InMemoryCategoryIndex::default();
        let viewer = principal(Role::Student);
        let restricted = course(Uuid::new_v4());
        index.courses.insert(restricted.id, set(&[Uuid::new_v4()]));

        let allowed = can_view(AccessPolicy::default(), &viewer, &restricted, &index)
            .await
            .unwrap();
        assert!(!allowed);
    }

    #[tokio::test]
    async fn storage_failure_propagates_instead_of_deciding() {
        let index = InMemoryCategoryIndex {
            failing: true,
            ..Default::default()
        };
        let viewer = principal(Role::Student);
        let restricted = course(Uuid::new_v4());

        let result = can_view(AccessPolicy::default(), &viewer, &restricted, &index).await;
        assert!(result.is_err());
    }
}
