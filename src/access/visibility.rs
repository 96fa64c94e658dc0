use crate::db::{Course, DatabaseError, Role};

use super::{can_view, AccessPolicy, CategoryIndex, Principal};

/// Keep only the courses `viewer` may see, preserving input order.
///
/// Admins skip evaluation entirely, as do teachers while the strict
/// ownership flag is off; both paths return the input unchanged and avoid
/// one index round-trip per course. Everyone else gets one `can_view` per
/// course. Denied courses are silently dropped, never reported as errors.
pub async fn filter_visible(
    policy: AccessPolicy,
    viewer: &Principal,
    courses: Vec<Course>,
    index: &dyn CategoryIndex,
) -> Result<Vec<Course>, DatabaseError> {
    match viewer.role {
        Role::Admin => return Ok(courses),
        Role::Teacher if !policy.teacher_own_courses_only => return Ok(courses),
        _ => {}
    }

    let mut visible = Vec::with_capacity(courses.len());
    for course in courses {
        if can_view(policy, viewer, &course, index).await? {
            visible.push(course);
        }
    }
    Ok(visible)
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
    async fn admin_and_teacher_get_the_list_unchanged() {
        let mut index = InMemoryCategoryIndex::default();
        let courses: Vec<_> = (0..4).map(|_| course(Uuid::new_v4())).collect();
        for c in &courses {
            index.courses.insert(c.id, set(&[Uuid::new_v4()]));
        }
        let ids: Vec<_> = courses.iter().map(|c| c.id).collect();

        for role in [Role::Admin, Role::Teacher] {
            let viewer = principal(role);
            let visible = filter_visible(AccessPolicy::default(), &viewer, courses.clone(), &index)
                .await
                .unwrap();
            let visible_ids: Vec<_> = visible.iter().map(|c| c.id).collect();
            assert_eq!(visible_ids, ids);
        }
    }

    #[tokio::test]
    async fn student_listing_keeps_matching_and_public_courses_in_order() {
        let premium = Uuid::new_v4();
        let vip = Uuid::new_v4();

        let mut index = InMemoryCategoryIndex::default();
        let viewer = principal(Role::Student);
        index.accounts.insert(viewer.account_id, set(&[premium]));

        // C: {premium, vip}, D: {vip}, E: {} — expect [C, E].
        let c = course(Uuid::new_v4());
        index.courses.insert(c.id, set(&[premium, vip]));
        let d = course(Uuid::new_v4());
        index.courses.insert(d.id, set(&[vip]));
        let e = course(Uuid::new_v4());

        let visible = filter_visible(
            AccessPolicy::default(),
            &viewer,
            vec![c.clone(), d, e.clone()],
            &index,
        )
        .await
        .unwrap();

        let visible_ids: Vec<_> = visible.iter().map(|x| x.id).collect();
        assert_eq!(visible_ids, vec![c.id, e.id]);
    }

    #[tokio::test]
    async fn strict_teacher_listing_keeps_own_courses_only() {
        let index = InMemoryCategoryIndex::default();
        let viewer = principal(Role::Teacher);
        let own = course(viewer.account_id);
        let other = course(Uuid::new_v4());
        let policy = AccessPolicy {
            teacher_own_courses_only: true,
        };

        let visible = filter_visible(policy, &viewer, vec![other, own.clone()], &index)
            .await
            .unwrap();
        let visible_ids: Vec<_> = visible.iter().map(|c| c.id).collect();
        assert_eq!(visible_ids, vec![own.id]);
    }

    #[tokio::test]
    async fn storage_failure_fails_the_whole_listing() {
        let index = InMemoryCategoryIndex {
            failing: true,
            ..Default::default()
        };
        let viewer = principal(Role::Student);

        let result = filter_visible(
            AccessPolicy::default(),
            &viewer,
            vec![course(Uuid::new_v4())],
            &index,
        )
        .await;
        assert!(result.is_err());
    }
}
