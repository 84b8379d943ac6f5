use mocky_core::{EntityType, relationship_for};

/// Auxiliary dataset to generate ahead of the primary one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuxiliaryTask {
    pub entity: EntityType,
    pub count: usize,
}

/// Auxiliary datasets needed to generate `count` records of `entity`.
///
/// Dependencies are resolved one level deep: `comments` plans `users` and
/// `posts`, but not the `users` that `posts` would need on its own. An empty
/// plan means the entity has no dependencies.
pub fn plan_auxiliary(entity: EntityType, count: usize) -> Vec<AuxiliaryTask> {
    let descriptor = relationship_for(entity);
    descriptor
        .requires
        .iter()
        .map(|dependency| AuxiliaryTask {
            entity: *dependency,
            count: descriptor.auxiliary_count(count),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standalone_types_plan_nothing() {
        assert!(plan_auxiliary(EntityType::Users, 10).is_empty());
        assert!(plan_auxiliary(EntityType::Custom, 10).is_empty());
    }

    #[test]
    fn comments_plan_users_and_posts_once() {
        let plan = plan_auxiliary(EntityType::Comments, 10);
        assert_eq!(
            plan,
            vec![
                AuxiliaryTask {
                    entity: EntityType::Users,
                    count: 2,
                },
                AuxiliaryTask {
                    entity: EntityType::Posts,
                    count: 2,
                },
            ]
        );
    }

    #[test]
    fn products_use_ratio_three() {
        let plan = plan_auxiliary(EntityType::Products, 10);
        assert_eq!(plan[0].count, 4);
    }
}
