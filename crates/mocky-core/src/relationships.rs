use crate::types::EntityType;

/// Foreign-key field on a record and the entity type it references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKeyField {
    pub field: &'static str,
    pub references: EntityType,
}

/// Dependencies of one entity type on others.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationshipDescriptor {
    /// Entity types that must be generated alongside this one.
    pub requires: &'static [EntityType],
    /// Average number of primary records per auxiliary record.
    pub ratio: u32,
    /// Foreign-key fields and the type each one references.
    pub foreign_keys: &'static [ForeignKeyField],
}

impl RelationshipDescriptor {
    pub fn has_dependencies(&self) -> bool {
        !self.requires.is_empty()
    }

    /// Number of auxiliary records needed for `count` primary records:
    /// `max(1, ceil(count / ratio))`.
    pub fn auxiliary_count(&self, count: usize) -> usize {
        let ratio = self.ratio.max(1) as usize;
        count.div_ceil(ratio).max(1)
    }
}

const STANDALONE: RelationshipDescriptor = RelationshipDescriptor {
    requires: &[],
    ratio: 1,
    foreign_keys: &[],
};

const PRODUCTS: RelationshipDescriptor = RelationshipDescriptor {
    requires: &[EntityType::Users],
    ratio: 3,
    foreign_keys: &[ForeignKeyField {
        field: "sellerId",
        references: EntityType::Users,
    }],
};

const POSTS: RelationshipDescriptor = RelationshipDescriptor {
    requires: &[EntityType::Users],
    ratio: 5,
    foreign_keys: &[ForeignKeyField {
        field: "authorId",
        references: EntityType::Users,
    }],
};

const COMMENTS: RelationshipDescriptor = RelationshipDescriptor {
    requires: &[EntityType::Users, EntityType::Posts],
    ratio: 5,
    foreign_keys: &[
        ForeignKeyField {
            field: "userId",
            references: EntityType::Users,
        },
        ForeignKeyField {
            field: "postId",
            references: EntityType::Posts,
        },
    ],
};

const TRANSACTIONS: RelationshipDescriptor = RelationshipDescriptor {
    requires: &[EntityType::Users],
    ratio: 10,
    foreign_keys: &[ForeignKeyField {
        field: "userId",
        references: EntityType::Users,
    }],
};

/// Relationship descriptor for an entity type.
pub fn relationship_for(entity: EntityType) -> &'static RelationshipDescriptor {
    match entity {
        EntityType::Products => &PRODUCTS,
        EntityType::Posts => &POSTS,
        EntityType::Comments => &COMMENTS,
        EntityType::Transactions => &TRANSACTIONS,
        EntityType::Users
        | EntityType::Companies
        | EntityType::Addresses
        | EntityType::Events
        | EntityType::Schedules
        | EntityType::Custom => &STANDALONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auxiliary_count_rounds_up_and_never_hits_zero() {
        let posts = relationship_for(EntityType::Posts);
        assert_eq!(posts.auxiliary_count(1), 1);
        assert_eq!(posts.auxiliary_count(5), 1);
        assert_eq!(posts.auxiliary_count(6), 2);
        assert_eq!(posts.auxiliary_count(0), 1);

        let transactions = relationship_for(EntityType::Transactions);
        assert_eq!(transactions.auxiliary_count(500), 50);
    }

    #[test]
    fn foreign_keys_reference_required_types() {
        for entity in EntityType::ALL {
            let descriptor = relationship_for(entity);
            for fk in descriptor.foreign_keys {
                assert!(
                    descriptor.requires.contains(&fk.references),
                    "{entity}.{} references a type it does not require",
                    fk.field
                );
            }
        }
    }
}
