//! In-memory `RelationshipStore`.

use std::sync::RwLock;

use async_trait::async_trait;

use super::{read, write};
use crate::domain::ports::{RelationshipStore, RelationshipStoreError};
use crate::domain::{Group, GroupId, UserId};

/// Friendships and groups seeded by the caller.
#[derive(Debug, Default)]
pub struct MemoryRelationshipStore {
    friendships: RwLock<Vec<(UserId, UserId)>>,
    groups: RwLock<Vec<Group>>,
}

impl MemoryRelationshipStore {
    /// Record a mutual friendship between `a` and `b`.
    pub fn befriend(&self, a: UserId, b: UserId) {
        if a != b {
            write(&self.friendships).push((a, b));
        }
    }

    /// Add or replace `group`.
    pub fn add_group(&self, group: Group) {
        let mut groups = write(&self.groups);
        groups.retain(|stored| stored.id != group.id);
        groups.push(group);
    }
}

#[async_trait]
impl RelationshipStore for MemoryRelationshipStore {
    async fn friends_of(&self, user: UserId) -> Result<Vec<UserId>, RelationshipStoreError> {
        let mut friends: Vec<UserId> = read(&self.friendships)
            .iter()
            .filter_map(|&(a, b)| match (a == user, b == user) {
                (true, _) => Some(b),
                (_, true) => Some(a),
                _ => None,
            })
            .collect();
        friends.sort_unstable();
        friends.dedup();
        Ok(friends)
    }

    async fn is_friend(&self, a: UserId, b: UserId) -> Result<bool, RelationshipStoreError> {
        Ok(read(&self.friendships)
            .iter()
            .any(|&pair| pair == (a, b) || pair == (b, a)))
    }

    async fn groups_of(&self, user: UserId) -> Result<Vec<GroupId>, RelationshipStoreError> {
        Ok(read(&self.groups)
            .iter()
            .filter(|group| group.has_member(user))
            .map(|group| group.id)
            .collect())
    }

    async fn is_group_member(
        &self,
        group: GroupId,
        user: UserId,
    ) -> Result<bool, RelationshipStoreError> {
        Ok(read(&self.groups)
            .iter()
            .any(|stored| stored.id == group && stored.has_member(user)))
    }

    async fn find_group(&self, group: GroupId) -> Result<Option<Group>, RelationshipStoreError> {
        Ok(read(&self.groups)
            .iter()
            .find(|stored| stored.id == group)
            .cloned())
    }
}
