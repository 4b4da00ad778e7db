//! Driven port for the friendship and group membership graph.
//!
//! The post engine only reads relationships; requests and approvals are
//! handled elsewhere.

use async_trait::async_trait;

use crate::domain::{Group, GroupId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by relationship store adapters.
    pub enum RelationshipStoreError {
        /// Store connection could not be established.
        Connection { message: String } => "relationship store connection failed: {message}",
        /// Lookup failed during execution.
        Query { message: String } => "relationship store query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RelationshipStore: Send + Sync {
    /// Everyone `user` is friends with.
    async fn friends_of(&self, user: UserId) -> Result<Vec<UserId>, RelationshipStoreError>;

    /// Whether `a` and `b` are friends. Friendship is symmetric.
    async fn is_friend(&self, a: UserId, b: UserId) -> Result<bool, RelationshipStoreError>;

    /// Groups `user` belongs to.
    async fn groups_of(&self, user: UserId) -> Result<Vec<GroupId>, RelationshipStoreError>;

    /// Whether `user` is a current member of `group`.
    async fn is_group_member(
        &self,
        group: GroupId,
        user: UserId,
    ) -> Result<bool, RelationshipStoreError>;

    /// A group with its visibility and member list.
    async fn find_group(&self, group: GroupId) -> Result<Option<Group>, RelationshipStoreError>;
}
