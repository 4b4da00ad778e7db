//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{InboxService, LoginService, PostCommand, PostQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub posts: Arc<dyn PostCommand>,
    pub posts_query: Arc<dyn PostQuery>,
    pub notifications: Arc<dyn InboxService>,
}

impl HttpState {
    /// Bundle the driving ports used by the handlers.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use snapmate::domain::{NotificationService, PostService};
    /// use snapmate::inbound::http::state::HttpState;
    /// use snapmate::outbound::memory::{
    ///     MemoryAccounts, MemoryNotificationInbox, MemoryPostRepository,
    ///     MemoryRelationshipStore, MemoryUserDirectory,
    /// };
    ///
    /// let inbox = Arc::new(MemoryNotificationInbox::default());
    /// let posts = Arc::new(PostService::new(
    ///     Arc::new(MemoryPostRepository::default()),
    ///     Arc::new(MemoryRelationshipStore::default()),
    ///     Arc::new(MemoryUserDirectory::default()),
    ///     Arc::clone(&inbox),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let state = HttpState::new(
    ///     Arc::new(MemoryAccounts::default()),
    ///     posts.clone(),
    ///     posts,
    ///     Arc::new(NotificationService::new(inbox)),
    /// );
    /// let _login = state.login.clone();
    /// ```
    pub fn new(
        login: Arc<dyn LoginService>,
        posts: Arc<dyn PostCommand>,
        posts_query: Arc<dyn PostQuery>,
        notifications: Arc<dyn InboxService>,
    ) -> Self {
        Self {
            login,
            posts,
            posts_query,
            notifications,
        }
    }
}
