//! Builders wiring domain services to their outbound adapters.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use snapmate::domain::ports::{
    InboxService, LoginService, NotificationInbox, PostCommand, PostQuery, PostRepository,
    RelationshipStore, UserDirectory,
};
use snapmate::domain::{NotificationService, PostService};
use snapmate::inbound::http::state::HttpState;
use snapmate::outbound::memory::{
    MemoryAccounts, MemoryNotificationInbox, MemoryPostRepository, MemoryRelationshipStore,
    MemoryUserDirectory,
};
use snapmate::outbound::persistence::{
    DbPool, DieselLoginService, DieselNotificationInbox, DieselPostRepository,
    DieselRelationshipStore, DieselUserDirectory,
};
use tracing::warn;

use super::ServerConfig;

/// Adapters behind the driving ports, before they are wrapped in services.
struct Adapters<P, R, U, N> {
    login: Arc<dyn LoginService>,
    posts: Arc<P>,
    relationships: Arc<R>,
    users: Arc<U>,
    inbox: Arc<N>,
}

impl<P, R, U, N> Adapters<P, R, U, N>
where
    P: PostRepository + 'static,
    R: RelationshipStore + 'static,
    U: UserDirectory + 'static,
    N: NotificationInbox + 'static,
{
    fn into_state(self, clock: Arc<dyn Clock>) -> HttpState {
        let service = Arc::new(PostService::new(
            self.posts,
            self.relationships,
            self.users,
            Arc::clone(&self.inbox),
            clock,
        ));
        let posts: Arc<dyn PostCommand> = service.clone();
        let posts_query: Arc<dyn PostQuery> = service;
        let notifications: Arc<dyn InboxService> = Arc::new(NotificationService::new(self.inbox));
        HttpState::new(self.login, posts, posts_query, notifications)
    }
}

fn diesel_adapters(
    pool: &DbPool,
) -> Adapters<DieselPostRepository, DieselRelationshipStore, DieselUserDirectory, DieselNotificationInbox>
{
    Adapters {
        login: Arc::new(DieselLoginService::new(pool.clone())),
        posts: Arc::new(DieselPostRepository::new(pool.clone())),
        relationships: Arc::new(DieselRelationshipStore::new(pool.clone())),
        users: Arc::new(DieselUserDirectory::new(pool.clone())),
        inbox: Arc::new(DieselNotificationInbox::new(pool.clone())),
    }
}

fn memory_adapters() -> Adapters<
    MemoryPostRepository,
    MemoryRelationshipStore,
    MemoryUserDirectory,
    MemoryNotificationInbox,
> {
    Adapters {
        login: Arc::new(MemoryAccounts::default()),
        posts: Arc::new(MemoryPostRepository::default()),
        relationships: Arc::new(MemoryRelationshipStore::default()),
        users: Arc::new(MemoryUserDirectory::default()),
        inbox: Arc::new(MemoryNotificationInbox::default()),
    }
}

/// Build the shared HTTP state, backed by PostgreSQL when a pool is
/// configured and by empty in-memory adapters otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let state = match &config.db_pool {
        Some(pool) => diesel_adapters(pool).into_state(clock),
        None => {
            warn!("no database configured; serving from empty in-memory stores");
            memory_adapters().into_state(clock)
        }
    };
    web::Data::new(state)
}
