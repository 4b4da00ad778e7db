//! Shared builders for post service unit tests.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};
use mockable::DefaultClock;

use super::PostService;
use crate::domain::ports::{
    MockNotificationInbox, MockPostRepository, MockRelationshipStore, MockUserDirectory,
};
use crate::domain::posts::{NewPost, Post, Visibility};
use crate::domain::{
    Group, GroupId, GroupVisibility, Notification, PostId, UserId, UserProfile,
};

pub(super) type TestService = PostService<
    MockPostRepository,
    MockRelationshipStore,
    MockUserDirectory,
    MockNotificationInbox,
>;

/// Mocks for every collaborator, configured per test.
#[derive(Default)]
pub(super) struct Collaborators {
    pub posts: MockPostRepository,
    pub relationships: MockRelationshipStore,
    pub users: MockUserDirectory,
    pub inbox: MockNotificationInbox,
}

impl Collaborators {
    pub fn into_service(self) -> TestService {
        PostService::new(
            Arc::new(self.posts),
            Arc::new(self.relationships),
            Arc::new(self.users),
            Arc::new(self.inbox),
            Arc::new(DefaultClock),
        )
    }

    /// Serve `post` from `find_by_id`, any number of times.
    pub fn serve_post(&mut self, post: &Post) {
        let stored = post.clone();
        self.posts
            .expect_find_by_id()
            .returning(move |_| Ok(Some(stored.clone())));
    }

    /// Capture every saved document.
    pub fn record_saves(&mut self) -> Arc<Mutex<Vec<Post>>> {
        let saved = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&saved);
        self.posts.expect_save().returning(move |post| {
            sink.lock().expect("save sink").push(post.clone());
            Ok(())
        });
        saved
    }

    /// Capture every appended notification.
    pub fn record_notifications(&mut self) -> Arc<Mutex<Vec<Notification>>> {
        let appended = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&appended);
        self.inbox.expect_append().returning(move |notification| {
            sink.lock().expect("inbox sink").push(notification.clone());
            Ok(())
        });
        appended
    }

    /// Resolve every profile lookup to `profiles`.
    pub fn known_profiles(&mut self, profiles: Vec<UserProfile>) {
        let single = profiles.clone();
        self.users.expect_find_profile().returning(move |id| {
            Ok(single.iter().find(|profile| profile.id == id).cloned())
        });
        self.users.expect_find_profiles().returning(move |ids| {
            Ok(profiles
                .iter()
                .filter(|profile| ids.contains(&profile.id))
                .cloned()
                .collect())
        });
    }
}

pub(super) fn timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 8, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn profile(id: UserId, name: &str) -> UserProfile {
    UserProfile::new(id, name.to_lowercase(), name)
}

pub(super) fn personal_post(author: UserId, visibility: Visibility) -> Post {
    Post::create(
        PostId::random(),
        NewPost {
            author,
            content: "hello".to_owned(),
            images: Vec::new(),
            visibility,
            group: None,
        },
        timestamp(),
    )
    .expect("valid post")
}

pub(super) fn group_post(author: UserId, group: GroupId) -> Post {
    Post::create(
        PostId::random(),
        NewPost {
            author,
            content: "hello group".to_owned(),
            images: Vec::new(),
            visibility: Visibility::Public,
            group: Some(group),
        },
        timestamp(),
    )
    .expect("valid post")
}

pub(super) fn group(visibility: GroupVisibility, members: Vec<UserId>) -> Group {
    Group {
        id: GroupId::random(),
        name: "Hikers".to_owned(),
        visibility,
        members,
    }
}
