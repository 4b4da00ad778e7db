//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Member accounts.
    users (id) {
        id -> Uuid,
        username -> Varchar,
        display_name -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Text,
        /// `Active` or `Suspended`.
        status -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Administrator accounts. Administrators have no public profile.
    admins (id) {
        id -> Uuid,
        username -> Varchar,
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Friendships, one row per direction.
    friendships (user_id, friend_id) {
        user_id -> Uuid,
        friend_id -> Uuid,
    }
}

diesel::table! {
    groups (id) {
        id -> Uuid,
        name -> Varchar,
        /// `Public` or `Private`.
        visibility -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    group_members (group_id, user_id) {
        group_id -> Uuid,
        user_id -> Uuid,
    }
}

diesel::table! {
    /// Post aggregates.
    ///
    /// `document` holds the serialised aggregate including comments,
    /// reactions and edit history. The scalar columns mirror fields of the
    /// document so feed queries can filter and sort without decoding it.
    posts (id) {
        id -> Uuid,
        author_id -> Uuid,
        group_id -> Nullable<Uuid>,
        /// `Public` or `Friend`.
        visibility -> Varchar,
        created_at -> Timestamptz,
        document -> Jsonb,
    }
}

diesel::table! {
    notifications (id) {
        id -> Uuid,
        recipient_id -> Uuid,
        kind -> Varchar,
        message -> Text,
        is_read -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(friendships -> users (user_id));
diesel::joinable!(group_members -> groups (group_id));
diesel::joinable!(posts -> users (author_id));
diesel::joinable!(notifications -> users (recipient_id));

diesel::allow_tables_to_appear_in_same_query!(
    admins,
    friendships,
    group_members,
    groups,
    notifications,
    posts,
    users,
);
