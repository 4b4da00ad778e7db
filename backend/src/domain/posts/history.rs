//! Post edit history: sparse snapshots and their resolved form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Image, Visibility};

/// Pre-edit values of the fields an edit touched.
///
/// Absent fields were not part of that edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<Image>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    pub taken_at: DateTime<Utc>,
}

impl PostSnapshot {
    /// Whether the snapshot captured anything.
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.images.is_none() && self.visibility.is_none()
    }
}

/// Full post state that was live just before one edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub content: String,
    pub images: Vec<Image>,
    pub visibility: Visibility,
    pub taken_at: DateTime<Utc>,
}

/// Live values that seed the resolution walk.
pub(super) struct LiveState<'a> {
    pub content: &'a str,
    pub images: &'a [Image],
    pub visibility: Visibility,
}

/// Resolve sparse snapshots into full states.
///
/// Walks from the most recent snapshot back to the oldest. A field missing
/// from a snapshot takes the value resolved for the next more recent edit,
/// or the live value for the latest edit. The result is in edit order, so
/// the first entry is the state before the first edit.
pub(super) fn resolve(live: &LiveState<'_>, snapshots: &[PostSnapshot]) -> Vec<HistoryEntry> {
    let mut content = live.content;
    let mut images = live.images;
    let mut visibility = live.visibility;
    let mut resolved = Vec::with_capacity(snapshots.len());

    for snapshot in snapshots.iter().rev() {
        if let Some(previous) = snapshot.content.as_deref() {
            content = previous;
        }
        if let Some(previous) = snapshot.images.as_deref() {
            images = previous;
        }
        if let Some(previous) = snapshot.visibility {
            visibility = previous;
        }
        resolved.push(HistoryEntry {
            content: content.to_owned(),
            images: images.to_vec(),
            visibility,
            taken_at: snapshot.taken_at,
        });
    }

    resolved.reverse();
    resolved
}
