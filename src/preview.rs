use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::DEFAULT_MAX_PREVIEWS;
use crate::models::UploadedFile;

/// Mints a URL the result block can use to show the selected file.
pub trait PreviewUrls {
    fn create_url(&self, file: &UploadedFile) -> String;
}

#[derive(Clone, Debug)]
pub struct PreviewEntry {
    pub mime_type: String,
    pub bytes: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

/// Uploaded bytes kept around so the rendered page can show them.
///
/// Entries are never released by the render that created them; the periodic
/// [`PreviewStore::cleanup`] drops them once they age out. At most
/// `max_entries` are held, oldest first out.
#[derive(Clone)]
pub struct PreviewStore {
    entries: Arc<DashMap<String, PreviewEntry>>,
    route: String,
    max_entries: usize,
}

impl PreviewStore {
    /// `route` is the path prefix the entries are served under, e.g. `/preview`.
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            route: route.into().trim_end_matches('/').to_string(),
            max_entries: DEFAULT_MAX_PREVIEWS,
        }
    }

    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries.max(1);
        self
    }

    fn evict_oldest(&self) {
        while self.entries.len() >= self.max_entries {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|e| e.value().created_at)
                .map(|e| e.key().clone());
            match oldest {
                Some(id) => {
                    self.entries.remove(&id);
                    debug!("[freshcheck] Preview store full, dropped {}", id);
                }
                None => break,
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<PreviewEntry> {
        self.entries.get(id).map(|e| e.value().clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cleanup(&self, max_age: std::time::Duration) {
        let max_age = chrono::Duration::from_std(max_age).unwrap_or(chrono::Duration::MAX);
        let cutoff = Utc::now()
            .checked_sub_signed(max_age)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.created_at > cutoff);
        let removed = before - self.entries.len();
        if removed > 0 {
            info!("[freshcheck] Evicted {} previews", removed);
        }
    }
}

impl PreviewUrls for PreviewStore {
    fn create_url(&self, file: &UploadedFile) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.evict_oldest();
        self.entries.insert(
            id.clone(),
            PreviewEntry {
                mime_type: file.mime_type.clone(),
                bytes: file.bytes.clone(),
                created_at: Utc::now(),
            },
        );
        format!("{}/{}", self.route, id)
    }
}
