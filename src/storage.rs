use chrono::{DateTime, Utc};

/// Synthesizes object locations for uploads. Bytes are not persisted
/// anywhere yet; only the would-be URL is recorded.
#[derive(Clone, Debug)]
pub struct PlaceholderStorage {
    base_url: String,
}

impl PlaceholderStorage {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn location_for(&self, file_name: &str, at: DateTime<Utc>) -> String {
        let file_name: String = file_name
            .chars()
            .map(|c| if c.is_whitespace() || c == '/' { '_' } else { c })
            .collect();
        format!("{}/{}-{}", self.base_url, at.timestamp_millis(), file_name)
    }
}
