use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use tracing::{info, warn};

use crate::models::EventDetails;

pub const UNKNOWN_EVENT: &str = "Unknown Event";

/// Event metadata keyed by event id, loaded once and handed to whoever needs display names.
#[derive(Debug, Clone, Default)]
pub struct EventCatalog {
    events: HashMap<String, EventDetails>,
}

impl EventCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a JSON object of `eventId -> details`. Unparseable content yields an empty catalog.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read event catalog {}", path.display()))?;

        match serde_json::from_str::<HashMap<String, EventDetails>>(&raw) {
            Ok(events) => {
                let mut catalog = Self::new();
                for (event_id, details) in events {
                    catalog.insert(event_id, details);
                }
                info!(count = catalog.len(), "loaded event catalog");
                Ok(catalog)
            }
            Err(e) => {
                warn!("Error parsing stored event details: {e}");
                Ok(Self::default())
            }
        }
    }

    pub fn insert(&mut self, event_id: impl Into<String>, details: EventDetails) {
        self.events.insert(event_id.into(), details);
    }

    #[cfg(test)]
    pub fn remove(&mut self, event_id: &str) -> Option<EventDetails> {
        self.events.remove(event_id)
    }

    pub fn get(&self, event_id: &str) -> Option<&EventDetails> {
        self.events.get(event_id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Catalog title, then the name carried by the record, then [`UNKNOWN_EVENT`].
    pub fn display_name(&self, event_id: &str, embedded: Option<&str>) -> String {
        self.get(event_id)
            .and_then(|details| details.title.as_deref())
            .filter(|title| !title.is_empty())
            .or(embedded.filter(|name| !name.is_empty()))
            .unwrap_or(UNKNOWN_EVENT)
            .to_string()
    }
}

impl FromIterator<(String, EventDetails)> for EventCatalog {
    fn from_iter<I: IntoIterator<Item = (String, EventDetails)>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}
