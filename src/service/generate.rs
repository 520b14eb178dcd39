use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Carries a random GUID fixed at construction, used to observe how long an instance lives.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Generate {
    guid: Uuid,
    created_at: DateTime<Utc>,
}

impl Generate {
    pub fn new() -> Self {
        Self {
            guid: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }

    pub fn guid(&self) -> Uuid {
        self.guid
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Default for Generate {
    fn default() -> Self {
        Self::new()
    }
}
