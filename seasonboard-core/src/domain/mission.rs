use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::completion::MissionRef;
use super::ids::{MissionId, VariantId};

/// A mission as listed in the mission catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mission {
    pub id: MissionId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub variant: Option<VariantId>,
    pub date_added: DateTime<Utc>,
    #[serde(default)]
    pub verified: bool,
}

impl Mission {
    pub fn new(id: impl Into<MissionId>, name: impl Into<String>, date_added: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            variant: None,
            date_added,
            verified: true,
        }
    }

    pub fn with_variant(mut self, variant: impl Into<VariantId>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    pub fn verified(mut self, verified: bool) -> Self {
        self.verified = verified;
        self
    }

    /// The `{id, variant}` pair completions refer to.
    pub fn mission_ref(&self) -> MissionRef {
        MissionRef {
            id: self.id,
            variant: self.variant,
        }
    }
}
