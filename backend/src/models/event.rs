use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Collection, Resource, ValidationError, Validator};

/// A hosted event gated by an NFT. `date_time` is kept exactly as the
/// client sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub date_time: String,
    pub nft_id: Uuid,
    pub qr_code_url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NewEvent {
    pub user_id: Option<Uuid>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub date_time: Option<String>,
    pub nft_id: Option<Uuid>,
    pub qr_code_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct EventPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nft_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for Event {
    const NAME: &'static str = "Event";
    const COLLECTION: Collection = Collection {
        name: "events",
        unique: &[],
    };

    type Draft = NewEvent;
    type Patch = EventPatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_draft(id: Uuid, draft: NewEvent, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        let mut v = Validator::new(Self::NAME);
        let user_id = v.required("user_id", draft.user_id);
        let title = v.required_text("title", draft.title);
        let description = v.required_text("description", draft.description);
        let date_time = v.required_text("date_time", draft.date_time);
        let nft_id = v.required("nft_id", draft.nft_id);
        let qr_code_url = v.required_text("qr_code_url", draft.qr_code_url);
        v.finish()?;

        Ok(Self {
            id,
            user_id,
            title,
            description,
            date_time,
            nft_id,
            qr_code_url,
            created_at: draft.created_at.unwrap_or(now),
        })
    }

    fn check_patch(patch: &EventPatch) -> Result<(), ValidationError> {
        let mut v = Validator::new(Self::NAME);
        v.non_blank("title", patch.title.as_ref());
        v.non_blank("description", patch.description.as_ref());
        v.non_blank("date_time", patch.date_time.as_ref());
        v.non_blank("qr_code_url", patch.qr_code_url.as_ref());
        v.finish()
    }
}
