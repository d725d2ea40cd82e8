use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Collection, Resource, ValidationError, Validator};

/// A direct message between two users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NewChat {
    pub sender_id: Option<Uuid>,
    pub receiver_id: Option<Uuid>,
    pub message: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ChatPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for Chat {
    const NAME: &'static str = "Chat";
    const COLLECTION: Collection = Collection {
        name: "chats",
        unique: &[],
    };

    type Draft = NewChat;
    type Patch = ChatPatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_draft(id: Uuid, draft: NewChat, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        let mut v = Validator::new(Self::NAME);
        let sender_id = v.required("sender_id", draft.sender_id);
        let receiver_id = v.required("receiver_id", draft.receiver_id);
        let message = v.required_text("message", draft.message);
        v.finish()?;

        Ok(Self {
            id,
            sender_id,
            receiver_id,
            message,
            created_at: draft.created_at.unwrap_or(now),
        })
    }

    fn check_patch(patch: &ChatPatch) -> Result<(), ValidationError> {
        let mut v = Validator::new(Self::NAME);
        v.non_blank("message", patch.message.as_ref());
        v.finish()
    }
}
