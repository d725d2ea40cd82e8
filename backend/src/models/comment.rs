use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Collection, Resource, ValidationError, Validator};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub nft_id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NewComment {
    pub nft_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub text: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CommentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nft_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for Comment {
    const NAME: &'static str = "Comment";
    const COLLECTION: Collection = Collection {
        name: "comments",
        unique: &[],
    };

    type Draft = NewComment;
    type Patch = CommentPatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_draft(id: Uuid, draft: NewComment, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        let mut v = Validator::new(Self::NAME);
        let nft_id = v.required("nft_id", draft.nft_id);
        let user_id = v.required("user_id", draft.user_id);
        let text = v.required_text("text", draft.text);
        v.finish()?;

        Ok(Self {
            id,
            nft_id,
            user_id,
            text,
            created_at: draft.created_at.unwrap_or(now),
        })
    }

    fn check_patch(patch: &CommentPatch) -> Result<(), ValidationError> {
        let mut v = Validator::new(Self::NAME);
        v.non_blank("text", patch.text.as_ref());
        v.finish()
    }
}
