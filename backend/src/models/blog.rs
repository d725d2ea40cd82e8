use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Collection, Resource, ValidationError, Validator};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blog {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub metadata_uri: String,
    pub txid: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NewBlog {
    pub user_id: Option<Uuid>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub metadata_uri: Option<String>,
    pub txid: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct BlogPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub txid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for Blog {
    const NAME: &'static str = "Blog";
    const COLLECTION: Collection = Collection {
        name: "blogs",
        unique: &[],
    };

    type Draft = NewBlog;
    type Patch = BlogPatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_draft(id: Uuid, draft: NewBlog, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        let mut v = Validator::new(Self::NAME);
        let user_id = v.required("user_id", draft.user_id);
        let title = v.required_text("title", draft.title);
        let content = v.required_text("content", draft.content);
        let metadata_uri = v.required_text("metadata_uri", draft.metadata_uri);
        let txid = v.required_text("txid", draft.txid);
        v.finish()?;

        Ok(Self {
            id,
            user_id,
            title,
            content,
            metadata_uri,
            txid,
            created_at: draft.created_at.unwrap_or(now),
        })
    }

    fn check_patch(patch: &BlogPatch) -> Result<(), ValidationError> {
        let mut v = Validator::new(Self::NAME);
        v.non_blank("title", patch.title.as_ref());
        v.non_blank("content", patch.content.as_ref());
        v.non_blank("metadata_uri", patch.metadata_uri.as_ref());
        v.non_blank("txid", patch.txid.as_ref());
        v.finish()
    }
}
