use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Collection, Resource, ValidationError, Validator};

/// A minted NFT. `metadata_uri` and `txid` are opaque references to the
/// on-chain asset; nothing here talks to a chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nft {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user_id: Uuid,
    pub metadata_uri: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub media_url: String,
    pub txid: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NewNft {
    pub user_id: Option<Uuid>,
    pub metadata_uri: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub media_url: Option<String>,
    pub txid: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct NftPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub txid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for Nft {
    const NAME: &'static str = "NFT";
    const COLLECTION: Collection = Collection {
        name: "nfts",
        unique: &[],
    };

    type Draft = NewNft;
    type Patch = NftPatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_draft(id: Uuid, draft: NewNft, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        let mut v = Validator::new(Self::NAME);
        let user_id = v.required("user_id", draft.user_id);
        let metadata_uri = v.required_text("metadata_uri", draft.metadata_uri);
        let title = v.required_text("title", draft.title);
        let media_url = v.required_text("media_url", draft.media_url);
        let txid = v.required_text("txid", draft.txid);
        v.finish()?;

        Ok(Self {
            id,
            user_id,
            metadata_uri,
            title,
            description: draft.description,
            media_url,
            txid,
            created_at: draft.created_at.unwrap_or(now),
        })
    }

    fn check_patch(patch: &NftPatch) -> Result<(), ValidationError> {
        let mut v = Validator::new(Self::NAME);
        v.non_blank("metadata_uri", patch.metadata_uri.as_ref());
        v.non_blank("title", patch.title.as_ref());
        v.non_blank("media_url", patch.media_url.as_ref());
        v.non_blank("txid", patch.txid.as_ref());
        v.finish()
    }
}
