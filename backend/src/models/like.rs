use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Collection, Resource, ValidationError, Validator};

/// A user's like on an NFT. The same user may like the same NFT more than
/// once; each like is its own document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Like {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub nft_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NewLike {
    pub nft_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LikePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nft_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for Like {
    const NAME: &'static str = "Like";
    const COLLECTION: Collection = Collection {
        name: "likes",
        unique: &[],
    };

    type Draft = NewLike;
    type Patch = LikePatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_draft(id: Uuid, draft: NewLike, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        let mut v = Validator::new(Self::NAME);
        let nft_id = v.required("nft_id", draft.nft_id);
        let user_id = v.required("user_id", draft.user_id);
        v.finish()?;

        Ok(Self {
            id,
            nft_id,
            user_id,
            created_at: draft.created_at.unwrap_or(now),
        })
    }

    fn check_patch(_patch: &LikePatch) -> Result<(), ValidationError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_references_are_required() {
        let err = Like::from_draft(Uuid::new_v4(), NewLike::default(), Utc::now()).unwrap_err();
        assert!(err.has_path("nft_id"));
        assert!(err.has_path("user_id"));
    }

    #[test]
    fn test_created_at_defaults_to_now() {
        let now = Utc::now();
        let draft = NewLike {
            nft_id: Some(Uuid::new_v4()),
            user_id: Some(Uuid::new_v4()),
            created_at: None,
        };
        assert_eq!(Like::from_draft(Uuid::new_v4(), draft, now).unwrap().created_at, now);
    }
}
