use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Collection, Resource, ValidationError, Validator};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub walletaddress: String,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_pic: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NewUser {
    pub walletaddress: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub profile_pic: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub walletaddress: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_pic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for User {
    const NAME: &'static str = "User";
    const COLLECTION: Collection = Collection {
        name: "users",
        unique: &["walletaddress"],
    };

    type Draft = NewUser;
    type Patch = UserPatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_draft(id: Uuid, draft: NewUser, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        let mut v = Validator::new(Self::NAME);
        let walletaddress = v.required_text("walletaddress", draft.walletaddress);
        let username = v.required_text("username", draft.username);
        let email = v.required_text("email", draft.email);
        v.finish()?;

        Ok(Self {
            id,
            walletaddress,
            username,
            email,
            bio: draft.bio,
            profile_pic: draft.profile_pic,
            created_at: draft.created_at.unwrap_or(now),
        })
    }

    fn check_patch(patch: &UserPatch) -> Result<(), ValidationError> {
        let mut v = Validator::new(Self::NAME);
        v.non_blank("walletaddress", patch.walletaddress.as_ref());
        v.non_blank("username", patch.username.as_ref());
        v.non_blank("email", patch.email.as_ref());
        v.finish()
    }
}
