pub mod blog;
pub mod chat;
pub mod comment;
pub mod event;
pub mod event_attendance;
pub mod like;
pub mod nft;
pub mod user;
pub mod validation;

use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

pub use blog::{Blog, BlogPatch, NewBlog};
pub use chat::{Chat, ChatPatch, NewChat};
pub use comment::{Comment, CommentPatch, NewComment};
pub use event::{Event, EventPatch, NewEvent};
pub use event_attendance::{EventAttendance, EventAttendancePatch, NewEventAttendance};
pub use like::{Like, LikePatch, NewLike};
pub use nft::{NewNft, Nft, NftPatch};
pub use user::{NewUser, User, UserPatch};
pub use validation::{FieldError, ValidationError, Validator};

/// Where documents of one entity live, and which top-level fields must be
/// unique across the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collection {
    pub name: &'static str,
    pub unique: &'static [&'static str],
}

/// Every collection the service owns, in mount order
pub const ALL_COLLECTIONS: [Collection; 8] = [
    User::COLLECTION,
    Nft::COLLECTION,
    Blog::COLLECTION,
    Event::COLLECTION,
    EventAttendance::COLLECTION,
    Like::COLLECTION,
    Comment::COLLECTION,
    Chat::COLLECTION,
];

/// Look up a collection by its storage name
pub fn collection_by_name(name: &str) -> Option<Collection> {
    ALL_COLLECTIONS.iter().copied().find(|c| c.name == name)
}

/// An entity exposed through the uniform CRUD surface.
///
/// `Draft` is the create payload: every field optional so that missing
/// fields are reported by [`Resource::from_draft`] rather than by the JSON
/// decoder. `Patch` is the partial-update payload; it serializes only the
/// fields that were supplied, which is exactly what gets merged into the
/// stored document.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Name used in client-facing messages ("User not found!")
    const NAME: &'static str;
    const COLLECTION: Collection;

    type Draft: DeserializeOwned + Send + 'static;
    type Patch: Serialize + DeserializeOwned + Default + Send + 'static;

    fn id(&self) -> Uuid;

    fn from_draft(id: Uuid, draft: Self::Draft, now: DateTime<Utc>) -> Result<Self, ValidationError>;

    fn check_patch(patch: &Self::Patch) -> Result<(), ValidationError>;
}
