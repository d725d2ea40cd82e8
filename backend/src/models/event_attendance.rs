use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Collection, Resource, ValidationError, Validator};

/// One scan of a user's ticket at an event. Timestamped by `scanned_at`
/// rather than `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventAttendance {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub scanned_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NewEventAttendance {
    pub event_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub scanned_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct EventAttendancePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scanned_at: Option<DateTime<Utc>>,
}

impl Resource for EventAttendance {
    const NAME: &'static str = "EventAttendance";
    const COLLECTION: Collection = Collection {
        name: "event_attendances",
        unique: &[],
    };

    type Draft = NewEventAttendance;
    type Patch = EventAttendancePatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_draft(
        id: Uuid,
        draft: NewEventAttendance,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let mut v = Validator::new(Self::NAME);
        let event_id = v.required("event_id", draft.event_id);
        let user_id = v.required("user_id", draft.user_id);
        v.finish()?;

        Ok(Self {
            id,
            event_id,
            user_id,
            scanned_at: draft.scanned_at.unwrap_or(now),
        })
    }

    fn check_patch(_patch: &EventAttendancePatch) -> Result<(), ValidationError> {
        Ok(())
    }
}
