//! Notification dispatcher seam.
//!
//! Fired when an office enters the PENDING approval state. Delivery
//! mechanics (mail, push, queues) belong to an external collaborator; the
//! core only needs a fire-and-forget contract.

use std::sync::Mutex;

use async_trait::async_trait;
use officely_core::types::DbId;
use officely_db::models::office::Office;
use officely_db::models::user::User;

#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Tell `recipients` (the administrators) that `office` awaits approval.
    async fn office_pending_approval(&self, recipients: &[User], office: &Office);
}

/// Production dispatcher: logs each dispatch. Actual delivery is wired up
/// by the external notification service consuming these log events.
pub struct TracingDispatcher;

#[async_trait]
impl NotificationDispatcher for TracingDispatcher {
    async fn office_pending_approval(&self, recipients: &[User], office: &Office) {
        tracing::info!(
            office_id = office.id,
            recipients = recipients.len(),
            "office pending approval notification dispatched"
        );
    }
}

/// Records dispatches in memory so integration tests can assert on them.
#[derive(Default)]
pub struct RecordingDispatcher {
    dispatches: Mutex<Vec<(Vec<DbId>, DbId)>>,
}

#[async_trait]
impl NotificationDispatcher for RecordingDispatcher {
    async fn office_pending_approval(&self, recipients: &[User], office: &Office) {
        let recipient_ids = recipients.iter().map(|u| u.id).collect();
        self.dispatches
            .lock()
            .unwrap()
            .push((recipient_ids, office.id));
    }
}

impl RecordingDispatcher {
    /// Total number of dispatches so far.
    pub fn count(&self) -> usize {
        self.dispatches.lock().unwrap().len()
    }

    /// Office ids that have been announced, in dispatch order.
    pub fn dispatched_offices(&self) -> Vec<DbId> {
        self.dispatches
            .lock()
            .unwrap()
            .iter()
            .map(|(_, office_id)| *office_id)
            .collect()
    }
}
