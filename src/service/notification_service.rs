use std::sync::Arc;
use uuid::Uuid;

use crate::{
    db::{db::DBClient, notificationdb::NotificationExt},
    models::notificationmodel::{Notification, NotificationPayload},
    service::error::ServiceError,
};

/// Store-and-forward only: notifications are durably inserted and later
/// pulled by the client's polling loop. There is no push channel and no
/// delivery guarantee beyond "persisted, eventually readable".
const NOTIFICATION_PAGE_LIMIT: i64 = 50;

#[derive(Debug, Clone)]
pub struct NotificationService {
    db_client: Arc<DBClient>,
}

impl NotificationService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    pub async fn notify(
        &self,
        user_id: Uuid,
        payload: NotificationPayload,
        content: String,
    ) -> Result<Notification, ServiceError> {
        tracing::info!(
            "Dispatching {} notification to user {}",
            payload.notification_type().to_str(),
            user_id
        );

        let notification = self
            .db_client
            .insert_notification(
                user_id,
                payload.notification_type(),
                content,
                payload.related_id(),
            )
            .await?;

        Ok(notification)
    }

    pub async fn list_notifications(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Notification>, ServiceError> {
        let notifications = self
            .db_client
            .get_user_notifications(user_id, NOTIFICATION_PAGE_LIMIT)
            .await?;

        Ok(notifications)
    }

    pub async fn mark_read(
        &self,
        notification_id: Uuid,
        user_id: Uuid,
    ) -> Result<Notification, ServiceError> {
        self.db_client
            .mark_notification_read(notification_id, user_id)
            .await?
            .ok_or(ServiceError::NotificationNotFound(notification_id))
    }

    pub async fn mark_all_read(&self, user_id: Uuid) -> Result<u64, ServiceError> {
        let updated = self.db_client.mark_all_notifications_read(user_id).await?;
        Ok(updated)
    }

    pub async fn unread_count(&self, user_id: Uuid) -> Result<i64, ServiceError> {
        let count = self
            .db_client
            .get_unread_notification_count(user_id)
            .await?;
        Ok(count)
    }
}
