//! Inline notification fan-out.

use echotasks_core::types::DbId;
use echotasks_db::models::notification::CreateNotification;
use echotasks_db::repositories::{NotificationRepo, ProfileRepo};
use echotasks_db::DbPool;

use crate::email::EmailDelivery;

/// Delivers notifications to a user: an in-app row always, plus an
/// email copy when SMTP is configured.
///
/// Delivery is best-effort by contract. Failures at either step are
/// logged at warn level and swallowed so the triggering operation is
/// never rolled back by a notification problem.
pub struct Notifier {
    pool: DbPool,
    email: Option<EmailDelivery>,
}

impl Notifier {
    /// Create a notifier. Pass `None` for `email` when SMTP is not
    /// configured; in-app delivery still works.
    pub fn new(pool: DbPool, email: Option<EmailDelivery>) -> Self {
        Self { pool, email }
    }

    /// Notify a user. Never fails; see the type-level contract.
    pub async fn notify(
        &self,
        user_id: DbId,
        title: &str,
        message: &str,
        kind: &str,
        link: Option<&str>,
    ) {
        let input = CreateNotification {
            user_id,
            title: title.to_string(),
            message: message.to_string(),
            r#type: kind.to_string(),
            link: link.map(str::to_string),
        };
        if let Err(err) = NotificationRepo::create(&self.pool, &input).await {
            tracing::warn!(user_id, title, error = %err, "Failed to insert notification");
            return;
        }

        let Some(email) = &self.email else {
            return;
        };
        let recipient = match ProfileRepo::find_by_id(&self.pool, user_id).await {
            Ok(Some(profile)) => profile.email,
            Ok(None) => {
                tracing::warn!(user_id, "Notification recipient profile not found");
                return;
            }
            Err(err) => {
                tracing::warn!(user_id, error = %err, "Failed to load notification recipient");
                return;
            }
        };
        if let Err(err) = email.deliver(&recipient, title, message, link).await {
            tracing::warn!(user_id, title, error = %err, "Failed to send notification email");
        }
    }
}
