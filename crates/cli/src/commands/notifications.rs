//! Notification inbox commands.

use clap::Subcommand;

use fresh_fold_core::NotificationId;

use super::Context;
use crate::render;

#[derive(Subcommand)]
pub enum NotificationAction {
    /// List the inbox, newest first
    List,
    /// Mark one notification read
    Read { id: String },
    /// Mark the whole inbox read
    ReadAll,
    /// Unread badge count
    UnreadCount,
    /// Delete one notification
    Delete { id: String },
}

pub async fn run(
    context: &Context,
    action: NotificationAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let email = context.user_email()?;

    match action {
        NotificationAction::List => {
            let notifications = context.client.notifications(email).await?;
            if notifications.is_empty() {
                println!("Inbox empty");
                return Ok(());
            }
            let now = chrono::Utc::now();
            for notification in &notifications {
                let marker = if notification.read { " " } else { "*" };
                println!(
                    "{marker} {:<22} {:<10} {}",
                    notification.id,
                    render::time_ago(notification.created_at, now),
                    notification.title
                );
            }
        }
        NotificationAction::Read { id } => {
            let updated = context
                .client
                .mark_notification_read(&NotificationId::new(id))
                .await?;
            println!("Read: {}", updated.title);
        }
        NotificationAction::ReadAll => {
            context.client.mark_all_notifications_read(email).await?;
            println!("Inbox marked read");
        }
        NotificationAction::UnreadCount => {
            let count = context.client.unread_notification_count(email).await?;
            println!("{count}");
        }
        NotificationAction::Delete { id } => {
            context
                .client
                .delete_notification(&NotificationId::new(id))
                .await?;
            println!("Deleted");
        }
    }
    Ok(())
}
