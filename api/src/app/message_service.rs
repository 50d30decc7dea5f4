//! Message board service

use std::sync::Arc;

use serde::Serialize;

use crate::app::attachments::{discard, store_attachment};
use crate::app::authors::author_names;
use crate::app::upload_policy::UploadedFile;
use crate::app::validation::present;
use crate::domain::entities::{Message, MessageId, NewMessage, UploadCategory, User};
use crate::domain::ports::{FileStorage, MessageRepository, UserRepository};
use crate::error::{AppError, DomainError};

#[derive(Debug, Clone, Serialize)]
pub struct MessageView {
    #[serde(flatten)]
    pub message: Message,
    pub posted_by_name: Option<String>,
}

pub struct MessageService<MR, UR, FS>
where
    MR: MessageRepository,
    UR: UserRepository,
    FS: FileStorage,
{
    messages: Arc<MR>,
    users: Arc<UR>,
    storage: Arc<FS>,
}

impl<MR, UR, FS> MessageService<MR, UR, FS>
where
    MR: MessageRepository,
    UR: UserRepository,
    FS: FileStorage,
{
    pub fn new(messages: Arc<MR>, users: Arc<UR>, storage: Arc<FS>) -> Self {
        Self {
            messages,
            users,
            storage,
        }
    }

    /// All messages, newest first
    pub async fn list(&self) -> Result<Vec<MessageView>, AppError> {
        let messages = self.messages.list().await?;
        let names =
            author_names(self.users.as_ref(), messages.iter().map(|m| m.posted_by)).await?;

        Ok(messages
            .into_iter()
            .map(|message| MessageView {
                posted_by_name: names.get(&message.posted_by).cloned(),
                message,
            })
            .collect())
    }

    /// Post text, a file, or both
    pub async fn post(
        &self,
        actor: &User,
        content: Option<String>,
        file: Option<UploadedFile>,
    ) -> Result<Message, AppError> {
        let content = present(&content);
        let file = file.filter(|f| !f.filename.is_empty());
        if content.is_none() && file.is_none() {
            return Err(DomainError::Validation(
                "Please enter a message or select a file".to_string(),
            )
            .into());
        }

        let id = MessageId::new();
        let attachment = match &file {
            Some(file) => Some(
                store_attachment(
                    self.storage.as_ref(),
                    UploadCategory::Messages,
                    &id.to_string(),
                    file,
                )
                .await?,
            ),
            None => None,
        };

        let new_message = NewMessage {
            id,
            content,
            file_path: attachment.as_ref().map(|a| a.file_path.clone()),
            file_type: attachment.as_ref().map(|a| a.file_type.clone()),
            posted_by: actor.id,
        };

        let message = match self.messages.create(&new_message).await {
            Ok(message) => message,
            Err(e) => {
                if let Some(path) = &new_message.file_path {
                    discard(self.storage.as_ref(), UploadCategory::Messages, path).await;
                }
                return Err(e.into());
            }
        };

        tracing::info!(
            message_id = %message.id,
            has_file = message.file_path.is_some(),
            "Message posted"
        );
        Ok(message)
    }

    /// Delete a message and its attachment
    pub async fn delete(&self, actor: &User, id: &MessageId) -> Result<(), AppError> {
        let message = self
            .messages
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Message {} not found", id)))?;

        if !actor.can_modify(&message.posted_by) {
            return Err(DomainError::Forbidden(
                "You are not authorized to delete this message".to_string(),
            )
            .into());
        }

        if let Some(path) = &message.file_path {
            discard(self.storage.as_ref(), UploadCategory::Messages, path).await;
        }
        self.messages.delete(id).await?;

        tracing::info!(message_id = %id, "Deleted message");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Role;
    use crate::test_utils::{
        test_user, InMemoryFileStorage, InMemoryMessageRepository, InMemoryUserRepository,
    };

    type Service =
        MessageService<InMemoryMessageRepository, InMemoryUserRepository, InMemoryFileStorage>;

    fn create_service(users: InMemoryUserRepository) -> (Service, Arc<InMemoryFileStorage>) {
        let storage = Arc::new(InMemoryFileStorage::new());
        let service = MessageService::new(
            Arc::new(InMemoryMessageRepository::new()),
            Arc::new(users),
            storage.clone(),
        );
        (service, storage)
    }

    #[tokio::test]
    async fn empty_post_is_rejected() {
        let (service, _) = create_service(InMemoryUserRepository::new());
        let user = test_user(Role::Student);

        let err = service
            .post(
                &user,
                Some("   ".to_string()),
                Some(UploadedFile::new("", Vec::new())),
            )
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Please enter a message or select a file"));
    }

    #[tokio::test]
    async fn text_only_post() {
        let user = test_user(Role::Student);
        let (service, storage) =
            create_service(InMemoryUserRepository::new().with_user(user.clone()));

        let message = service
            .post(&user, Some("Lab is closed today".to_string()), None)
            .await
            .unwrap();

        assert_eq!(message.content.as_deref(), Some("Lab is closed today"));
        assert_eq!(message.file_path, None);
        assert_eq!(storage.file_count(), 0);

        let listed = service.list().await.unwrap();
        assert_eq!(listed[0].posted_by_name.as_deref(), Some(user.name.as_str()));
    }

    #[tokio::test]
    async fn file_only_post_records_type() {
        let (service, storage) = create_service(InMemoryUserRepository::new());
        let user = test_user(Role::Teacher);

        let message = service
            .post(&user, None, Some(UploadedFile::new("timetable.XLSX", b"xx".to_vec())))
            .await
            .unwrap();

        assert_eq!(message.content, None);
        assert_eq!(message.file_type.as_deref(), Some("xlsx"));
        let path = message.file_path.unwrap();
        assert!(storage.contains(UploadCategory::Messages, &path));
    }

    #[tokio::test]
    async fn disallowed_file_rejects_post() {
        let (service, storage) = create_service(InMemoryUserRepository::new());
        let user = test_user(Role::Student);

        let err = service
            .post(
                &user,
                Some("see attached".to_string()),
                Some(UploadedFile::new("virus.bat", b"@echo".to_vec())),
            )
            .await
            .unwrap_err();

        assert!(err.to_string().contains("File type not allowed"));
        assert_eq!(storage.file_count(), 0);
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_attachment() {
        let (service, storage) = create_service(InMemoryUserRepository::new());
        let owner = test_user(Role::Student);
        let other = test_user(Role::Student);
        let admin = test_user(Role::Admin);
        let message = service
            .post(&owner, None, Some(UploadedFile::new("notes.pdf", b"%PDF".to_vec())))
            .await
            .unwrap();

        let err = service.delete(&other, &message.id).await.unwrap_err();
        assert!(matches!(err, AppError::Domain(DomainError::Forbidden(_))));
        assert_eq!(storage.file_count(), 1);

        service.delete(&admin, &message.id).await.unwrap();
        assert_eq!(storage.file_count(), 0);
    }
}
