//! Lost & found service
//!
//! Posts with up to three images. Images that break the upload policy are
//! skipped with a warning instead of failing the post.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::app::attachments::discard;
use crate::app::authors::author_names;
use crate::app::upload_policy::{is_allowed, secure_filename, stored_name, UploadedFile};
use crate::app::validation::{parse_optional_date, present};
use crate::domain::entities::{
    ItemType, LostFoundId, LostFoundPost, NewLostFoundPost, UploadCategory, User,
    MAX_IMAGES_PER_POST,
};
use crate::domain::ports::{FileStorage, LostFoundRepository, UserRepository};
use crate::error::{AppError, DomainError};

/// Text fields of a new post
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LostFoundForm {
    pub title: Option<String>,
    pub description: Option<String>,
    /// `lost` or `found`, defaults to `lost`
    pub item_type: Option<String>,
    pub contact_info: Option<String>,
    pub location: Option<String>,
    pub date_occurred: Option<String>,
}

/// A post as listed, with the poster's name
#[derive(Debug, Clone, Serialize)]
pub struct LostFoundView {
    #[serde(flatten)]
    pub post: LostFoundPost,
    pub posted_by_name: Option<String>,
}

/// Result of creating a post
#[derive(Debug, Clone)]
pub struct PostOutcome {
    pub post: LostFoundPost,
    /// One entry per skipped image
    pub warnings: Vec<String>,
}

impl PostOutcome {
    pub fn message(&self) -> String {
        match self.post.images.len() {
            0 => "Post created successfully".to_string(),
            n => format!("Post created successfully with {} image(s)", n),
        }
    }
}

/// Service for the lost & found board
pub struct LostFoundService<LR, UR, FS>
where
    LR: LostFoundRepository,
    UR: UserRepository,
    FS: FileStorage,
{
    posts: Arc<LR>,
    users: Arc<UR>,
    storage: Arc<FS>,
    max_image_bytes: usize,
}

impl<LR, UR, FS> LostFoundService<LR, UR, FS>
where
    LR: LostFoundRepository,
    UR: UserRepository,
    FS: FileStorage,
{
    pub fn new(posts: Arc<LR>, users: Arc<UR>, storage: Arc<FS>, max_image_bytes: usize) -> Self {
        Self {
            posts,
            users,
            storage,
            max_image_bytes,
        }
    }

    /// All posts, newest first
    pub async fn list(&self) -> Result<Vec<LostFoundView>, AppError> {
        let posts = self.posts.list().await?;
        let names = author_names(self.users.as_ref(), posts.iter().map(|p| p.posted_by)).await?;

        Ok(posts
            .into_iter()
            .map(|post| LostFoundView {
                posted_by_name: names.get(&post.posted_by).cloned(),
                post,
            })
            .collect())
    }

    /// Create a post and store whichever of its images pass the policy
    pub async fn post(
        &self,
        actor: &User,
        form: LostFoundForm,
        files: Vec<UploadedFile>,
    ) -> Result<PostOutcome, AppError> {
        let (Some(title), Some(description)) = (present(&form.title), present(&form.description))
        else {
            return Err(DomainError::Validation(
                "Title and description are required".to_string(),
            )
            .into());
        };

        let item_type = match present(&form.item_type) {
            Some(raw) => raw.parse::<ItemType>().map_err(DomainError::Validation)?,
            None => ItemType::Lost,
        };
        let date_occurred = parse_optional_date(&form.date_occurred)?;

        let id = LostFoundId::new();
        let owner = id.to_string();
        let now = Utc::now();
        let mut warnings = Vec::new();
        let mut stored = Vec::new();

        for file in files
            .iter()
            .filter(|f| !f.filename.is_empty())
            .take(MAX_IMAGES_PER_POST)
        {
            if file.size() > self.max_image_bytes {
                tracing::warn!(
                    filename = %file.filename,
                    size = file.size(),
                    "Skipping oversized image"
                );
                warnings.push(format!(
                    "File {} is too large. Maximum size is {}MB.",
                    file.filename,
                    self.max_image_bytes / (1024 * 1024)
                ));
                continue;
            }

            let safe = match secure_filename(&file.filename) {
                Some(safe) if is_allowed(&safe) => safe,
                _ => {
                    tracing::warn!(
                        filename = %file.filename,
                        "Skipping image with disallowed type"
                    );
                    warnings.push(format!("File type not allowed for {}", file.filename));
                    continue;
                }
            };

            let name = stored_name(now, &owner, &safe);
            match self
                .storage
                .save(UploadCategory::LostFound, &name, &file.bytes)
                .await
            {
                Ok(()) => stored.push(name),
                Err(e) => {
                    tracing::warn!(filename = %name, error = %e, "Failed to save image");
                    warnings.push(format!("Error saving file {}", safe));
                }
            }
        }

        let new_post = NewLostFoundPost {
            id,
            title,
            description,
            item_type,
            posted_by: actor.id,
            contact_info: present(&form.contact_info),
            location: present(&form.location),
            date_occurred,
            image_filenames: stored.clone(),
        };

        let post = match self.posts.create(&new_post).await {
            Ok(post) => post,
            Err(e) => {
                for name in &stored {
                    discard(self.storage.as_ref(), UploadCategory::LostFound, name).await;
                }
                return Err(e.into());
            }
        };

        tracing::info!(
            post_id = %post.id,
            item_type = %post.item_type,
            images = post.images.len(),
            "Created lost & found post"
        );

        Ok(PostOutcome { post, warnings })
    }

    /// Flip the resolved flag. Returns the new state.
    pub async fn toggle_resolved(&self, actor: &User, id: &LostFoundId) -> Result<bool, AppError> {
        let post = self.find(id).await?;
        if !actor.can_modify(&post.posted_by) {
            return Err(DomainError::Forbidden(
                "You are not authorized to perform this action".to_string(),
            )
            .into());
        }

        let resolved = !post.is_resolved;
        self.posts.set_resolved(id, resolved).await?;
        tracing::info!(post_id = %id, resolved, "Toggled lost & found post");
        Ok(resolved)
    }

    /// Delete a post together with its image files
    pub async fn delete(&self, actor: &User, id: &LostFoundId) -> Result<(), AppError> {
        let post = self.find(id).await?;
        if !actor.can_modify(&post.posted_by) {
            return Err(DomainError::Forbidden(
                "You are not authorized to delete this post".to_string(),
            )
            .into());
        }

        for image in &post.images {
            discard(self.storage.as_ref(), UploadCategory::LostFound, &image.filename).await;
        }
        self.posts.delete(id).await?;

        tracing::info!(post_id = %id, "Deleted lost & found post");
        Ok(())
    }

    async fn find(&self, id: &LostFoundId) -> Result<LostFoundPost, AppError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Post {} not found", id)).into())
    }
}
