//! PostgreSQL adapter for LostFoundRepository

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::domain::entities::{
    ItemType, LostFoundId, LostFoundImage, LostFoundPost, NewLostFoundPost, UserId,
};
use crate::domain::ports::LostFoundRepository;
use crate::entity::{lost_found_images, lost_found_posts};
use crate::error::DomainError;

pub struct PostgresLostFoundRepository {
    db: DatabaseConnection,
}

impl PostgresLostFoundRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn images_for(
        &self,
        post_ids: Vec<Uuid>,
    ) -> Result<HashMap<Uuid, Vec<lost_found_images::Model>>, DomainError> {
        if post_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let images = lost_found_images::Entity::find()
            .filter(lost_found_images::Column::PostId.is_in(post_ids))
            .order_by_asc(lost_found_images::Column::UploadedAt)
            .order_by_asc(lost_found_images::Column::Filename)
            .all(&self.db)
            .await?;

        let mut by_post: HashMap<Uuid, Vec<lost_found_images::Model>> = HashMap::new();
        for image in images {
            by_post.entry(image.post_id).or_default().push(image);
        }
        Ok(by_post)
    }
}

#[async_trait]
impl LostFoundRepository for PostgresLostFoundRepository {
    async fn create(&self, post: &NewLostFoundPost) -> Result<LostFoundPost, DomainError> {
        let now = Utc::now().fixed_offset();
        let txn = self.db.begin().await?;

        let created = lost_found_posts::ActiveModel {
            id: Set(post.id.0),
            title: Set(post.title.clone()),
            description: Set(post.description.clone()),
            item_type: Set(post.item_type.to_string()),
            posted_by: Set(post.posted_by.0),
            posted_at: Set(now),
            contact_info: Set(post.contact_info.clone()),
            location: Set(post.location.clone()),
            date_occurred: Set(post.date_occurred),
            is_resolved: Set(false),
        }
        .insert(&txn)
        .await?;

        let mut images = Vec::with_capacity(post.image_filenames.len());
        for filename in &post.image_filenames {
            let image = lost_found_images::ActiveModel {
                id: Set(Uuid::new_v4()),
                post_id: Set(post.id.0),
                filename: Set(filename.clone()),
                uploaded_at: Set(now),
            }
            .insert(&txn)
            .await?;
            images.push(image);
        }

        txn.commit().await?;

        Ok(to_domain(created, images))
    }

    async fn find_by_id(&self, id: &LostFoundId) -> Result<Option<LostFoundPost>, DomainError> {
        let Some(post) = lost_found_posts::Entity::find_by_id(id.0)
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut images = self.images_for(vec![post.id]).await?;
        let post_images = images.remove(&post.id).unwrap_or_default();

        Ok(Some(to_domain(post, post_images)))
    }

    async fn list(&self) -> Result<Vec<LostFoundPost>, DomainError> {
        let posts = lost_found_posts::Entity::find()
            .order_by_desc(lost_found_posts::Column::PostedAt)
            .all(&self.db)
            .await?;

        let mut images = self.images_for(posts.iter().map(|p| p.id).collect()).await?;

        Ok(posts
            .into_iter()
            .map(|post| {
                let post_images = images.remove(&post.id).unwrap_or_default();
                to_domain(post, post_images)
            })
            .collect())
    }

    async fn set_resolved(&self, id: &LostFoundId, resolved: bool) -> Result<(), DomainError> {
        lost_found_posts::ActiveModel {
            id: Set(id.0),
            is_resolved: Set(resolved),
            ..Default::default()
        }
        .update(&self.db)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: &LostFoundId) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;

        lost_found_images::Entity::delete_many()
            .filter(lost_found_images::Column::PostId.eq(id.0))
            .exec(&txn)
            .await?;

        let result = lost_found_posts::Entity::delete_by_id(id.0)
            .exec(&txn)
            .await?;
        if result.rows_affected == 0 {
            return Err(DomainError::NotFound(format!("Post {} not found", id)));
        }

        txn.commit().await?;

        Ok(())
    }

    async fn count_unresolved(&self) -> Result<u64, DomainError> {
        let count = lost_found_posts::Entity::find()
            .filter(lost_found_posts::Column::IsResolved.eq(false))
            .count(&self.db)
            .await?;

        Ok(count)
    }
}

fn to_domain(
    model: lost_found_posts::Model,
    images: Vec<lost_found_images::Model>,
) -> LostFoundPost {
    let id = LostFoundId(model.id);

    LostFoundPost {
        id,
        title: model.title,
        description: model.description,
        item_type: model.item_type.parse().unwrap_or(ItemType::Lost),
        posted_by: UserId(model.posted_by),
        posted_at: model.posted_at.with_timezone(&Utc),
        contact_info: model.contact_info,
        location: model.location,
        date_occurred: model.date_occurred,
        is_resolved: model.is_resolved,
        images: images
            .into_iter()
            .map(|image| LostFoundImage {
                id: image.id,
                post_id: id,
                filename: image.filename,
                uploaded_at: image.uploaded_at.with_timezone(&Utc),
            })
            .collect(),
    }
}
