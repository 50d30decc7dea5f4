//! Complaint service
//!
//! Complaints are anonymous to other users. Only admins learn who posted one.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::app::authors::author_names;
use crate::app::validation::{present, require_admin};
use crate::domain::entities::{Complaint, ComplaintId, NewComplaint, User, UserId};
use crate::domain::ports::{ComplaintRepository, UserRepository};
use crate::error::{AppError, DomainError};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComplaintForm {
    pub title: Option<String>,
    pub message: Option<String>,
}

/// A complaint as seen by one viewer
#[derive(Debug, Clone, Serialize)]
pub struct ComplaintView {
    pub id: ComplaintId,
    pub title: String,
    pub message: String,
    pub posted_at: DateTime<Utc>,
    pub is_resolved: bool,
    /// Whether the viewer posted it
    pub is_own: bool,
    /// Admin only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posted_by: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posted_by_name: Option<String>,
}

pub struct ComplaintService<CR, UR>
where
    CR: ComplaintRepository,
    UR: UserRepository,
{
    complaints: Arc<CR>,
    users: Arc<UR>,
}

impl<CR, UR> ComplaintService<CR, UR>
where
    CR: ComplaintRepository,
    UR: UserRepository,
{
    pub fn new(complaints: Arc<CR>, users: Arc<UR>) -> Self {
        Self { complaints, users }
    }

    /// All complaints, newest first, with the poster hidden from non-admins
    pub async fn list(&self, viewer: &User) -> Result<Vec<ComplaintView>, AppError> {
        let complaints = self.complaints.list().await?;

        let reveal = viewer.is_admin();
        let names = if reveal {
            author_names(self.users.as_ref(), complaints.iter().map(|c| c.posted_by)).await?
        } else {
            Default::default()
        };

        Ok(complaints
            .into_iter()
            .map(|c| ComplaintView {
                is_own: c.posted_by == viewer.id,
                posted_by: reveal.then_some(c.posted_by),
                posted_by_name: names.get(&c.posted_by).cloned(),
                id: c.id,
                title: c.title,
                message: c.message,
                posted_at: c.posted_at,
                is_resolved: c.is_resolved,
            })
            .collect())
    }

    pub async fn submit(&self, actor: &User, form: ComplaintForm) -> Result<Complaint, AppError> {
        let (Some(title), Some(message)) = (present(&form.title), present(&form.message)) else {
            return Err(
                DomainError::Validation("Title and message are required".to_string()).into(),
            );
        };

        let complaint = self
            .complaints
            .create(&NewComplaint {
                title,
                message,
                posted_by: actor.id,
            })
            .await?;

        tracing::info!(complaint_id = %complaint.id, "Complaint submitted");
        Ok(complaint)
    }

    /// Resolve or reopen. Returns the new state.
    pub async fn toggle_resolved(&self, actor: &User, id: &ComplaintId) -> Result<bool, AppError> {
        require_admin(actor, "Only admin can resolve complaints")?;
        let complaint = self.find(id).await?;

        let resolved = !complaint.is_resolved;
        self.complaints.set_resolved(id, resolved).await?;
        tracing::info!(complaint_id = %id, resolved, "Toggled complaint");
        Ok(resolved)
    }

    pub async fn delete(&self, actor: &User, id: &ComplaintId) -> Result<(), AppError> {
        let complaint = self.find(id).await?;
        if !actor.can_modify(&complaint.posted_by) {
            return Err(DomainError::Forbidden(
                "You are not authorized to delete this complaint".to_string(),
            )
            .into());
        }

        self.complaints.delete(id).await?;
        tracing::info!(complaint_id = %id, "Deleted complaint");
        Ok(())
    }

    async fn find(&self, id: &ComplaintId) -> Result<Complaint, AppError> {
        self.complaints
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Complaint {} not found", id)).into())
    }
}
