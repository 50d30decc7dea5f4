//! Teacher directory service

use std::sync::Arc;

use serde::Deserialize;

use crate::app::validation::{duplicate_as, present, require_admin};
use crate::domain::entities::{Teacher, TeacherDetails, TeacherId, User};
use crate::domain::ports::TeacherRepository;
use crate::error::{AppError, DomainError};

const PHONE_TAKEN: &str = "Phone number already exists";

/// Directory form, shared by add and edit
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeacherForm {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub branch: Option<String>,
    pub email: Option<String>,
    pub designation: Option<String>,
}

impl TeacherForm {
    fn into_details(self) -> Result<TeacherDetails, DomainError> {
        let (Some(name), Some(phone), Some(branch)) = (
            present(&self.name),
            present(&self.phone),
            present(&self.branch),
        ) else {
            return Err(DomainError::Validation(
                "Name, phone, and branch are required".to_string(),
            ));
        };

        Ok(TeacherDetails {
            name,
            phone,
            branch,
            email: present(&self.email),
            designation: present(&self.designation),
        })
    }
}

pub struct TeacherService<TR: TeacherRepository> {
    teachers: Arc<TR>,
}

impl<TR: TeacherRepository> TeacherService<TR> {
    pub fn new(teachers: Arc<TR>) -> Self {
        Self { teachers }
    }

    /// Directory ordered by name
    pub async fn list(&self) -> Result<Vec<Teacher>, AppError> {
        Ok(self.teachers.list().await?)
    }

    pub async fn get(&self, id: &TeacherId) -> Result<Teacher, AppError> {
        self.teachers
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Teacher {} not found", id)).into())
    }

    pub async fn add(&self, actor: &User, form: TeacherForm) -> Result<Teacher, AppError> {
        require_admin(actor, "Only admin can add teachers")?;
        let details = form.into_details()?;
        self.ensure_phone_free(&details.phone, None).await?;

        let teacher = self
            .teachers
            .create(&details)
            .await
            .map_err(duplicate_as(PHONE_TAKEN))?;
        tracing::info!(teacher_id = %teacher.id, "Added teacher");
        Ok(teacher)
    }

    pub async fn edit(
        &self,
        actor: &User,
        id: &TeacherId,
        form: TeacherForm,
    ) -> Result<Teacher, AppError> {
        require_admin(actor, "Only admin can edit teachers")?;
        self.get(id).await?;
        let details = form.into_details()?;
        self.ensure_phone_free(&details.phone, Some(id)).await?;

        let teacher = self
            .teachers
            .update(id, &details)
            .await
            .map_err(duplicate_as(PHONE_TAKEN))?;
        tracing::info!(teacher_id = %teacher.id, "Updated teacher");
        Ok(teacher)
    }

    pub async fn delete(&self, actor: &User, id: &TeacherId) -> Result<(), AppError> {
        require_admin(actor, "Only admin can delete teachers")?;
        self.teachers.delete(id).await?;
        tracing::info!(teacher_id = %id, "Deleted teacher");
        Ok(())
    }

    async fn ensure_phone_free(
        &self,
        phone: &str,
        current: Option<&TeacherId>,
    ) -> Result<(), AppError> {
        match self.teachers.find_by_phone(phone).await? {
            Some(existing) if Some(&existing.id) != current => {
                Err(DomainError::AlreadyExists(PHONE_TAKEN.to_string()).into())
            }
            _ => Ok(()),
        }
    }
}
