//! Schema bootstrap
//!
//! Creates every table from its SeaORM entity when missing, plus the
//! composite unique index that keeps attendance to one row per student per day.

use sea_orm::{sea_query::Index, ConnectionTrait, DatabaseConnection, EntityTrait, Schema};

use crate::entity::{
    attendance, complaints, lost_found_images, lost_found_posts, messages, notes, sessions,
    students, teachers, users,
};
use crate::error::DomainError;

pub async fn create_schema(db: &DatabaseConnection) -> Result<(), DomainError> {
    let schema = Schema::new(db.get_database_backend());

    // Referenced tables first
    create_table(db, &schema, users::Entity).await?;
    create_table(db, &schema, sessions::Entity).await?;
    create_table(db, &schema, students::Entity).await?;
    create_table(db, &schema, attendance::Entity).await?;
    create_table(db, &schema, lost_found_posts::Entity).await?;
    create_table(db, &schema, lost_found_images::Entity).await?;
    create_table(db, &schema, complaints::Entity).await?;
    create_table(db, &schema, messages::Entity).await?;
    create_table(db, &schema, notes::Entity).await?;
    create_table(db, &schema, teachers::Entity).await?;

    let index = Index::create()
        .name("idx_attendance_student_date")
        .table(attendance::Entity)
        .col(attendance::Column::StudentId)
        .col(attendance::Column::Date)
        .unique()
        .if_not_exists()
        .to_owned();
    db.execute(db.get_database_backend().build(&index)).await?;

    tracing::info!("Database schema ready");
    Ok(())
}

async fn create_table<E>(
    db: &DatabaseConnection,
    schema: &Schema,
    entity: E,
) -> Result<(), DomainError>
where
    E: EntityTrait,
{
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(db.get_database_backend().build(&statement)).await?;
    Ok(())
}
