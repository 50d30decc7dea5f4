//! SeaORM entities
//!
//! Table definitions mirrored by the domain entities in `domain::entities`.
//! Also used at startup to create the schema.

pub mod attendance;
pub mod complaints;
pub mod lost_found_images;
pub mod lost_found_posts;
pub mod messages;
pub mod notes;
pub mod sessions;
pub mod students;
pub mod teachers;
pub mod users;
