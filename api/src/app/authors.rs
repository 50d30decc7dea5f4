//! Poster name lookup for listings

use std::collections::{HashMap, HashSet};

use crate::domain::entities::UserId;
use crate::domain::ports::UserRepository;
use crate::error::DomainError;

/// Resolve display names for a set of posters in one query.
/// Users that no longer exist are missing from the map.
pub async fn author_names<UR>(
    users: &UR,
    ids: impl IntoIterator<Item = UserId>,
) -> Result<HashMap<UserId, String>, DomainError>
where
    UR: UserRepository + ?Sized,
{
    let unique: Vec<UserId> = ids.into_iter().collect::<HashSet<_>>().into_iter().collect();
    let found = users.find_many(&unique).await?;

    Ok(found.into_iter().map(|u| (u.id, u.name)).collect())
}
