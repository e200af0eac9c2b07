use sea_orm::{entity::prelude::*, ConnectionTrait, QuerySelect, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    pub username: String,
    pub password_hash: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_required(field: &str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::Validation(format!("{field} required")));
    }
    Ok(())
}

/// Numeric value of a stored id; ids that are not decimal integers yield `None`.
pub fn numeric_id(id: &str) -> Option<u64> {
    id.parse::<u64>().ok()
}

/// `max(existing ids) + 1`, or `1` for an empty set.
/// Fails with `Conflict` once the largest id is `u64::MAX`.
pub fn next_id<'a>(ids: impl IntoIterator<Item = &'a str>) -> Result<String, ModelError> {
    let max = ids.into_iter().filter_map(numeric_id).max().unwrap_or(0);
    max.checked_add(1)
        .map(|id| id.to_string())
        .ok_or_else(|| ModelError::Conflict("user id space exhausted".into()))
}

/// All users ordered by numeric id.
pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, ModelError> {
    let mut users = Entity::find().all(db).await?;
    users.sort_by_key(|u| (numeric_id(&u.id).unwrap_or(u64::MAX), u.id.clone()));
    Ok(users)
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id.to_string()).one(db).await?)
}

/// Username is not unique; the earliest-registered match wins.
pub async fn find_by_username<C: ConnectionTrait>(db: &C, username: &str) -> Result<Option<Model>, ModelError> {
    let matches = Entity::find()
        .filter(Column::Username.eq(username))
        .all(db)
        .await?;
    Ok(matches.into_iter().min_by_key(|u| numeric_id(&u.id).unwrap_or(u64::MAX)))
}

/// Insert under the next free id. Callers serialize this with other writers.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    firstname: &str,
    lastname: &str,
    username: &str,
    password_hash: &str,
) -> Result<Model, ModelError> {
    validate_required("firstname", firstname)?;
    validate_required("lastname", lastname)?;
    validate_required("username", username)?;
    validate_required("password hash", password_hash)?;

    let ids: Vec<String> = Entity::find()
        .select_only()
        .column(Column::Id)
        .into_tuple()
        .all(db)
        .await?;
    let id = next_id(ids.iter().map(String::as_str))?;

    let am = ActiveModel {
        id: Set(id),
        firstname: Set(firstname.to_string()),
        lastname: Set(lastname.to_string()),
        username: Set(username.to_string()),
        password_hash: Set(password_hash.to_string()),
    };
    Ok(am.insert(db).await?)
}
