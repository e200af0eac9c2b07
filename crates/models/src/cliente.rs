use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

pub const DNI_LEN: usize = 3;
pub const NAME_MIN_LEN: usize = 2;
pub const NAME_MAX_LEN: usize = 30;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clientes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub dni: String,
    pub nombre: String,
    pub apellido: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// `dni` must be exactly three characters.
pub fn validate_dni(dni: &str) -> Result<(), ModelError> {
    if dni.chars().count() != DNI_LEN {
        return Err(ModelError::Validation(format!("dni must be exactly {DNI_LEN} characters")));
    }
    Ok(())
}

/// Names are 2..=30 characters, counted as Unicode scalar values.
pub fn validate_name(field: &str, value: &str) -> Result<(), ModelError> {
    let len = value.chars().count();
    if !(NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len) {
        return Err(ModelError::Validation(format!(
            "{field} must be between {NAME_MIN_LEN} and {NAME_MAX_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate(dni: &str, nombre: &str, apellido: &str) -> Result<(), ModelError> {
    validate_dni(dni)?;
    validate_name("nombre", nombre)?;
    validate_name("apellido", apellido)?;
    Ok(())
}

pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find().order_by_asc(Column::Dni).all(db).await?)
}

pub async fn find<C: ConnectionTrait>(db: &C, dni: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(dni.to_string()).one(db).await?)
}

/// Validate and insert. A duplicate `dni` surfaces as `ModelError::Conflict`.
pub async fn create<C: ConnectionTrait>(db: &C, dni: &str, nombre: &str, apellido: &str) -> Result<Model, ModelError> {
    validate(dni, nombre, apellido)?;
    if find(db, dni).await?.is_some() {
        return Err(ModelError::Conflict(format!("cliente {dni} already exists")));
    }
    let am = ActiveModel {
        dni: Set(dni.to_string()),
        nombre: Set(nombre.to_string()),
        apellido: Set(apellido.to_string()),
    };
    Ok(am.insert(db).await?)
}

/// Replace `nombre`/`apellido`; `Ok(None)` when the row does not exist.
pub async fn update_names<C: ConnectionTrait>(db: &C, dni: &str, nombre: &str, apellido: &str) -> Result<Option<Model>, ModelError> {
    validate(dni, nombre, apellido)?;
    let Some(found) = find(db, dni).await? else {
        return Ok(None);
    };
    let mut am: ActiveModel = found.into();
    am.nombre = Set(nombre.to_string());
    am.apellido = Set(apellido.to_string());
    Ok(Some(am.update(db).await?))
}

/// Delete and return the removed row; `Ok(None)` when absent.
pub async fn delete<C: ConnectionTrait>(db: &C, dni: &str) -> Result<Option<Model>, ModelError> {
    let Some(found) = find(db, dni).await? else {
        return Ok(None);
    };
    Entity::delete_by_id(found.dni.clone()).exec(db).await?;
    Ok(Some(found))
}
