use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cliente {
    pub dni: String,
    pub nombre: String,
    pub apellido: String,
}

impl From<models::cliente::Model> for Cliente {
    fn from(m: models::cliente::Model) -> Self {
        Self { dni: m.dni, nombre: m.nombre, apellido: m.apellido }
    }
}

impl Cliente {
    /// Length rules shared by create and update.
    pub fn validate(&self) -> Result<(), ServiceError> {
        models::cliente::validate(&self.dni, &self.nombre, &self.apellido)?;
        Ok(())
    }
}
