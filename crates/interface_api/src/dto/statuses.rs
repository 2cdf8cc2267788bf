//! Status DTOs

use serde::Serialize;
use uuid::Uuid;

use domain_claims::StatusDef;

/// One configurable claim status
#[derive(Debug, Serialize)]
pub struct StatusDto {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub icon: String,
    pub order: i32,
    pub active: bool,
    /// Whether this status ends the claim lifecycle
    pub terminal: bool,
}

impl From<StatusDef> for StatusDto {
    fn from(def: StatusDef) -> Self {
        let terminal = domain_claims::is_terminal(&def.name);
        Self {
            id: *def.id.as_uuid(),
            name: def.name,
            color: def.color,
            icon: def.icon,
            order: def.order,
            active: def.active,
            terminal,
        }
    }
}

/// Status listing response: `{ "status": [...] }`
#[derive(Debug, Serialize)]
pub struct StatusListResponse {
    pub status: Vec<StatusDto>,
}
