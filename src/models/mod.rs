//! # Data Models
//!
//! SeaORM entities for the NGO collaboration schema. Records reference each
//! other by integer id through explicit foreign-key fields:
//!
//! ```text
//! ong ─┬─< project_definition ─┬── work_plan
//!      │                       └── coverage_plan ─< pedido_colaboracion ─< compromiso
//!      └───────────────────────────────────────────────────────────────────<┘ (ong_id)
//! ```

use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod compromiso;
pub mod coverage_plan;
pub mod ong;
pub mod pedido_colaboracion;
pub mod project_definition;
pub mod work_plan;

pub use compromiso::Entity as Compromiso;
pub use coverage_plan::Entity as CoveragePlan;
pub use ong::Entity as Ong;
pub use pedido_colaboracion::Entity as PedidoColaboracion;
pub use project_definition::Entity as ProjectDefinition;
pub use work_plan::Entity as WorkPlan;

/// Basic service information response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    /// The name of the service
    pub service: String,
    /// The version of the service
    pub version: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            service: "ngo-collab".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Lifecycle of a collaboration request. Only ever moves `open -> covered`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
    Default,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum RequestStatus {
    #[sea_orm(string_value = "open")]
    #[serde(rename = "open")]
    #[default]
    Open,

    #[sea_orm(string_value = "covered")]
    #[serde(rename = "covered")]
    Covered,
}

impl RequestStatus {
    pub fn is_open(self) -> bool {
        self == RequestStatus::Open
    }
}

/// Lifecycle of a commitment. Only ever moves `pending -> fulfilled`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
    Default,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum CommitmentStatus {
    #[sea_orm(string_value = "pending")]
    #[serde(rename = "pending")]
    #[default]
    Pending,

    #[sea_orm(string_value = "fulfilled")]
    #[serde(rename = "fulfilled")]
    Fulfilled,
}

/// JSON list of strings (category tags, organization names).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct StringList(pub Vec<String>);

impl From<Vec<String>> for StringList {
    fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}

/// One stage of a project's work plan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Stage {
    #[schema(example = "Etapa 1: Relevamiento")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "2025-11-01")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "2025-11-15")]
    pub end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activities: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<String>,
}

/// Ordered stages stored as a JSON column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Stages(pub Vec<Stage>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(RequestStatus::Covered).unwrap(),
            serde_json::json!("covered")
        );
        assert_eq!(RequestStatus::default(), RequestStatus::Open);
        assert!(RequestStatus::Open.is_open());
        assert!(!RequestStatus::Covered.is_open());
    }

    #[test]
    fn commitment_status_defaults_to_pending() {
        assert_eq!(CommitmentStatus::default(), CommitmentStatus::Pending);
        assert_eq!(
            serde_json::to_value(CommitmentStatus::Fulfilled).unwrap(),
            serde_json::json!("fulfilled")
        );
    }

    #[test]
    fn stage_optional_fields_are_omitted() {
        let stage: Stage = serde_json::from_value(serde_json::json!({ "name": "Obra" })).unwrap();
        assert_eq!(stage.start, None);
        assert_eq!(
            serde_json::to_value(&stage).unwrap(),
            serde_json::json!({ "name": "Obra" })
        );
    }

    #[test]
    fn service_info_names_the_crate() {
        let info = ServiceInfo::default();
        assert_eq!(info.service, "ngo-collab");
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
    }
}
