//! Demo project seeding
//!
//! A water project owned by the creator NGO with a work plan, a coverage plan
//! and three requests: two open and one already covered.

use anyhow::{Context, Result, anyhow};
use sea_orm::{ConnectionTrait, TransactionTrait};

use super::ong::CREATOR_NGO;
use crate::models::Stage;
use crate::repositories::{NewPedido, NewProject, OngRepository, PedidoRepository, ProjectRepository};

pub const DEMO_PROJECT_NAME: &str = "Proyecto de Agua Potable - Test";

/// Create the demo project unless the creator NGO already has it.
///
/// Returns the id of the new project, or `None` when it already existed.
pub async fn seed_demo_project<C>(db: &C) -> Result<Option<i32>>
where
    C: ConnectionTrait + TransactionTrait,
{
    let creator = OngRepository::new(db)
        .find_by_name(CREATOR_NGO)
        .await
        .context("looking up creator NGO")?
        .ok_or_else(|| anyhow!("creator NGO '{}' must be seeded first", CREATOR_NGO))?;

    let projects = ProjectRepository::new(db);
    if let Some(existing) = projects
        .find_by_name_for_owner(creator.id, DEMO_PROJECT_NAME)
        .await
        .context("looking up demo project")?
    {
        log::info!("Demo project already exists (id {}), skipping", existing.id);
        return Ok(None);
    }

    let created = projects
        .create_with_plans(NewProject {
            creador_ong_id: creator.id,
            ong_name: creator.name.clone(),
            project_name: DEMO_PROJECT_NAME.to_string(),
            description: "Instalación de sistema de purificación en comunidad.".to_string(),
            country: "Argentina".to_string(),
            location: "Provincia de Buenos Aires".to_string(),
            project_types: Some(vec!["Agua".to_string(), "Infraestructura".to_string()]),
            budget: 50000.0,
            duration: 6,
            objectives: "Proveer agua limpia a 100 familias.".to_string(),
            beneficiaries: "Comunidad local de 300 personas.".to_string(),
            stages: vec![Stage {
                name: "Etapa 1: Relevamiento".to_string(),
                start: Some("2025-11-01".to_string()),
                end: Some("2025-11-15".to_string()),
                activities: None,
                resources: None,
            }],
            monitoring_plan: Some("Seguimiento semanal.".to_string()),
            strategy: Some("Buscar donaciones de materiales y fondos.".to_string()),
            ..Default::default()
        })
        .await
        .context("creating demo project")?;

    let coverage_plan_id = created
        .coverage_plan
        .as_ref()
        .map(|plan| plan.id)
        .ok_or_else(|| anyhow!("demo project was created without a coverage plan"))?;

    let pedidos = PedidoRepository::new(db);
    let requests = [
        ("materiales", "100 bolsas de cemento", 100.0, false),
        ("dinero", "Fondos para transporte", 2500.0, false),
        ("mano de obra", "Voluntarios para construcción", 10.0, true),
    ];

    for (request_type, description, amount, covered) in requests {
        let pedido = pedidos
            .create(NewPedido {
                coverage_plan_id,
                request_type: request_type.to_string(),
                description: description.to_string(),
                amount_requested: amount,
            })
            .await
            .with_context(|| format!("creating '{}' request", request_type))?;

        if covered {
            pedidos
                .mark_covered(pedido)
                .await
                .with_context(|| format!("covering '{}' request", request_type))?;
        }
    }

    log::info!(
        "Created demo project '{}' (id {}) with 2 open requests",
        DEMO_PROJECT_NAME,
        created.project.id
    );

    Ok(Some(created.project.id))
}
