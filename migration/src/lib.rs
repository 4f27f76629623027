//! Database migrations for the NGO collaboration API.
//!
//! One migration per table, applied in dependency order so every foreign key
//! points at a table that already exists.

pub use sea_orm_migration::prelude::*;

mod m2025_10_01_000001_create_ongs;
mod m2025_10_01_000002_create_project_definitions;
mod m2025_10_01_000003_create_work_plans;
mod m2025_10_01_000004_create_coverage_plans;
mod m2025_10_01_000005_create_pedidos_colaboracion;
mod m2025_10_01_000006_create_compromisos;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2025_10_01_000001_create_ongs::Migration),
            Box::new(m2025_10_01_000002_create_project_definitions::Migration),
            Box::new(m2025_10_01_000003_create_work_plans::Migration),
            Box::new(m2025_10_01_000004_create_coverage_plans::Migration),
            Box::new(m2025_10_01_000005_create_pedidos_colaboracion::Migration),
            Box::new(m2025_10_01_000006_create_compromisos::Migration),
        ]
    }
}
