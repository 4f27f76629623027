//! Database seeding functionality
//!
//! Idempotent demo data for local development: two NGOs and, optionally, a
//! demo project with requests. Everything runs in one transaction.

pub mod demo;
pub mod ong;

use anyhow::{Context, Result};
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

pub use demo::{DEMO_PROJECT_NAME, seed_demo_project};
pub use ong::{COLLABORATOR_NGO, CREATOR_NGO, seed_demo_ongs};

/// What a seeding run created.
#[derive(Debug, Clone, Default)]
pub struct SeedSummary {
    pub ong_ids: Vec<i32>,
    pub demo_project_id: Option<i32>,
}

/// Seed demo NGOs, and the demo project when `with_demo_project` is set.
///
/// Any failure rolls the whole run back.
pub async fn run_seed(db: &DatabaseConnection, with_demo_project: bool) -> Result<SeedSummary> {
    let txn = db.begin().await.context("starting seed transaction")?;

    match seed_within(&txn, with_demo_project).await {
        Ok(summary) => {
            txn.commit().await.context("committing seed transaction")?;
            Ok(summary)
        }
        Err(err) => {
            log::error!("Seeding failed, rolling back: {:#}", err);
            txn.rollback()
                .await
                .context("rolling back seed transaction")?;
            Err(err)
        }
    }
}

async fn seed_within(txn: &DatabaseTransaction, with_demo_project: bool) -> Result<SeedSummary> {
    let ongs = seed_demo_ongs(txn).await?;

    let demo_project_id = if with_demo_project {
        seed_demo_project(txn).await?
    } else {
        None
    };

    Ok(SeedSummary {
        ong_ids: ongs.iter().map(|ong| ong.id).collect(),
        demo_project_id,
    })
}
