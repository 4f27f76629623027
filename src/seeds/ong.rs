//! Demo NGO seeding
//!
//! Ensures the two demo accounts used for manual testing exist. Existing rows
//! are never modified.

use anyhow::{Context, Result};
use sea_orm::ConnectionTrait;

use crate::auth::hash_password;
use crate::models::ong;
use crate::repositories::OngRepository;

/// Name of the demo NGO that owns the demo project
pub const CREATOR_NGO: &str = "ONG-Creadora-Test";
/// Name of the demo NGO that commits to requests
pub const COLLABORATOR_NGO: &str = "ONG-Colaboradora-Test";

const DEMO_NGOS: [(&str, &str); 2] = [(CREATOR_NGO, "pass123"), (COLLABORATOR_NGO, "pass456")];

/// Create the demo NGOs that are missing and return both rows.
pub async fn seed_demo_ongs<C: ConnectionTrait>(db: &C) -> Result<Vec<ong::Model>> {
    let repo = OngRepository::new(db);
    let mut ongs = Vec::with_capacity(DEMO_NGOS.len());

    for (name, password) in DEMO_NGOS {
        if let Some(existing) = repo
            .find_by_name(name)
            .await
            .with_context(|| format!("looking up NGO '{}'", name))?
        {
            log::info!("NGO '{}' already exists, skipping", name);
            ongs.push(existing);
            continue;
        }

        let password_hash = hash_password(password)
            .map_err(|err| anyhow::anyhow!("hashing password for '{}': {}", name, err))?;
        let created = repo
            .create(name, password_hash)
            .await
            .with_context(|| format!("creating NGO '{}'", name))?;

        log::info!("Created NGO '{}' (id {})", name, created.id);
        ongs.push(created);
    }

    Ok(ongs)
}
