//! Seed the database with demo NGOs and, optionally, a demo project.

use anyhow::{Context, Result};
use clap::Parser;
use ngo_collab::{config::ConfigLoader, db, seeds, telemetry};

#[derive(Debug, Parser)]
#[command(name = "seed_db", about = "Ensure demo NGOs (and optional demo data) exist")]
struct Args {
    /// Also create the demo project with its plans and three requests
    #[arg(long)]
    with_demo_project: bool,

    /// Skip applying pending migrations before seeding
    #[arg(long)]
    skip_migrations: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = ConfigLoader::new()
        .load()
        .context("loading configuration")?;
    telemetry::init_tracing(&config).context("initializing telemetry")?;

    let db = db::init_pool(&config)
        .await
        .context("initializing database connection pool")?;

    if !args.skip_migrations {
        db::run_migrations(&db).await?;
    }

    let summary = seeds::run_seed(&db, args.with_demo_project)
        .await
        .context("seeding database")?;

    tracing::info!(
        ong_ids = ?summary.ong_ids,
        demo_project_id = ?summary.demo_project_id,
        "Seeding complete"
    );
    println!("Demo NGOs:");
    println!("  {} / pass123", seeds::CREATOR_NGO);
    println!("  {} / pass456", seeds::COLLABORATOR_NGO);
    match summary.demo_project_id {
        Some(id) => println!("Demo project created with id {} (2 open requests)", id),
        None if args.with_demo_project => println!("Demo project already present"),
        None => {}
    }

    Ok(())
}
