//! Database migration runner for CampusDesk.
//!
//! Usage:
//!   migrator up      - Create the portal tables
//!   migrator down    - Roll back the last migration
//!   migrator status  - Show which migrations have run
//!   migrator fresh   - Drop everything and migrate from scratch
//!
//! Reads `DATABASE_URL` from the environment or `.env`.

use campusdesk_db::migration::Migrator;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    cli::run_cli(Migrator).await;
}
