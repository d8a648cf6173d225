//! Database migrations.
//!
//! Migrations are managed using sea-orm-migration and built with the schema
//! builder so the same definitions run on Postgres and on SQLite.

#![allow(missing_docs)]

pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_identity_tables;
mod m20260301_000002_create_document_type_table;
mod m20260301_000003_create_service_tables;

/// Migrator for running database migrations.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_identity_tables::Migration),
            Box::new(m20260301_000002_create_document_type_table::Migration),
            Box::new(m20260301_000003_create_service_tables::Migration),
        ]
    }
}
