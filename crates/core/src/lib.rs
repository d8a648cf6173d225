//! Core business rules for CampusDesk.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Every rule that decides who may see or change a record lives here.
//!
//! # Modules
//!
//! - `access` - Staff vs. owner visibility scoping
//! - `workflow` - Per-record status machines and the staff process action
//! - `listing` - Free-text and status filters for list views
//! - `reference` - Document request reference codes
//! - `forms` - Per-entity input structs and their validation

pub mod access;
pub mod forms;
pub mod listing;
pub mod reference;
pub mod workflow;
