//! # filevault-entity
//!
//! Domain entity models for FileVault. Every struct in this crate is either
//! a database row (deriving `sqlx::FromRow`) or a value object exchanged
//! between the authorization core and the stores.

pub mod file;
pub mod history;
pub mod permission;
pub mod user;
