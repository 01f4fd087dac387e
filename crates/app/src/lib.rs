//! Catalog domain, authentication and persistence.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod pagination;

#[cfg(test)]
mod test;

mod uuids;
