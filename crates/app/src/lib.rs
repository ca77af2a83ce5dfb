//! Catalog data access: a PostgreSQL-backed products store.

pub mod context;
pub mod database;
pub mod domain;
pub mod query_params;

#[cfg(test)]
mod test;

mod uuids;
