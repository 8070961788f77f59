//! Kanban task board: three status columns over a document store.
//!
//! Tasks are created through [`services::TaskCreationForm`], cached in
//! [`services::TaskListStore`], and manipulated through one
//! [`services::TaskCard`] per rendered card. Every write goes through the
//! [`ports::TaskGateway`] before the cache changes. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Board services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
