//! # infra_store: Embedded Tenant Persistence
//!
//! ## Infra Layer Role
//!
//! infra_store owns everything that outlives a single calculation:
//! organizations (one per authenticated owner), their onboarding
//! profiles, and the product snapshots saved from the calculator. It
//! is the only crate in the workspace that touches a database.
//!
//! Storage is embedded SQLite via `rusqlite` with the bundled engine,
//! so deployments need no external service. The schema is created on
//! open and every operation is synchronous; async callers run them on
//! a blocking pool (`tokio::task::spawn_blocking`).
//!
//! - [`Store`]: connection owner and the full operation surface
//! - [`types`]: the persisted records and partial-update forms
//! - [`StoreError`]: typed failures, including not-found lookups

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

mod error;
mod store;
pub mod types;

pub use error::StoreError;
pub use store::Store;
