//! # precio_core: Cost-Model Foundation for the Precio Pricing Library
//!
//! ## Layer 1 (Foundation) Role
//!
//! precio_core serves as the bottom layer of the workspace, providing:
//! - The structured cost model a calculation consumes (`model::CostModel`)
//! - Per-unit cost components: materials, labor, operative expenses,
//!   equipment amortisation (`model::components`)
//! - Sales channels with default commission rates (`model::channel`)
//! - Input validation with field-identifying errors (`model::error`)
//! - Reference catalogues for the guided input flow (`catalog`)
//! - Shared numeric constants such as the IVA rate (`constants`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other precio_* crates, with minimal
//! external dependencies:
//! - serde: Serialisation of the wire and snapshot forms
//! - thiserror: Structured error types
//!
//! ## Usage Examples
//!
//! ```rust
//! use precio_core::model::{CostModel, SalesChannel};
//!
//! let model = CostModel::starter();
//! assert_eq!(model.monthly_volume, 100.0);
//! assert_eq!(model.sell_platform, SalesChannel::InPerson);
//! assert!(model.validate().is_ok());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod catalog;
pub mod constants;
pub mod model;
