//! The cost model and its component types.
//!
//! This module provides:
//! - `cost_model`: The `CostModel` input record, profit targets, validation, and content fingerprinting
//! - `components`: Per-unit cost components (materials, operative expenses, equipment, personal expenses)
//! - `channel`: Sales channels with default commission metadata
//! - `error`: Validation and channel-parsing errors
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`CostModel`], [`ProfitTarget`] from `cost_model`
//! - [`Material`], [`OperativeExpense`], [`Equipment`], [`PersonalExpense`] from `components`
//! - [`SalesChannel`] from `channel`
//! - [`ValidationError`], [`ChannelError`] from `error`

pub mod channel;
pub mod components;
pub mod cost_model;
pub mod error;

// Re-export commonly used types at module level
pub use channel::SalesChannel;
pub use components::{Equipment, Material, OperativeExpense, PersonalExpense};
pub use cost_model::{CostModel, ProfitTarget};
pub use error::{ChannelError, ValidationError};
