//! Pricing pipeline and recommendation generation.
//!
//! This module provides:
//! - [`Analyzer`]: The fixed-order pricing and break-even pipeline
//! - [`AnalysisResult`]: Derived per-unit costs, price, margin, break-even
//!   point, and viability verdict
//! - [`BreakEvenPoint`]: Units and revenue at which fixed obligations are covered
//! - [`Recommendation`]: A ranked improvement action for an unviable model
//! - [`AnalysisError`]: Validation failures surfaced before computation
//!
//! # Pipeline order
//!
//! The stages run in a fixed order because each feeds the next: direct
//! cost, operative and equipment allocation, subtotal, platform
//! commission, IVA, final cost, final price, then the derived margin,
//! schedule, viability, and break-even figures. Commission compounds
//! before tax: IVA is charged on the post-commission subtotal.
//!
//! # Undefined metrics
//!
//! Degenerate inputs produce explicitly undefined metrics instead of
//! NaN: the net margin is undefined at a zero final price, and the
//! effective hourly rate is undefined at zero labor minutes. Both are
//! `None` in the result, and [`AnalysisResult::undefined_metrics`]
//! names them. An unreachable break-even (non-positive contribution
//! margin) is `None` as well.
//!
//! # Usage
//!
//! ```rust
//! use precio_core::model::{CostModel, PersonalExpense};
//! use precio_engine::analysis::Analyzer;
//!
//! let mut model = CostModel::starter();
//! model.materials[0].unit_price = 500.0;
//! model.personal_expenses.push(PersonalExpense {
//!     name: "Alquiler/Hipoteca".to_string(),
//!     amount: 150_000.0,
//! });
//!
//! let analyzer = Analyzer::new();
//! let result = analyzer.analyze(&model).unwrap();
//! if !result.is_sustainable {
//!     let actions = analyzer.recommend(&result, &model);
//!     assert!(!actions.is_empty());
//! }
//! ```

mod calculator;
mod error;
mod recommend;
mod result;

pub use calculator::Analyzer;
pub use error::AnalysisError;
pub use recommend::{Difficulty, Recommendation, RecommendationKind, MAX_RECOMMENDATIONS};
pub use result::{AnalysisResult, BreakEvenPoint, UndefinedMetric};
