//! # precio_engine: Pricing and Break-Even Analysis Engine
//!
//! ## Layer 2 (Kernel) Role
//!
//! precio_engine is the computational core of the workspace: a pure,
//! synchronous transformation from a validated cost model to a priced,
//! margin-analysed result, plus a secondary pass that turns an
//! unviable result into ranked improvement recommendations.
//!
//! - [`analysis::Analyzer`]: The fixed-order pricing pipeline
//! - [`analysis::AnalysisResult`]: The derived per-unit figures, break-even
//!   point, and viability verdict
//! - [`analysis::Recommendation`]: Ranked improvement actions for unviable models
//! - [`cache::AnalysisCache`]: Caller-owned memoisation keyed by content hash
//!
//! ## Purity
//!
//! The engine performs no I/O, holds no shared state, and never logs.
//! It is safe to call concurrently with independent inputs; callers
//! that want memoisation own an [`cache::AnalysisCache`] explicitly
//! rather than the engine caching internally.
//!
//! ## Usage Example
//!
//! ```rust
//! use precio_core::model::CostModel;
//! use precio_engine::analysis::Analyzer;
//!
//! let analyzer = Analyzer::new();
//! let result = analyzer.analyze(&CostModel::starter()).unwrap();
//! assert!(result.final_price > result.final_cost);
//!
//! let recommendations = analyzer.recommend(&result, &CostModel::starter());
//! assert!(recommendations.len() <= 4);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analysis;
pub mod cache;
