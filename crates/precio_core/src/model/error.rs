//! Error types for cost-model validation and parsing.
//!
//! This module provides:
//! - `ValidationError`: Structural guards rejected before any calculation
//! - `ChannelError`: Errors from sales-channel parsing

use thiserror::Error;

/// Validation errors raised before the pricing pipeline runs.
///
/// Each variant identifies the offending field so callers can point the
/// user at the exact input to fix. The pipeline itself never sees an
/// invalid model; validation failures are raised up front instead of
/// letting division by zero or NaN propagate through the figures.
///
/// # Variants
/// - `NonPositiveVolume`: Monthly volume is zero or negative
/// - `NegativeLaborMinutes`: Labor time per unit is negative
/// - `NonPositiveEquipmentLife`: An equipment item has a zero or negative lifetime
/// - `NonFiniteField`: A numeric input is NaN or infinite
///
/// # Examples
/// ```
/// use precio_core::model::ValidationError;
///
/// let err = ValidationError::NonPositiveVolume { volume: 0.0 };
/// assert_eq!(format!("{}", err), "monthly volume must be positive, got 0");
/// assert_eq!(err.field(), "monthlyVolume");
/// ```
#[derive(Error, Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ValidationError {
    /// Monthly volume must be strictly positive (it divides the
    /// operative and equipment totals).
    #[error("monthly volume must be positive, got {volume}")]
    NonPositiveVolume {
        /// The rejected volume value
        volume: f64,
    },

    /// Labor minutes per unit must not be negative.
    #[error("labor minutes must not be negative, got {minutes}")]
    NegativeLaborMinutes {
        /// The rejected labor time
        minutes: f64,
    },

    /// Equipment lifetime must be strictly positive (it divides the
    /// amortisation figure).
    #[error("equipment '{name}' must have a positive lifetime, got {life_years} years")]
    NonPositiveEquipmentLife {
        /// Position of the item in the equipment list
        index: usize,
        /// Equipment name as entered
        name: String,
        /// The rejected lifetime in years
        life_years: f64,
    },

    /// A numeric input is NaN or infinite.
    #[error("field '{field}' must be a finite number, got {value}")]
    NonFiniteField {
        /// Wire-form path of the offending field (e.g. `materials[2].unitPrice`)
        field: String,
        /// The rejected value
        value: f64,
    },
}

impl ValidationError {
    /// Returns the wire-form path of the field that failed validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use precio_core::model::ValidationError;
    ///
    /// let err = ValidationError::NonPositiveEquipmentLife {
    ///     index: 1,
    ///     name: "Horno".to_string(),
    ///     life_years: 0.0,
    /// };
    /// assert_eq!(err.field(), "equipment[1].lifeYears");
    /// ```
    pub fn field(&self) -> String {
        match self {
            ValidationError::NonPositiveVolume { .. } => "monthlyVolume".to_string(),
            ValidationError::NegativeLaborMinutes { .. } => "laborMinutes".to_string(),
            ValidationError::NonPositiveEquipmentLife { index, .. } => {
                format!("equipment[{}].lifeYears", index)
            }
            ValidationError::NonFiniteField { field, .. } => field.clone(),
        }
    }
}

/// Sales-channel parsing errors.
///
/// # Examples
/// ```
/// use precio_core::model::ChannelError;
///
/// let err = ChannelError::UnknownChannel("ebay".to_string());
/// assert_eq!(format!("{}", err), "unknown sales channel: ebay");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChannelError {
    /// Channel code not in the known catalogue.
    #[error("unknown sales channel: {0}")]
    UnknownChannel(String),
}
