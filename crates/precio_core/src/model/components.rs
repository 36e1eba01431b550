//! Per-unit cost components of a product.
//!
//! Each component type knows its own cost contribution; the pipeline
//! sums these without re-deriving the arithmetic.

use serde::{Deserialize, Serialize};

use crate::constants::MONTHS_PER_YEAR;

/// A raw material or input consumed by one finished unit.
///
/// Contributes `quantity × unit_price` to the direct cost.
///
/// # Examples
///
/// ```
/// use precio_core::model::components::Material;
///
/// let tela = Material {
///     name: "Tela de algodón".to_string(),
///     quantity: 1.5,
///     unit: "metro".to_string(),
///     unit_price: 800.0,
/// };
/// assert_eq!(tela.cost(), 1200.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    /// Material name as entered by the user.
    pub name: String,
    /// Amount of the material consumed per finished unit.
    pub quantity: f64,
    /// Measurement unit label (see [`crate::catalog::UNITS`]).
    #[serde(default = "default_unit")]
    pub unit: String,
    /// Price of one measurement unit of the material, in ARS.
    pub unit_price: f64,
}

fn default_unit() -> String {
    "unidad".to_string()
}

impl Material {
    /// Cost contribution of this material per finished unit.
    #[inline]
    pub fn cost(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

/// A recurring monthly business expense, partially attributable to the
/// product line.
///
/// `amount` is the full monthly figure; `percentage` (0-100) is the
/// share this product carries, e.g. 50% of a shared workshop rent.
///
/// # Examples
///
/// ```
/// use precio_core::model::components::OperativeExpense;
///
/// let alquiler = OperativeExpense {
///     name: "Alquiler".to_string(),
///     amount: 30000.0,
///     percentage: 50.0,
/// };
/// assert_eq!(alquiler.attributed_amount(), 15000.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperativeExpense {
    /// Expense concept (see [`crate::catalog::OPERATIVE_EXPENSE_TEMPLATES`]).
    pub name: String,
    /// Full monthly amount in ARS.
    pub amount: f64,
    /// Share attributable to this product line, in percent (0-100).
    pub percentage: f64,
}

impl OperativeExpense {
    /// Monthly amount attributed to the product line.
    #[inline]
    pub fn attributed_amount(&self) -> f64 {
        self.amount * (self.percentage / 100.0)
    }
}

/// A durable tool or machine amortised straight-line over its lifetime.
///
/// # Examples
///
/// ```
/// use precio_core::model::components::Equipment;
///
/// let horno = Equipment {
///     name: "Horno industrial".to_string(),
///     cost: 240000.0,
///     life_years: 5.0,
/// };
/// assert_eq!(horno.monthly_amortisation(), 4000.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    /// Equipment name as entered by the user.
    pub name: String,
    /// Purchase cost in ARS.
    pub cost: f64,
    /// Useful lifetime in years. Must be strictly positive.
    pub life_years: f64,
}

impl Equipment {
    /// Straight-line monthly amortisation: `cost / (life_years × 12)`.
    ///
    /// Assumes a validated model; a zero lifetime would divide by zero
    /// here, which is why validation rejects it first.
    #[inline]
    pub fn monthly_amortisation(&self) -> f64 {
        self.cost / (self.life_years * MONTHS_PER_YEAR)
    }
}

/// A monthly personal living expense of the operator.
///
/// Summed into the income floor the business must clear to be viable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalExpense {
    /// Expense concept (see [`crate::catalog::PERSONAL_EXPENSE_TEMPLATES`]).
    pub name: String,
    /// Monthly amount in ARS.
    pub amount: f64,
}
