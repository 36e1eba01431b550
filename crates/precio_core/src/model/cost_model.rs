//! The structured cost model a pricing calculation consumes.
//!
//! A `CostModel` is assembled once per calculation from user input and
//! treated as immutable; the engine never mutates it and recomputation
//! always starts from a fresh instance. The wire form (JSON and TOML)
//! uses camelCase field names throughout.

use serde::{Deserialize, Serialize};

use super::channel::SalesChannel;
use super::components::{Equipment, Material, OperativeExpense, PersonalExpense};
use super::error::ValidationError;

/// How the final price is derived from the final cost.
///
/// The wire form matches the paired-field layout of the input flow:
/// a `profitOption` discriminant plus `profitPercentage` or
/// `profitAmount`.
///
/// # Examples
///
/// ```
/// use precio_core::model::ProfitTarget;
///
/// let target = ProfitTarget::Percentage { percentage: 40.0 };
/// let json = serde_json::to_string(&target).unwrap();
/// assert_eq!(json, r#"{"profitOption":"percentage","profitPercentage":40.0}"#);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "profitOption", rename_all = "lowercase")]
pub enum ProfitTarget {
    /// Markup as a percentage of the final cost.
    Percentage {
        /// Markup in percent; 40 means the price is cost × 1.4.
        #[serde(rename = "profitPercentage")]
        percentage: f64,
    },

    /// Fixed markup in ARS added on top of the final cost.
    Amount {
        /// Markup amount in ARS.
        #[serde(rename = "profitAmount")]
        amount: f64,
    },
}

/// Structured input describing a product's cost components and pricing
/// preferences.
///
/// Immutable per calculation: callers build one, validate it, and hand
/// it to the engine. All monetary figures are ARS; all percentages are
/// 0-100 scale.
///
/// # Examples
///
/// ```
/// use precio_core::model::{CostModel, ProfitTarget};
///
/// let mut model = CostModel::starter();
/// model.product_name = "Remera estampada".to_string();
/// model.profit = ProfitTarget::Amount { amount: 1500.0 };
/// assert!(model.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostModel {
    /// Product name as entered by the user.
    #[serde(default)]
    pub product_name: String,

    /// Business type code (see [`crate::catalog::BUSINESS_TYPES`]);
    /// free-form values are allowed for the `custom` case.
    #[serde(default)]
    pub business_type: String,

    /// Expected units sold per month. Must be strictly positive.
    pub monthly_volume: f64,

    /// Materials consumed per finished unit. Empty is valid.
    #[serde(default)]
    pub materials: Vec<Material>,

    /// Labor time per finished unit, in minutes. Must not be negative.
    #[serde(default)]
    pub labor_minutes: f64,

    /// Target pay per labor hour, in ARS.
    #[serde(default)]
    pub hourly_rate: f64,

    /// Working hours per day. Feeds the monthly-hours projection only.
    #[serde(default)]
    pub hours_per_day: f64,

    /// Working days per week. Feeds the monthly-hours projection only.
    #[serde(default)]
    pub days_per_week: f64,

    /// Recurring monthly expenses attributed to this product line.
    #[serde(default)]
    pub operative_expenses: Vec<OperativeExpense>,

    /// Channel the product is sold through.
    #[serde(default)]
    pub sell_platform: SalesChannel,

    /// Commission rate in percent. Applied only when the channel
    /// charges commission; ignored for in-person sales.
    #[serde(default)]
    pub platform_fee: f64,

    /// Whether to add 21% IVA on the post-commission cost.
    #[serde(rename = "includeIVA")]
    pub include_iva: bool,

    /// Durable equipment amortised into the per-unit cost.
    #[serde(default)]
    pub equipment: Vec<Equipment>,

    /// How the final price is derived from the final cost.
    #[serde(flatten)]
    pub profit: ProfitTarget,

    /// The operator's monthly personal expenses; their sum is the
    /// income floor the business must clear to be viable.
    #[serde(default)]
    pub personal_expenses: Vec<PersonalExpense>,
}

impl CostModel {
    /// Starter model mirroring the guided wizard defaults: 100 units a
    /// month, 30 minutes of labor per unit, a six-day working week,
    /// in-person sales with IVA, and a 40% markup.
    pub fn starter() -> Self {
        CostModel {
            product_name: String::new(),
            business_type: "confection".to_string(),
            monthly_volume: 100.0,
            materials: vec![Material {
                name: String::new(),
                quantity: 1.0,
                unit: "unidad".to_string(),
                unit_price: 0.0,
            }],
            labor_minutes: 30.0,
            hourly_rate: 15.0,
            hours_per_day: 8.0,
            days_per_week: 6.0,
            operative_expenses: vec![
                OperativeExpense {
                    name: "Alquiler".to_string(),
                    amount: 0.0,
                    percentage: 100.0,
                },
                OperativeExpense {
                    name: "Servicios".to_string(),
                    amount: 0.0,
                    percentage: 100.0,
                },
            ],
            sell_platform: SalesChannel::InPerson,
            platform_fee: 0.0,
            include_iva: true,
            equipment: Vec::new(),
            profit: ProfitTarget::Percentage { percentage: 40.0 },
            personal_expenses: Vec::new(),
        }
    }

    /// Validates the structural guards the pipeline depends on.
    ///
    /// Finiteness is checked first so a NaN volume reports as a
    /// non-finite field rather than a non-positive one.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::NonFiniteField`] if any numeric input is NaN or infinite
    /// - [`ValidationError::NonPositiveVolume`] if `monthly_volume ≤ 0`
    /// - [`ValidationError::NegativeLaborMinutes`] if `labor_minutes < 0`
    /// - [`ValidationError::NonPositiveEquipmentLife`] if any equipment lifetime is ≤ 0
    ///
    /// # Examples
    ///
    /// ```
    /// use precio_core::model::{CostModel, ValidationError};
    ///
    /// let mut model = CostModel::starter();
    /// model.monthly_volume = 0.0;
    /// assert_eq!(
    ///     model.validate(),
    ///     Err(ValidationError::NonPositiveVolume { volume: 0.0 })
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validate_finite()?;

        if self.monthly_volume <= 0.0 {
            return Err(ValidationError::NonPositiveVolume {
                volume: self.monthly_volume,
            });
        }
        if self.labor_minutes < 0.0 {
            return Err(ValidationError::NegativeLaborMinutes {
                minutes: self.labor_minutes,
            });
        }
        for (index, item) in self.equipment.iter().enumerate() {
            if item.life_years <= 0.0 {
                return Err(ValidationError::NonPositiveEquipmentLife {
                    index,
                    name: item.name.clone(),
                    life_years: item.life_years,
                });
            }
        }
        Ok(())
    }

    fn validate_finite(&self) -> Result<(), ValidationError> {
        ensure_finite(self.monthly_volume, || "monthlyVolume".to_string())?;
        ensure_finite(self.labor_minutes, || "laborMinutes".to_string())?;
        ensure_finite(self.hourly_rate, || "hourlyRate".to_string())?;
        ensure_finite(self.hours_per_day, || "hoursPerDay".to_string())?;
        ensure_finite(self.days_per_week, || "daysPerWeek".to_string())?;
        ensure_finite(self.platform_fee, || "platformFee".to_string())?;

        match self.profit {
            ProfitTarget::Percentage { percentage } => {
                ensure_finite(percentage, || "profitPercentage".to_string())?;
            }
            ProfitTarget::Amount { amount } => {
                ensure_finite(amount, || "profitAmount".to_string())?;
            }
        }

        for (i, material) in self.materials.iter().enumerate() {
            ensure_finite(material.quantity, || format!("materials[{}].quantity", i))?;
            ensure_finite(material.unit_price, || format!("materials[{}].unitPrice", i))?;
        }
        for (i, expense) in self.operative_expenses.iter().enumerate() {
            ensure_finite(expense.amount, || format!("operativeExpenses[{}].amount", i))?;
            ensure_finite(expense.percentage, || {
                format!("operativeExpenses[{}].percentage", i)
            })?;
        }
        for (i, item) in self.equipment.iter().enumerate() {
            ensure_finite(item.cost, || format!("equipment[{}].cost", i))?;
            ensure_finite(item.life_years, || format!("equipment[{}].lifeYears", i))?;
        }
        for (i, expense) in self.personal_expenses.iter().enumerate() {
            ensure_finite(expense.amount, || format!("personalExpenses[{}].amount", i))?;
        }
        Ok(())
    }

    /// Sum of the operator's monthly personal expenses, in ARS.
    #[inline]
    pub fn total_personal_expenses(&self) -> f64 {
        self.personal_expenses.iter().map(|e| e.amount).sum()
    }

    /// Content hash of every input field.
    ///
    /// Two models with identical content produce identical
    /// fingerprints; changing any field produces a different one, which
    /// is what makes caller-owned memoisation self-invalidating. Floats
    /// are hashed at the bit level, so `0.0` and `-0.0` count as
    /// different inputs.
    pub fn fingerprint(&self) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        self.product_name.hash(&mut hasher);
        self.business_type.hash(&mut hasher);
        self.monthly_volume.to_bits().hash(&mut hasher);

        self.materials.len().hash(&mut hasher);
        for material in &self.materials {
            material.name.hash(&mut hasher);
            material.quantity.to_bits().hash(&mut hasher);
            material.unit.hash(&mut hasher);
            material.unit_price.to_bits().hash(&mut hasher);
        }

        self.labor_minutes.to_bits().hash(&mut hasher);
        self.hourly_rate.to_bits().hash(&mut hasher);
        self.hours_per_day.to_bits().hash(&mut hasher);
        self.days_per_week.to_bits().hash(&mut hasher);

        self.operative_expenses.len().hash(&mut hasher);
        for expense in &self.operative_expenses {
            expense.name.hash(&mut hasher);
            expense.amount.to_bits().hash(&mut hasher);
            expense.percentage.to_bits().hash(&mut hasher);
        }

        self.sell_platform.hash(&mut hasher);
        self.platform_fee.to_bits().hash(&mut hasher);
        self.include_iva.hash(&mut hasher);

        self.equipment.len().hash(&mut hasher);
        for item in &self.equipment {
            item.name.hash(&mut hasher);
            item.cost.to_bits().hash(&mut hasher);
            item.life_years.to_bits().hash(&mut hasher);
        }

        match self.profit {
            ProfitTarget::Percentage { percentage } => {
                0u8.hash(&mut hasher);
                percentage.to_bits().hash(&mut hasher);
            }
            ProfitTarget::Amount { amount } => {
                1u8.hash(&mut hasher);
                amount.to_bits().hash(&mut hasher);
            }
        }

        self.personal_expenses.len().hash(&mut hasher);
        for expense in &self.personal_expenses {
            expense.name.hash(&mut hasher);
            expense.amount.to_bits().hash(&mut hasher);
        }

        hasher.finish()
    }
}

fn ensure_finite(value: f64, field: impl FnOnce() -> String) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFiniteField {
            field: field(),
            value,
        })
    }
}
