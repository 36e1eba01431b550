//! Result types for the analysis pipeline.

use serde::{Deserialize, Serialize};

/// Sales volume at which contribution margin covers fixed obligations.
///
/// `revenue` is always exactly `units × final_price`; the pipeline
/// computes it from the rounded-up unit count rather than inverting
/// the division.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakEvenPoint {
    /// Minimum whole units per month to cover fixed and personal costs.
    pub units: u64,

    /// Revenue at that volume, in ARS.
    pub revenue: f64,
}

/// A metric the pipeline reports as explicitly undefined.
///
/// Undefined metrics are `None` in the result instead of NaN or
/// infinity; this enum names them for display and logging.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UndefinedMetric {
    /// Net margin is undefined because the final price is zero.
    NetMargin,

    /// Effective hourly rate is undefined because labor minutes are zero.
    EffectiveHourlyRate,
}

/// The derived output of one pricing calculation.
///
/// A flat record of per-unit costs, the final price, margin and
/// schedule figures, the viability verdict, and the break-even point.
/// Never mutated after construction; recomputation produces a new
/// instance. All monetary figures are unrounded ARS so chained
/// recalculation does not accumulate rounding error; display
/// formatting belongs to callers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Material cost per finished unit.
    pub material_cost_per_unit: f64,

    /// Labor cost per finished unit.
    pub labor_cost_per_unit: f64,

    /// Direct cost per unit: materials plus labor.
    pub direct_cost_per_unit: f64,

    /// Attributed operative expenses per unit.
    pub operative_per_unit: f64,

    /// Equipment amortisation per unit.
    pub equipment_per_unit: f64,

    /// Platform commission charged per unit, in ARS.
    pub platform_commission_amount: f64,

    /// IVA charged per unit, in ARS.
    pub iva_amount: f64,

    /// Full cost per unit after commission and tax.
    pub final_cost: f64,

    /// Recommended sale price per unit.
    pub final_price: f64,

    /// Profit per unit: final price minus final cost.
    pub profit_per_unit: f64,

    /// Net margin as a percentage of the final price. `None` when the
    /// final price is zero.
    pub net_margin_percentage: Option<f64>,

    /// Projected working hours per month.
    pub hours_per_month: f64,

    /// Profit imputed back to the labor time, per hour. `None` when
    /// labor minutes are zero. Distinct from the nominal hourly rate
    /// the operator asked for.
    pub effective_hourly_rate: Option<f64>,

    /// Projected profit per month at the planned volume.
    pub monthly_profit: f64,

    /// Sum of the operator's monthly personal expenses.
    pub total_personal_expenses: f64,

    /// Contribution margin per unit: final price minus the
    /// volume-scaling costs (direct, operative, commission).
    pub contribution_margin_per_unit: f64,

    /// Break-even point, or `None` when the contribution margin is not
    /// positive and no volume can cover the fixed obligations.
    pub break_even: Option<BreakEvenPoint>,

    /// Whether monthly profit covers the operator's personal expenses.
    pub is_sustainable: bool,
}

impl AnalysisResult {
    /// Names the metrics this result reports as undefined.
    ///
    /// Empty for well-formed inputs; a zero final price or zero labor
    /// time produces the corresponding entries.
    pub fn undefined_metrics(&self) -> Vec<UndefinedMetric> {
        let mut metrics = Vec::new();
        if self.net_margin_percentage.is_none() {
            metrics.push(UndefinedMetric::NetMargin);
        }
        if self.effective_hourly_rate.is_none() {
            metrics.push(UndefinedMetric::EffectiveHourlyRate);
        }
        metrics
    }

    /// Whether the break-even point is unreachable at any volume.
    #[inline]
    pub fn break_even_unreachable(&self) -> bool {
        self.break_even.is_none()
    }
}
