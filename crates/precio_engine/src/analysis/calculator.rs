//! Pricing pipeline implementation.
//!
//! Turns a validated cost model into priced, margin-analysed figures
//! in one fixed-order pass.

use precio_core::constants::{IVA_RATE, MINUTES_PER_HOUR, WEEKS_PER_MONTH};
use precio_core::model::{CostModel, ProfitTarget};

use super::error::AnalysisError;
use super::recommend::{self, Recommendation};
use super::result::{AnalysisResult, BreakEvenPoint};

/// The pricing and break-even pipeline.
///
/// Stateless and side-effect-free: `analyze` is a pure function of the
/// model, deterministic and safe to call concurrently with independent
/// inputs. Callers wanting memoisation wrap it in an
/// [`crate::cache::AnalysisCache`].
///
/// # Examples
///
/// ```rust
/// use precio_core::model::CostModel;
/// use precio_engine::analysis::Analyzer;
///
/// let analyzer = Analyzer::new();
/// let result = analyzer.analyze(&CostModel::starter()).unwrap();
/// assert!(result.is_sustainable);
/// ```
#[derive(Copy, Clone, Debug, Default)]
pub struct Analyzer;

impl Analyzer {
    /// Creates a new analyzer.
    pub fn new() -> Self {
        Analyzer
    }

    /// Runs the full pricing pipeline on a cost model.
    ///
    /// Stage order is fixed: direct cost, operative allocation,
    /// equipment allocation, subtotal, platform commission, IVA, final
    /// cost, final price, then the derived margin, schedule, viability,
    /// and break-even figures. IVA compounds on the post-commission
    /// subtotal, never on the raw one.
    ///
    /// Degenerate figures come back as explicitly undefined rather
    /// than failing: a zero final price leaves the net margin `None`,
    /// zero labor minutes leave the effective hourly rate `None`, and
    /// a non-positive contribution margin leaves the break-even point
    /// `None` (unreachable).
    ///
    /// # Arguments
    ///
    /// * `model` - The cost model to price
    ///
    /// # Returns
    ///
    /// The complete [`AnalysisResult`] for the model.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidModel`] if the model fails a
    /// structural guard: non-positive volume, negative labor minutes,
    /// non-positive equipment lifetime, or any non-finite numeric
    /// input.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use precio_core::model::{CostModel, Material, ProfitTarget};
    /// use precio_engine::analysis::Analyzer;
    ///
    /// let mut model = CostModel::starter();
    /// model.materials = vec![Material {
    ///     name: "Tela".to_string(),
    ///     quantity: 1.0,
    ///     unit: "metro".to_string(),
    ///     unit_price: 1000.0,
    /// }];
    /// model.labor_minutes = 0.0;
    /// model.include_iva = false;
    /// model.profit = ProfitTarget::Percentage { percentage: 50.0 };
    ///
    /// let result = Analyzer::new().analyze(&model).unwrap();
    /// assert_eq!(result.final_cost, 1000.0);
    /// assert_eq!(result.final_price, 1500.0);
    /// ```
    pub fn analyze(&self, model: &CostModel) -> Result<AnalysisResult, AnalysisError> {
        model.validate()?;

        // 1. Direct cost per unit: materials plus labor.
        let material_cost_per_unit: f64 = model.materials.iter().map(|m| m.cost()).sum();
        let labor_cost_per_unit = (model.labor_minutes / MINUTES_PER_HOUR) * model.hourly_rate;
        let direct_cost_per_unit = material_cost_per_unit + labor_cost_per_unit;

        // 2. Operative expenses attributed to this line, per unit.
        let monthly_operative: f64 = model
            .operative_expenses
            .iter()
            .map(|e| e.attributed_amount())
            .sum();
        let operative_per_unit = monthly_operative / model.monthly_volume;

        // 3. Equipment amortisation, per unit.
        let monthly_equipment: f64 = model
            .equipment
            .iter()
            .map(|e| e.monthly_amortisation())
            .sum();
        let equipment_per_unit = monthly_equipment / model.monthly_volume;

        // 4. Cost subtotal before commission and tax.
        let subtotal = direct_cost_per_unit + operative_per_unit + equipment_per_unit;

        // 5. Platform commission; in-person sales skip this stage.
        let platform_commission_amount = if model.sell_platform.charges_commission() {
            subtotal * (model.platform_fee / 100.0)
        } else {
            0.0
        };
        let after_commission = subtotal + platform_commission_amount;

        // 6. IVA on the post-commission subtotal.
        let iva_amount = if model.include_iva {
            after_commission * IVA_RATE
        } else {
            0.0
        };
        let final_cost = after_commission + iva_amount;

        // 7. Final price from the profit target.
        let final_price = match model.profit {
            ProfitTarget::Percentage { percentage } => final_cost * (1.0 + percentage / 100.0),
            ProfitTarget::Amount { amount } => final_cost + amount,
        };

        // 8. Profit and margin; margin undefined at a zero price.
        let profit_per_unit = final_price - final_cost;
        let net_margin_percentage = if final_price == 0.0 {
            None
        } else {
            Some(profit_per_unit / final_price * 100.0)
        };

        // 9. Monthly hours projection.
        let hours_per_month = model.hours_per_day * model.days_per_week * WEEKS_PER_MONTH;

        // 10. Profit imputed to labor time; undefined at zero minutes.
        let effective_hourly_rate = if model.labor_minutes == 0.0 {
            None
        } else {
            Some(profit_per_unit / (model.labor_minutes / MINUTES_PER_HOUR))
        };

        // 11-12. Monthly projection and the personal income floor.
        let monthly_profit = model.monthly_volume * profit_per_unit;
        let total_personal_expenses = model.total_personal_expenses();

        // 13. Viability: profit must cover the operator's living costs.
        let is_sustainable = monthly_profit >= total_personal_expenses;

        // 14-15. Break-even against the costs that do not scale with
        // volume: equipment amortisation and personal expenses. The
        // other allocations are already netted out of the contribution
        // margin, so adding them here would double-count.
        let contribution_margin_per_unit =
            final_price - (direct_cost_per_unit + operative_per_unit + platform_commission_amount);
        let fixed_and_personal = monthly_equipment + total_personal_expenses;
        let break_even = if contribution_margin_per_unit > 0.0 {
            let units = (fixed_and_personal / contribution_margin_per_unit).ceil() as u64;
            Some(BreakEvenPoint {
                units,
                revenue: units as f64 * final_price,
            })
        } else {
            None
        };

        Ok(AnalysisResult {
            material_cost_per_unit,
            labor_cost_per_unit,
            direct_cost_per_unit,
            operative_per_unit,
            equipment_per_unit,
            platform_commission_amount,
            iva_amount,
            final_cost,
            final_price,
            profit_per_unit,
            net_margin_percentage,
            hours_per_month,
            effective_hourly_rate,
            monthly_profit,
            total_personal_expenses,
            contribution_margin_per_unit,
            break_even,
            is_sustainable,
        })
    }

    /// Generates ranked improvement actions for an unviable result.
    ///
    /// Empty whenever the result is sustainable. Otherwise up to
    /// [`super::MAX_RECOMMENDATIONS`] candidates sorted by
    /// non-increasing impact; see [`Recommendation`] for the candidate
    /// set.
    ///
    /// # Arguments
    ///
    /// * `analysis` - The result produced by [`Analyzer::analyze`]
    /// * `model` - The model that produced it
    pub fn recommend(&self, analysis: &AnalysisResult, model: &CostModel) -> Vec<Recommendation> {
        recommend::generate(analysis, model)
    }
}
