//! Recommendation generation for unviable results.
//!
//! When monthly profit does not cover the operator's personal
//! expenses, the generator proposes up to four actions, each with an
//! estimated monthly impact in ARS, ranked by that impact.

use serde::{Deserialize, Serialize};

use precio_core::model::CostModel;

use super::result::AnalysisResult;

/// Maximum number of recommendations returned for one result.
pub const MAX_RECOMMENDATIONS: usize = 4;

/// Perceived effort of carrying out a recommendation.
///
/// Fixed per recommendation kind, reflecting implementation effort
/// rather than anything derived from the figures.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Quick to try, e.g. a price change.
    Easy,
    /// Takes some work, e.g. renegotiating expenses.
    Medium,
    /// A real undertaking, e.g. growing sales volume.
    Hard,
}

/// The candidate actions the generator can propose.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    /// Diversify with a second product line.
    AddProduct,
    /// Sell enough additional units to cover the shortfall.
    IncreaseVolume,
    /// Raise the unit price to cover the shortfall at current volume.
    IncreasePrice,
    /// Cut attributed operative expenses.
    ReduceExpenses,
}

/// A ranked improvement action for an unviable model.
///
/// `impact` is the estimated monthly gain in ARS; the list callers
/// receive is sorted by non-increasing impact and capped at
/// [`MAX_RECOMMENDATIONS`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Which candidate action this is.
    #[serde(rename = "type")]
    pub kind: RecommendationKind,

    /// Short user-facing title.
    pub title: String,

    /// One-sentence explanation of the action.
    pub description: String,

    /// Estimated monthly gain in ARS.
    pub impact: f64,

    /// Call-to-action label for the UI.
    pub action: String,

    /// Perceived effort, fixed per kind.
    pub difficulty: Difficulty,
}

/// Builds the ranked recommendation list for an analysis result.
///
/// Empty when the result is sustainable. Otherwise the shortfall is
/// `total_personal_expenses − monthly_profit` (strictly positive here)
/// and the candidates are: add a product line (impact: half the
/// monthly-profit magnitude), increase volume (only when profit per
/// unit is positive, since extra units of a loss-making product dig
/// deeper), increase price, and reduce expenses.
pub(super) fn generate(analysis: &AnalysisResult, model: &CostModel) -> Vec<Recommendation> {
    if analysis.is_sustainable {
        return Vec::new();
    }

    let shortfall = analysis.total_personal_expenses - analysis.monthly_profit;
    let mut recommendations = Vec::new();

    recommendations.push(Recommendation {
        kind: RecommendationKind::AddProduct,
        title: "📦 Agregar otro producto".to_string(),
        description: "Con un segundo producto puedes diversificar ingresos".to_string(),
        impact: analysis.monthly_profit.abs() * 0.5,
        action: "Crear producto 2".to_string(),
        difficulty: Difficulty::Medium,
    });

    if analysis.profit_per_unit > 0.0 {
        let additional_units = (shortfall / analysis.profit_per_unit).ceil();
        let target_volume = model.monthly_volume + additional_units;
        recommendations.push(Recommendation {
            kind: RecommendationKind::IncreaseVolume,
            title: format!("📈 Aumentar volumen a {}", target_volume),
            description: format!(
                "Necesitas vender {} unidades para ser viable",
                target_volume
            ),
            impact: shortfall,
            action: "Actualizar volumen".to_string(),
            difficulty: Difficulty::Hard,
        });
    }

    let price_delta = shortfall / model.monthly_volume;
    recommendations.push(Recommendation {
        kind: RecommendationKind::IncreasePrice,
        title: "💰 Aumentar precio".to_string(),
        description: format!(
            "Subir el precio en ${:.2} por unidad podría hacerlo viable sin cambiar volumen",
            price_delta
        ),
        impact: shortfall,
        action: "Ajustar precio".to_string(),
        difficulty: Difficulty::Easy,
    });

    recommendations.push(Recommendation {
        kind: RecommendationKind::ReduceExpenses,
        title: "💼 Reducir gastos operativos".to_string(),
        description: "Negocia servicios, busca alternativas más baratas".to_string(),
        impact: shortfall.abs(),
        action: "Revisar gastos".to_string(),
        difficulty: Difficulty::Medium,
    });

    recommendations.sort_by(|a, b| b.impact.total_cmp(&a.impact));
    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}
