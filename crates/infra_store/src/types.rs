//! Persisted records and partial-update forms.
//!
//! Wire forms are camelCase to match the calculator payloads; the
//! SQLite columns keep the snake_case names the records were first
//! deployed with.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use precio_core::catalog::SocioeconomicLevel;
use precio_core::model::CostModel;
use precio_engine::analysis::AnalysisResult;

/// A tenant. Each authenticated owner has exactly one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    /// Stable identifier (UUID v4).
    pub id: String,

    /// The owning user's identity-provider subject. Unique.
    pub owner_id: String,

    /// Display name, defaulted to "Mi Negocio" at provisioning.
    pub name: String,

    /// URL-safe identifier derived from the owner's email. Unique.
    pub slug: String,

    /// Provisioning time.
    pub created_at: DateTime<Utc>,
}

/// Onboarding profile attached to an organization.
///
/// Created with defaults the first time anything asks for it; the
/// setup wizard then fills it in and flips `is_setup_complete`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationProfile {
    /// Stable identifier (UUID v4).
    pub id: String,

    /// The organization this profile belongs to. Unique.
    pub organization_id: String,

    /// The salary the operator wants the business to pay them, ARS/month.
    pub ideal_monthly_salary: f64,

    /// Declared fixed costs, ARS/month.
    pub fixed_costs: f64,

    /// Declared variable costs, ARS/month.
    pub variable_costs: f64,

    /// Argentine province the business operates in.
    pub province: String,

    /// Socioeconomic band of the target neighbourhood.
    pub socioeconomic_level: SocioeconomicLevel,

    /// Whether the onboarding wizard has been completed.
    pub is_setup_complete: bool,

    /// First creation time.
    pub created_at: DateTime<Utc>,

    /// Last modification time, refreshed on every update.
    pub updated_at: DateTime<Utc>,
}

/// Partial profile update; `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileChanges {
    /// New ideal monthly salary, ARS.
    pub ideal_monthly_salary: Option<f64>,

    /// New fixed costs, ARS/month.
    pub fixed_costs: Option<f64>,

    /// New variable costs, ARS/month.
    pub variable_costs: Option<f64>,

    /// New province.
    pub province: Option<String>,

    /// New socioeconomic band.
    pub socioeconomic_level: Option<SocioeconomicLevel>,
}

/// A saved calculator result: headline figures plus full snapshots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedProduct {
    /// Stable identifier (UUID v4).
    pub id: String,

    /// The owning organization.
    pub organization_id: String,

    /// Product name as entered in the calculator.
    pub name: String,

    /// Business type code from the catalog.
    pub business_type: String,

    /// Final cost per unit at save time, ARS.
    pub base_cost: f64,

    /// Final price per unit at save time, ARS.
    pub final_price: f64,

    /// Profit per unit at save time, ARS.
    pub profit_margin: f64,

    /// Markup relative to final cost, percent. `None` when the profit
    /// target was a fixed amount on a zero-cost model.
    pub markup_percentage: Option<f64>,

    /// The exact cost model that produced this product.
    pub cost_model: CostModel,

    /// The analysis the calculator showed when the product was saved.
    pub analysis: AnalysisResult,

    /// Save time.
    pub created_at: DateTime<Utc>,
}

/// Headline figures for the dashboard landing page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Number of saved products.
    pub total_products: u64,

    /// Sum of per-unit profit margins across saved products, ARS.
    pub total_earnings: f64,

    /// Fixed costs declared in the profile, ARS/month.
    pub fixed_costs: f64,

    /// Variable costs declared in the profile, ARS/month.
    pub variable_costs: f64,
}

/// Outcome of [`Store::ensure_organization`](crate::Store::ensure_organization).
#[derive(Clone, Debug, PartialEq)]
pub struct ProvisionOutcome {
    /// The organization, existing or freshly inserted.
    pub organization: Organization,

    /// `true` when this call inserted the organization.
    pub created: bool,
}
