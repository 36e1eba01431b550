//! SQLite-backed store for tenants, profiles, and saved products.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::info;
use uuid::Uuid;

use precio_core::catalog::SocioeconomicLevel;
use precio_core::model::{CostModel, ProfitTarget};
use precio_engine::analysis::AnalysisResult;

use crate::error::StoreError;
use crate::types::{
    DashboardSummary, Organization, OrganizationProfile, ProfileChanges, ProvisionOutcome,
    SavedProduct,
};

/// Generated slugs are clipped to this many characters.
const SLUG_MAX_CHARS: usize = 100;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS organizations (
    id TEXT PRIMARY KEY,
    owner_id TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    slug TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS organization_profiles (
    id TEXT PRIMARY KEY,
    organization_id TEXT NOT NULL UNIQUE REFERENCES organizations(id),
    ideal_monthly_salary REAL NOT NULL,
    fixed_costs REAL NOT NULL,
    variable_costs REAL NOT NULL,
    province TEXT NOT NULL,
    socioeconomic_level TEXT NOT NULL,
    is_setup_complete INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS products (
    id TEXT PRIMARY KEY,
    organization_id TEXT NOT NULL REFERENCES organizations(id),
    name TEXT NOT NULL,
    business_type TEXT NOT NULL,
    base_cost REAL NOT NULL,
    final_price REAL NOT NULL,
    profit_margin REAL NOT NULL,
    markup_percentage REAL,
    cost_model_json TEXT NOT NULL,
    analysis_json TEXT NOT NULL,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_products_organization ON products(organization_id);
";

/// Embedded SQLite store for the multi-tenant calculator data.
///
/// Every operation is synchronous (rusqlite is blocking); async
/// callers should wrap them in `tokio::task::spawn_blocking`. The
/// connection sits behind a mutex, so one `Store` can be shared
/// across threads behind an `Arc`.
pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Opens or creates the database at `path`, creating parent
    /// directories and the schema as needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] when the data directory cannot be
    /// created and [`StoreError::Database`] when SQLite refuses the
    /// file.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        info!("Opened precio store at {:?}", path);
        Self::initialise(conn)
    }

    /// Opens a private in-memory database, useful for tests and demos.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::initialise(conn)
    }

    fn initialise(conn: Connection) -> Result<Self, StoreError> {
        conn.pragma_update(None, "foreign_keys", true)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Returns the organization for `owner_id`, provisioning it first
    /// if none exists.
    ///
    /// New organizations get a generated slug (email local part,
    /// base-36 timestamp, four random hex bytes) and the display name
    /// from `full_name`, falling back to "Mi Negocio". Two concurrent
    /// calls can both miss the existence check; the unique `owner_id`
    /// index decides the winner and the loser fetches that row. The
    /// organization profile is get-or-created on every path, so a
    /// successful return guarantees both records exist.
    pub fn ensure_organization(
        &self,
        owner_id: &str,
        email: Option<&str>,
        full_name: Option<&str>,
    ) -> Result<ProvisionOutcome, StoreError> {
        let conn = self.conn()?;

        if let Some(organization) = organization_by_owner(&conn, owner_id)? {
            get_or_create_profile(&conn, &organization.id)?;
            return Ok(ProvisionOutcome {
                organization,
                created: false,
            });
        }

        let now = Utc::now();
        let organization = Organization {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            name: full_name
                .filter(|name| !name.is_empty())
                .unwrap_or("Mi Negocio")
                .to_string(),
            slug: generate_slug(email, now),
            created_at: now,
        };

        let inserted = conn.execute(
            "INSERT INTO organizations (id, owner_id, name, slug, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                organization.id,
                organization.owner_id,
                organization.name,
                organization.slug,
                organization.created_at,
            ],
        );

        match inserted {
            Ok(_) => {
                get_or_create_profile(&conn, &organization.id)?;
                info!(
                    "Created organization {} (slug {}) for owner {}",
                    organization.id, organization.slug, owner_id
                );
                Ok(ProvisionOutcome {
                    organization,
                    created: true,
                })
            }
            Err(err) if is_unique_violation(&err) => {
                if let Some(winner) = organization_by_owner(&conn, owner_id)? {
                    get_or_create_profile(&conn, &winner.id)?;
                    info!(
                        "Organization for owner {} already provisioned as {}",
                        owner_id, winner.id
                    );
                    return Ok(ProvisionOutcome {
                        organization: winner,
                        created: false,
                    });
                }
                Err(StoreError::Database(err))
            }
            Err(err) => Err(StoreError::Database(err)),
        }
    }

    /// Looks up the organization owned by `owner_id`.
    pub fn organization_by_owner(
        &self,
        owner_id: &str,
    ) -> Result<Option<Organization>, StoreError> {
        let conn = self.conn()?;
        organization_by_owner(&conn, owner_id)
    }

    /// Returns the profile for `org_id`, inserting the defaults
    /// (salary 0, costs 0, Buenos Aires, medium band, setup
    /// incomplete) when none exists yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::OrganizationNotFound`] for an unknown
    /// organization.
    pub fn get_or_create_profile(&self, org_id: &str) -> Result<OrganizationProfile, StoreError> {
        let conn = self.conn()?;
        get_or_create_profile(&conn, org_id)
    }

    /// Applies the named fields of `changes` and refreshes
    /// `updated_at`. Fields left `None` keep their stored values.
    pub fn update_profile(
        &self,
        org_id: &str,
        changes: &ProfileChanges,
    ) -> Result<OrganizationProfile, StoreError> {
        let conn = self.conn()?;
        let mut profile = get_or_create_profile(&conn, org_id)?;

        if let Some(salary) = changes.ideal_monthly_salary {
            profile.ideal_monthly_salary = salary;
        }
        if let Some(fixed) = changes.fixed_costs {
            profile.fixed_costs = fixed;
        }
        if let Some(variable) = changes.variable_costs {
            profile.variable_costs = variable;
        }
        if let Some(ref province) = changes.province {
            profile.province = province.clone();
        }
        if let Some(level) = changes.socioeconomic_level {
            profile.socioeconomic_level = level;
        }
        profile.updated_at = Utc::now();

        conn.execute(
            "UPDATE organization_profiles
             SET ideal_monthly_salary = ?1, fixed_costs = ?2, variable_costs = ?3,
                 province = ?4, socioeconomic_level = ?5, updated_at = ?6
             WHERE organization_id = ?7",
            params![
                profile.ideal_monthly_salary,
                profile.fixed_costs,
                profile.variable_costs,
                profile.province,
                profile.socioeconomic_level.code(),
                profile.updated_at,
                profile.organization_id,
            ],
        )?;

        Ok(profile)
    }

    /// Marks the onboarding wizard as finished for `org_id`.
    pub fn complete_setup(&self, org_id: &str) -> Result<OrganizationProfile, StoreError> {
        let conn = self.conn()?;
        let mut profile = get_or_create_profile(&conn, org_id)?;
        profile.is_setup_complete = true;
        profile.updated_at = Utc::now();

        conn.execute(
            "UPDATE organization_profiles
             SET is_setup_complete = 1, updated_at = ?1
             WHERE organization_id = ?2",
            params![profile.updated_at, profile.organization_id],
        )?;

        info!("Setup completed for organization {}", org_id);
        Ok(profile)
    }

    /// Saves a calculator result as a product snapshot.
    ///
    /// The headline columns come from the analysis; the markup column
    /// is the percentage target as given, or the amount target
    /// expressed relative to final cost (NULL when that cost is zero).
    pub fn save_product(
        &self,
        org_id: &str,
        model: &CostModel,
        analysis: &AnalysisResult,
    ) -> Result<SavedProduct, StoreError> {
        let conn = self.conn()?;
        require_organization(&conn, org_id)?;

        let product = SavedProduct {
            id: Uuid::new_v4().to_string(),
            organization_id: org_id.to_string(),
            name: model.product_name.clone(),
            business_type: model.business_type.clone(),
            base_cost: analysis.final_cost,
            final_price: analysis.final_price,
            profit_margin: analysis.profit_per_unit,
            markup_percentage: markup_percentage(model, analysis),
            cost_model: model.clone(),
            analysis: analysis.clone(),
            created_at: Utc::now(),
        };

        let cost_model_json = serde_json::to_string(&product.cost_model)?;
        let analysis_json = serde_json::to_string(&product.analysis)?;

        conn.execute(
            "INSERT INTO products (id, organization_id, name, business_type, base_cost,
                                   final_price, profit_margin, markup_percentage,
                                   cost_model_json, analysis_json, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                product.id,
                product.organization_id,
                product.name,
                product.business_type,
                product.base_cost,
                product.final_price,
                product.profit_margin,
                product.markup_percentage,
                cost_model_json,
                analysis_json,
                product.created_at,
            ],
        )?;

        info!("Saved product '{}' for organization {}", product.name, org_id);
        Ok(product)
    }

    /// Lists the organization's saved products, newest first.
    pub fn list_products(&self, org_id: &str) -> Result<Vec<SavedProduct>, StoreError> {
        let conn = self.conn()?;
        require_organization(&conn, org_id)?;

        let mut stmt = conn.prepare(
            "SELECT id, organization_id, name, business_type, base_cost, final_price,
                    profit_margin, markup_percentage, cost_model_json, analysis_json, created_at
             FROM products
             WHERE organization_id = ?1
             ORDER BY created_at DESC",
        )?;

        let rows = stmt.query_map(params![org_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, f64>(4)?,
                row.get::<_, f64>(5)?,
                row.get::<_, f64>(6)?,
                row.get::<_, Option<f64>>(7)?,
                row.get::<_, String>(8)?,
                row.get::<_, String>(9)?,
                row.get::<_, DateTime<Utc>>(10)?,
            ))
        })?;

        let mut products = Vec::new();
        for row in rows {
            let (
                id,
                organization_id,
                name,
                business_type,
                base_cost,
                final_price,
                profit_margin,
                markup_percentage,
                cost_model_json,
                analysis_json,
                created_at,
            ) = row?;

            products.push(SavedProduct {
                id,
                organization_id,
                name,
                business_type,
                base_cost,
                final_price,
                profit_margin,
                markup_percentage,
                cost_model: serde_json::from_str(&cost_model_json)?,
                analysis: serde_json::from_str(&analysis_json)?,
                created_at,
            });
        }
        Ok(products)
    }

    /// Computes the dashboard headline figures for `org_id`.
    pub fn dashboard_summary(&self, org_id: &str) -> Result<DashboardSummary, StoreError> {
        let conn = self.conn()?;
        let profile = get_or_create_profile(&conn, org_id)?;

        let (total_products, total_earnings) = conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(profit_margin), 0)
             FROM products WHERE organization_id = ?1",
            params![org_id],
            |row| Ok((row.get::<_, i64>(0)?, row.get::<_, f64>(1)?)),
        )?;

        Ok(DashboardSummary {
            total_products: total_products as u64,
            total_earnings,
            fixed_costs: profile.fixed_costs,
            variable_costs: profile.variable_costs,
        })
    }
}

fn organization_by_owner(
    conn: &Connection,
    owner_id: &str,
) -> Result<Option<Organization>, StoreError> {
    let organization = conn
        .query_row(
            "SELECT id, owner_id, name, slug, created_at
             FROM organizations WHERE owner_id = ?1",
            params![owner_id],
            organization_from_row,
        )
        .optional()?;
    Ok(organization)
}

fn organization_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Organization> {
    Ok(Organization {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        name: row.get(2)?,
        slug: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn require_organization(conn: &Connection, org_id: &str) -> Result<(), StoreError> {
    conn.query_row(
        "SELECT 1 FROM organizations WHERE id = ?1",
        params![org_id],
        |_| Ok(()),
    )
    .optional()?
    .ok_or_else(|| StoreError::OrganizationNotFound {
        org_id: org_id.to_string(),
    })
}

fn get_or_create_profile(
    conn: &Connection,
    org_id: &str,
) -> Result<OrganizationProfile, StoreError> {
    require_organization(conn, org_id)?;

    let existing = conn
        .query_row(
            "SELECT id, organization_id, ideal_monthly_salary, fixed_costs, variable_costs,
                    province, socioeconomic_level, is_setup_complete, created_at, updated_at
             FROM organization_profiles WHERE organization_id = ?1",
            params![org_id],
            profile_from_row,
        )
        .optional()?;

    if let Some(profile) = existing {
        return Ok(profile);
    }

    let now = Utc::now();
    let profile = OrganizationProfile {
        id: Uuid::new_v4().to_string(),
        organization_id: org_id.to_string(),
        ideal_monthly_salary: 0.0,
        fixed_costs: 0.0,
        variable_costs: 0.0,
        province: "Buenos Aires".to_string(),
        socioeconomic_level: SocioeconomicLevel::Medium,
        is_setup_complete: false,
        created_at: now,
        updated_at: now,
    };

    conn.execute(
        "INSERT INTO organization_profiles (id, organization_id, ideal_monthly_salary,
                                            fixed_costs, variable_costs, province,
                                            socioeconomic_level, is_setup_complete,
                                            created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            profile.id,
            profile.organization_id,
            profile.ideal_monthly_salary,
            profile.fixed_costs,
            profile.variable_costs,
            profile.province,
            profile.socioeconomic_level.code(),
            profile.is_setup_complete,
            profile.created_at,
            profile.updated_at,
        ],
    )?;

    Ok(profile)
}

fn profile_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<OrganizationProfile> {
    let level: String = row.get(6)?;
    let socioeconomic_level = level.parse::<SocioeconomicLevel>().map_err(|err| {
        rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(err))
    })?;

    Ok(OrganizationProfile {
        id: row.get(0)?,
        organization_id: row.get(1)?,
        ideal_monthly_salary: row.get(2)?,
        fixed_costs: row.get(3)?,
        variable_costs: row.get(4)?,
        province: row.get(5)?,
        socioeconomic_level,
        is_setup_complete: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

/// Markup relative to final cost: the percentage target as given, or
/// the amount target expressed as a share of that cost. Undefined
/// when an amount target sits on a zero-cost model.
fn markup_percentage(model: &CostModel, analysis: &AnalysisResult) -> Option<f64> {
    match model.profit {
        ProfitTarget::Percentage { percentage } => Some(percentage),
        ProfitTarget::Amount { .. } => {
            if analysis.final_cost > 0.0 {
                Some(analysis.profit_per_unit / analysis.final_cost * 100.0)
            } else {
                None
            }
        }
    }
}

/// Builds the provisioning slug: email local part (or "usuario"),
/// base-36 millisecond timestamp, four random hex bytes, lowercased
/// and clipped to 100 characters.
fn generate_slug(email: Option<&str>, now: DateTime<Utc>) -> String {
    let local_part = email
        .and_then(|address| address.split('@').next())
        .filter(|part| !part.is_empty())
        .unwrap_or("usuario");

    let timestamp = to_base36(now.timestamp_millis().max(0) as u64);
    let random: [u8; 4] = rand::random();
    let suffix: String = random.iter().map(|byte| format!("{:02x}", byte)).collect();

    let slug = format!("{}-{}-{}", local_part, timestamp, suffix).to_lowercase();
    slug.chars().take(SLUG_MAX_CHARS).collect()
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(DIGITS[(value % 36) as usize] as char);
        value /= 36;
    }
    digits.iter().rev().collect()
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(ffi_err, _)
            if ffi_err.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use precio_core::model::Material;
    use precio_engine::analysis::Analyzer;
    use tempfile::TempDir;

    fn create_test_store() -> (Store, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = Store::open(&dir.path().join("precio.db")).unwrap();
        (store, dir)
    }

    fn sample_model() -> CostModel {
        let mut model = CostModel::starter();
        model.product_name = "Remera estampada".to_string();
        model.materials = vec![Material {
            name: "Tela".to_string(),
            quantity: 1.5,
            unit: "metro".to_string(),
            unit_price: 2000.0,
        }];
        model
    }

    fn analysed(model: &CostModel) -> AnalysisResult {
        Analyzer::new().analyze(model).unwrap()
    }

    #[test]
    fn test_ensure_organization_creates_org_and_profile() {
        let (store, _dir) = create_test_store();

        let outcome = store
            .ensure_organization("user-1", Some("maria@tienda.com"), Some("Tienda María"))
            .unwrap();

        assert!(outcome.created);
        assert_eq!(outcome.organization.owner_id, "user-1");
        assert_eq!(outcome.organization.name, "Tienda María");
        assert!(outcome.organization.slug.starts_with("maria-"));

        let profile = store
            .get_or_create_profile(&outcome.organization.id)
            .unwrap();
        assert_eq!(profile.organization_id, outcome.organization.id);
        assert_eq!(profile.ideal_monthly_salary, 0.0);
        assert_eq!(profile.fixed_costs, 0.0);
        assert_eq!(profile.province, "Buenos Aires");
        assert_eq!(profile.socioeconomic_level, SocioeconomicLevel::Medium);
        assert!(!profile.is_setup_complete);
    }

    #[test]
    fn test_ensure_organization_is_idempotent() {
        let (store, _dir) = create_test_store();

        let first = store
            .ensure_organization("user-1", Some("maria@tienda.com"), None)
            .unwrap();
        let second = store
            .ensure_organization("user-1", Some("otro@correo.com"), Some("Otro Nombre"))
            .unwrap();

        assert!(first.created);
        assert!(!second.created);
        assert_eq!(first.organization.id, second.organization.id);
        // The original row wins; later identity details are ignored.
        assert_eq!(second.organization.name, "Mi Negocio");
    }

    #[test]
    fn test_ensure_organization_defaults_without_identity_details() {
        let (store, _dir) = create_test_store();

        let outcome = store.ensure_organization("user-2", None, None).unwrap();

        assert_eq!(outcome.organization.name, "Mi Negocio");
        assert!(outcome.organization.slug.starts_with("usuario-"));
    }

    #[test]
    fn test_organization_by_owner_missing_is_none() {
        let (store, _dir) = create_test_store();
        assert!(store.organization_by_owner("nobody").unwrap().is_none());
    }

    #[test]
    fn test_slug_shape() {
        let now = Utc::now();
        let slug = generate_slug(Some("Maria.Ventas@Example.com"), now);

        let parts: Vec<&str> = slug.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "maria.ventas");
        assert!(!parts[1].is_empty());
        assert!(parts[1]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        assert_eq!(parts[2].len(), 8);
        assert!(parts[2].chars().all(|c| c.is_ascii_hexdigit()));
        assert!(slug.chars().count() <= 100);
        assert_eq!(slug, slug.to_lowercase());
    }

    #[test]
    fn test_slug_clips_long_local_parts() {
        let long_local = "a".repeat(150);
        let email = format!("{}@example.com", long_local);
        let slug = generate_slug(Some(&email), Utc::now());
        assert_eq!(slug.chars().count(), 100);
    }

    #[test]
    fn test_slug_falls_back_for_empty_local_part() {
        let slug = generate_slug(Some("@dominio.com"), Utc::now());
        assert!(slug.starts_with("usuario-"));
    }

    #[test]
    fn test_to_base36_round_values() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(36 * 36 + 1), "101");
    }

    #[test]
    fn test_profile_ops_reject_unknown_organization() {
        let (store, _dir) = create_test_store();

        let err = store.get_or_create_profile("missing-org").unwrap_err();
        assert!(matches!(
            err,
            StoreError::OrganizationNotFound { ref org_id } if org_id == "missing-org"
        ));
        assert!(store
            .update_profile("missing-org", &ProfileChanges::default())
            .is_err());
        assert!(store.dashboard_summary("missing-org").is_err());
    }

    #[test]
    fn test_update_profile_touches_only_named_fields() {
        let (store, _dir) = create_test_store();
        let org = store
            .ensure_organization("user-1", None, None)
            .unwrap()
            .organization;
        let before = store.get_or_create_profile(&org.id).unwrap();

        let changes = ProfileChanges {
            fixed_costs: Some(85000.0),
            province: Some("Córdoba".to_string()),
            ..ProfileChanges::default()
        };
        let after = store.update_profile(&org.id, &changes).unwrap();

        assert_eq!(after.fixed_costs, 85000.0);
        assert_eq!(after.province, "Córdoba");
        assert_eq!(after.ideal_monthly_salary, before.ideal_monthly_salary);
        assert_eq!(after.variable_costs, before.variable_costs);
        assert_eq!(after.socioeconomic_level, before.socioeconomic_level);
        assert!(!after.is_setup_complete);
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at >= before.updated_at);

        // The write is durable, not just reflected in the return value.
        let reread = store.get_or_create_profile(&org.id).unwrap();
        assert_eq!(reread, after);
    }

    #[test]
    fn test_complete_setup_flips_the_flag() {
        let (store, _dir) = create_test_store();
        let org = store
            .ensure_organization("user-1", None, None)
            .unwrap()
            .organization;

        let done = store.complete_setup(&org.id).unwrap();
        assert!(done.is_setup_complete);

        let reread = store.get_or_create_profile(&org.id).unwrap();
        assert!(reread.is_setup_complete);
    }

    #[test]
    fn test_save_product_snapshots_model_and_analysis() {
        let (store, _dir) = create_test_store();
        let org = store
            .ensure_organization("user-1", None, None)
            .unwrap()
            .organization;

        let model = sample_model();
        let analysis = analysed(&model);
        let saved = store.save_product(&org.id, &model, &analysis).unwrap();

        assert_eq!(saved.name, "Remera estampada");
        assert_eq!(saved.business_type, model.business_type);
        assert_eq!(saved.base_cost, analysis.final_cost);
        assert_eq!(saved.final_price, analysis.final_price);
        assert_eq!(saved.profit_margin, analysis.profit_per_unit);
        // The starter profit target is a 40% markup.
        assert_eq!(saved.markup_percentage, Some(40.0));

        let listed = store.list_products(&org.id).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].cost_model, model);
        assert_eq!(listed[0].analysis, analysis);
    }

    #[test]
    fn test_amount_target_markup_is_relative_to_cost() {
        let (store, _dir) = create_test_store();
        let org = store
            .ensure_organization("user-1", None, None)
            .unwrap()
            .organization;

        let mut model = sample_model();
        model.profit = ProfitTarget::Amount { amount: 500.0 };
        let analysis = analysed(&model);
        let saved = store.save_product(&org.id, &model, &analysis).unwrap();

        assert_relative_eq!(
            saved.markup_percentage.unwrap(),
            500.0 / analysis.final_cost * 100.0
        );
    }

    #[test]
    fn test_amount_target_markup_undefined_at_zero_cost() {
        let (store, _dir) = create_test_store();
        let org = store
            .ensure_organization("user-1", None, None)
            .unwrap()
            .organization;

        let mut model = CostModel::starter();
        model.labor_minutes = 0.0;
        model.include_iva = false;
        model.profit = ProfitTarget::Amount { amount: 0.0 };
        let analysis = analysed(&model);
        assert_eq!(analysis.final_cost, 0.0);

        let saved = store.save_product(&org.id, &model, &analysis).unwrap();
        assert_eq!(saved.markup_percentage, None);
    }

    #[test]
    fn test_list_products_returns_all_snapshots() {
        let (store, _dir) = create_test_store();
        let org = store
            .ensure_organization("user-1", None, None)
            .unwrap()
            .organization;

        let first_model = sample_model();
        let first = store
            .save_product(&org.id, &first_model, &analysed(&first_model))
            .unwrap();

        let mut second_model = sample_model();
        second_model.product_name = "Buzo con capucha".to_string();
        let second = store
            .save_product(&org.id, &second_model, &analysed(&second_model))
            .unwrap();

        let listed = store.list_products(&org.id).unwrap();
        assert_eq!(listed.len(), 2);
        let ids: Vec<&str> = listed.iter().map(|p| p.id.as_str()).collect();
        assert!(ids.contains(&first.id.as_str()));
        assert!(ids.contains(&second.id.as_str()));
    }

    #[test]
    fn test_products_are_isolated_per_organization() {
        let (store, _dir) = create_test_store();
        let org_a = store
            .ensure_organization("user-a", None, None)
            .unwrap()
            .organization;
        let org_b = store
            .ensure_organization("user-b", None, None)
            .unwrap()
            .organization;

        let model = sample_model();
        store
            .save_product(&org_a.id, &model, &analysed(&model))
            .unwrap();

        assert_eq!(store.list_products(&org_a.id).unwrap().len(), 1);
        assert!(store.list_products(&org_b.id).unwrap().is_empty());
    }

    #[test]
    fn test_dashboard_summary_totals() {
        let (store, _dir) = create_test_store();
        let org = store
            .ensure_organization("user-1", None, None)
            .unwrap()
            .organization;

        store
            .update_profile(
                &org.id,
                &ProfileChanges {
                    fixed_costs: Some(85000.0),
                    variable_costs: Some(12000.0),
                    ..ProfileChanges::default()
                },
            )
            .unwrap();

        let model = sample_model();
        let analysis = analysed(&model);
        store.save_product(&org.id, &model, &analysis).unwrap();
        store.save_product(&org.id, &model, &analysis).unwrap();

        let summary = store.dashboard_summary(&org.id).unwrap();
        assert_eq!(summary.total_products, 2);
        assert_relative_eq!(summary.total_earnings, 2.0 * analysis.profit_per_unit);
        assert_eq!(summary.fixed_costs, 85000.0);
        assert_eq!(summary.variable_costs, 12000.0);
    }

    #[test]
    fn test_dashboard_summary_empty_organization() {
        let (store, _dir) = create_test_store();
        let org = store
            .ensure_organization("user-1", None, None)
            .unwrap()
            .organization;

        let summary = store.dashboard_summary(&org.id).unwrap();
        assert_eq!(summary.total_products, 0);
        assert_eq!(summary.total_earnings, 0.0);
    }

    #[test]
    fn test_product_ops_reject_unknown_organization() {
        let (store, _dir) = create_test_store();
        let model = sample_model();
        let analysis = analysed(&model);

        let err = store
            .save_product("missing-org", &model, &analysis)
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(store.list_products("missing-org").unwrap_err().is_not_found());
    }

    #[test]
    fn test_unique_violation_detection() {
        let store = Store::open_in_memory().unwrap();
        let conn = store.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO organizations (id, owner_id, name, slug, created_at)
             VALUES ('a', 'owner', 'n', 's', '2026-01-01T00:00:00+00:00')",
            [],
        )
        .unwrap();

        let err = conn
            .execute(
                "INSERT INTO organizations (id, owner_id, name, slug, created_at)
                 VALUES ('b', 'owner', 'n', 's2', '2026-01-01T00:00:00+00:00')",
                [],
            )
            .unwrap_err();
        assert!(is_unique_violation(&err));
        assert!(!is_unique_violation(&rusqlite::Error::QueryReturnedNoRows));
    }

    #[test]
    fn test_store_reopen_preserves_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("precio.db");

        let org_id = {
            let store = Store::open(&path).unwrap();
            let outcome = store
                .ensure_organization("user-1", Some("maria@tienda.com"), None)
                .unwrap();
            let model = sample_model();
            store
                .save_product(&outcome.organization.id, &model, &analysed(&model))
                .unwrap();
            outcome.organization.id
        };

        let reopened = Store::open(&path).unwrap();
        let org = reopened.organization_by_owner("user-1").unwrap().unwrap();
        assert_eq!(org.id, org_id);
        assert_eq!(reopened.list_products(&org_id).unwrap().len(), 1);
    }
}
