//! Reference catalogues surfaced by the guided input flow.
//!
//! These are advisory lists the UI and CLI offer as suggestions; apart
//! from the socioeconomic bands, none of them constrain what a
//! `CostModel` may contain. Labels are user-facing Spanish strings,
//! kept verbatim from the product copy. Sales channels live on
//! [`crate::model::SalesChannel`], which carries its own catalogue
//! metadata.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A catalogue entry: a stable machine code plus a display label.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Stable machine code stored in snapshots.
    pub code: &'static str,
    /// User-facing display label.
    pub label: &'static str,
}

/// Business categories offered when describing a product.
pub const BUSINESS_TYPES: &[CatalogEntry] = &[
    CatalogEntry { code: "confection", label: "Confección/Ropa" },
    CatalogEntry { code: "food", label: "Alimentos" },
    CatalogEntry { code: "services", label: "Servicios" },
    CatalogEntry { code: "digital", label: "Digital/Software" },
    CatalogEntry { code: "handmade", label: "Artesanías" },
    CatalogEntry { code: "jewelry", label: "Joyería" },
    CatalogEntry { code: "cosmetics", label: "Cosméticos" },
    CatalogEntry { code: "furniture", label: "Muebles" },
    CatalogEntry { code: "custom", label: "Otro (especificar)" },
];

/// Measurement units offered for material quantities.
pub const UNITS: &[CatalogEntry] = &[
    CatalogEntry { code: "unidad", label: "Unidad" },
    CatalogEntry { code: "metro", label: "Metro" },
    CatalogEntry { code: "kg", label: "Kilogramo" },
    CatalogEntry { code: "gramo", label: "Gramo" },
    CatalogEntry { code: "litro", label: "Litro" },
    CatalogEntry { code: "mililitro", label: "Mililitro" },
    CatalogEntry { code: "docena", label: "Docena" },
    CatalogEntry { code: "pack", label: "Pack" },
    CatalogEntry { code: "custom", label: "Otra (especificar)" },
];

/// Common operative-expense concepts offered as quick-add templates.
pub const OPERATIVE_EXPENSE_TEMPLATES: &[&str] = &[
    "Alquiler",
    "Servicios (Luz, Gas, Agua)",
    "Internet",
    "Packaging",
    "Publicidad",
    "Teléfono",
    "Seguros",
    "Mantenimiento",
];

/// Common personal-expense concepts offered as quick-add templates.
pub const PERSONAL_EXPENSE_TEMPLATES: &[&str] = &[
    "Alquiler/Hipoteca",
    "Servicios Personales",
    "Comida/Supermercado",
    "Transporte",
    "Teléfono/Internet",
];

/// Argentine provinces offered when locating an organization profile.
pub const ARGENTINA_PROVINCES: &[&str] = &[
    "Buenos Aires",
    "CABA",
    "Catamarca",
    "Córdoba",
    "Corrientes",
    "Chaco",
    "Chubut",
    "Entre Ríos",
    "Formosa",
    "Jujuy",
    "La Pampa",
    "La Rioja",
    "Mendoza",
    "Misiones",
    "Neuquén",
    "Río Negro",
    "Salta",
    "San Juan",
    "San Luis",
    "Santa Cruz",
    "Santa Fe",
    "Santiago del Estero",
    "Tierra del Fuego",
    "Tucumán",
];

/// Socioeconomic band of the neighbourhood an operator sells in.
///
/// Stored on the organization profile; the band is descriptive context
/// for pricing decisions and does not feed the pipeline.
///
/// # Examples
///
/// ```
/// use precio_core::catalog::SocioeconomicLevel;
///
/// let level: SocioeconomicLevel = "medium".parse().unwrap();
/// assert_eq!(level, SocioeconomicLevel::Medium);
/// assert_eq!(level.label(), "Medio");
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocioeconomicLevel {
    /// Lower-income neighbourhoods.
    Low,
    /// Middle-class neighbourhoods.
    Medium,
    /// Upper-class neighbourhoods.
    High,
}

impl SocioeconomicLevel {
    /// Every band, in display order.
    pub const ALL: [SocioeconomicLevel; 3] = [
        SocioeconomicLevel::Low,
        SocioeconomicLevel::Medium,
        SocioeconomicLevel::High,
    ];

    /// Returns the lowercase code stored in profiles.
    pub fn code(&self) -> &'static str {
        match self {
            SocioeconomicLevel::Low => "low",
            SocioeconomicLevel::Medium => "medium",
            SocioeconomicLevel::High => "high",
        }
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            SocioeconomicLevel::Low => "Bajo",
            SocioeconomicLevel::Medium => "Medio",
            SocioeconomicLevel::High => "Alto",
        }
    }

    /// Returns the description shown beside the label.
    pub fn description(&self) -> &'static str {
        match self {
            SocioeconomicLevel::Low => "Barrios con economía reducida",
            SocioeconomicLevel::Medium => "Barrios de clase media",
            SocioeconomicLevel::High => "Barrios de clase alta",
        }
    }
}

impl Default for SocioeconomicLevel {
    fn default() -> Self {
        SocioeconomicLevel::Medium
    }
}

impl FromStr for SocioeconomicLevel {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, UnknownLevel> {
        match s.to_lowercase().as_str() {
            "low" => Ok(SocioeconomicLevel::Low),
            "medium" => Ok(SocioeconomicLevel::Medium),
            "high" => Ok(SocioeconomicLevel::High),
            _ => Err(UnknownLevel {
                code: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SocioeconomicLevel {
    /// Formats as the stored code.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Error parsing a socioeconomic band code.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown socioeconomic level: {code}")]
pub struct UnknownLevel {
    /// The rejected code.
    pub code: String,
}
