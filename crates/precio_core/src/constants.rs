//! Shared numeric constants for the pricing pipeline.
//!
//! All monetary figures in the workspace are Argentine pesos (ARS); the
//! tax constant below is the Argentine VAT ("IVA") general rate.

/// IVA rate applied to the post-commission cost subtotal when enabled.
pub const IVA_RATE: f64 = 0.21;

/// Average weeks per calendar month, used to project monthly working
/// hours from a per-day/per-week schedule. Not calendar-exact.
pub const WEEKS_PER_MONTH: f64 = 4.33;

/// Minutes per hour, used to convert per-unit labor time into hours.
pub const MINUTES_PER_HOUR: f64 = 60.0;

/// Months per year, used for straight-line equipment amortisation.
pub const MONTHS_PER_YEAR: f64 = 12.0;
