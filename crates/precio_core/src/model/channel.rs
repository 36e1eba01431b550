//! Sales channels with commission metadata.
//!
//! This module provides the catalogue of channels a product can be sold
//! through, each carrying its default commission rate and display label.
//!
//! # Examples
//!
//! ```
//! use precio_core::model::channel::SalesChannel;
//!
//! let ml = SalesChannel::MercadoLibre;
//! assert_eq!(ml.code(), "mercadolibre");
//! assert_eq!(ml.default_commission_pct(), 12.0);
//!
//! let local = SalesChannel::InPerson;
//! assert!(!local.charges_commission());  // in-person sales carry no fee
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ChannelError;

/// Known sales channels with default commission rates.
///
/// The commission actually charged on a calculation comes from the
/// cost model's `platform_fee` field; the per-channel defaults here are
/// catalogue data used to prefill that field. The in-person channel is
/// the single commission-free case: the pipeline skips the fee stage
/// entirely for it, whatever the fee field says.
///
/// # Variants
/// - `InPerson`: Direct sale, no commission (wire code `presencial`)
/// - `MercadoLibre`: Marketplace, 12% default commission
/// - `Shopify`: Hosted storefront, 2.9% default commission
/// - `Instagram`: Instagram Shop, 5% default commission
/// - `Facebook`: Facebook Shop, 5% default commission
/// - `WhatsApp`: WhatsApp Business, no default commission
/// - `Custom`: Any other channel, fee supplied by the user
///
/// # Examples
///
/// ```
/// use precio_core::model::channel::SalesChannel;
///
/// // Parse from the wire code (case-insensitive)
/// let channel: SalesChannel = "presencial".parse().unwrap();
/// assert_eq!(channel, SalesChannel::InPerson);
///
/// // Default commissions are advisory catalogue data
/// assert_eq!(SalesChannel::Shopify.default_commission_pct(), 2.9);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalesChannel {
    /// Direct in-person sale. Wire code `presencial`; the only channel
    /// the commission stage skips.
    #[serde(rename = "presencial")]
    InPerson,

    /// MercadoLibre marketplace. Default commission: 12%.
    MercadoLibre,

    /// Shopify storefront. Default commission: 2.9%.
    Shopify,

    /// Instagram Shop. Default commission: 5%.
    Instagram,

    /// Facebook Shop. Default commission: 5%.
    Facebook,

    /// WhatsApp Business. No default commission.
    WhatsApp,

    /// User-specified channel. No default commission.
    Custom,
}

impl SalesChannel {
    /// Every catalogued channel, in display order.
    pub const ALL: [SalesChannel; 7] = [
        SalesChannel::InPerson,
        SalesChannel::MercadoLibre,
        SalesChannel::Shopify,
        SalesChannel::Instagram,
        SalesChannel::Facebook,
        SalesChannel::WhatsApp,
        SalesChannel::Custom,
    ];

    /// Returns the lowercase wire code for this channel.
    ///
    /// # Examples
    ///
    /// ```
    /// use precio_core::model::channel::SalesChannel;
    ///
    /// assert_eq!(SalesChannel::InPerson.code(), "presencial");
    /// assert_eq!(SalesChannel::MercadoLibre.code(), "mercadolibre");
    /// assert_eq!(SalesChannel::WhatsApp.code(), "whatsapp");
    /// ```
    pub fn code(&self) -> &'static str {
        match self {
            SalesChannel::InPerson => "presencial",
            SalesChannel::MercadoLibre => "mercadolibre",
            SalesChannel::Shopify => "shopify",
            SalesChannel::Instagram => "instagram",
            SalesChannel::Facebook => "facebook",
            SalesChannel::WhatsApp => "whatsapp",
            SalesChannel::Custom => "custom",
        }
    }

    /// Returns the display label shown in the guided input flow.
    pub fn label(&self) -> &'static str {
        match self {
            SalesChannel::InPerson => "Presencial (sin comisión)",
            SalesChannel::MercadoLibre => "MercadoLibre",
            SalesChannel::Shopify => "Shopify",
            SalesChannel::Instagram => "Instagram Shop",
            SalesChannel::Facebook => "Facebook Shop",
            SalesChannel::WhatsApp => "WhatsApp Business",
            SalesChannel::Custom => "Otra (especificar)",
        }
    }

    /// Returns the default commission rate in percent.
    ///
    /// Prefills the cost model's fee field; the pipeline always applies
    /// the model's own fee, not this default.
    ///
    /// # Examples
    ///
    /// ```
    /// use precio_core::model::channel::SalesChannel;
    ///
    /// assert_eq!(SalesChannel::InPerson.default_commission_pct(), 0.0);
    /// assert_eq!(SalesChannel::MercadoLibre.default_commission_pct(), 12.0);
    /// assert_eq!(SalesChannel::Shopify.default_commission_pct(), 2.9);
    /// assert_eq!(SalesChannel::Instagram.default_commission_pct(), 5.0);
    /// ```
    pub fn default_commission_pct(&self) -> f64 {
        match self {
            SalesChannel::InPerson => 0.0,
            SalesChannel::MercadoLibre => 12.0,
            SalesChannel::Shopify => 2.9,
            SalesChannel::Instagram => 5.0,
            SalesChannel::Facebook => 5.0,
            SalesChannel::WhatsApp => 0.0,
            SalesChannel::Custom => 0.0,
        }
    }

    /// Whether the commission stage applies to this channel.
    ///
    /// Only the in-person channel is exempt; every other channel is
    /// charged the model's fee, including those whose default rate is
    /// zero.
    #[inline]
    pub fn charges_commission(&self) -> bool {
        !matches!(self, SalesChannel::InPerson)
    }
}

impl Default for SalesChannel {
    fn default() -> Self {
        SalesChannel::InPerson
    }
}

impl FromStr for SalesChannel {
    type Err = ChannelError;

    /// Parses a wire code (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use precio_core::model::channel::SalesChannel;
    ///
    /// let channel: SalesChannel = "MercadoLibre".parse().unwrap();
    /// assert_eq!(channel, SalesChannel::MercadoLibre);
    ///
    /// let result: Result<SalesChannel, _> = "ebay".parse();
    /// assert!(result.is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, ChannelError> {
        match s.to_lowercase().as_str() {
            "presencial" => Ok(SalesChannel::InPerson),
            "mercadolibre" => Ok(SalesChannel::MercadoLibre),
            "shopify" => Ok(SalesChannel::Shopify),
            "instagram" => Ok(SalesChannel::Instagram),
            "facebook" => Ok(SalesChannel::Facebook),
            "whatsapp" => Ok(SalesChannel::WhatsApp),
            "custom" => Ok(SalesChannel::Custom),
            _ => Err(ChannelError::UnknownChannel(s.to_string())),
        }
    }
}

impl fmt::Display for SalesChannel {
    /// Formats as the wire code.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
