//! Developer-facing input types for starting a transaction.

use bon::Builder;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::{
    errors::{Error, Result},
    types::MinorUnits,
};

/// Everything needed to start a transaction.
///
/// ```
/// use paynl_kit::transaction::{Product, ProductType, TransactionStartOptions};
///
/// let options = TransactionStartOptions::builder()
///     .amount(24.95)
///     .return_url("https://shop.example.com/return")
///     .ip_address("10.20.30.40")
///     .description("Order 1001")
///     .products(vec![
///         Product::builder()
///             .id("SKU-1")
///             .name("T-shirt")
///             .price(24.95)
///             .tax(4.33)
///             .qty(1)
///             .product_type(ProductType::Article)
///             .build(),
///     ])
///     .build();
///
/// assert!(options.validate().is_ok());
/// ```
#[derive(Builder, Debug, Clone, PartialEq)]
pub struct TransactionStartOptions {
    /// The total amount for this order, in major units.
    pub amount: f64,
    /// The payer is redirected here after payment or cancellation.
    #[builder(into)]
    pub return_url: String,
    /// The payer's IP address, used for fraud checks.
    ///
    /// Use `10.20.30.40` when no address is available, e.g. for payment links.
    #[builder(into)]
    pub ip_address: String,
    /// 3-letter ISO-4217 currency code.
    #[builder(into)]
    pub currency: Option<String>,
    /// Until when the payment link is valid.
    pub expire_date: Option<NaiveDateTime>,
    /// Webhook called when the transaction status changes.
    #[builder(into)]
    pub exchange_url: Option<String>,
    pub payment_method_id: Option<u32>,
    /// Issuer id, iDEAL only.
    pub bank_id: Option<u32>,
    /// TH-code of a payment terminal. Takes precedence over `bank_id`.
    #[builder(into)]
    pub terminal_id: Option<String>,
    #[builder(into)]
    pub description: Option<String>,
    #[builder(into)]
    pub order_number: Option<String>,
    /// Start a sandbox transaction.
    #[builder(default)]
    pub test_mode: bool,
    /// 2-letter language code.
    #[builder(into)]
    pub language: Option<String>,
    #[builder(into)]
    pub extra1: Option<String>,
    #[builder(into)]
    pub extra2: Option<String>,
    #[builder(into)]
    pub extra3: Option<String>,
    pub invoice_date: Option<NaiveDate>,
    pub delivery_date: Option<NaiveDate>,
    /// Order lines, when the transaction is an order.
    #[builder(default)]
    pub products: Vec<Product>,
    pub enduser: Option<EndUser>,
    /// Shipping address.
    pub address: Option<Address>,
    pub invoice_address: Option<InvoiceAddress>,
}

impl TransactionStartOptions {
    /// Check the fields the API cannot do without.
    pub fn validate(&self) -> Result<()> {
        if self.amount == 0.0 || !self.amount.is_finite() {
            return Err(Error::Validation("Amount is not set".to_string()));
        }
        if MinorUnits::try_from_major(self.amount).is_none() {
            return Err(Error::Validation("Amount is out of range".to_string()));
        }
        if self.return_url.is_empty() {
            return Err(Error::Validation("returnUrl is not set".to_string()));
        }
        if self.ip_address.is_empty() {
            return Err(Error::Validation("ipAddress is not set".to_string()));
        }
        Ok(())
    }
}

/// A single order line.
#[derive(Builder, Debug, Clone, PartialEq)]
pub struct Product {
    /// Your id of the product.
    #[builder(into)]
    pub id: String,
    #[builder(into)]
    pub name: String,
    /// Unit price including VAT, in major units.
    pub price: f64,
    /// VAT included in `price`, in major units.
    #[builder(default)]
    pub tax: f64,
    pub qty: u32,
    pub product_type: ProductType,
}

/// Order-line type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductType {
    #[serde(rename = "ARTICLE")]
    Article,
    #[serde(rename = "SHIPPING")]
    Shipping,
    #[serde(rename = "HANDLING")]
    Handling,
    #[serde(rename = "DISCOUNT")]
    Discount,
    #[serde(rename = "PAYMENT")]
    Payment,
    #[serde(rename = "CREDIT")]
    Credit,
    #[serde(rename = "GIFTCARD")]
    GiftCard,
    #[serde(rename = "EMONEY")]
    EMoney,
    #[serde(rename = "ROUNDING")]
    Rounding,
}

/// The customer.
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct EndUser {
    #[builder(into)]
    pub initials: Option<String>,
    #[builder(into)]
    pub last_name: Option<String>,
    /// `M` or `F`.
    #[builder(into)]
    pub gender: Option<String>,
    /// Date of birth.
    pub dob: Option<NaiveDate>,
    #[builder(into)]
    pub phone_number: Option<String>,
    #[builder(into)]
    pub email_address: Option<String>,
}

/// A postal address.
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    #[builder(into)]
    pub street_name: Option<String>,
    #[builder(into)]
    pub house_number: Option<String>,
    #[builder(into)]
    pub house_number_extension: Option<String>,
    #[builder(into)]
    pub zip_code: Option<String>,
    #[builder(into)]
    pub city: Option<String>,
    /// 2-letter ISO-3166 country code.
    #[builder(into)]
    pub country_code: Option<String>,
}

/// An address with the name of the person being invoiced.
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceAddress {
    pub address: Address,
    #[builder(into)]
    pub initials: Option<String>,
    #[builder(into)]
    pub last_name: Option<String>,
    #[builder(into)]
    pub gender: Option<String>,
}
