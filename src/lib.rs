//! # Pay.nl Kit
//!
//! A typed, async client for the Pay.nl REST API.
//!
//! The kit turns typed request values into the API's JSON wire format, performs
//! the HTTP call and turns the response into a typed result or a classified
//! error. It does not implement any payment logic itself.
//!
//! ## Components
//!
//! - **[`client`]**: [`client::PaynlClient`], the HTTP client, and the
//!   [`client::Endpoint`]s it calls.
//! - **[`config`]**: credentials and transport settings.
//! - **[`transaction`]**: options for starting a transaction and their wire
//!   payload, including VAT-code inference for order lines.
//! - **[`invoice`]**: invoice registration input.
//! - **[`results`]**: read-only views over start and info responses.
//! - **[`response`]**: recognition of the API's error envelopes.
//! - **[`concepts`]**: the [`concepts::PaymentGateway`] trait.
//! - **[`errors`]**: the error type shared by all operations.
//!
//! ## Starting a transaction
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use paynl_kit::{
//!     client::PaynlClient,
//!     config::ClientConfig,
//!     transaction::{Address, Product, ProductType, TransactionStartOptions},
//! };
//!
//! # async fn run() -> paynl_kit::errors::Result<()> {
//! let client = PaynlClient::new(
//!     ClientConfig::builder()
//!         .api_token("my-token")
//!         .service_id("SL-1234-5678")
//!         .build(),
//! )?;
//!
//! let options = TransactionStartOptions::builder()
//!     .amount(121.0)
//!     .return_url("https://shop.example.com/return")
//!     .ip_address("10.20.30.40")
//!     .exchange_url("https://shop.example.com/exchange")
//!     .products(vec![
//!         Product::builder()
//!             .id("SKU-1")
//!             .name("Chair")
//!             .price(121.0)
//!             .tax(21.0)
//!             .qty(1)
//!             .product_type(ProductType::Article)
//!             .build(),
//!     ])
//!     .address(
//!         Address::builder()
//!             .street_name("Kerkstraat")
//!             .house_number("12")
//!             .zip_code("1234AB")
//!             .city("Amsterdam")
//!             .country_code("NL")
//!             .build(),
//!     )
//!     .invoice_date(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
//!     .build();
//!
//! let started = client.start_transaction(&options).await?;
//! let transaction_id = started.transaction_id().unwrap_or_default();
//!
//! let info = client.get_transaction(transaction_id).await?;
//! if info.is_paid() {
//!     println!("paid!");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! Every operation returns [`errors::Result`]. Missing required fields fail
//! with [`errors::Error::Validation`] before any request is made; the API's
//! own errors surface as [`errors::Error::Protocol`]. Nothing is retried.

pub mod client;
pub mod concepts;
pub mod config;
pub mod errors;
pub mod invoice;
pub mod response;
pub mod results;
pub mod transaction;
pub mod types;

pub use client::PaynlClient;
pub use config::ClientConfig;
pub use errors::{Error, Result};
