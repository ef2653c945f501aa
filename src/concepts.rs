//! Core traits used across the Pay.nl Kit.

use crate::{
    invoice::InvoiceData,
    results::{StartResult, TransactionResult},
    transaction::TransactionStartOptions,
    types::AnyJson,
};

/// A remote payment service offering the Pay.nl operations.
///
/// [`crate::client::PaynlClient`] is the HTTP implementation; depend on this
/// trait to swap it out, e.g. in tests of your own checkout flow.
pub trait PaymentGateway {
    type Error: std::error::Error;

    fn start_transaction(
        &self,
        options: &TransactionStartOptions,
    ) -> impl Future<Output = Result<StartResult, Self::Error>>;

    fn get_transaction(
        &self,
        transaction_id: &str,
    ) -> impl Future<Output = Result<TransactionResult, Self::Error>>;

    /// Register an invoice; resolves to the API's reference id.
    fn add_invoice(
        &self,
        invoice: &InvoiceData,
    ) -> impl Future<Output = Result<String, Self::Error>>;

    /// Service configuration, including the enabled payment methods.
    fn get_service(&self) -> impl Future<Output = Result<AnyJson, Self::Error>>;
}
