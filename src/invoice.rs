use bon::Builder;
use serde::{Deserialize, Serialize};

/// An invoice to register for a merchant through the Alliance API.
///
/// Fields are sent to the API exactly as given.
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceData {
    #[builder(into)]
    pub merchant_id: String,
    #[builder(into)]
    pub invoice_id: String,
    pub amount: f64,
    #[builder(into)]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub invoice_url: Option<String>,
    /// Book the invoice on the previous day.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make_yesterday: Option<bool>,
}
