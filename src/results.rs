//! Read-only views over API responses.
//!
//! Both types keep the raw JSON as received and expose the commonly used
//! fields through typed accessors. Anything else is reachable through
//! [`StartResult::raw`] / [`TransactionResult::raw`].

use serde::Deserialize;

use crate::types::{AnyJson, MinorUnits};

/// Response of `transaction/start`.
#[derive(Debug, Clone, PartialEq)]
pub struct StartResult {
    raw: AnyJson,
}

impl StartResult {
    pub fn new(raw: AnyJson) -> Self {
        StartResult { raw }
    }

    /// Id of the created transaction, e.g. `"1234567890X12345"`.
    pub fn transaction_id(&self) -> Option<&str> {
        self.raw.pointer("/transaction/transactionId")?.as_str()
    }

    /// Where to send the payer to complete the payment.
    pub fn redirect_url(&self) -> Option<&str> {
        self.raw.pointer("/transaction/paymentURL")?.as_str()
    }

    /// Reference for bank transfers.
    pub fn payment_reference(&self) -> Option<&str> {
        self.raw.pointer("/transaction/paymentReference")?.as_str()
    }

    /// Whether the payment page may be opened in a popup.
    pub fn popup_allowed(&self) -> bool {
        match self.raw.pointer("/transaction/popupAllowed") {
            Some(AnyJson::Bool(allowed)) => *allowed,
            Some(AnyJson::String(s)) => s == "1" || s.eq_ignore_ascii_case("true"),
            Some(AnyJson::Number(n)) => n.as_i64() == Some(1),
            _ => false,
        }
    }

    pub fn raw(&self) -> &AnyJson {
        &self.raw
    }

    pub fn into_raw(self) -> AnyJson {
        self.raw
    }
}

/// Status of a transaction, derived from its numeric state code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionStatus {
    Paid,
    Authorized,
    Verify,
    Pending,
    Refunded,
    Canceled,
    Unknown(i64),
}

impl TransactionStatus {
    pub const PAID: i64 = 100;
    pub const PARTIALLY_CAPTURED: i64 = 97;
    pub const AUTHORIZED: i64 = 95;
    pub const VERIFY: i64 = 85;
    pub const REFUND: i64 = -81;
    pub const PARTIAL_REFUND: i64 = -82;

    pub fn from_state(state: i64) -> Self {
        match state {
            Self::PAID => TransactionStatus::Paid,
            Self::AUTHORIZED => TransactionStatus::Authorized,
            Self::VERIFY => TransactionStatus::Verify,
            Self::PARTIALLY_CAPTURED | 20..=90 => TransactionStatus::Pending,
            Self::REFUND | Self::PARTIAL_REFUND => TransactionStatus::Refunded,
            s if s < 0 => TransactionStatus::Canceled,
            s => TransactionStatus::Unknown(s),
        }
    }
}

/// A state code that may arrive as a number or a numeric string.
#[derive(Deserialize)]
#[serde(untagged)]
enum StateCode {
    Int(i64),
    Text(String),
}

/// Response of `transaction/info`, with the requested transaction id added.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionResult {
    raw: AnyJson,
}

impl TransactionResult {
    /// Wrap a raw response, recording `transaction_id` under `transactionId`.
    pub fn new(mut raw: AnyJson, transaction_id: impl Into<String>) -> Self {
        if let Some(object) = raw.as_object_mut() {
            object.insert(
                "transactionId".to_string(),
                AnyJson::String(transaction_id.into()),
            );
        }
        TransactionResult { raw }
    }

    pub fn transaction_id(&self) -> Option<&str> {
        self.raw.get("transactionId")?.as_str()
    }

    /// Numeric state code, e.g. `100` for paid or `-90` for canceled.
    pub fn state(&self) -> Option<i64> {
        let value = self.raw.pointer("/paymentDetails/state")?;
        match StateCode::deserialize(value).ok()? {
            StateCode::Int(state) => Some(state),
            StateCode::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Human readable state, e.g. `"PAID"`.
    pub fn state_name(&self) -> Option<&str> {
        self.raw.pointer("/paymentDetails/stateName")?.as_str()
    }

    /// Transaction amount in minor units.
    pub fn amount(&self) -> Option<MinorUnits> {
        MinorUnits::deserialize(self.raw.pointer("/paymentDetails/amount")?).ok()
    }

    pub fn currency(&self) -> Option<&str> {
        self.raw.pointer("/paymentDetails/currency")?.as_str()
    }

    pub fn payment_method_id(&self) -> Option<i64> {
        let value = self.raw.pointer("/paymentDetails/paymentOptionId")?;
        value
            .as_i64()
            .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
    }

    pub fn order_id(&self) -> Option<&str> {
        self.raw.pointer("/paymentDetails/orderId")?.as_str()
    }

    pub fn status(&self) -> Option<TransactionStatus> {
        self.state().map(TransactionStatus::from_state)
    }

    pub fn is_paid(&self) -> bool {
        self.status() == Some(TransactionStatus::Paid)
    }

    pub fn is_authorized(&self) -> bool {
        self.status() == Some(TransactionStatus::Authorized)
    }

    pub fn is_being_verified(&self) -> bool {
        self.status() == Some(TransactionStatus::Verify)
    }

    pub fn is_pending(&self) -> bool {
        self.status() == Some(TransactionStatus::Pending)
    }

    pub fn is_canceled(&self) -> bool {
        self.status() == Some(TransactionStatus::Canceled)
    }

    pub fn is_refunded(&self) -> bool {
        self.status() == Some(TransactionStatus::Refunded)
    }

    pub fn raw(&self) -> &AnyJson {
        &self.raw
    }

    pub fn into_raw(self) -> AnyJson {
        self.raw
    }
}
