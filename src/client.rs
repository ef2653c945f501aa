//! HTTP client for the Pay.nl REST API.

use std::fmt::Display;

use http::{
    StatusCode,
    header::{CONTENT_LENGTH, CONTENT_TYPE},
};
use serde::Serialize;
use url::Url;

use crate::{
    concepts::PaymentGateway,
    config::ClientConfig,
    errors::{Error, ProtocolError, Result},
    invoice::InvoiceData,
    response::{ApiStatus, classify},
    results::{StartResult, TransactionResult},
    transaction::{StartTransactionPayload, TransactionStartOptions},
    types::AnyJson,
};

/// A remote API endpoint: `/v{version}/{controller}/{action}/json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub controller: &'static str,
    pub action: &'static str,
    pub version: u16,
}

impl Endpoint {
    pub const TRANSACTION_START: Endpoint = Endpoint::new("transaction", "start", 8);
    pub const TRANSACTION_INFO: Endpoint = Endpoint::new("transaction", "info", 8);
    pub const ADD_INVOICE: Endpoint = Endpoint::new("Alliance", "addInvoice", 2);
    pub const GET_SERVICE: Endpoint = Endpoint::new("Transaction", "getService", 12);

    pub const fn new(controller: &'static str, action: &'static str, version: u16) -> Self {
        Endpoint {
            controller,
            action,
            version,
        }
    }

    pub fn path(&self) -> String {
        format!("/v{}/{}/{}/json", self.version, self.controller, self.action)
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{} v{}", self.controller, self.action, self.version)
    }
}

/// Serialize `body` to a JSON object and set the credentials on it,
/// replacing any `token` or `serviceId` the body already carries.
fn with_credentials<B: Serialize>(
    body: &B,
    token: &str,
    service_id: &str,
) -> Result<serde_json::Map<String, AnyJson>> {
    let mut fields = match serde_json::to_value(body)? {
        AnyJson::Object(fields) => fields,
        AnyJson::Null => serde_json::Map::new(),
        other => {
            return Err(Error::Validation(format!(
                "Request body must be a JSON object, got {other}"
            )));
        }
    };
    fields.insert("token".to_string(), AnyJson::from(token));
    fields.insert("serviceId".to_string(), AnyJson::from(service_id));
    Ok(fields)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TransactionInfoRequest<'a> {
    transaction_id: &'a str,
}

/// Pay.nl API client.
///
/// Holds the credentials and a pooled [`reqwest::Client`]; cloning is cheap
/// and clones share the connection pool.
///
/// ```no_run
/// use paynl_kit::{
///     client::PaynlClient, config::ClientConfig, transaction::TransactionStartOptions,
/// };
///
/// # async fn run() -> paynl_kit::errors::Result<()> {
/// let client = PaynlClient::new(
///     ClientConfig::builder()
///         .api_token("my-token")
///         .service_id("SL-1234-5678")
///         .build(),
/// )?;
///
/// let started = client
///     .start_transaction(
///         &TransactionStartOptions::builder()
///             .amount(9.95)
///             .return_url("https://shop.example.com/return")
///             .ip_address("10.20.30.40")
///             .build(),
///     )
///     .await?;
///
/// println!("redirect payer to {:?}", started.redirect_url());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PaynlClient {
    config: ClientConfig,
    base_url: Url,
    client: reqwest::Client,
}

impl PaynlClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(PaynlClient {
            config,
            base_url,
            client,
        })
    }

    /// Client for the production API with default settings.
    pub fn from_credentials(
        api_token: impl Into<String>,
        service_id: impl Into<String>,
    ) -> Result<Self> {
        Self::new(
            ClientConfig::builder()
                .api_token(api_token)
                .service_id(service_id)
                .build(),
        )
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// POST `body` (plus credentials) to `endpoint` and return the parsed,
    /// error-checked JSON response.
    pub async fn post<B: Serialize>(&self, endpoint: Endpoint, body: &B) -> Result<AnyJson> {
        let url = self.base_url.join(&endpoint.path())?;
        let payload = serde_json::to_vec(&with_credentials(
            body,
            &self.config.api_token,
            &self.config.service_id,
        )?)?;

        #[cfg(feature = "tracing")]
        tracing::debug!("Calling {endpoint} at {url}");

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(CONTENT_LENGTH, payload.len())
            .body(payload)
            .send()
            .await
            .map_err(|err| self.request_failed(endpoint, err))?;

        let status = response.status();

        #[cfg(feature = "tracing")]
        if self.config.verbose {
            tracing::info!("{endpoint} statusCode: {}", status.as_u16());
            tracing::info!("{endpoint} headers: {:?}", response.headers());
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| self.request_failed(endpoint, err))?;

        #[cfg(feature = "tracing")]
        if self.config.verbose {
            tracing::info!("{endpoint} body: {}", String::from_utf8_lossy(&body));
        }

        let result = interpret_response(status, &body);

        #[cfg(feature = "tracing")]
        match &result {
            Ok(_) => tracing::debug!("{endpoint} succeeded with status {status}"),
            Err(err) if self.config.verbose => tracing::warn!("{endpoint} failed: {err}"),
            Err(_) => {}
        }

        result
    }

    fn request_failed(&self, endpoint: Endpoint, err: reqwest::Error) -> Error {
        let err = if err.is_timeout() {
            Error::Timeout(self.config.timeout)
        } else {
            Error::Transport(err)
        };

        #[cfg(feature = "tracing")]
        if self.config.verbose {
            tracing::warn!("{endpoint} failed: {err}");
        }
        #[cfg(not(feature = "tracing"))]
        let _ = endpoint;

        err
    }

    /// Start a transaction and get the URL to send the payer to.
    ///
    /// Fails with [`Error::Validation`] before any request is made when the
    /// amount, return URL or IP address is missing.
    pub async fn start_transaction(
        &self,
        options: &TransactionStartOptions,
    ) -> Result<StartResult> {
        options.validate()?;
        let payload = StartTransactionPayload::from(options);
        let response = self.post(Endpoint::TRANSACTION_START, &payload).await?;
        Ok(StartResult::new(response))
    }

    pub async fn get_transaction(&self, transaction_id: &str) -> Result<TransactionResult> {
        let response = self
            .post(
                Endpoint::TRANSACTION_INFO,
                &TransactionInfoRequest { transaction_id },
            )
            .await?;
        Ok(TransactionResult::new(response, transaction_id))
    }

    /// Register an invoice and return its reference id.
    pub async fn add_invoice(&self, invoice: &InvoiceData) -> Result<String> {
        let response = self.post(Endpoint::ADD_INVOICE, invoice).await?;
        match response.get("referenceId") {
            Some(AnyJson::String(reference)) => Ok(reference.clone()),
            Some(AnyJson::Number(reference)) => Ok(reference.to_string()),
            _ => Err(Error::MissingField("referenceId")),
        }
    }

    /// The service configuration, including enabled payment methods, as
    /// returned by the API.
    pub async fn get_service(&self) -> Result<AnyJson> {
        self.post(Endpoint::GET_SERVICE, &serde_json::Map::new()).await
    }
}

impl PaymentGateway for PaynlClient {
    type Error = Error;

    async fn start_transaction(&self, options: &TransactionStartOptions) -> Result<StartResult> {
        PaynlClient::start_transaction(self, options).await
    }

    async fn get_transaction(&self, transaction_id: &str) -> Result<TransactionResult> {
        PaynlClient::get_transaction(self, transaction_id).await
    }

    async fn add_invoice(&self, invoice: &InvoiceData) -> Result<String> {
        PaynlClient::add_invoice(self, invoice).await
    }

    async fn get_service(&self) -> Result<AnyJson> {
        PaynlClient::get_service(self).await
    }
}

/// Turn a buffered HTTP response into JSON or a classified error.
///
/// A body that is not JSON is a parse error on a success status; otherwise
/// the status (and the raw body, if any) is reported. A JSON body is checked
/// for error envelopes before the status is considered.
pub fn interpret_response(status: StatusCode, body: &[u8]) -> Result<AnyJson> {
    let json: AnyJson = match serde_json::from_slice(body) {
        Ok(json) => json,
        Err(err) if status.is_success() => return Err(Error::Parse(err)),
        Err(_) if body.is_empty() => return Err(ProtocolError::Status(status).into()),
        Err(_) => {
            return Err(ProtocolError::Body {
                status,
                body: String::from_utf8_lossy(body).into_owned(),
            }
            .into());
        }
    };

    if let ApiStatus::Failed(message) = classify(&json) {
        return Err(ProtocolError::Api(message).into());
    }

    if !status.is_success() {
        return Err(ProtocolError::Status(status).into());
    }

    Ok(json)
}
