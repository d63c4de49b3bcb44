//! Async client for the Xero accounting API.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::parse::lenient_decimal;
use crate::core::{InvoiceDocument, SessionContext, is_known_currency_code};

use super::wire::{ApiErrorResponse, InvoicesResponse, OrganisationsResponse, XeroInvoice};

const XERO_API_URL: &str = "https://api.xero.com/api.xro/2.0";
const TENANT_HEADER: &str = "Xero-Tenant-Id";

/// Errors from the accounting platform.
///
/// Transport failures (no session, network) are distinct from
/// validation rejections so callers can report "connection problem"
/// and "your data was refused" differently. No retry policy lives
/// here.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum XeroError {
    /// Network or connection-establishment failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The API answered with a non-validation error status.
    #[error("API error: HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// The API rejected the document.
    #[error("upstream validation failed: {}", messages.join("; "))]
    Validation { messages: Vec<String> },

    /// Currency rejection with the remediation already looked up.
    #[error(
        "currency {rejected} is not enabled for this organisation (base currency is {accepted}); \
         resubmit in {accepted} or enable {rejected} in the organisation settings"
    )]
    UnsupportedCurrency { rejected: String, accepted: String },

    /// The response body did not match the expected shape.
    #[error("parse error: {0}")]
    Parse(String),
}

/// A created invoice as reported back by the API.
#[derive(Debug, Clone)]
pub struct CreatedInvoice {
    pub invoice_id: String,
    pub invoice_number: String,
    pub status: String,
    pub total: Option<Decimal>,
}

/// Minimal Xero REST client. Token acquisition and refresh are the
/// caller's concern; this takes a currently valid access token.
pub struct XeroClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl XeroClient {
    /// # Errors
    ///
    /// Returns `XeroError::Transport` if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(access_token: impl Into<String>) -> Result<Self, XeroError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| XeroError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            base_url: XERO_API_URL.to_string(),
            access_token: access_token.into(),
        })
    }

    /// Point the client at a different base URL (test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Create an invoice in the connected organisation.
    ///
    /// # Errors
    ///
    /// `Validation` when the API refuses the document;
    /// `UnsupportedCurrency` when the refusal is a currency rejection
    /// and the organisation's base currency could be looked up;
    /// `Transport`/`Api`/`Parse` otherwise.
    pub async fn create_invoice(
        &self,
        ctx: &SessionContext,
        document: &InvoiceDocument,
    ) -> Result<CreatedInvoice, XeroError> {
        debug!(
            tenant_id = %ctx.tenant_id,
            invoice_number = %document.invoice_number,
            "creating invoice"
        );
        let resp = self
            .http
            .post(format!("{}/Invoices", self.base_url))
            .bearer_auth(&self.access_token)
            .header(TENANT_HEADER, &ctx.tenant_id)
            .json(&XeroInvoice::from(document))
            .send()
            .await
            .map_err(|e| XeroError::Transport(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| XeroError::Transport(e.to_string()))?;

        if status.is_success() {
            let parsed: InvoicesResponse =
                serde_json::from_str(&body).map_err(|e| XeroError::Parse(e.to_string()))?;
            let entry = parsed
                .invoices
                .into_iter()
                .next()
                .ok_or_else(|| XeroError::Parse("response contained no invoices".into()))?;
            return Ok(CreatedInvoice {
                invoice_id: entry.invoice_id.unwrap_or_default(),
                invoice_number: entry
                    .invoice_number
                    .unwrap_or_else(|| document.invoice_number.clone()),
                status: entry.status.unwrap_or_default(),
                total: entry
                    .total
                    .as_ref()
                    .map(|v| lenient_decimal(Some(v), Decimal::ZERO).value),
            });
        }

        if status.as_u16() == 400 {
            let messages = serde_json::from_str::<ApiErrorResponse>(&body)
                .map(|e| e.messages())
                .unwrap_or_default();
            warn!(
                tenant_id = %ctx.tenant_id,
                ?messages,
                "invoice rejected by upstream validation"
            );
            if messages.iter().any(|m| is_currency_rejection(m)) {
                if let Ok(accepted) = self.get_organisation_base_currency(ctx).await {
                    return Err(XeroError::UnsupportedCurrency {
                        rejected: document.currency_code.clone(),
                        accepted,
                    });
                }
            }
            return Err(XeroError::Validation { messages });
        }

        Err(XeroError::Api {
            status: status.as_u16(),
            body,
        })
    }

    /// Fetch the connected organisation's base currency.
    ///
    /// # Errors
    ///
    /// `Parse` when the response carries no recognisable ISO 4217
    /// code; `Transport`/`Api` on connection or status failures.
    pub async fn get_organisation_base_currency(
        &self,
        ctx: &SessionContext,
    ) -> Result<String, XeroError> {
        let resp = self
            .http
            .get(format!("{}/Organisation", self.base_url))
            .bearer_auth(&self.access_token)
            .header(TENANT_HEADER, &ctx.tenant_id)
            .send()
            .await
            .map_err(|e| XeroError::Transport(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| XeroError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(XeroError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: OrganisationsResponse =
            serde_json::from_str(&body).map_err(|e| XeroError::Parse(e.to_string()))?;
        let currency = parsed
            .organisations
            .first()
            .and_then(|o| o.base_currency.clone())
            .ok_or_else(|| XeroError::Parse("response contained no organisation".into()))?;

        if !is_known_currency_code(&currency) {
            return Err(XeroError::Parse(format!(
                "organisation returned unrecognised base currency {currency:?}"
            )));
        }
        Ok(currency)
    }
}

/// Heuristic for currency-related validation messages, so the caller
/// gets a remediation naming the accepted currency instead of a raw
/// upstream string.
fn is_currency_rejection(message: &str) -> bool {
    let m = message.to_ascii_lowercase();
    m.contains("currency")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn api_url_is_https() {
        assert!(XERO_API_URL.starts_with("https://"));
    }

    #[test]
    fn currency_rejection_detection() {
        assert!(is_currency_rejection(
            "Organisation is not subscribed to currency EUR"
        ));
        assert!(is_currency_rejection("Invalid CurrencyCode"));
        assert!(!is_currency_rejection(
            "Account code '999' is not a valid code"
        ));
    }

    #[test]
    fn organisation_response_parses_base_currency() {
        let resp: OrganisationsResponse = serde_json::from_value(json!({
            "Organisations": [{ "Name": "Demo Company", "BaseCurrency": "NZD" }]
        }))
        .unwrap();
        assert_eq!(
            resp.organisations[0].base_currency.as_deref(),
            Some("NZD")
        );
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        // Port 9 (discard) is closed on any sane machine; the connect
        // fails without touching the network.
        let client = XeroClient::new("token")
            .unwrap()
            .with_base_url("http://127.0.0.1:9");
        let err = client
            .get_organisation_base_currency(&SessionContext::new("t1"))
            .await
            .unwrap_err();
        assert!(matches!(err, XeroError::Transport(_)));
    }

    #[test]
    fn unsupported_currency_error_names_both_currencies() {
        let err = XeroError::UnsupportedCurrency {
            rejected: "EUR".into(),
            accepted: "NZD".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("EUR"));
        assert!(msg.contains("NZD"));
    }
}
