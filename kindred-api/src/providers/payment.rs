use serde::Deserialize;
use uuid::Uuid;

use super::ProviderError;

#[derive(Debug, Clone)]
pub struct Invoice {
    pub payment_id: String,
    pub status: String,
}

/// Payment gateway, selected by configuration.
pub enum PaymentProvider {
    /// Settles immediately. The default outside production.
    Mock,
    /// Creates a real invoice on the configured gateway.
    Gateway(GatewayClient),
}

impl PaymentProvider {
    pub fn from_config(provider: &str, api_url: &str, secret_key: &str) -> Self {
        match provider {
            "gateway" => PaymentProvider::Gateway(GatewayClient::new(api_url, secret_key)),
            _ => PaymentProvider::Mock,
        }
    }

    pub async fn create_invoice(
        &self,
        external_id: &str,
        amount: f64,
        payer_email: &str,
        description: &str,
    ) -> Result<Invoice, ProviderError> {
        match self {
            PaymentProvider::Mock => Ok(Invoice {
                payment_id: format!("payment-{}", Uuid::new_v4()),
                status: "confirmed".to_string(),
            }),
            PaymentProvider::Gateway(client) => {
                client
                    .create_invoice(external_id, amount, payer_email, description)
                    .await
            }
        }
    }
}

pub struct GatewayClient {
    http: reqwest::Client,
    api_url: String,
    secret_key: String,
}

#[derive(Debug, Deserialize)]
struct InvoiceResponse {
    id: String,
    status: String,
}

impl GatewayClient {
    pub fn new(api_url: &str, secret_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            secret_key: secret_key.to_string(),
        }
    }

    async fn create_invoice(
        &self,
        external_id: &str,
        amount: f64,
        payer_email: &str,
        description: &str,
    ) -> Result<Invoice, ProviderError> {
        let url = format!("{}/v2/invoices", self.api_url);
        let response = self
            .http
            .post(&url)
            .basic_auth(&self.secret_key, Some(""))
            .json(&serde_json::json!({
                "external_id": external_id,
                "amount": amount,
                "payer_email": payer_email,
                "description": description,
                "invoice_duration": 86400,
                "currency": "IDR",
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Rejected(format!("{status}: {body}")));
        }

        let parsed: InvoiceResponse = response.json().await?;
        Ok(Invoice {
            payment_id: parsed.id,
            status: parsed.status.to_lowercase(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_confirms_immediately() {
        let provider = PaymentProvider::Mock;
        let invoice = provider
            .create_invoice("consult-1", 150_000.0, "user@example.com", "Counseling session")
            .await
            .unwrap();
        assert!(invoice.payment_id.starts_with("payment-"));
        assert_eq!(invoice.status, "confirmed");
    }
}
