use serde::Deserialize;

use super::ProviderError;

#[derive(Debug, Clone)]
pub struct FaceMatch {
    pub matched: bool,
    pub similarity: f64,
}

/// Face-comparison provider, selected by configuration.
pub enum FaceVerifier {
    /// Always matches. The default outside production.
    Mock,
    /// POSTs both images to a comparison endpoint.
    Remote(RemoteFaceClient),
}

impl FaceVerifier {
    pub fn from_config(provider: &str, api_url: &str, api_key: &str) -> Self {
        match provider {
            "remote" => FaceVerifier::Remote(RemoteFaceClient::new(api_url, api_key)),
            _ => FaceVerifier::Mock,
        }
    }

    /// Compare a profile portrait against a fresh selfie.
    pub async fn compare(
        &self,
        portrait: &str,
        selfie: &str,
    ) -> Result<FaceMatch, ProviderError> {
        match self {
            FaceVerifier::Mock => Ok(FaceMatch {
                matched: true,
                similarity: 99.9,
            }),
            FaceVerifier::Remote(client) => client.compare(portrait, selfie).await,
        }
    }
}

pub struct RemoteFaceClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct CompareResponse {
    is_match: bool,
    #[serde(default)]
    similarity: f64,
}

impl RemoteFaceClient {
    pub fn new(api_url: &str, api_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    async fn compare(&self, portrait: &str, selfie: &str) -> Result<FaceMatch, ProviderError> {
        let url = format!("{}/v1/compare-faces", self.api_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({
                "source_image": portrait,
                "target_image": selfie,
                "similarity_threshold": 90.0,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Rejected(format!("{status}: {body}")));
        }

        let parsed: CompareResponse = response.json().await?;
        Ok(FaceMatch {
            matched: parsed.is_match,
            similarity: parsed.similarity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_always_matches() {
        let verifier = FaceVerifier::Mock;
        let result = verifier.compare("portrait", "selfie").await.unwrap();
        assert!(result.matched);
        assert!(result.similarity > 90.0);
    }

    #[test]
    fn unknown_provider_name_falls_back_to_mock() {
        let verifier = FaceVerifier::from_config("definitely-not-real", "", "");
        assert!(matches!(verifier, FaceVerifier::Mock));
    }
}
