//! Service-account authentication for the Firestore REST API.
//!
//! Mints a short-lived RS256 JWT from the service-account key, exchanges
//! it at the OAuth2 token endpoint for a bearer token, and caches the
//! token until shortly before its stated expiry.

use base64::Engine;
use chrono::{DateTime, Utc};
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs1v15::SigningKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::sha2::Sha256;
use rsa::signature::{SignatureEncoding, Signer};
use rsa::RsaPrivateKey;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::debug;

use common::config::ServiceAccount;
use common::{Error, Result};

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const SCOPE: &str = "https://www.googleapis.com/auth/datastore";
const JWT_LIFETIME_SECS: i64 = 3600;
/// Refresh this many seconds before the token's stated expiry.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Holds the service-account identity and the parsed RSA signing key.
pub struct FirestoreAuth {
    client_email: String,
    signing_key: SigningKey<Sha256>,
    http: reqwest::Client,
    cached: Mutex<Option<CachedToken>>,
}

struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl std::fmt::Debug for FirestoreAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirestoreAuth")
            .field("client_email", &self.client_email)
            .field("signing_key", &"<redacted>")
            .finish()
    }
}

impl FirestoreAuth {
    /// Create from a service-account identity.
    ///
    /// The PEM string may contain literal `\n` (two chars) instead of real
    /// newlines — both forms are normalised.
    pub fn new(account: &ServiceAccount) -> Result<Self> {
        let pem = account.private_key.replace("\\n", "\n");
        let pem = pem.trim();

        let private_key = RsaPrivateKey::from_pkcs8_pem(pem)
            .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
            .map_err(|e| Error::Auth(format!("Failed to parse service-account key: {e}")))?;

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .expect("failed to build token-exchange HTTP client");

        Ok(Self {
            client_email: account.client_email.clone(),
            signing_key: SigningKey::<Sha256>::new(private_key),
            http,
            cached: Mutex::new(None),
        })
    }

    /// Build the signed JWT assertion `header.claims.signature`.
    fn build_assertion(&self, now: DateTime<Utc>) -> String {
        let header = serde_json::json!({ "alg": "RS256", "typ": "JWT" });
        let claims = serde_json::json!({
            "iss": self.client_email,
            "scope": SCOPE,
            "aud": TOKEN_URL,
            "iat": now.timestamp(),
            "exp": now.timestamp() + JWT_LIFETIME_SECS,
        });

        let signing_input = format!(
            "{}.{}",
            b64url(header.to_string().as_bytes()),
            b64url(claims.to_string().as_bytes()),
        );
        let signature = self.signing_key.sign(signing_input.as_bytes());

        format!("{}.{}", signing_input, b64url(&signature.to_bytes()))
    }

    /// Return a bearer token, reusing the cached one while it is fresh.
    pub async fn bearer_token(&self) -> Result<String> {
        let mut guard = self.cached.lock().await;
        if let Some(cached) = guard.as_ref() {
            if Utc::now() < cached.expires_at {
                return Ok(cached.token.clone());
            }
        }

        #[derive(Deserialize)]
        struct TokenResponse {
            access_token: String,
            expires_in: i64,
        }

        let assertion = self.build_assertion(Utc::now());
        let resp = self
            .http
            .post(TOKEN_URL)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body = resp.text().await.unwrap_or_default();
            let snippet: String = body.chars().take(500).collect();
            return Err(Error::Auth(format!(
                "Token exchange failed (status={status}): {snippet}"
            )));
        }

        let token: TokenResponse = resp.json().await.map_err(|e| Error::Http(e.to_string()))?;

        debug!(
            "Obtained Firestore bearer token (expires in {}s)",
            token.expires_in
        );

        let expires_at =
            Utc::now() + chrono::Duration::seconds(token.expires_in - EXPIRY_MARGIN_SECS);
        *guard = Some(CachedToken {
            token: token.access_token.clone(),
            expires_at,
        });

        Ok(token.access_token)
    }
}

fn b64url(data: &[u8]) -> String {
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(data)
}
