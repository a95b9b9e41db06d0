// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::constants::*;
use crate::Credential;
use async_trait::async_trait;
use contextio_core::hash::{base64_hmac_sha1, base64_hmac_sha256};
use contextio_core::time::{format_unix_timestamp, now, DateTime};
use contextio_core::utils::{generate_nonce, parse_form, percent_encode};
use contextio_core::{Context, Error, Result, SignRequest, SigningRequest};
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue};
use log::debug;
use serde::Deserialize;
use std::fmt::{self, Write};
use std::str::FromStr;

/// Signature method used to sign the base string.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum SignatureMethod {
    /// `HMAC-SHA1`, RFC 5849 section 3.4.2.
    #[default]
    #[serde(rename = "HMAC-SHA1")]
    HmacSha1,
    /// `HMAC-SHA256`, widely supported extension of `HMAC-SHA1`.
    #[serde(rename = "HMAC-SHA256")]
    HmacSha256,
    /// `PLAINTEXT`, RFC 5849 section 3.4.4. Only safe over TLS.
    #[serde(rename = "PLAINTEXT")]
    Plaintext,
}

impl SignatureMethod {
    /// Name used as `oauth_signature_method`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureMethod::HmacSha1 => "HMAC-SHA1",
            SignatureMethod::HmacSha256 => "HMAC-SHA256",
            SignatureMethod::Plaintext => "PLAINTEXT",
        }
    }

    fn sign(&self, key: &str, string_to_sign: &str) -> String {
        match self {
            SignatureMethod::HmacSha1 => base64_hmac_sha1(key.as_bytes(), string_to_sign.as_bytes()),
            SignatureMethod::HmacSha256 => {
                base64_hmac_sha256(key.as_bytes(), string_to_sign.as_bytes())
            }
            SignatureMethod::Plaintext => key.to_string(),
        }
    }
}

impl fmt::Display for SignatureMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignatureMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "HMAC-SHA1" => Ok(SignatureMethod::HmacSha1),
            "HMAC-SHA256" => Ok(SignatureMethod::HmacSha256),
            "PLAINTEXT" => Ok(SignatureMethod::Plaintext),
            _ => Err(Error::config_invalid(format!(
                "unsupported signature method {s:?}"
            ))),
        }
    }
}

/// RequestSigner that implements two-legged OAuth 1.0 signing.
///
/// - [RFC 5849](https://www.rfc-editor.org/rfc/rfc5849)
///
/// Query parameters always take part in the signature. Body parameters only
/// do when the request carries `Content-Type: application/x-www-form-urlencoded`
/// and the body is passed to [`SignRequest::sign_request`].
///
/// The signature method is taken from the signer if set, then from the
/// credential, and falls back to `HMAC-SHA1`.
#[derive(Debug, Default)]
pub struct RequestSigner {
    method: Option<SignatureMethod>,
    time: Option<DateTime>,
    nonce: Option<String>,
}

impl RequestSigner {
    /// Create a new signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign with this method whatever the credential says.
    pub fn with_signature_method(mut self, method: SignatureMethod) -> Self {
        self.method = Some(method);
        self
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Specify the nonce.
    ///
    /// # Note
    ///
    /// Every request must carry a fresh nonce.
    /// Only use this function for testing.
    pub fn with_nonce(mut self, nonce: &str) -> Self {
        self.nonce = Some(nonce.to_string());
        self
    }

    fn get_time(&self) -> DateTime {
        self.time.unwrap_or_else(now)
    }

    fn get_nonce(&self) -> String {
        self.nonce.clone().unwrap_or_else(generate_nonce)
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _ctx: &Context,
        req: &mut http::request::Parts,
        body: Option<&[u8]>,
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        let Some(cred) = credential else {
            return Ok(());
        };

        // Parse the body before taking headers out of the request, so a
        // malformed body leaves the request untouched.
        let body_params = match body {
            Some(bs) if is_form_urlencoded(&req.headers) => parse_form(bs)?,
            _ => Vec::new(),
        };

        let signing_req = SigningRequest::build(req)?;
        let method = self.method.or(cred.signature_method).unwrap_or_default();

        let mut oauth_params = vec![
            (OAUTH_CONSUMER_KEY, cred.consumer_key.clone()),
            (OAUTH_NONCE, self.get_nonce()),
            (OAUTH_SIGNATURE_METHOD, method.as_str().to_string()),
            (OAUTH_TIMESTAMP, format_unix_timestamp(self.get_time())),
            (OAUTH_VERSION, OAUTH_VERSION_1_0.to_string()),
        ];

        let mut params = signing_req.query.clone();
        params.extend(body_params);
        params.extend(
            oauth_params
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone())),
        );

        let string_to_sign = string_to_sign(&signing_req, params);
        debug!("string to sign: {}", &string_to_sign);

        let signing_key = format!("{}&", percent_encode(&cred.consumer_secret));
        let signature = method.sign(&signing_key, &string_to_sign);
        oauth_params.push((OAUTH_SIGNATURE, signature));
        oauth_params.sort();

        let mut authorization = String::from("OAuth ");
        for (idx, (k, v)) in oauth_params.iter().enumerate() {
            if idx > 0 {
                authorization.push_str(", ");
            }
            write!(authorization, "{}=\"{}\"", k, percent_encode(v))?;
        }

        signing_req.apply(req)?;

        let mut value = HeaderValue::from_str(&authorization)?;
        value.set_sensitive(true);
        req.headers.insert(AUTHORIZATION, value);

        Ok(())
    }
}

/// Build the signature base string, RFC 5849 section 3.4.1.
fn string_to_sign(req: &SigningRequest, params: Vec<(String, String)>) -> String {
    let mut encoded: Vec<(String, String)> = params
        .into_iter()
        .map(|(k, v)| (percent_encode(&k), percent_encode(&v)))
        .collect();
    // Sort by encoded name, then by encoded value.
    encoded.sort();

    let normalized = encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        req.method.as_str().to_ascii_uppercase(),
        percent_encode(&req.base_url()),
        percent_encode(&normalized)
    )
}

fn is_form_urlencoded(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|v| v.trim().eq_ignore_ascii_case(FORM_URLENCODED))
        .unwrap_or(false)
}
