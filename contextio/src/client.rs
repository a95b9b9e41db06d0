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
use crate::request::{build_multipart, Attachment, Body};
use crate::{encode_params, Config, Method, Params, Request};
use bytes::Bytes;
use contextio_core::utils::parse_form;
use contextio_core::{Context, Error, OsEnv, Result, Signer};
use contextio_file_read_tokio::TokioFileRead;
use contextio_oauth1::{Credential, DefaultCredentialProvider, RequestSigner, FORM_URLENCODED};
use http::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT as USER_AGENT_HEADER};
use http::HeaderValue;
use log::debug;
use std::path::Path;

/// Client builds signed requests for the Context.IO API and sends them.
///
/// Cloning is cheap and clones share the loaded credential.
#[derive(Clone, Debug)]
pub struct Client {
    signer: Signer<Credential>,
    http: reqwest::Client,
    scheme: String,
    api_host: String,
    user_agent: HeaderValue,
}

impl Client {
    /// Create a client with the given consumer key and secret.
    pub fn new(consumer_key: &str, consumer_secret: &str) -> Result<Self> {
        Self::from_config(Config::default().with_credential(consumer_key, consumer_secret))
    }

    /// Create a client from config, reading files and env from the OS.
    pub fn from_config(config: Config) -> Result<Self> {
        let ctx = Context::new().with_file_read(TokioFileRead).with_env(OsEnv);
        Self::with_context(ctx, config)
    }

    /// Create a client from config and a custom context.
    pub fn with_context(ctx: Context, config: Config) -> Result<Self> {
        if config.consumer_key.as_deref() == Some("") {
            return Err(Error::credential_invalid("consumer key must not be empty"));
        }
        if config.consumer_secret.as_deref() == Some("") {
            return Err(Error::credential_invalid("consumer secret must not be empty"));
        }

        let config = config.from_env(&ctx);
        let api_host = config
            .api_host
            .clone()
            .unwrap_or_else(|| DEFAULT_API_HOST.to_string());
        if api_host.is_empty() {
            return Err(Error::config_invalid("api host must not be empty"));
        }

        let scheme = config
            .scheme
            .clone()
            .unwrap_or_else(|| DEFAULT_SCHEME.to_string())
            .to_ascii_lowercase();
        if scheme != "https" && scheme != "http" {
            return Err(Error::config_invalid(format!(
                "unsupported scheme {scheme:?}"
            )));
        }

        let user_agent = config.user_agent.as_deref().unwrap_or(USER_AGENT);
        let user_agent = HeaderValue::from_str(user_agent).map_err(|e| {
            Error::config_invalid(format!("invalid user agent {user_agent:?}")).with_source(e)
        })?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| Error::config_invalid("failed to build http client").with_source(e))?;

        // Without an explicit method, the one stored with the credential is used.
        let mut request_signer = RequestSigner::new();
        if let Some(method) = config.signature_method {
            request_signer = request_signer.with_signature_method(method);
        }
        let signer = Signer::new(
            ctx,
            DefaultCredentialProvider::new(config.oauth1()),
            request_signer,
        );

        Ok(Self {
            signer,
            http,
            scheme,
            api_host,
            user_agent,
        })
    }

    /// Replace the underlying http client.
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Replace the signer used for every request.
    pub fn with_signer(mut self, signer: Signer<Credential>) -> Self {
        self.signer = signer;
        self
    }

    /// Signer used for every request.
    pub fn signer(&self) -> &Signer<Credential> {
        &self.signer
    }

    /// Host requests are sent to.
    pub fn api_host(&self) -> &str {
        &self.api_host
    }

    /// Build a signed request.
    ///
    /// `path` gets a leading `/` if it lacks one and is used as is, so
    /// already escaped segments like `me%40example.com` are not escaped
    /// again. `body` must be form-urlencoded and is only allowed on
    /// mutating methods.
    pub async fn new_request(
        &self,
        method: Method,
        path: &str,
        query: &Params,
        body: Option<&str>,
    ) -> Result<Request> {
        if body.is_some() && !method.is_mutating() {
            return Err(Error::request_invalid(format!(
                "{method} request must not carry a body"
            )));
        }

        let uri = self.build_uri(path, query)?;
        let mut builder = http::Request::builder()
            .method(http::Method::from(method))
            .uri(uri)
            .header(USER_AGENT_HEADER, self.user_agent.clone());
        if method.is_mutating() {
            builder = builder.header(CONTENT_TYPE, FORM_URLENCODED);
        }
        let (mut parts, _) = builder.body(())?.into_parts();

        let body = Bytes::copy_from_slice(body.unwrap_or_default().as_bytes());
        let form = parse_form(&body)?;

        let signed_body = method.is_mutating().then_some(&body[..]);
        self.signer.sign(&mut parts, signed_body).await?;
        debug!("built signed request: {} {}", parts.method, parts.uri);

        Ok(Request::new(parts, body, form))
    }

    /// Attach a file to a mutating request.
    ///
    /// The body turns into `multipart/form-data`: the file part named
    /// `field` comes first, followed by every form field already on the
    /// request. The request is signed again since multipart bodies take no
    /// part in the signature.
    pub async fn attach_file(&self, req: Request, field: &str, path: &str) -> Result<Request> {
        let Request {
            mut parts,
            form,
            mut attachments,
            ..
        } = req;

        if parts.method == http::Method::GET {
            return Err(Error::request_invalid(
                "files can't be attached to a GET request",
            ));
        }

        let content = self.signer.context().file_read(path).await?;
        let file_name = Path::new(path)
            .file_name()
            .map(|v| v.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string());
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        debug!("attaching {file_name} ({mime}, {} bytes) as {field}", content.len());

        attachments.push(Attachment {
            field: field.to_string(),
            file_name,
            mime: mime.to_string(),
            content,
        });
        let multipart = build_multipart(&form, &attachments)?;

        let content_type = format!("{MULTIPART_FORM_DATA}; boundary={}", multipart.boundary());
        parts
            .headers
            .insert(CONTENT_TYPE, HeaderValue::from_str(&content_type)?);
        parts.headers.remove(AUTHORIZATION);
        self.signer.sign(&mut parts, None).await?;

        Ok(Request {
            parts,
            body: Body::Multipart(multipart),
            form,
            attachments,
        })
    }

    /// Send the request and return the raw response.
    ///
    /// The status code is not checked.
    pub async fn send(&self, req: Request) -> Result<reqwest::Response> {
        let Request {
            mut parts, body, ..
        } = req;
        let uri = parts.uri.to_string();
        debug!("sending request: {} {}", parts.method, uri);

        let builder = self.http.request(parts.method.clone(), &uri);
        let builder = match body {
            Body::Empty => builder.headers(parts.headers),
            Body::Form(bs) => builder.headers(parts.headers).body(bs),
            Body::Multipart(form) => {
                // reqwest writes the same boundary into content type again.
                parts.headers.remove(CONTENT_TYPE);
                builder.headers(parts.headers).multipart(form)
            }
        };

        let resp = builder.send().await.map_err(|e| {
            Error::transport(format!("failed to send request to {uri}")).with_source(e)
        })?;
        debug!("got response: {}", resp.status());
        Ok(resp)
    }

    /// Send the request and read the whole response body.
    ///
    /// The status code is not checked, the body is returned for the caller
    /// to decode.
    pub async fn send_json(&self, req: Request) -> Result<Bytes> {
        let resp = self.send(req).await?;
        resp.bytes()
            .await
            .map_err(|e| Error::transport("failed to read response body").with_source(e))
    }

    /// Build a signed request and send it.
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        query: &Params,
        body: Option<&str>,
    ) -> Result<reqwest::Response> {
        let req = self.new_request(method, path, query, body).await?;
        self.send(req).await
    }

    /// Build a signed request, send it and read the whole response body.
    pub async fn call_json(
        &self,
        method: Method,
        path: &str,
        query: &Params,
        body: Option<&str>,
    ) -> Result<Bytes> {
        let req = self.new_request(method, path, query, body).await?;
        self.send_json(req).await
    }

    fn build_uri(&self, path: &str, query: &Params) -> Result<http::Uri> {
        let mut uri = format!("{}://{}", self.scheme, self.api_host);
        if !path.starts_with('/') {
            uri.push('/');
        }
        uri.push_str(path);

        let query = encode_params(query);
        if !query.is_empty() {
            uri.push('?');
            uri.push_str(&query);
        }

        http::Uri::try_from(uri.as_str()).map_err(|e| {
            Error::request_invalid(format!("invalid request uri {uri:?}")).with_source(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contextio_core::{ErrorKind, StaticEnv};
    use std::collections::HashMap;

    fn ctx(envs: HashMap<String, String>) -> Context {
        Context::new()
            .with_file_read(TokioFileRead)
            .with_env(StaticEnv {
                home_dir: None,
                envs,
            })
    }

    #[test]
    fn test_empty_credential_is_rejected() {
        let err = Client::new("", "s").expect_err("empty key must fail");
        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
        let err = Client::new("k", "").expect_err("empty secret must fail");
        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
    }

    #[test]
    fn test_api_host_resolution() -> anyhow::Result<()> {
        let config = Config::default().with_credential("k", "s");

        let client = Client::with_context(ctx(HashMap::new()), config.clone())?;
        assert_eq!(client.api_host(), DEFAULT_API_HOST);

        let envs = HashMap::from([(CONTEXTIO_API_HOST.to_string(), "env.example.com".to_string())]);
        let client = Client::with_context(ctx(envs.clone()), config.clone())?;
        assert_eq!(client.api_host(), "env.example.com");

        let client =
            Client::with_context(ctx(envs), config.clone().with_api_host("cfg.example.com"))?;
        assert_eq!(client.api_host(), "cfg.example.com");

        let err = Client::with_context(ctx(HashMap::new()), config.with_api_host(""))
            .expect_err("empty host must fail");
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        Ok(())
    }

    #[test]
    fn test_unsupported_scheme() {
        let config = Config {
            scheme: Some("ftp".to_string()),
            ..Config::default().with_credential("k", "s")
        };
        let err = Client::with_context(ctx(HashMap::new()), config)
            .expect_err("ftp must be rejected");
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_build_uri() -> anyhow::Result<()> {
        let client = Client::with_context(
            ctx(HashMap::new()),
            Config::default().with_credential("k", "s"),
        )?;

        let query = Params::from([("limit".to_string(), vec!["10".to_string()])]);
        assert_eq!(
            client.build_uri("2.0/accounts", &query)?.to_string(),
            "https://api.context.io/2.0/accounts?limit=10"
        );
        assert_eq!(
            client
                .build_uri("/2.0/accounts/me%40example.com", &Params::new())?
                .to_string(),
            "https://api.context.io/2.0/accounts/me%40example.com"
        );

        let err = client
            .build_uri("/2.0/accounts/a b", &Params::new())
            .expect_err("space is not allowed in path");
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
        Ok(())
    }
}
