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

use std::mem;

use crate::utils::parse_form;
use crate::{Error, Result};
use http::uri::Authority;
use http::uri::Scheme;
use http::HeaderMap;
use http::Method;

/// Signing context for request.
///
/// The path is kept exactly as it appears in the request URI. It is never
/// decoded or re-escaped.
#[derive(Debug)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP scheme.
    pub scheme: Scheme,
    /// HTTP authority.
    pub authority: Authority,
    /// HTTP path.
    pub path: String,
    /// HTTP query parameters, decoded.
    pub query: Vec<(String, String)>,
    /// HTTP headers.
    pub headers: HeaderMap,
}

impl SigningRequest {
    /// Build a signing context from http::request::Parts.
    ///
    /// Headers are moved out of `parts`; call [`SigningRequest::apply`] to
    /// return them.
    pub fn build(parts: &mut http::request::Parts) -> Result<Self> {
        let authority = parts
            .uri
            .authority()
            .cloned()
            .ok_or_else(|| Error::request_invalid("request without authority is invalid for signing"))?;
        let query = match parts.uri.query() {
            Some(q) => parse_form(q.as_bytes())?,
            None => Vec::new(),
        };

        Ok(SigningRequest {
            method: parts.method.clone(),
            scheme: parts.uri.scheme().cloned().unwrap_or(Scheme::HTTPS),
            authority,
            path: parts.uri.path().to_string(),
            query,

            // Take the headers out of the request to avoid copy.
            // We will return it back when apply the context.
            headers: mem::take(&mut parts.headers),
        })
    }

    /// Apply the signing context back to http::request::Parts.
    pub fn apply(mut self, parts: &mut http::request::Parts) -> Result<()> {
        mem::swap(&mut parts.headers, &mut self.headers);
        Ok(())
    }

    /// Normalized base string URI.
    ///
    /// Scheme and host are lowercased, the default port for the scheme is
    /// dropped and the query is removed.
    pub fn base_url(&self) -> String {
        let scheme = self.scheme.as_str().to_ascii_lowercase();
        let host = self.authority.host().to_ascii_lowercase();
        let default_port = match scheme.as_str() {
            "http" => Some(80),
            "https" => Some(443),
            _ => None,
        };

        match self.authority.port_u16() {
            Some(port) if Some(port) != default_port => {
                format!("{scheme}://{host}:{port}{}", self.path)
            }
            _ => format!("{scheme}://{host}{}", self.path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn parts(uri: &str) -> http::request::Parts {
        http::Request::get(uri)
            .header("user-agent", "test")
            .body(())
            .expect("request must be valid")
            .into_parts()
            .0
    }

    #[test_case("https://API.Context.IO/2.0/accounts", "https://api.context.io/2.0/accounts" ; "lowercase host")]
    #[test_case("https://api.context.io:443/2.0", "https://api.context.io/2.0" ; "drop https port")]
    #[test_case("http://localhost:80/a", "http://localhost/a" ; "drop http port")]
    #[test_case("http://127.0.0.1:8080/a?b=c", "http://127.0.0.1:8080/a" ; "keep other port")]
    #[test_case("https://api.context.io/2.0/accounts/me%40example.com", "https://api.context.io/2.0/accounts/me%40example.com" ; "opaque path")]
    fn test_base_url(uri: &str, expected: &str) -> Result<()> {
        let mut p = parts(uri);
        let req = SigningRequest::build(&mut p)?;
        assert_eq!(req.base_url(), expected);
        Ok(())
    }

    #[test]
    fn test_build_and_apply() -> Result<()> {
        let mut p = parts("https://api.context.io/2.0/accounts?limit=10&email=me%40example.com");
        let req = SigningRequest::build(&mut p)?;
        assert!(p.headers.is_empty());
        assert_eq!(
            req.query,
            vec![
                ("limit".to_string(), "10".to_string()),
                ("email".to_string(), "me@example.com".to_string()),
            ]
        );

        req.apply(&mut p)?;
        assert_eq!(p.headers["user-agent"], "test");
        Ok(())
    }

    #[test]
    fn test_build_requires_authority() {
        let mut p = parts("/2.0/accounts");
        assert!(SigningRequest::build(&mut p).is_err());
    }
}
