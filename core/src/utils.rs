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

//! Utility functions and types.

use crate::{Error, Result};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fmt::Debug;

/// AsciiSet for [RFC 5849 percent encoding](https://www.rfc-editor.org/rfc/rfc5849#section-3.6)
///
/// - Encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
pub static OAUTH_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent encode input with [`OAUTH_ENCODE_SET`].
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, &OAUTH_ENCODE_SET).to_string()
}

/// Parse `application/x-www-form-urlencoded` data strictly.
///
/// Unlike `form_urlencoded::parse`, malformed input is an error instead of
/// being passed through:
///
/// - a `%` not followed by two hex digits
/// - a `;` used as pair separator
/// - bytes that do not decode to utf-8
///
/// Empty segments (`a=1&&b=2`) are skipped. A segment without `=` yields an
/// empty value.
pub fn parse_form(input: &[u8]) -> Result<Vec<(String, String)>> {
    let input = std::str::from_utf8(input)?;

    let mut pairs = Vec::new();
    for segment in input.split('&') {
        if segment.is_empty() {
            continue;
        }
        if segment.contains(';') {
            return Err(Error::request_invalid(format!(
                "invalid semicolon separator in form data: {segment:?}"
            )));
        }

        let (k, v) = segment.split_once('=').unwrap_or((segment, ""));
        pairs.push((form_unescape(k)?, form_unescape(v)?));
    }

    Ok(pairs)
}

fn form_unescape(input: &str) -> Result<String> {
    let bs = input.as_bytes();
    for (idx, b) in bs.iter().enumerate() {
        if *b != b'%' {
            continue;
        }
        let valid = matches!(
            (bs.get(idx + 1), bs.get(idx + 2)),
            (Some(h), Some(l)) if h.is_ascii_hexdigit() && l.is_ascii_hexdigit()
        );
        if !valid {
            return Err(Error::request_invalid(format!(
                "invalid URL escape in form data: {input:?}"
            )));
        }
    }

    let replaced = input.replace('+', " ");
    let decoded = percent_decode_str(&replaced).decode_utf8().map_err(|e| {
        Error::request_invalid(format!("form data is not valid utf-8: {input:?}")).with_source(e)
    })?;
    Ok(decoded.into_owned())
}

/// Generate a random nonce made of 32 lowercase hex characters.
pub fn generate_nonce() -> String {
    hex::encode(rand::random::<[u8; 16]>())
}

/// Redacts a string by replacing all but the first and last three characters with asterisks.
///
/// - If the input string has fewer than 12 characters, it should be entirely redacted.
/// - If the input string has 12 or more characters, only the first three and the last three.
///
/// This design is to allow users to distinguish between different redacted strings but avoid
/// leaking sensitive information.
pub struct Redact<'a>(&'a str);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(value.as_str())
    }
}

impl<'a> From<&'a Option<String>> for Redact<'a> {
    fn from(value: &'a Option<String>) -> Self {
        match value {
            None => Redact(""),
            Some(v) => Redact(v),
        }
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let length = self.0.len();
        if length == 0 {
            f.write_str("EMPTY")
        } else if length < 12 {
            f.write_str("***")
        } else {
            f.write_str(&self.0[..3])?;
            f.write_str("***")?;
            f.write_str(&self.0[length - 3..])
        }
    }
}
