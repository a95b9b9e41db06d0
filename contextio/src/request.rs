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

use bytes::Bytes;
use contextio_core::{Error, Result};
use http::request::Parts;
use http::HeaderMap;
use reqwest::multipart::{Form, Part};

/// A signed request, ready to be sent by [`Client::send`](crate::Client::send).
///
/// Requests are plain values: [`Client::attach_file`](crate::Client::attach_file)
/// consumes one and returns a new one.
#[derive(Debug)]
pub struct Request {
    pub(crate) parts: Parts,
    pub(crate) body: Body,
    pub(crate) form: Vec<(String, String)>,
    pub(crate) attachments: Vec<Attachment>,
}

#[derive(Debug)]
pub(crate) enum Body {
    Empty,
    Form(Bytes),
    Multipart(Form),
}

/// A file carried by a multipart request.
#[derive(Debug, Clone)]
pub(crate) struct Attachment {
    pub field: String,
    pub file_name: String,
    pub mime: String,
    pub content: Vec<u8>,
}

impl Request {
    pub(crate) fn new(parts: Parts, body: Bytes, form: Vec<(String, String)>) -> Self {
        let body = if body.is_empty() {
            Body::Empty
        } else {
            Body::Form(body)
        };

        Self {
            parts,
            body,
            form,
            attachments: Vec::new(),
        }
    }

    /// HTTP method of the request.
    pub fn method(&self) -> &http::Method {
        &self.parts.method
    }

    /// Full URI of the request.
    pub fn uri(&self) -> &http::Uri {
        &self.parts.uri
    }

    /// Headers of the request, `Authorization` included.
    pub fn headers(&self) -> &HeaderMap {
        &self.parts.headers
    }

    /// Decoded form fields carried by the request.
    ///
    /// They stay the same after files are attached.
    pub fn form(&self) -> &[(String, String)] {
        &self.form
    }

    /// Form-urlencoded body, if the request has one.
    pub fn form_body(&self) -> Option<&Bytes> {
        match &self.body {
            Body::Form(bs) => Some(bs),
            _ => None,
        }
    }

    /// Whether the body has been turned into `multipart/form-data`.
    pub fn is_multipart(&self) -> bool {
        matches!(self.body, Body::Multipart(_))
    }
}

/// Build the multipart body: attached files first, then the form fields.
///
/// `Form` can't be cloned, so it is rebuilt from its pieces on every attach.
pub(crate) fn build_multipart(
    form: &[(String, String)],
    attachments: &[Attachment],
) -> Result<Form> {
    let mut multipart = Form::new();
    for a in attachments {
        let part = Part::bytes(a.content.clone())
            .file_name(a.file_name.clone())
            .mime_str(&a.mime)
            .map_err(|e| {
                Error::request_invalid(format!("invalid content type {:?}", a.mime)).with_source(e)
            })?;
        multipart = multipart.part(a.field.clone(), part);
    }
    for (k, v) in form {
        multipart = multipart.text(k.clone(), v.clone());
    }
    Ok(multipart)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts() -> Parts {
        http::Request::post("https://api.context.io/2.0/accounts")
            .body(())
            .expect("request must be valid")
            .into_parts()
            .0
    }

    #[test]
    fn test_empty_body() {
        let req = Request::new(parts(), Bytes::new(), Vec::new());
        assert!(req.form_body().is_none());
        assert!(!req.is_multipart());
    }

    #[test]
    fn test_form_body() {
        let req = Request::new(
            parts(),
            Bytes::from_static(b"email=a%40b.com"),
            vec![("email".to_string(), "a@b.com".to_string())],
        );
        assert_eq!(
            req.form_body().map(|bs| bs.as_ref()),
            Some(b"email=a%40b.com".as_ref())
        );
        assert_eq!(req.form().len(), 1);
    }

    #[test]
    fn test_build_multipart_rejects_bad_mime() {
        let err = build_multipart(
            &[],
            &[Attachment {
                field: "file".to_string(),
                file_name: "a.txt".to_string(),
                mime: "not a mime".to_string(),
                content: b"hello".to_vec(),
            }],
        )
        .expect_err("invalid mime must fail");
        assert_eq!(err.kind(), contextio_core::ErrorKind::RequestInvalid);
    }
}
