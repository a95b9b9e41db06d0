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

//! Two-legged OAuth 1.0 signing for the Context.IO API.
//!
//! Requests are signed with a consumer key and secret only. There is no
//! token and no authorization flow. The signature follows
//! [RFC 5849](https://www.rfc-editor.org/rfc/rfc5849) and is sent in the
//! `Authorization` header.
//!
//! ## Quick Start
//!
//! ```no_run
//! use contextio_core::{Context, Signer};
//! use contextio_oauth1::{RequestSigner, StaticCredentialProvider};
//!
//! # async fn example() -> contextio_core::Result<()> {
//! let loader = StaticCredentialProvider::new("your-consumer-key", "your-consumer-secret");
//! let signer = Signer::new(Context::new(), loader, RequestSigner::new());
//!
//! let mut req = http::Request::get("https://api.context.io/2.0/accounts?limit=10")
//!     .body(())
//!     .unwrap()
//!     .into_parts()
//!     .0;
//! signer.sign(&mut req, None).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Form bodies
//!
//! When the request carries `Content-Type: application/x-www-form-urlencoded`,
//! pass the encoded body to `Signer::sign` so its parameters are covered by
//! the signature:
//!
//! ```no_run
//! # use contextio_core::{Context, Signer};
//! # use contextio_oauth1::{RequestSigner, StaticCredentialProvider};
//! # async fn example(signer: Signer<contextio_oauth1::Credential>) -> contextio_core::Result<()> {
//! let body = "email=me%40example.com&label=inbox";
//! let mut req = http::Request::post("https://api.context.io/2.0/accounts")
//!     .header("content-type", "application/x-www-form-urlencoded")
//!     .body(())
//!     .unwrap()
//!     .into_parts()
//!     .0;
//! signer.sign(&mut req, Some(body.as_bytes())).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Credential Sources
//!
//! [`DefaultCredentialProvider`] tries the explicit [`Config`] values, then
//! the environment, then the config file:
//!
//! ```bash
//! export CONTEXTIO_CONSUMER_KEY=your-consumer-key
//! export CONTEXTIO_CONSUMER_SECRET=your-consumer-secret
//! export CONTEXTIO_CONFIG_FILE=~/.contextio/config.toml  # Optional
//! ```

mod constants;
pub use constants::{
    CONTEXTIO_CONFIG_FILE, CONTEXTIO_CONFIG_PATH, CONTEXTIO_CONSUMER_KEY,
    CONTEXTIO_CONSUMER_SECRET, CONTEXTIO_SIGNATURE_METHOD, FORM_URLENCODED,
};

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::{RequestSigner, SignatureMethod};

mod provide_credential;
pub use provide_credential::*;
