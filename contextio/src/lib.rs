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

//! Signed requests for the Context.IO API.
//!
//! [`Client`] signs every request with two-legged OAuth 1.0, using only a
//! consumer key and secret, and sends it to a single API host (default
//! `api.context.io`).
//!
//! ## Quick Start
//!
//! ```no_run
//! use contextio::{Client, Method, Params};
//!
//! # async fn example() -> contextio::Result<()> {
//! let client = Client::new("your-consumer-key", "your-consumer-secret")?;
//!
//! let query = Params::from([("limit".to_string(), vec!["10".to_string()])]);
//! let body = client
//!     .call_json(Method::Get, "2.0/accounts", &query, None)
//!     .await?;
//! println!("{}", String::from_utf8_lossy(&body));
//! # Ok(())
//! # }
//! ```
//!
//! ## Attachments
//!
//! ```no_run
//! use contextio::{encode_params, Client, Method, Params};
//!
//! # async fn example(client: Client) -> contextio::Result<()> {
//! let form = Params::from([("label".to_string(), vec!["invoices".to_string()])]);
//! let req = client
//!     .new_request(
//!         Method::Post,
//!         "2.0/accounts/me%40example.com/files",
//!         &Params::new(),
//!         Some(&encode_params(&form)),
//!     )
//!     .await?;
//! let req = client.attach_file(req, "file", "./invoice.pdf").await?;
//! let resp = client.send(req).await?;
//! println!("{}", resp.status());
//! # Ok(())
//! # }
//! ```

mod constants;
pub use constants::{CONTEXTIO_API_HOST, DEFAULT_API_HOST, DEFAULT_SCHEME, USER_AGENT};

mod config;
pub use config::Config;

mod method;
pub use method::Method;

mod params;
pub use params::{encode_params, Params};

mod request;
pub use request::Request;

mod client;
pub use client::Client;

pub use contextio_core::{Error, ErrorKind, Result};
pub use contextio_oauth1::{Credential, SignatureMethod};
