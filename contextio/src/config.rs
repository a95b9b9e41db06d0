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
use contextio_core::utils::Redact;
use contextio_core::Context;
use contextio_oauth1::SignatureMethod;
use std::fmt::{Debug, Formatter};
use std::time::Duration;

/// Config for [`Client`](crate::Client).
///
/// Every field is optional. Unset credential fields are resolved through
/// [`contextio_oauth1::DefaultCredentialProvider`].
#[derive(Clone, Default)]
pub struct Config {
    /// `consumer_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CONTEXTIO_CONSUMER_KEY`](contextio_oauth1::CONTEXTIO_CONSUMER_KEY)
    /// - the config file
    pub consumer_key: Option<String>,
    /// `consumer_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CONTEXTIO_CONSUMER_SECRET`](contextio_oauth1::CONTEXTIO_CONSUMER_SECRET)
    /// - the config file
    pub consumer_secret: Option<String>,
    /// Signature method, default to `HMAC-SHA1`.
    pub signature_method: Option<SignatureMethod>,
    /// Path of the TOML config file holding the credential.
    pub config_file: Option<String>,
    /// `api_host` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CONTEXTIO_API_HOST`]
    /// - default to [`DEFAULT_API_HOST`]
    pub api_host: Option<String>,
    /// Scheme used to reach `api_host`, default to `https`.
    ///
    /// Only set this to `http` when talking to a local test server.
    pub scheme: Option<String>,
    /// User agent, default to [`USER_AGENT`].
    pub user_agent: Option<String>,
    /// Total timeout of a request. Unbounded if unset.
    pub timeout: Option<Duration>,
    /// Timeout of the connect phase. Unbounded if unset.
    pub connect_timeout: Option<Duration>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &Redact::from(&self.consumer_secret))
            .field("signature_method", &self.signature_method)
            .field("config_file", &self.config_file)
            .field("api_host", &self.api_host)
            .field("scheme", &self.scheme)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

impl Config {
    /// Set the consumer key and secret.
    pub fn with_credential(mut self, consumer_key: &str, consumer_secret: &str) -> Self {
        self.consumer_key = Some(consumer_key.to_string());
        self.consumer_secret = Some(consumer_secret.to_string());
        self
    }

    /// Set the API host.
    pub fn with_api_host(mut self, api_host: &str) -> Self {
        self.api_host = Some(api_host.to_string());
        self
    }

    /// Fill unset fields from env.
    pub fn from_env(self, ctx: &Context) -> Self {
        let oauth1 = self.oauth1().from_env(ctx);

        let mut config = Config {
            consumer_key: oauth1.consumer_key,
            consumer_secret: oauth1.consumer_secret,
            signature_method: oauth1.signature_method,
            config_file: oauth1.config_file,
            ..self
        };
        if let Some(v) = ctx.env_var(CONTEXTIO_API_HOST) {
            config.api_host.get_or_insert(v);
        }
        config
    }

    /// Signing part of this config.
    pub fn oauth1(&self) -> contextio_oauth1::Config {
        contextio_oauth1::Config {
            consumer_key: self.consumer_key.clone(),
            consumer_secret: self.consumer_secret.clone(),
            signature_method: self.signature_method,
            config_file: self.config_file.clone(),
        }
    }
}
