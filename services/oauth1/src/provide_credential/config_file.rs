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

use crate::constants::{CONTEXTIO_CONFIG_FILE, CONTEXTIO_CONFIG_PATH};
use crate::{Config, Credential};
use async_trait::async_trait;
use contextio_core::{Context, ErrorKind, ProvideCredential, Result};
use log::debug;

/// ConfigFileCredentialProvider loads the credential from a TOML config file.
///
/// The path is resolved in order:
/// 1. The path given to [`ConfigFileCredentialProvider::with_path`]
/// 2. env value: [`CONTEXTIO_CONFIG_FILE`]
/// 3. [`CONTEXTIO_CONFIG_PATH`] (`~/.contextio/config.toml`)
///
/// A missing file yields `Ok(None)`. A file that exists but cannot be parsed
/// is an error.
#[derive(Debug, Default)]
pub struct ConfigFileCredentialProvider {
    path: Option<String>,
}

impl ConfigFileCredentialProvider {
    /// Create a new ConfigFileCredentialProvider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the config from this path instead.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

#[async_trait]
impl ProvideCredential for ConfigFileCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let path = self
            .path
            .clone()
            .or_else(|| ctx.env_var(CONTEXTIO_CONFIG_FILE))
            .unwrap_or_else(|| CONTEXTIO_CONFIG_PATH.to_string());

        let config = match Config::from_config_file(ctx, &path).await {
            Ok(config) => config,
            Err(e) if e.kind() == ErrorKind::FileUnreadable => {
                debug!("config file {path} not readable, skipping: {e}");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        match (config.consumer_key, config.consumer_secret) {
            (Some(key), Some(secret)) => {
                debug!("loading credential from config file {path}");
                let mut cred = Credential::new(&key, &secret);
                cred.signature_method = config.signature_method;
                Ok(Some(cred))
            }
            _ => {
                debug!("config file {path} has no complete credential");
                Ok(None)
            }
        }
    }
}
