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
use crate::SignatureMethod;
use contextio_core::utils::Redact;
use contextio_core::{Context, Error, Result};
use log::warn;
use serde::Deserialize;
use std::fmt::{Debug, Formatter};

/// Config carries the signing configuration for Context.IO.
///
/// The same struct is used to deserialize the TOML config file:
///
/// ```toml
/// consumer_key = "your-key"
/// consumer_secret = "your-secret"
/// signature_method = "HMAC-SHA1"
/// ```
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `consumer_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CONTEXTIO_CONSUMER_KEY`]
    pub consumer_key: Option<String>,
    /// `consumer_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CONTEXTIO_CONSUMER_SECRET`]
    pub consumer_secret: Option<String>,
    /// `signature_method` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CONTEXTIO_SIGNATURE_METHOD`]
    /// - default to `HMAC-SHA1`
    pub signature_method: Option<SignatureMethod>,
    /// `config_file` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CONTEXTIO_CONFIG_FILE`]
    /// - default to [`CONTEXTIO_CONFIG_PATH`]
    #[serde(skip)]
    pub config_file: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &Redact::from(&self.consumer_secret))
            .field("signature_method", &self.signature_method)
            .field("config_file", &self.config_file)
            .finish()
    }
}

impl Config {
    /// Fill unset fields from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(CONTEXTIO_CONSUMER_KEY) {
            self.consumer_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(CONTEXTIO_CONSUMER_SECRET) {
            self.consumer_secret.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(CONTEXTIO_CONFIG_FILE) {
            self.config_file.get_or_insert(v);
        }
        if self.signature_method.is_none() {
            if let Some(v) = ctx.env_var(CONTEXTIO_SIGNATURE_METHOD) {
                match v.parse() {
                    Ok(method) => self.signature_method = Some(method),
                    Err(e) => warn!("ignoring {CONTEXTIO_SIGNATURE_METHOD}: {e}"),
                }
            }
        }

        self
    }

    /// Load config from a TOML file.
    ///
    /// `~` at the start of `path` is expanded to the home dir.
    pub async fn from_config_file(ctx: &Context, path: &str) -> Result<Self> {
        let expanded = ctx.expand_home_dir(path).ok_or_else(|| {
            Error::config_invalid(format!("cannot expand home dir in config path {path}"))
        })?;
        let content = ctx.file_read_as_string(&expanded).await?;

        let mut config: Config = toml::from_str(&content).map_err(|e| {
            Error::config_invalid(format!("failed to parse config file {expanded}")).with_source(e)
        })?;
        config.config_file = Some(expanded);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contextio_core::{ErrorKind, StaticEnv};
    use contextio_file_read_tokio::TokioFileRead;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_from_env_keeps_explicit_values() {
        let ctx = Context::new().with_env(StaticEnv {
            home_dir: None,
            envs: HashMap::from([
                (CONTEXTIO_CONSUMER_KEY.to_string(), "env_key".to_string()),
                (CONTEXTIO_CONSUMER_SECRET.to_string(), "env_secret".to_string()),
                (CONTEXTIO_SIGNATURE_METHOD.to_string(), "HMAC-SHA256".to_string()),
            ]),
        });

        let config = Config {
            consumer_key: Some("explicit_key".to_string()),
            ..Default::default()
        }
        .from_env(&ctx);

        assert_eq!(config.consumer_key.as_deref(), Some("explicit_key"));
        assert_eq!(config.consumer_secret.as_deref(), Some("env_secret"));
        assert_eq!(config.signature_method, Some(SignatureMethod::HmacSha256));
        assert_eq!(config.config_file, None);
    }

    #[test]
    fn test_from_env_ignores_unknown_signature_method() {
        let ctx = Context::new().with_env(StaticEnv {
            home_dir: None,
            envs: HashMap::from([(
                CONTEXTIO_SIGNATURE_METHOD.to_string(),
                "RSA-SHA1".to_string(),
            )]),
        });

        let config = Config::default().from_env(&ctx);
        assert_eq!(config.signature_method, None);
    }

    #[tokio::test]
    async fn test_from_config_file() -> anyhow::Result<()> {
        let mut f = tempfile::NamedTempFile::new()?;
        writeln!(f, "consumer_key = \"file_key\"")?;
        writeln!(f, "consumer_secret = \"file_secret\"")?;
        writeln!(f, "signature_method = \"PLAINTEXT\"")?;

        let ctx = Context::new().with_file_read(TokioFileRead);
        let path = f.path().to_string_lossy().to_string();
        let config = Config::from_config_file(&ctx, &path).await?;

        assert_eq!(config.consumer_key.as_deref(), Some("file_key"));
        assert_eq!(config.consumer_secret.as_deref(), Some("file_secret"));
        assert_eq!(config.signature_method, Some(SignatureMethod::Plaintext));
        assert_eq!(config.config_file.as_deref(), Some(path.as_str()));
        Ok(())
    }

    #[tokio::test]
    async fn test_from_config_file_rejects_invalid_toml() -> anyhow::Result<()> {
        let mut f = tempfile::NamedTempFile::new()?;
        writeln!(f, "consumer_key = ")?;

        let ctx = Context::new().with_file_read(TokioFileRead);
        let err = Config::from_config_file(&ctx, &f.path().to_string_lossy())
            .await
            .expect_err("invalid toml must fail");
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        Ok(())
    }
}
