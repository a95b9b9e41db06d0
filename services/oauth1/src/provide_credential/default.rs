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

use crate::provide_credential::{ConfigFileCredentialProvider, EnvCredentialProvider};
use crate::{Config, Credential};
use async_trait::async_trait;
use contextio_core::{Context, ProvideCredential, ProvideCredentialChain, Result};
use log::debug;

/// DefaultCredentialProvider loads the credential from the usual places.
///
/// Sources are tried in the following order:
/// 1. `consumer_key` and `consumer_secret` set on [`Config`]
/// 2. Environment variables
/// 3. The TOML config file
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    chain: ProvideCredentialChain<Credential>,
}

impl DefaultCredentialProvider {
    /// Create a new DefaultCredentialProvider.
    pub fn new(config: Config) -> Self {
        let mut config_file = ConfigFileCredentialProvider::new();
        if let Some(path) = &config.config_file {
            config_file = config_file.with_path(path);
        }

        let chain = ProvideCredentialChain::new()
            .push(ConfigCredentialProvider { config })
            .push(EnvCredentialProvider::new())
            .push(config_file);

        Self { chain }
    }
}

impl Default for DefaultCredentialProvider {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[async_trait]
impl ProvideCredential for DefaultCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.chain.provide_credential(ctx).await
    }
}

/// Provider that reads the explicit values from config.
#[derive(Debug)]
struct ConfigCredentialProvider {
    config: Config,
}

#[async_trait]
impl ProvideCredential for ConfigCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        match (&self.config.consumer_key, &self.config.consumer_secret) {
            (Some(key), Some(secret)) => {
                debug!("loading credential from config");
                let mut cred = Credential::new(key, secret);
                cred.signature_method = self.config.signature_method;
                Ok(Some(cred))
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use contextio_core::StaticEnv;
    use contextio_file_read_tokio::TokioFileRead;
    use std::collections::HashMap;

    fn ctx(envs: HashMap<String, String>) -> Context {
        Context::new()
            .with_file_read(TokioFileRead)
            .with_env(StaticEnv {
                home_dir: None,
                envs,
            })
    }

    #[tokio::test]
    async fn test_config_wins_over_env() -> anyhow::Result<()> {
        let provider = DefaultCredentialProvider::new(Config {
            consumer_key: Some("config_key".to_string()),
            consumer_secret: Some("config_secret".to_string()),
            ..Default::default()
        });

        let cred = provider
            .provide_credential(&ctx(HashMap::from([
                (CONTEXTIO_CONSUMER_KEY.to_string(), "env_key".to_string()),
                (CONTEXTIO_CONSUMER_SECRET.to_string(), "env_secret".to_string()),
            ])))
            .await?
            .expect("credential must be loaded");
        assert_eq!(cred.consumer_key, "config_key");
        Ok(())
    }

    #[tokio::test]
    async fn test_falls_back_to_env() -> anyhow::Result<()> {
        let provider = DefaultCredentialProvider::new(Config {
            consumer_key: Some("half_config".to_string()),
            ..Default::default()
        });

        let cred = provider
            .provide_credential(&ctx(HashMap::from([
                (CONTEXTIO_CONSUMER_KEY.to_string(), "env_key".to_string()),
                (CONTEXTIO_CONSUMER_SECRET.to_string(), "env_secret".to_string()),
            ])))
            .await?
            .expect("credential must be loaded");
        assert_eq!(cred.consumer_key, "env_key");
        assert_eq!(cred.consumer_secret, "env_secret");
        Ok(())
    }

    #[tokio::test]
    async fn test_nothing_found() -> anyhow::Result<()> {
        let provider = DefaultCredentialProvider::new(Config {
            config_file: Some("/definitely/not/here.toml".to_string()),
            ..Default::default()
        });

        let cred = provider.provide_credential(&ctx(HashMap::new())).await?;
        assert!(cred.is_none());
        Ok(())
    }
}
