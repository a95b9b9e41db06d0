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

use crate::{Context, ProvideCredential, Result};
use async_trait::async_trait;
use log::{debug, warn};
use std::fmt::{self, Debug};

/// A chain of credential providers that will be tried in order.
///
/// The first provider returning `Ok(Some(_))` wins. Errors are logged and
/// the chain moves on to the next provider.
pub struct ProvideCredentialChain<K> {
    providers: Vec<Box<dyn ProvideCredential<Credential = K>>>,
}

impl<K: Send + Sync + Unpin + 'static> ProvideCredentialChain<K> {
    /// Create a new empty credential provider chain.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Add a credential provider to the chain.
    pub fn push(mut self, provider: impl ProvideCredential<Credential = K>) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Number of providers in the chain.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns true if the chain has no providers.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl<K: Send + Sync + Unpin + 'static> Default for ProvideCredentialChain<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Debug for ProvideCredentialChain<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvideCredentialChain")
            .field("providers", &self.providers)
            .finish()
    }
}

#[async_trait]
impl<K: Send + Sync + Unpin + 'static> ProvideCredential for ProvideCredentialChain<K> {
    type Credential = K;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        for provider in &self.providers {
            debug!("trying credential provider: {provider:?}");

            match provider.provide_credential(ctx).await {
                Ok(Some(cred)) => {
                    debug!("loaded credential from provider: {provider:?}");
                    return Ok(Some(cred));
                }
                Ok(None) => {
                    debug!("no credential found in provider: {provider:?}");
                }
                Err(e) => {
                    warn!("error loading credential from provider {provider:?}: {e:?}");
                }
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[derive(Debug)]
    struct Fixed(Option<&'static str>);

    #[async_trait]
    impl ProvideCredential for Fixed {
        type Credential = String;

        async fn provide_credential(&self, _: &Context) -> Result<Option<String>> {
            Ok(self.0.map(|v| v.to_string()))
        }
    }

    #[derive(Debug)]
    struct Failing;

    #[async_trait]
    impl ProvideCredential for Failing {
        type Credential = String;

        async fn provide_credential(&self, _: &Context) -> Result<Option<String>> {
            Err(Error::config_invalid("broken provider"))
        }
    }

    #[tokio::test]
    async fn test_chain_returns_first_hit() -> anyhow::Result<()> {
        let chain = ProvideCredentialChain::new()
            .push(Fixed(None))
            .push(Failing)
            .push(Fixed(Some("second")))
            .push(Fixed(Some("third")));
        assert_eq!(chain.len(), 4);

        let cred = chain.provide_credential(&Context::new()).await?;
        assert_eq!(cred.as_deref(), Some("second"));
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_chain_returns_none() -> anyhow::Result<()> {
        let chain = ProvideCredentialChain::<String>::default();
        assert!(chain.is_empty());
        assert!(chain.provide_credential(&Context::new()).await?.is_none());
        Ok(())
    }
}
