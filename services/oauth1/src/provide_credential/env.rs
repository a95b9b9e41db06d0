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

use crate::{constants::*, Credential};
use async_trait::async_trait;
use contextio_core::{Context, ProvideCredential, Result};
use log::debug;

/// EnvCredentialProvider loads the credential from environment variables.
///
/// This provider looks for the following environment variables:
/// - `CONTEXTIO_CONSUMER_KEY`: The Context.IO consumer key
/// - `CONTEXTIO_CONSUMER_SECRET`: The Context.IO consumer secret
#[derive(Debug, Default)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let envs = ctx.env_vars();

        match (
            envs.get(CONTEXTIO_CONSUMER_KEY),
            envs.get(CONTEXTIO_CONSUMER_SECRET),
        ) {
            (Some(key), Some(secret)) => {
                debug!("loading credential from environment variables");
                Ok(Some(Credential::new(key, secret)))
            }
            _ => Ok(None),
        }
    }
}
