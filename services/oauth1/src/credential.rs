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

use crate::SignatureMethod;
use contextio_core::utils::Redact;
use contextio_core::SigningCredential;
use std::fmt::{Debug, Formatter};

/// Credential that holds the consumer key and secret.
///
/// Two-legged OAuth has no token, so the pair is all that is needed.
#[derive(Default, Clone)]
pub struct Credential {
    /// Consumer key, sent as `oauth_consumer_key`.
    pub consumer_key: String,
    /// Consumer secret, only used to derive the signing key.
    pub consumer_secret: String,
    /// Signature method that came with the credential, e.g. from the
    /// config file. A method set on the signer takes precedence.
    pub signature_method: Option<SignatureMethod>,
}

impl Credential {
    /// Create a new credential.
    pub fn new(consumer_key: &str, consumer_secret: &str) -> Self {
        Self {
            consumer_key: consumer_key.to_string(),
            consumer_secret: consumer_secret.to_string(),
            signature_method: None,
        }
    }

    /// Attach the signature method to use with this credential.
    pub fn with_signature_method(mut self, method: SignatureMethod) -> Self {
        self.signature_method = Some(method);
        self
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("consumer_key", &Redact::from(&self.consumer_key))
            .field("consumer_secret", &Redact::from(&self.consumer_secret))
            .field("signature_method", &self.signature_method)
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.consumer_key.is_empty() && !self.consumer_secret.is_empty()
    }
}
