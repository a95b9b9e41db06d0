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

use crate::{Context, Error, ProvideCredential, Result, SignRequest, SigningCredential};
use std::sync::{Arc, Mutex};

/// Signer is the main struct used to sign the request.
///
/// The credential is loaded lazily on first use and kept for the lifetime of
/// the signer. Clones share the same credential slot.
#[derive(Clone, Debug)]
pub struct Signer<K: SigningCredential> {
    ctx: Context,
    loader: Arc<dyn ProvideCredential<Credential = K>>,
    builder: Arc<dyn SignRequest<Credential = K>>,
    credential: Arc<Mutex<Option<K>>>,
}

impl<K: SigningCredential> Signer<K> {
    /// Create a new signer.
    pub fn new(
        ctx: Context,
        loader: impl ProvideCredential<Credential = K>,
        builder: impl SignRequest<Credential = K>,
    ) -> Self {
        Self {
            ctx,

            loader: Arc::new(loader),
            builder: Arc::new(builder),
            credential: Arc::new(Mutex::new(None)),
        }
    }

    /// Replace the request signer, keeping the credential provider and the
    /// loaded credential.
    pub fn with_request_signer(mut self, builder: impl SignRequest<Credential = K>) -> Self {
        self.builder = Arc::new(builder);
        self
    }

    /// Get the context used by this signer.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Sign the request.
    ///
    /// Returns a [`CredentialInvalid`](crate::ErrorKind::CredentialInvalid) error
    /// if no provider yields a valid credential.
    pub async fn sign(&self, req: &mut http::request::Parts, body: Option<&[u8]>) -> Result<()> {
        let credential = self.credential.lock().expect("lock poisoned").clone();
        let credential = if credential.is_valid() {
            credential
        } else {
            let loaded = self.loader.provide_credential(&self.ctx).await?;
            *self.credential.lock().expect("lock poisoned") = loaded.clone();
            loaded
        };

        if !credential.is_valid() {
            return Err(Error::credential_invalid(
                "no valid credential found by the configured providers",
            ));
        }

        self.builder
            .sign_request(&self.ctx, req, body, credential.as_ref())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use http::header::AUTHORIZATION;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Debug)]
    struct TestCredential(String);

    impl SigningCredential for TestCredential {
        fn is_valid(&self) -> bool {
            !self.0.is_empty()
        }
    }

    #[derive(Debug)]
    struct CountingProvider {
        value: &'static str,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ProvideCredential for CountingProvider {
        type Credential = TestCredential;

        async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Some(TestCredential(self.value.to_string())))
        }
    }

    #[derive(Debug)]
    struct EchoSigner;

    #[async_trait]
    impl SignRequest for EchoSigner {
        type Credential = TestCredential;

        async fn sign_request(
            &self,
            _: &Context,
            req: &mut http::request::Parts,
            _: Option<&[u8]>,
            credential: Option<&Self::Credential>,
        ) -> Result<()> {
            let Some(cred) = credential else {
                return Ok(());
            };
            req.headers.insert(AUTHORIZATION, cred.0.parse()?);
            Ok(())
        }
    }

    fn parts() -> http::request::Parts {
        http::Request::get("https://api.context.io/2.0/accounts")
            .body(())
            .expect("request must be valid")
            .into_parts()
            .0
    }

    #[tokio::test]
    async fn test_signer_loads_credential_once() -> anyhow::Result<()> {
        let calls = Arc::new(AtomicUsize::new(0));
        let signer = Signer::new(
            Context::new(),
            CountingProvider {
                value: "k",
                calls: calls.clone(),
            },
            EchoSigner,
        );

        let mut first = parts();
        signer.sign(&mut first, None).await?;
        let mut second = parts();
        signer.clone().sign(&mut second, None).await?;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(second.headers[AUTHORIZATION], "k");
        Ok(())
    }

    #[derive(Debug)]
    struct PrefixSigner;

    #[async_trait]
    impl SignRequest for PrefixSigner {
        type Credential = TestCredential;

        async fn sign_request(
            &self,
            _: &Context,
            req: &mut http::request::Parts,
            _: Option<&[u8]>,
            credential: Option<&Self::Credential>,
        ) -> Result<()> {
            let Some(cred) = credential else {
                return Ok(());
            };
            req.headers
                .insert(AUTHORIZATION, format!("prefix {}", cred.0).parse()?);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_with_request_signer_keeps_credential() -> anyhow::Result<()> {
        let calls = Arc::new(AtomicUsize::new(0));
        let signer = Signer::new(
            Context::new(),
            CountingProvider {
                value: "k",
                calls: calls.clone(),
            },
            EchoSigner,
        );

        let mut first = parts();
        signer.sign(&mut first, None).await?;

        let signer = signer.with_request_signer(PrefixSigner);
        let mut second = parts();
        signer.sign(&mut second, None).await?;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(second.headers[AUTHORIZATION], "prefix k");
        Ok(())
    }

    #[tokio::test]
    async fn test_signer_rejects_invalid_credential() {
        let signer = Signer::new(
            Context::new(),
            CountingProvider {
                value: "",
                calls: Arc::new(AtomicUsize::new(0)),
            },
            EchoSigner,
        );

        let mut req = parts();
        let err = signer
            .sign(&mut req, None)
            .await
            .expect_err("empty credential must be rejected");
        assert!(err.is_credential_error());
        assert!(req.headers.get(AUTHORIZATION).is_none());
    }
}
