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

// Env values used by the Context.IO signer.
pub const CONTEXTIO_CONSUMER_KEY: &str = "CONTEXTIO_CONSUMER_KEY";
pub const CONTEXTIO_CONSUMER_SECRET: &str = "CONTEXTIO_CONSUMER_SECRET";
pub const CONTEXTIO_CONFIG_FILE: &str = "CONTEXTIO_CONFIG_FILE";
pub const CONTEXTIO_SIGNATURE_METHOD: &str = "CONTEXTIO_SIGNATURE_METHOD";

/// Default config path.
pub const CONTEXTIO_CONFIG_PATH: &str = "~/.contextio/config.toml";

/// Content type whose body parameters take part in the signature.
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

// Protocol parameters, RFC 5849 section 3.1.
pub const OAUTH_CONSUMER_KEY: &str = "oauth_consumer_key";
pub const OAUTH_NONCE: &str = "oauth_nonce";
pub const OAUTH_SIGNATURE: &str = "oauth_signature";
pub const OAUTH_SIGNATURE_METHOD: &str = "oauth_signature_method";
pub const OAUTH_TIMESTAMP: &str = "oauth_timestamp";
pub const OAUTH_VERSION: &str = "oauth_version";
pub const OAUTH_VERSION_1_0: &str = "1.0";
