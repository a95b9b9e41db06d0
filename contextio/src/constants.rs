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

/// Default host of the Context.IO API.
pub const DEFAULT_API_HOST: &str = "api.context.io";
/// Default scheme used to reach the API host.
pub const DEFAULT_SCHEME: &str = "https";

/// Env value that overrides the API host.
pub const CONTEXTIO_API_HOST: &str = "CONTEXTIO_API_HOST";

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("contextio-rs/", env!("CARGO_PKG_VERSION"));

pub(crate) const MULTIPART_FORM_DATA: &str = "multipart/form-data";
