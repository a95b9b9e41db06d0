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

//! Time related utils.

use crate::{Error, Result};
use chrono::Utc;

/// DateTime is the alias for `chrono::DateTime<Utc>`.
pub type DateTime = chrono::DateTime<Utc>;

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into unix seconds: "1318622958"
pub fn format_unix_timestamp(t: DateTime) -> String {
    t.timestamp().to_string()
}

/// Parse unix seconds into time.
pub fn parse_unix_timestamp(s: &str) -> Result<DateTime> {
    let secs: i64 = s
        .parse()
        .map_err(|e| Error::unexpected(format!("invalid unix timestamp {s:?}")).with_source(e))?;
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| Error::unexpected(format!("unix timestamp {s} out of range")))
}
