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

use anyhow::Result;
use contextio::{Client, Config, Method, Params};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    // Credentials come from CONTEXTIO_CONSUMER_KEY / CONTEXTIO_CONSUMER_SECRET
    // or ~/.contextio/config.toml.
    let client = Client::from_config(Config::default())?;

    let query = Params::from([("limit".to_string(), vec!["5".to_string()])]);
    let body = client
        .call_json(Method::Get, "2.0/accounts", &query, None)
        .await?;

    let accounts: serde_json::Value = serde_json::from_slice(&body)?;
    println!("{accounts:#}");
    Ok(())
}
