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

use std::collections::BTreeMap;

/// Query or form parameters. A key may carry several values.
pub type Params = BTreeMap<String, Vec<String>>;

/// Encode params as `application/x-www-form-urlencoded`.
///
/// Keys come out sorted and repeated values keep their order.
pub fn encode_params(params: &Params) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (k, vs) in params {
        for v in vs {
            serializer.append_pair(k, v);
        }
    }
    serializer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_encode_params() {
        let params = Params::from([
            ("limit".to_string(), vec!["10".to_string()]),
            (
                "email".to_string(),
                vec!["me@example.com".to_string(), "you@example.com".to_string()],
            ),
            ("label".to_string(), vec!["My Label".to_string()]),
        ]);

        assert_eq!(
            encode_params(&params),
            "email=me%40example.com&email=you%40example.com&label=My+Label&limit=10"
        );
    }

    #[test]
    fn test_encode_empty_params() {
        assert_eq!(encode_params(&Params::new()), "");
    }
}
