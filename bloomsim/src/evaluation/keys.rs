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

use uuid::Uuid;

/// A provider of string keys for building datasets.
///
/// Implementations are expected to return distinct keys almost always;
/// [`Dataset::generate`](super::Dataset::generate) discards repeats.
pub trait KeySource {
    /// Produces the next key.
    fn next_key(&mut self) -> String;
}

impl<F> KeySource for F
where
    F: FnMut() -> String,
{
    fn next_key(&mut self) -> String {
        self()
    }
}

/// Draws random version 4 UUIDs in their hyphenated form.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidKeySource;

impl KeySource for UuidKeySource {
    fn next_key(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}
