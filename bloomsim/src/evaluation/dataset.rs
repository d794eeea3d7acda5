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

use std::collections::HashSet;

use super::KeySource;
use crate::error::Error;

/// Consecutive repeated keys tolerated before a source is considered exhausted.
const MAX_REPEATED_DRAWS: usize = 1024;

/// Two disjoint sets of keys: members are inserted, non-members never are.
///
/// Disjointness and uniqueness are the provider's responsibility when the
/// dataset is assembled with [`Dataset::new`]; [`Dataset::generate`] enforces
/// both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    members: Vec<String>,
    non_members: Vec<String>,
}

impl Dataset {
    /// Wraps key sets produced elsewhere, without validation.
    pub fn new(members: Vec<String>, non_members: Vec<String>) -> Self {
        Dataset {
            members,
            non_members,
        }
    }

    /// Draws `num_members + num_non_members` distinct keys from `source`.
    ///
    /// Repeated keys are skipped.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the total count overflows, or if the source
    /// keeps repeating itself, which means it cannot supply enough distinct keys.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsim::evaluation::Dataset;
    /// # use bloomsim::evaluation::UuidKeySource;
    /// let dataset = Dataset::generate(100, 50, &mut UuidKeySource).unwrap();
    /// assert_eq!(dataset.members().len(), 100);
    /// assert_eq!(dataset.non_members().len(), 50);
    /// ```
    pub fn generate<S: KeySource + ?Sized>(
        num_members: usize,
        num_non_members: usize,
        source: &mut S,
    ) -> Result<Self, Error> {
        let total = num_members.checked_add(num_non_members).ok_or_else(|| {
            Error::invalid_argument("requested key count overflows usize")
                .with_context("members", num_members)
                .with_context("non_members", num_non_members)
        })?;
        let mut seen = HashSet::with_capacity(total);
        let mut keys = Vec::with_capacity(total);
        let mut repeats = 0;

        while keys.len() < total {
            let key = source.next_key();
            if seen.contains(&key) {
                repeats += 1;
                if repeats > MAX_REPEATED_DRAWS {
                    return Err(Error::invalid_argument(
                        "key source repeats itself, cannot draw enough distinct keys",
                    )
                    .with_context("requested", total)
                    .with_context("drawn", keys.len()));
                }
                continue;
            }
            repeats = 0;
            seen.insert(key.clone());
            keys.push(key);
        }

        let non_members = keys.split_off(num_members);
        Ok(Dataset {
            members: keys,
            non_members,
        })
    }

    /// Keys to insert.
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Keys never inserted.
    pub fn non_members(&self) -> &[String] {
        &self.non_members
    }

    /// Iterates members followed by non-members.
    pub fn all_keys(&self) -> impl Iterator<Item = &str> {
        self.members
            .iter()
            .chain(self.non_members.iter())
            .map(String::as_str)
    }

    /// Total number of keys in both sets.
    pub fn len(&self) -> usize {
        self.members.len() + self.non_members.len()
    }

    /// Returns whether both sets are empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
