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

use crate::bloom::theoretical_fpp;

/// Counts gathered from one filter configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialResult {
    /// Filter size in bits (m)
    pub size: u64,
    /// Hash functions per key (k)
    pub num_hashes: u16,
    /// Member keys inserted (n)
    pub inserted: u64,
    /// Keys queried: every member and every non-member
    pub queried: u64,
    /// Non-member keys among the queried ones
    pub non_members_queried: u64,
    /// Non-members the filter reported as present
    pub false_positives: u64,
    /// Members the filter reported as absent; zero for a correct filter
    pub false_negatives: u64,
}

impl TrialResult {
    /// False positives over all queried keys, in `[0, 1]`.
    pub fn false_positive_rate(&self) -> f64 {
        ratio(self.false_positives, self.queried)
    }

    /// False positives over queried non-members only, the quantity the
    /// textbook formula predicts.
    pub fn non_member_fpr(&self) -> f64 {
        ratio(self.false_positives, self.non_members_queried)
    }

    /// Predicted probability that one non-member is reported present.
    pub fn expected_fpp(&self) -> f64 {
        theoretical_fpp(self.inserted, self.size, self.num_hashes)
    }
}

fn ratio(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}
