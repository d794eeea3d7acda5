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

//! Empirical measurement of Bloom filter false positive rates.
//!
//! An [`Evaluator`] owns a [`Dataset`] of members and non-members and a
//! [`HashFamily`]. For each configuration it builds a fresh filter, inserts every
//! member, queries every key, and counts the non-members reported present.
//!
//! ```rust
//! use bloomsim::evaluation::Dataset;
//! use bloomsim::evaluation::Evaluator;
//! use bloomsim::evaluation::Sweep;
//! use bloomsim::hash::HashFamily;
//!
//! let mut n = 0;
//! let mut keys = || {
//!     n += 1;
//!     format!("key-{n}")
//! };
//! let dataset = Dataset::generate(500, 500, &mut keys).unwrap();
//! let evaluator = Evaluator::new(dataset, HashFamily::seeded(8, 7).unwrap());
//!
//! for point in evaluator.sweep(&Sweep::over_num_hashes(4096, 1..=4)).unwrap() {
//!     println!("{:?}: {:.4}", point.parameter, point.result.false_positive_rate());
//! }
//! ```

mod dataset;
mod keys;
mod sweep;
mod trial;

pub use self::dataset::Dataset;
pub use self::keys::KeySource;
pub use self::keys::UuidKeySource;
pub use self::sweep::ReportSink;
pub use self::sweep::Sweep;
pub use self::sweep::SweepParameter;
pub use self::sweep::SweepPoint;
pub use self::trial::TrialResult;

use crate::bloom::BloomFilterBuilder;
use crate::error::Error;
use crate::hash::HashFamily;

/// Runs false positive measurements over a fixed dataset and hash family.
#[derive(Debug, Clone)]
pub struct Evaluator {
    dataset: Dataset,
    family: HashFamily,
}

impl Evaluator {
    /// Creates an evaluator; every configuration shares `dataset` and `family`.
    pub fn new(dataset: Dataset, family: HashFamily) -> Self {
        Evaluator { dataset, family }
    }

    /// Returns the keys under test.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Returns the hash family every filter is built with.
    pub fn hash_family(&self) -> &HashFamily {
        &self.family
    }

    /// Measures one configuration on a freshly built filter.
    ///
    /// # Errors
    ///
    /// Propagates the filter's construction and hash count errors: `InvalidSize`,
    /// `InvalidArgument` for `num_hashes == 0`, and `HashIndexOutOfRange` when the
    /// family is smaller than `num_hashes`.
    pub fn evaluate(&self, size: u64, num_hashes: u16) -> Result<TrialResult, Error> {
        let mut filter = BloomFilterBuilder::with_size(size)
            .hash_family(self.family.clone())
            .num_hashes(num_hashes)
            .build()?;

        for key in self.dataset.members() {
            filter.insert(key, num_hashes)?;
        }

        // all_keys yields members first
        let num_members = self.dataset.members().len();
        let mut false_negatives = 0;
        let mut false_positives = 0;
        for (i, key) in self.dataset.all_keys().enumerate() {
            let present = filter.contains(key, num_hashes)?;
            match (i < num_members, present) {
                (true, false) => false_negatives += 1,
                (false, true) => false_positives += 1,
                _ => {}
            }
        }

        let result = TrialResult {
            size,
            num_hashes,
            inserted: num_members as u64,
            queried: self.dataset.len() as u64,
            non_members_queried: self.dataset.non_members().len() as u64,
            false_positives,
            false_negatives,
        };
        tracing::debug!(
            size,
            num_hashes,
            false_positives,
            false_negatives,
            bits_used = filter.bits_used(),
            rate = result.false_positive_rate(),
            "evaluated configuration"
        );
        Ok(result)
    }

    /// Evaluates every configuration of `sweep` in order, reporting each result
    /// to `sink` as soon as it is measured.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for an empty sweep, otherwise the first error of
    /// [`evaluate()`](Self::evaluate). Results reported before the error stay
    /// reported.
    pub fn sweep_with<S: ReportSink + ?Sized>(
        &self,
        sweep: &Sweep,
        sink: &mut S,
    ) -> Result<(), Error> {
        if sweep.is_empty() {
            return Err(Error::invalid_argument("sweep has no configurations"));
        }

        for (parameter, size, num_hashes) in sweep.configurations() {
            let result = self.evaluate(size, num_hashes)?;
            sink.report(&SweepPoint { parameter, result });
        }

        tracing::info!(
            configurations = sweep.len(),
            members = self.dataset.members().len(),
            non_members = self.dataset.non_members().len(),
            "sweep finished"
        );
        Ok(())
    }

    /// Evaluates every configuration of `sweep` and collects the results.
    pub fn sweep(&self, sweep: &Sweep) -> Result<Vec<SweepPoint>, Error> {
        let mut points = Vec::with_capacity(sweep.len());
        self.sweep_with(sweep, &mut points)?;
        Ok(points)
    }
}
