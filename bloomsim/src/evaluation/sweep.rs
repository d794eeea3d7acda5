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

use super::TrialResult;
use crate::error::Error;

/// The value of the swept parameter at one point of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SweepParameter {
    /// Number of hash functions, filter size held fixed
    NumHashes(u16),
    /// Filter size in bits, number of hash functions held fixed
    Size(u64),
}

/// One result record of a sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SweepPoint {
    /// Value of the varied parameter
    pub parameter: SweepParameter,
    /// Measurement at that value
    pub result: TrialResult,
}

/// Receives one record per evaluated configuration, in sweep order.
pub trait ReportSink {
    /// Records one measured configuration.
    fn report(&mut self, point: &SweepPoint);
}

impl<F> ReportSink for F
where
    F: FnMut(&SweepPoint),
{
    fn report(&mut self, point: &SweepPoint) {
        self(point)
    }
}

impl ReportSink for Vec<SweepPoint> {
    fn report(&mut self, point: &SweepPoint) {
        self.push(*point);
    }
}

/// An ordered list of `(size, num_hashes)` configurations varying in one
/// parameter.
///
/// # Examples
///
/// ```
/// # use bloomsim::evaluation::Sweep;
/// let by_k = Sweep::over_num_hashes(1000, 1..=8);
/// assert_eq!(by_k.len(), 8);
///
/// let sizes = Sweep::stepped_sizes(100, 50_000, 2_500).unwrap();
/// let by_m = Sweep::over_sizes(sizes, 1);
/// assert_eq!(by_m.len(), 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sweep {
    points: Vec<SweepParameter>,
    size: u64,
    num_hashes: u16,
}

impl Sweep {
    /// Varies the number of hash functions at a fixed filter size.
    pub fn over_num_hashes(size: u64, num_hashes: impl IntoIterator<Item = u16>) -> Self {
        Sweep {
            points: num_hashes
                .into_iter()
                .map(SweepParameter::NumHashes)
                .collect(),
            size,
            num_hashes: 0,
        }
    }

    /// Varies the filter size at a fixed number of hash functions.
    pub fn over_sizes(sizes: impl IntoIterator<Item = u64>, num_hashes: u16) -> Self {
        Sweep {
            points: sizes.into_iter().map(SweepParameter::Size).collect(),
            size: 0,
            num_hashes,
        }
    }

    /// Returns `start, start + step, ...` up to and including `end`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `step` is zero or not addressable, or if
    /// `start > end`.
    pub fn stepped_sizes(start: u64, end: u64, step: u64) -> Result<Vec<u64>, Error> {
        if step == 0 {
            return Err(Error::invalid_argument("step must be positive"));
        }
        if start > end {
            return Err(Error::invalid_argument("start must not exceed end")
                .with_context("start", start)
                .with_context("end", end));
        }
        let step = usize::try_from(step).map_err(|_| {
            Error::invalid_argument("step does not fit in usize").with_context("step", step)
        })?;
        Ok((start..=end).step_by(step).collect())
    }

    /// Number of configurations.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns whether there is nothing to evaluate.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates `(parameter, size, num_hashes)` for every configuration.
    pub fn configurations(&self) -> impl Iterator<Item = (SweepParameter, u64, u16)> + '_ {
        self.points.iter().map(|&parameter| match parameter {
            SweepParameter::NumHashes(k) => (parameter, self.size, k),
            SweepParameter::Size(m) => (parameter, m, self.num_hashes),
        })
    }
}
