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

//! Seeded hash functions used to address Bloom filter bits.
//!
//! A [`HashFamily`] is an owned list of MurmurHash3 seeds. Function `i` of the
//! family is MurmurHash3 seeded with `seeds[i]`, reduced modulo the filter size.
//! Every call builds a fresh hasher and discards it after finalizing, so a
//! family carries no mutable state and may be shared freely between filters.

mod family;
mod murmurhash;

pub use self::family::HashFamily;
pub(crate) use self::murmurhash::MurmurHash3X86_32;

/// Number of functions in a randomly seeded family when the caller has no
/// better estimate of the largest `k` it will try.
pub const DEFAULT_FAMILY_SIZE: usize = 100;

/// Base seed for families derived with [`HashFamily::seeded`] when the caller
/// gives none, e.g. by a filter builder that needs more functions than
/// [`DEFAULT_SEEDS`] holds.
pub const DEFAULT_FAMILY_SEED: u64 = 9001;

/// A fixed, well-known seed list. Using the same seeds across runs makes filter
/// contents reproducible.
///
/// In order to compare two filters bit by bit it is critical that both were
/// built from identical seeds, otherwise the same key lands on different bits.
pub const DEFAULT_SEEDS: [u32; 9] = [
    11, 4214315325, 442343243, 87988798, 768797855, 465765768, 889807453, 456363, 44353,
];
