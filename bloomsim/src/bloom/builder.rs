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

use super::BloomFilter;
use crate::error::Error;
use crate::hash::HashFamily;
use crate::hash::DEFAULT_FAMILY_SEED;
use crate::hash::DEFAULT_SEEDS;

pub const MIN_NUM_BITS: u64 = 1;
/// Positions come from a 32-bit hash, so no more slots than that are reachable.
pub const MAX_NUM_BITS: u64 = 1 << 32;
pub const MIN_NUM_HASHES: u16 = 1;
pub const MAX_NUM_HASHES: u16 = u16::MAX;

#[derive(Debug, Clone, Copy)]
enum Sizing {
    Bits(u64),
    Accuracy { max_items: u64, fpp: f64 },
}

/// Builder for creating [`BloomFilter`] instances.
///
/// Provides two construction modes:
/// - [`with_size()`](Self::with_size): Specify the exact number of addressable bits
/// - [`with_accuracy()`](Self::with_accuracy): Specify target items and false positive rate;
///   the number of hash functions is fixed to the suggested value
///
/// Unless [`hash_family()`](Self::hash_family) is given, filters use
/// [`HashFamily::default()`], or a family seeded from `DEFAULT_FAMILY_SEED` when
/// the hash count needs more functions than the default seeds provide.
#[derive(Debug, Clone)]
pub struct BloomFilterBuilder {
    sizing: Sizing,
    num_hashes: Option<u16>,
    family: Option<HashFamily>,
}

impl BloomFilterBuilder {
    /// Creates a builder for a filter with exactly `num_bits` addressable bits.
    ///
    /// The number of hash functions is left open and fixed by the first insert,
    /// unless [`num_hashes()`](Self::num_hashes) is called.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsim::bloom::BloomFilterBuilder;
    /// let filter = BloomFilterBuilder::with_size(1000).build().unwrap();
    /// assert_eq!(filter.capacity(), 1000);
    /// assert_eq!(filter.num_hashes(), None);
    /// ```
    pub fn with_size(num_bits: u64) -> Self {
        BloomFilterBuilder {
            sizing: Sizing::Bits(num_bits),
            num_hashes: None,
            family: None,
        }
    }

    /// Creates a builder with optimal parameters for a target accuracy.
    ///
    /// # Arguments
    ///
    /// - `max_items`: Maximum expected number of distinct items
    /// - `fpp`: Target false positive probability (e.g., 0.01 for 1%)
    ///
    /// Invalid arguments are reported by [`build()`](Self::build).
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsim::bloom::BloomFilterBuilder;
    /// let filter = BloomFilterBuilder::with_accuracy(1000, 0.01).build().unwrap();
    /// assert_eq!(filter.capacity(), 9586);
    /// assert_eq!(filter.num_hashes(), Some(7));
    /// ```
    pub fn with_accuracy(max_items: u64, fpp: f64) -> Self {
        BloomFilterBuilder {
            sizing: Sizing::Accuracy { max_items, fpp },
            num_hashes: None,
            family: None,
        }
    }

    /// Fixes the number of hash functions every insert and query must use.
    pub fn num_hashes(mut self, num_hashes: u16) -> Self {
        self.num_hashes = Some(num_hashes);
        self
    }

    /// Sets the hash family the filter addresses its bits with.
    ///
    /// **Important**: Filters are only comparable when built from the same family.
    pub fn hash_family(mut self, family: HashFamily) -> Self {
        self.family = Some(family);
        self
    }

    /// Builds the Bloom filter.
    ///
    /// # Errors
    ///
    /// - `InvalidSize` if the bit count is outside `[MIN_NUM_BITS, MAX_NUM_BITS]`
    /// - `InvalidArgument` for a zero hash count or an invalid accuracy target
    /// - `HashIndexOutOfRange` if the hash count exceeds the family size
    pub fn build(self) -> Result<BloomFilter, Error> {
        let (num_bits, suggested) = match self.sizing {
            Sizing::Bits(num_bits) => (num_bits, None),
            Sizing::Accuracy { max_items, fpp } => {
                if max_items == 0 {
                    return Err(Error::invalid_argument("max_items must be greater than 0"));
                }
                if !(fpp > 0.0 && fpp <= 1.0) {
                    return Err(Error::invalid_argument(
                        "fpp must be between 0.0 and 1.0 (inclusive of 1.0)",
                    )
                    .with_context("fpp", fpp));
                }
                let num_bits = Self::suggest_num_bits(max_items, fpp);
                let num_hashes = Self::suggest_num_hashes(max_items, num_bits);
                (num_bits, Some(num_hashes))
            }
        };

        if !(MIN_NUM_BITS..=MAX_NUM_BITS).contains(&num_bits) {
            return Err(Error::invalid_size(num_bits, MAX_NUM_BITS));
        }

        let num_hashes = self.num_hashes.or(suggested);
        if num_hashes.is_some_and(|k| k < MIN_NUM_HASHES) {
            return Err(Error::invalid_argument(format!(
                "num_hashes must be at least {MIN_NUM_HASHES}"
            )));
        }

        let family = match self.family {
            Some(family) => family,
            None => default_family_for(num_hashes)?,
        };
        if let Some(k) = num_hashes {
            family.check_index(usize::from(k) - 1)?;
        }

        let num_words = num_bits.div_ceil(64) as usize;
        tracing::debug!(num_bits, num_words, ?num_hashes, "built bloom filter");

        Ok(BloomFilter {
            family,
            num_hashes,
            capacity_bits: num_bits,
            num_bits_set: 0,
            bit_array: vec![0u64; num_words].into_boxed_slice(),
        })
    }

    /// Suggests optimal number of bits given max items and target FPP.
    ///
    /// Formula: `m = -n * ln(p) / (ln(2)^2)`
    /// where n = max_items, p = fpp
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsim::bloom::BloomFilterBuilder;
    /// let bits = BloomFilterBuilder::suggest_num_bits(1000, 0.01);
    /// assert!(bits > 9000 && bits < 10000); // ~9585 bits
    /// ```
    pub fn suggest_num_bits(max_items: u64, fpp: f64) -> u64 {
        let n = max_items as f64;
        let ln2_squared = std::f64::consts::LN_2 * std::f64::consts::LN_2;

        let bits = (-n * fpp.ln() / ln2_squared).ceil() as u64;
        bits.clamp(MIN_NUM_BITS, MAX_NUM_BITS)
    }

    /// Suggests optimal number of hash functions given max items and bit count.
    ///
    /// Formula: `k = (m/n) * ln(2)`, rounded up.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsim::bloom::BloomFilterBuilder;
    /// let hashes = BloomFilterBuilder::suggest_num_hashes(1000, 10000);
    /// assert_eq!(hashes, 7); // Optimal k ≈ 6.93
    /// ```
    pub fn suggest_num_hashes(max_items: u64, num_bits: u64) -> u16 {
        let m = num_bits as f64;
        let n = max_items as f64;

        let k = (m / n * std::f64::consts::LN_2).ceil();
        k.clamp(f64::from(MIN_NUM_HASHES), f64::from(MAX_NUM_HASHES)) as u16
    }
}

/// The family used when the builder is given none: the well-known seeds if they
/// cover `num_hashes`, otherwise a reproducible family of exactly `num_hashes`.
fn default_family_for(num_hashes: Option<u16>) -> Result<HashFamily, Error> {
    match num_hashes.map(usize::from) {
        Some(k) if k > DEFAULT_SEEDS.len() => HashFamily::seeded(k, DEFAULT_FAMILY_SEED),
        _ => Ok(HashFamily::default()),
    }
}
