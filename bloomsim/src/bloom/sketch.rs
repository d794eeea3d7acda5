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

use crate::error::Error;
use crate::hash::HashFamily;

use super::BloomFilterBuilder;

/// A Bloom filter for probabilistic set membership testing.
///
/// Provides membership queries with:
/// - No false negatives (inserted items always return `true`)
/// - False positives at a rate driven by size, load and hash count
/// - Constant space usage
///
/// Bit `p` of the filter is set by any key for which some function `i < k` of
/// the hash family yields `p`. Bits are never cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BloomFilter {
    /// Seeded hash functions addressing the bit array
    pub(super) family: HashFamily,
    /// Number of hash functions (k), fixed at build time or by the first insert
    pub(super) num_hashes: Option<u16>,
    /// Total number of addressable bits in the filter (m)
    pub(super) capacity_bits: u64,
    /// Count of bits set to 1 (for statistics)
    pub(super) num_bits_set: u64,
    /// Bit array packed into u64 words
    /// Length = ceil(capacity_bits / 64)
    pub(super) bit_array: Box<[u64]>,
}

impl BloomFilter {
    /// Creates an empty filter with `size` addressable bits.
    ///
    /// Shorthand for `BloomFilterBuilder::with_size(size).hash_family(family).build()`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSize` if `size` is zero or exceeds `MAX_NUM_BITS`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsim::bloom::BloomFilter;
    /// # use bloomsim::error::ErrorKind;
    /// # use bloomsim::hash::HashFamily;
    /// let filter = BloomFilter::new(1000, HashFamily::default()).unwrap();
    /// assert!(filter.is_empty());
    ///
    /// let err = BloomFilter::new(0, HashFamily::default()).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::InvalidSize);
    /// ```
    pub fn new(size: u64, family: HashFamily) -> Result<Self, Error> {
        BloomFilterBuilder::with_size(size)
            .hash_family(family)
            .build()
    }

    /// Inserts `key` by setting the bits chosen by hash functions `0..num_hashes`.
    ///
    /// Inserting a key again changes nothing. The first insert fixes the number of
    /// hash functions for the rest of the filter's life.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `num_hashes` is zero
    /// - `HashIndexOutOfRange` if the family has fewer than `num_hashes` functions
    /// - `ConfigurationMismatch` if the filter already uses a different count
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsim::bloom::BloomFilter;
    /// # use bloomsim::hash::HashFamily;
    /// let mut filter = BloomFilter::new(1000, HashFamily::default()).unwrap();
    /// filter.insert("apple", 3).unwrap();
    /// assert!(filter.contains("apple", 3).unwrap());
    /// assert!(filter.insert("pear", 4).is_err());
    /// ```
    pub fn insert(&mut self, key: impl AsRef<[u8]>, num_hashes: u16) -> Result<(), Error> {
        self.check_num_hashes(num_hashes)?;
        self.num_hashes = Some(num_hashes);
        self.set_bits(key.as_ref(), num_hashes);
        Ok(())
    }

    /// Tests whether `key` is possibly in the set, using hash functions
    /// `0..num_hashes`.
    ///
    /// Returns:
    /// - `true`: Item was **possibly** inserted (or false positive)
    /// - `false`: Item was **definitely not** inserted
    ///
    /// `num_hashes` must be the count used for inserting. A filter nothing was
    /// inserted into answers `false` for every key.
    ///
    /// # Errors
    ///
    /// Same as [`insert()`](Self::insert).
    pub fn contains(&self, key: impl AsRef<[u8]>, num_hashes: u16) -> Result<bool, Error> {
        self.check_num_hashes(num_hashes)?;
        if self.is_empty() {
            return Ok(false);
        }
        Ok(self.check_bits(key.as_ref(), num_hashes))
    }

    /// Tests and inserts an item in a single operation.
    ///
    /// Returns whether the item was possibly already in the set before insertion.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsim::bloom::BloomFilter;
    /// # use bloomsim::hash::HashFamily;
    /// let mut filter = BloomFilter::new(1000, HashFamily::default()).unwrap();
    ///
    /// assert!(!filter.contains_and_insert("apple", 2).unwrap()); // First insertion
    /// assert!(filter.contains_and_insert("apple", 2).unwrap()); // Now it's in the set
    /// ```
    pub fn contains_and_insert(
        &mut self,
        key: impl AsRef<[u8]>,
        num_hashes: u16,
    ) -> Result<bool, Error> {
        let key = key.as_ref();
        let was_present = self.contains(key, num_hashes)?;
        self.insert(key, num_hashes)?;
        Ok(was_present)
    }

    /// Returns whether the filter is empty (no items inserted).
    pub fn is_empty(&self) -> bool {
        self.num_bits_set == 0
    }

    /// Returns the number of bits set to 1.
    pub fn bits_used(&self) -> u64 {
        self.num_bits_set
    }

    /// Returns the total number of addressable bits in the filter (m).
    pub fn capacity(&self) -> u64 {
        self.capacity_bits
    }

    /// Returns the number of hash functions in use, once fixed.
    pub fn num_hashes(&self) -> Option<u16> {
        self.num_hashes
    }

    /// Returns the hash family addressing this filter.
    pub fn hash_family(&self) -> &HashFamily {
        &self.family
    }

    /// Returns the current load factor (fraction of bits set).
    pub fn load_factor(&self) -> f64 {
        self.num_bits_set as f64 / self.capacity_bits as f64
    }

    /// Estimates the current false positive probability as `load_factor^k`.
    ///
    /// Zero until the number of hash functions is fixed.
    pub fn estimated_fpp(&self) -> f64 {
        match self.num_hashes {
            Some(k) => self.load_factor().powi(i32::from(k)),
            None => 0.0,
        }
    }

    fn check_num_hashes(&self, num_hashes: u16) -> Result<(), Error> {
        if num_hashes == 0 {
            return Err(Error::invalid_argument("num_hashes must be at least 1"));
        }
        self.family.check_index(usize::from(num_hashes) - 1)?;
        match self.num_hashes {
            Some(k) if k != num_hashes => Err(Error::configuration_mismatch(k, num_hashes)),
            _ => Ok(()),
        }
    }

    /// Checks if all k bits are set for the given key.
    fn check_bits(&self, key: &[u8], num_hashes: u16) -> bool {
        (0..usize::from(num_hashes)).all(|i| {
            let bit_index = self.family.hash_unchecked(key, i, self.capacity_bits);
            self.get_bit(bit_index)
        })
    }

    /// Sets all k bits for the given key.
    fn set_bits(&mut self, key: &[u8], num_hashes: u16) {
        for i in 0..usize::from(num_hashes) {
            let bit_index = self.family.hash_unchecked(key, i, self.capacity_bits);
            self.set_bit(bit_index);
        }
    }

    /// Gets the value of a single bit.
    fn get_bit(&self, bit_index: u64) -> bool {
        assert!(bit_index < self.capacity_bits, "bit {bit_index} out of range");
        let word_index = (bit_index >> 6) as usize; // Equivalent to bit_index / 64
        let bit_offset = bit_index & 63; // Equivalent to bit_index % 64
        let mask = 1u64 << bit_offset;
        (self.bit_array[word_index] & mask) != 0
    }

    /// Sets a single bit and updates the count if it wasn't already set.
    fn set_bit(&mut self, bit_index: u64) {
        assert!(bit_index < self.capacity_bits, "bit {bit_index} out of range");
        let word_index = (bit_index >> 6) as usize;
        let bit_offset = bit_index & 63;
        let mask = 1u64 << bit_offset;

        if (self.bit_array[word_index] & mask) == 0 {
            self.bit_array[word_index] |= mask;
            self.num_bits_set += 1;
        }
    }
}

/// The textbook false positive probability `(1 - e^(-kn/m))^k` for `n` distinct
/// keys inserted with `k` hash functions into `m` bits.
///
/// Returns 0.0 when `num_bits` or `num_hashes` is zero, as no filter has that shape.
///
/// # Examples
///
/// ```
/// # use bloomsim::bloom::theoretical_fpp;
/// let p = theoretical_fpp(10, 1000, 1);
/// assert!((p - 0.00995).abs() < 1e-4);
/// ```
pub fn theoretical_fpp(num_items: u64, num_bits: u64, num_hashes: u16) -> f64 {
    if num_bits == 0 || num_hashes == 0 {
        return 0.0;
    }
    let k = f64::from(num_hashes);
    let exponent = -k * num_items as f64 / num_bits as f64;
    (1.0 - exponent.exp()).powf(k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bloom::MAX_NUM_BITS;
    use crate::error::ErrorKind;

    fn filter(size: u64) -> BloomFilter {
        BloomFilter::new(size, HashFamily::default()).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_sizes() {
        let err = BloomFilter::new(0, HashFamily::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSize);
        assert_eq!(err.context("size"), Some("0"));

        let err = BloomFilter::new(MAX_NUM_BITS + 1, HashFamily::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSize);
    }

    #[test]
    fn test_word_packing() {
        let f = filter(1);
        assert_eq!(f.bit_array.len(), 1);
        let f = filter(64);
        assert_eq!(f.bit_array.len(), 1);
        let f = filter(65);
        assert_eq!(f.bit_array.len(), 2);
        assert_eq!(f.capacity(), 65);
    }

    #[test]
    fn test_single_bit_filter() {
        let mut f = filter(1);
        assert!(!f.contains("anything", 3).unwrap());
        f.insert("a", 3).unwrap();
        assert_eq!(f.bits_used(), 1);
        assert!(f.contains("anything", 3).unwrap());
    }

    #[test]
    fn test_insert_and_contains() {
        let mut f = filter(1000);
        assert!(!f.contains("apple", 3).unwrap());
        f.insert("apple", 3).unwrap();
        assert!(f.contains("apple", 3).unwrap());
        assert!(!f.is_empty());
        assert_eq!(f.num_hashes(), Some(3));
        assert!(f.bits_used() >= 1 && f.bits_used() <= 3);
    }

    #[test]
    fn test_idempotent_insert() {
        let mut once = filter(500);
        let mut twice = filter(500);
        once.insert("key", 4).unwrap();
        twice.insert("key", 4).unwrap();
        twice.insert("key", 4).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_configuration_mismatch() {
        let mut f = filter(1000);
        f.insert("a", 2).unwrap();

        let err = f.insert("b", 3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigurationMismatch);
        let err = f.contains("a", 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigurationMismatch);

        // the filter remains usable with its own count
        assert!(f.contains("a", 2).unwrap());
    }

    #[test]
    fn test_hash_count_bounds() {
        let mut f = filter(1000);
        let err = f.insert("a", 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let too_many = HashFamily::default().num_functions() as u16 + 1;
        let err = f.insert("a", too_many).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::HashIndexOutOfRange);
        let err = f.contains("a", too_many).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::HashIndexOutOfRange);

        // failed calls leave the count unfixed
        assert_eq!(f.num_hashes(), None);
        assert!(f.is_empty());
    }

    #[test]
    fn test_statistics() {
        let mut f = filter(1000);
        assert_eq!(f.bits_used(), 0);
        assert_eq!(f.load_factor(), 0.0);
        assert_eq!(f.estimated_fpp(), 0.0);

        f.insert("test", 5).unwrap();
        assert!(f.bits_used() > 0);
        assert!(f.load_factor() > 0.0);
        assert!(f.estimated_fpp() > 0.0);
    }

    #[test]
    fn test_theoretical_fpp() {
        assert_eq!(theoretical_fpp(0, 100, 3), 0.0);
        let low = theoretical_fpp(100, 10_000, 3);
        let high = theoretical_fpp(1000, 10_000, 3);
        assert!(low < high);
        assert!(high < 1.0);

        assert_eq!(theoretical_fpp(10, 0, 3), 0.0);
        assert_eq!(theoretical_fpp(10, 100, 0), 0.0);
    }
}
