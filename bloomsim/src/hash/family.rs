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
use std::hash::Hasher;

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::MurmurHash3X86_32;
use super::DEFAULT_SEEDS;
use crate::error::Error;

/// A family of independently seeded hash functions.
///
/// Function `index` maps a key to `murmur3_32(key, seeds[index]) % modulus`.
/// The mapping is a pure function of `(key, index, modulus)`.
///
/// # Examples
///
/// ```
/// # use bloomsim::hash::HashFamily;
/// let family = HashFamily::new(vec![7, 42, 9001]).unwrap();
/// assert_eq!(family.num_functions(), 3);
///
/// let pos = family.hash("apple", 2, 1000).unwrap();
/// assert!(pos < 1000);
/// assert_eq!(pos, family.hash("apple", 2, 1000).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HashFamily {
    seeds: Box<[u32]>,
}

impl HashFamily {
    /// Creates a family from explicit seeds, one function per seed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `seeds` is empty or contains a duplicate.
    pub fn new(seeds: impl Into<Vec<u32>>) -> Result<Self, Error> {
        let seeds = seeds.into();
        if seeds.is_empty() {
            return Err(Error::invalid_argument(
                "hash family needs at least one seed",
            ));
        }

        let mut seen = HashSet::with_capacity(seeds.len());
        for &seed in &seeds {
            if !seen.insert(seed) {
                return Err(
                    Error::invalid_argument("hash family seeds must be distinct")
                        .with_context("seed", seed),
                );
            }
        }

        Ok(HashFamily {
            seeds: seeds.into_boxed_slice(),
        })
    }

    /// Creates a reproducible family of `len` functions whose seeds are drawn
    /// from a generator seeded with `seed`.
    pub fn seeded(len: usize, seed: u64) -> Result<Self, Error> {
        Self::from_rng(len, &mut StdRng::seed_from_u64(seed))
    }

    /// Creates a family of `len` functions with seeds from the thread-local
    /// generator. Two calls produce unrelated families.
    pub fn random(len: usize) -> Result<Self, Error> {
        Self::from_rng(len, &mut rand::rng())
    }

    /// Creates a family of `len` functions with distinct seeds drawn from `rng`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `len` is zero.
    pub fn from_rng<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Result<Self, Error> {
        if len == 0 {
            return Err(Error::invalid_argument(
                "hash family needs at least one function",
            ));
        }

        let mut seen = HashSet::with_capacity(len);
        let mut seeds = Vec::with_capacity(len);
        while seeds.len() < len {
            let seed = rng.random::<u32>();
            if seen.insert(seed) {
                seeds.push(seed);
            }
        }
        Self::new(seeds)
    }

    /// Returns the number of functions in the family.
    pub fn num_functions(&self) -> usize {
        self.seeds.len()
    }

    /// Returns the seed of every function, by index.
    pub fn seeds(&self) -> &[u32] {
        &self.seeds
    }

    /// Hashes `key` with function `index` into `[0, modulus)`.
    ///
    /// # Errors
    ///
    /// - `HashIndexOutOfRange` if `index >= self.num_functions()`
    /// - `InvalidArgument` if `modulus` is zero
    pub fn hash(&self, key: impl AsRef<[u8]>, index: usize, modulus: u64) -> Result<u64, Error> {
        self.check_index(index)?;
        if modulus == 0 {
            return Err(Error::invalid_argument("modulus must be positive"));
        }
        Ok(self.hash_unchecked(key.as_ref(), index, modulus))
    }

    /// Returns the positions produced by functions `0..num_hashes` for `key`.
    ///
    /// # Errors
    ///
    /// Same as [`hash`](Self::hash), checked once for the highest index.
    pub fn positions<'a>(
        &'a self,
        key: &'a [u8],
        num_hashes: usize,
        modulus: u64,
    ) -> Result<impl Iterator<Item = u64> + 'a, Error> {
        if num_hashes > 0 {
            self.check_index(num_hashes - 1)?;
        }
        if modulus == 0 {
            return Err(Error::invalid_argument("modulus must be positive"));
        }
        Ok((0..num_hashes).map(move |i| self.hash_unchecked(key, i, modulus)))
    }

    pub(crate) fn check_index(&self, index: usize) -> Result<(), Error> {
        if index >= self.seeds.len() {
            return Err(Error::hash_index_out_of_range(index, self.seeds.len()));
        }
        Ok(())
    }

    /// Hashes with an index and modulus the caller has already validated.
    pub(crate) fn hash_unchecked(&self, key: &[u8], index: usize, modulus: u64) -> u64 {
        let mut hasher = MurmurHash3X86_32::with_seed(self.seeds[index]);
        hasher.write(key);
        u64::from(hasher.finish32()) % modulus
    }
}

impl Default for HashFamily {
    /// The family built from [`DEFAULT_SEEDS`](super::DEFAULT_SEEDS).
    fn default() -> Self {
        HashFamily {
            seeds: Box::new(DEFAULT_SEEDS),
        }
    }
}
