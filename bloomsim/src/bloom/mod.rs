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

//! Bloom Filter implementation for probabilistic set membership testing.
//!
//! A Bloom filter is a space-efficient probabilistic data structure used to test whether
//! an element is a member of a set. False positive matches are possible, but false negatives
//! are not. In other words, a query returns either "possibly in set" or "definitely not in set".
//!
//! # Properties
//!
//! - **No false negatives**: If a key was inserted, `contains()` with the same hash count will
//!   always return `true`
//! - **Possible false positives**: `contains()` may return `true` for keys never inserted
//! - **Fixed size**: the filter never resizes and bits are never cleared
//! - **No removal**: clearing a bit could hide other keys sharing it
//!
//! # Usage
//!
//! ```rust
//! use bloomsim::bloom::BloomFilter;
//! use bloomsim::hash::HashFamily;
//!
//! let family = HashFamily::seeded(16, 42).unwrap();
//! let mut filter = BloomFilter::new(10_000, family).unwrap();
//!
//! filter.insert("apple", 4).unwrap();
//! filter.insert("banana", 4).unwrap();
//!
//! assert!(filter.contains("apple", 4).unwrap()); // true - definitely inserted
//! assert!(!filter.contains("grape", 4).unwrap()); // false - never inserted (probably)
//!
//! println!("Bits used: {}", filter.bits_used());
//! println!("Est. FPP: {:.4}%", filter.estimated_fpp() * 100.0);
//! ```
//!
//! # Hash functions
//!
//! The number of hash functions `k` is passed to every call. It must stay the same for
//! the lifetime of a filter; the first insert (or [`BloomFilterBuilder::num_hashes`]) fixes
//! it and later calls with another value fail with `ConfigurationMismatch`. Function `i` is
//! function `i` of the filter's [`HashFamily`](crate::hash::HashFamily), so insert and query
//! address the same bits.
//!
//! # Implementation Details
//!
//! - MurmurHash3 (x86, 32-bit), one seed per hash function
//! - Bits packed in `u64` words; exactly `capacity()` bits are addressable
//!
//! # References
//!
//! - Bloom, Burton H. (1970). "Space/time trade-offs in hash coding with allowable errors"

mod builder;
mod sketch;

pub use self::builder::BloomFilterBuilder;
pub use self::builder::MAX_NUM_BITS;
pub use self::sketch::theoretical_fpp;
pub use self::sketch::BloomFilter;
