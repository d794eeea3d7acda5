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

use bloomsim::bloom::BloomFilter;
use bloomsim::bloom::BloomFilterBuilder;
use bloomsim::error::ErrorKind;
use bloomsim::hash::HashFamily;
use googletest::assert_that;
use googletest::prelude::near;

fn keys(prefix: &str, n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{prefix}-{i}")).collect()
}

#[test]
fn test_no_false_negatives_with_interleaving() {
    let family = HashFamily::seeded(16, 1).unwrap();
    let mut filter = BloomFilter::new(20_000, family).unwrap();

    let members = keys("member", 2000);
    for (i, key) in members.iter().enumerate() {
        filter.insert(key, 5).unwrap();
        // earlier keys stay present while later ones arrive
        if i % 100 == 0 {
            for earlier in &members[..=i] {
                assert!(filter.contains(earlier, 5).unwrap(), "lost {earlier}");
            }
        }
    }
    for key in &members {
        assert!(filter.contains(key, 5).unwrap(), "lost {key}");
    }
}

#[test]
fn test_empty_filter_contains_nothing() {
    let filter = BloomFilter::new(1000, HashFamily::default()).unwrap();
    for key in keys("probe", 1000) {
        assert!(!filter.contains(&key, 3).unwrap());
    }
    assert!(filter.is_empty());
    assert_eq!(filter.num_hashes(), None);
}

#[test]
fn test_invalid_sizes() {
    let err = BloomFilter::new(0, HashFamily::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidSize);

    let err = BloomFilterBuilder::with_size(u64::MAX).build().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidSize);
}

#[test]
fn test_determinism() {
    let family = HashFamily::seeded(8, 99).unwrap();
    let mut a = BloomFilter::new(4096, family.clone()).unwrap();
    let mut b = BloomFilter::new(4096, family).unwrap();

    for key in keys("k", 300) {
        a.insert(&key, 4).unwrap();
        b.insert(&key, 4).unwrap();
    }
    assert_eq!(a, b);

    for key in keys("k", 300).iter().chain(keys("q", 3000).iter()) {
        assert_eq!(a.contains(key, 4).unwrap(), b.contains(key, 4).unwrap());
    }
}

#[test]
fn test_different_families_differ() {
    let mut a = BloomFilter::new(4096, HashFamily::seeded(4, 1).unwrap()).unwrap();
    let mut b = BloomFilter::new(4096, HashFamily::seeded(4, 2).unwrap()).unwrap();
    for key in keys("k", 100) {
        a.insert(&key, 4).unwrap();
        b.insert(&key, 4).unwrap();
    }
    assert_ne!(a, b);
}

#[test]
fn test_idempotent_insertion() {
    let mut once = BloomFilter::new(777, HashFamily::default()).unwrap();
    let mut twice = BloomFilter::new(777, HashFamily::default()).unwrap();
    for key in keys("k", 50) {
        once.insert(&key, 6).unwrap();
        twice.insert(&key, 6).unwrap();
        twice.insert(&key, 6).unwrap();
    }
    assert_eq!(once, twice);
    assert_eq!(once.bits_used(), twice.bits_used());
}

#[test]
fn test_small_filter_false_positive_rate() {
    // m = 1000, k = 1, n = 10: about 1 - (1 - 1/1000)^10 of non-members collide
    let mut filter = BloomFilter::new(1000, HashFamily::seeded(1, 2024).unwrap()).unwrap();
    let members = keys("member", 10);
    for key in &members {
        filter.insert(key, 1).unwrap();
    }
    for key in &members {
        assert!(filter.contains(key, 1).unwrap());
    }

    let probes = keys("probe", 20_000);
    let false_positives = probes
        .iter()
        .filter(|key| filter.contains(key, 1).unwrap())
        .count();
    let rate = false_positives as f64 / probes.len() as f64;
    assert_that!(rate, near(0.0099, 0.005));
}

#[test]
fn test_with_accuracy_meets_target() {
    let mut filter = BloomFilterBuilder::with_accuracy(1000, 0.01)
        .hash_family(HashFamily::seeded(16, 5).unwrap())
        .build()
        .unwrap();
    assert_eq!(filter.num_hashes(), Some(7));

    for key in keys("member", 1000) {
        filter.insert(&key, 7).unwrap();
    }
    let probes = keys("probe", 20_000);
    let false_positives = probes
        .iter()
        .filter(|key| filter.contains(key, 7).unwrap())
        .count();
    let rate = false_positives as f64 / probes.len() as f64;
    assert_that!(rate, near(0.01, 0.006));
    assert_that!(filter.estimated_fpp(), near(0.01, 0.006));
}

#[test]
fn test_builder_rejects_bad_accuracy() {
    let err = BloomFilterBuilder::with_accuracy(0, 0.01).build().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let err = BloomFilterBuilder::with_accuracy(100, 1.5).build().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    // suggests 7 hashes, more than a 4-function family provides
    let err = BloomFilterBuilder::with_accuracy(1000, 0.01)
        .hash_family(HashFamily::seeded(4, 0).unwrap())
        .build()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::HashIndexOutOfRange);
}

#[test]
fn test_fixed_num_hashes_rejects_other_counts() {
    let mut filter = BloomFilterBuilder::with_size(512)
        .num_hashes(2)
        .build()
        .unwrap();
    assert_eq!(filter.num_hashes(), Some(2));

    // even before anything was inserted
    let err = filter.contains("a", 3).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigurationMismatch);
    let err = filter.insert("a", 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigurationMismatch);

    filter.insert("a", 2).unwrap();
    assert!(filter.contains("a", 2).unwrap());
}

#[test]
fn test_with_accuracy_below_default_seed_count() {
    let mut filter = BloomFilterBuilder::with_accuracy(1000, 1e-4).build().unwrap();
    assert_eq!(filter.num_hashes(), Some(14));

    for key in keys("member", 1000) {
        filter.insert(&key, 14).unwrap();
    }
    for key in keys("member", 1000) {
        assert!(filter.contains(&key, 14).unwrap());
    }
    let probes = keys("probe", 20_000);
    let false_positives = probes
        .iter()
        .filter(|key| filter.contains(key, 14).unwrap())
        .count();
    assert_that!(false_positives as f64 / probes.len() as f64, near(0.0001, 0.001));
}
