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

//! # bloomsim
//!
//! A Bloom filter addressed by an explicit family of seeded MurmurHash3 functions, and a
//! harness that measures the filter's false positive rate as its size and number of hash
//! functions vary.
//!
//! The crate is divided into modules:
//!
//! - [`hash`]: the seeded hash family mapping keys to bit positions
//! - [`bloom`]: the filter itself
//! - [`evaluation`]: datasets, single-configuration trials and parameter sweeps
//! - [`error`]: the error type shared by all of the above

#![deny(missing_docs)]

pub mod bloom;
pub mod error;
pub mod evaluation;
pub mod hash;
