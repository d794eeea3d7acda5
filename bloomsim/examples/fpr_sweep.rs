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

use bloomsim::error::Error;
use bloomsim::evaluation::Dataset;
use bloomsim::evaluation::Evaluator;
use bloomsim::evaluation::Sweep;
use bloomsim::evaluation::SweepPoint;
use bloomsim::evaluation::UuidKeySource;
use bloomsim::hash::HashFamily;
use bloomsim::hash::DEFAULT_FAMILY_SIZE;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let dataset = Dataset::generate(4000, 4000, &mut UuidKeySource)?;
    let evaluator = Evaluator::new(dataset, HashFamily::random(DEFAULT_FAMILY_SIZE)?);

    let mut print = |point: &SweepPoint| {
        println!(
            "{:?}\t{:.6}\t(non-members {:.6}, theory {:.6})",
            point.parameter,
            point.result.false_positive_rate(),
            point.result.non_member_fpr(),
            point.result.expected_fpp(),
        )
    };

    println!("False positive rate by number of hash functions (m = 1000):");
    evaluator.sweep_with(&Sweep::over_num_hashes(1000, 1..=20), &mut print)?;

    println!("\nFalse positive rate by filter size (k = 1):");
    let sizes = Sweep::stepped_sizes(100, 50_000, 2_500)?;
    evaluator.sweep_with(&Sweep::over_sizes(sizes, 1), &mut print)?;

    Ok(())
}
