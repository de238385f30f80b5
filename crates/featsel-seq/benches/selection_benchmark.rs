// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use featsel_model::subset::FeatureSubset;
use featsel_search::objective::FnObjective;
use featsel_seq::algorithm::SelectionAlgorithm;
use featsel_seq::config::SelectionConfig;
use featsel_seq::engine::SequentialSelectionEngine;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::hint::black_box;

const FEATURE_COUNTS: [usize; 3] = [16, 32, 64];

/// A synthetic objective: each feature carries a random weight and every
/// feature beyond the eighth costs a fixed penalty, so the optimum sits
/// somewhere in the middle of the lattice.
fn synthetic_objective(num_features: usize, seed: u64) -> FnObjective<impl Fn(&FeatureSubset) -> f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let weights: Vec<f64> = (0..num_features).map(|_| rng.random_range(-1.0..1.0)).collect();

    FnObjective::new(num_features, move |s: &FeatureSubset| {
        let gain: f64 = s.iter().map(|f| weights[f.get()]).sum();
        let penalty = s.len().saturating_sub(8) as f64 * 0.25;
        gain - penalty
    })
}

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection_benchmark");

    for num_features in FEATURE_COUNTS {
        let objective = synthetic_objective(num_features, 0x5eed);
        group.throughput(Throughput::Elements(num_features as u64));

        for algorithm in SelectionAlgorithm::ALL {
            let engine = SequentialSelectionEngine::new(SelectionConfig::convergence(algorithm));
            group.bench_with_input(
                BenchmarkId::new(algorithm.name(), num_features),
                &objective,
                |b, objective| {
                    b.iter(|| {
                        let outcome = engine
                            .select(black_box(objective))
                            .unwrap_or_else(|e| panic!("{algorithm} failed: {e}"));
                        black_box(outcome.score())
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_strategies);
criterion_main!(benches);
