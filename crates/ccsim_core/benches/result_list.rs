//! Result aggregation and setup file benchmarks.
//!
//! Run with: `cargo bench -p ccsim_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use ccsim_core::charset::Latin1Charset;
use ccsim_core::loader::Loader;
use ccsim_core::object::SimObject;
use ccsim_core::result::{SimulationResult, Statistic};
use ccsim_core::result_list::ResultList;
use ccsim_core::setup::Setup;
use ccsim_core::translator::NullTranslator;
use ccsim_test_utils::fixtures::{planet_setup, recorded_battles};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Outcome `n` of a series: rotates which units get captured.
fn outcome(before: &Setup, n: usize) -> Setup {
    let mut after = before.clone();
    let slot = n % after.num_ships();
    let ship = after.ship_mut(slot).unwrap();
    ship.set_owner(if n % 3 == 0 { 0 } else { 4 });
    ship.set_damage((n * 7 % 100) as i32);
    after
}

pub fn result_list_benchmark(c: &mut Criterion) {
    let before = planet_setup();
    let outcomes: Vec<_> = (0..16).map(|n| outcome(&before, n)).collect();
    let stats = vec![Statistic::new(10); before.num_objects()];
    let battles = recorded_battles(1);

    c.bench_function("result_list_add_1000", |b| {
        b.iter(|| {
            let mut list = ResultList::new();
            for index in 0..1000 {
                let total = if index < 500 { 16 } else { 64 };
                let result = SimulationResult::new(1 + (index % 4) as i32, total, index as i32)
                    .with_battles(battles.clone());
                list.add_result(&before, &outcomes[index % outcomes.len()], &stats, &result);
            }
            black_box(list.cumulative_weight())
        })
    });
}

pub fn loader_benchmark(c: &mut Criterion) {
    let mut setup = planet_setup();
    for id in 100..160 {
        setup.add_ship().set_id(id);
    }
    let loader = Loader::new(&Latin1Charset, &NullTranslator);
    let mut bytes = Vec::new();
    loader.save(&mut bytes, &setup).unwrap();

    c.bench_function("loader_load_62_ships", |b| {
        b.iter(|| {
            let mut loaded = Setup::new();
            let version = loader.load(&mut black_box(&bytes[..]), &mut loaded);
            black_box((version.is_ok(), loaded.num_objects()))
        })
    });
}

criterion_group!(benches, result_list_benchmark, loader_benchmark);
criterion_main!(benches);
