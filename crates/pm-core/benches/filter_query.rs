//! Criterion benchmarks for the per-keystroke hot path.
//!
//! Every query edit refilters the whole store, so filtering has to stay
//! cheap for a few thousand processes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pm_core::collect::{cmdline_label, ProcessRecord};
use pm_core::list::{dispatch, filter_indices, Event, Geometry, Key, ListState};

fn synthetic_records(n: u32) -> Vec<ProcessRecord> {
    let commands = [
        "/usr/lib/firefox/firefox -contentproc -childID 12",
        "cargo build --release",
        "/usr/bin/python3 -m http.server 8000",
        "node /home/dev/app/node_modules/.bin/vite",
        "sshd: dev@pts/3",
    ];
    (1..=n)
        .map(|pid| {
            let command = commands[pid as usize % commands.len()];
            ProcessRecord::new(pid, "dev", format!("{command} {pid}"))
        })
        .collect()
}

fn bench_filter_indices(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    for size in [100u32, 1_000, 5_000] {
        let records = synthetic_records(size);
        for query in ["", "py", "NODE_MODULES", "no-such-process"] {
            group.bench_with_input(
                BenchmarkId::new(format!("filter_indices/{query}"), size),
                &records,
                |b, records| {
                    b.iter(|| black_box(filter_indices(black_box(records), black_box(query))));
                },
            );
        }
    }
    group.finish();
}

fn bench_typing(c: &mut Criterion) {
    let records = synthetic_records(2_000);
    let state = ListState::with_records(Geometry::desktop(), records);
    c.bench_function("dispatch/type_query_2000", |b| {
        b.iter(|| {
            let mut state = state.clone();
            for ch in "python".chars() {
                state = dispatch(state, &Event::Key(Key::Char(ch))).0;
            }
            black_box(state.filtered_len())
        })
    });
}

fn bench_cmdline_label(c: &mut Criterion) {
    let raw = b"/usr/lib/firefox/firefox\0-contentproc\0-childID\x0012\0-isForBrowser\0";
    c.bench_function("collect/cmdline_label", |b| {
        b.iter(|| black_box(cmdline_label(black_box(raw))))
    });
}

criterion_group!(benches, bench_filter_indices, bench_typing, bench_cmdline_label);
criterion_main!(benches);
