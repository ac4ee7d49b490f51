//! Criterion benchmarks for logical-key resolution.
//!
//! Resolution sits on the per-keystroke hot path, so lookups should stay
//! in the sub-microsecond class the precomputed alias index was built for.
//!
//! Run with:
//! ```bash
//! cargo bench --package drinky-core --bench resolve_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use drinky_core::{KeyAction, KeyTable, SwitchCommand};

/// A spread of client codes covering letters, numpad, navigation,
/// modifiers (both variants), and an unmapped code.
const BENCH_CODES: &[&str] = &[
    "KeyA",
    "KeyZ",
    "Enter",
    "Escape",
    "Backspace",
    "Tab",
    "Space",
    "F1",
    "F12",
    "ControlLeft",
    "ControlRight",
    "ShiftRight",
    "MetaLeft",
    "ArrowLeft",
    "ArrowDown",
    "Numpad4",
    "NumpadEnter",
    "Digit1",
    "Digit0",
    "NoSuchCode",
];

fn bench_resolve(c: &mut Criterion) {
    let table = KeyTable::new().expect("static table must validate");
    let mut group = c.benchmark_group("keymap_resolve");

    // Single lookup (typical per-event cost)
    group.bench_function("resolve_single", |b| {
        b.iter(|| table.resolve(black_box("KeyA")))
    });

    // Modifier codes take the canonicalization path first
    group.bench_function("resolve_modifier", |b| {
        b.iter(|| table.resolve(black_box("ControlRight")))
    });

    // Batch of 20 diverse codes (simulates a burst of key events)
    group.bench_function("resolve_batch_20", |b| {
        b.iter(|| {
            BENCH_CODES
                .iter()
                .map(|&code| table.resolve(black_box(code)))
                .collect::<Vec<_>>()
        })
    });

    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let table = KeyTable::new().expect("static table must validate");
    let mut group = c.benchmark_group("wire_encode");

    group.bench_function("encode_press", |b| {
        let def = table.resolve("KeyA").expect("KeyA must resolve");
        b.iter(|| {
            let command = SwitchCommand::for_key(black_box(def), KeyAction::Press);
            drinky_core::encode_command(&command)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_resolve, bench_encode);
criterion_main!(benches);
