//! Benchmark workloads for the Keel engine primitives.
//!
//! Deterministic inputs shared by the criterion benches:
//!
//! - [`churn_script`]: seeded allocate/release sequence for pool benches
//! - [`input_burst`]: one frame's worth of mixed input events
//! - [`NullDiagnostics`]: collaborator that discards everything, so overflow
//!   reporting does not dominate queue timings

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::fmt;

use keel_core::Diagnostics;
use keel_input::{EventRecord, InputEvent, KeyCode, MouseButton, Vec2};
use log::Level;
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// One step of a pool workload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChurnOp {
    /// Allocate a new object.
    Allocate,
    /// Release the live object at this position (modulo live count).
    Release(usize),
}

/// Generate `len` pool operations that hover around `target_live` objects.
///
/// Allocation is favoured below the target and release above it, so the
/// live set oscillates instead of growing without bound.
pub fn churn_script(seed: u64, len: usize, target_live: usize) -> Vec<ChurnOp> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut live = 0usize;
    let mut ops = Vec::with_capacity(len);
    for _ in 0..len {
        let bias = if live < target_live { 70 } else { 30 };
        if live == 0 || rng.next_u32() % 100 < bias {
            ops.push(ChurnOp::Allocate);
            live += 1;
        } else {
            ops.push(ChurnOp::Release(rng.next_u32() as usize));
            live -= 1;
        }
    }
    ops
}

/// A frame of `n` input events cycling through pointer, key, and wheel
/// traffic, timestamped from `start_us`.
pub fn input_burst(start_us: u64, n: usize) -> Vec<EventRecord> {
    (0..n)
        .map(|i| {
            let t = start_us + i as u64;
            let event = match i % 4 {
                0 => InputEvent::MouseMove {
                    position: Vec2::new(i as f32, (n - i) as f32),
                },
                1 => InputEvent::KeyDown {
                    key: KeyCode((i % 256) as u16),
                },
                2 => InputEvent::Wheel {
                    delta: Vec2::new(0.0, -1.0),
                },
                _ => InputEvent::MouseDown {
                    button: MouseButton::Left,
                    position: Vec2::ZERO,
                },
            };
            EventRecord::new(t, event)
        })
        .collect()
}

/// [`Diagnostics`] that ignores every report.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullDiagnostics;

impl Diagnostics for NullDiagnostics {
    fn log(&self, _level: Level, _target: &str, _message: fmt::Arguments<'_>) {}
}
