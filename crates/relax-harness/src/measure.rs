//! Timed execution of stencil and STREAM workloads
//!
//! Every (size, backend) pair runs to completion before the next starts.
//! The clock wraps only the kernel calls; inputs are built beforehand.
//! There are no retries: the first failing pair aborts the whole sweep so a
//! partial sample set is never returned as if it were complete.

use relax_core::{
    bytes_per_iteration, BandwidthSample, BufferKind, Field, RelaxError, Result, StencilBackend,
    StreamOp, TimingSample,
};
use relax_cpu::{new_buffers, random_field};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// How the starting field is built for each problem size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldInit {
    /// Uniform `[0, 1)` values; reseeded per size when a seed is given.
    Random { seed: Option<u64> },
    Ones,
    Zeros,
}

impl FieldInit {
    pub fn build(&self, side: usize) -> Result<Field> {
        match *self {
            FieldInit::Random { seed } => {
                if let Some(s) = seed {
                    relax_cpu::seed(s.wrapping_add(side as u64));
                }
                random_field(side)
            }
            FieldInit::Ones => Field::ones(side),
            FieldInit::Zeros => Field::zeros(side),
        }
    }
}

/// Sweep each backend `iterations` times per size, threading each output
/// into the next sweep, and record the total wall time.
pub fn measure_stencil(
    backends: &[Box<dyn StencilBackend>],
    sizes: &[usize],
    iterations: usize,
    init: FieldInit,
) -> Result<Vec<TimingSample>> {
    if iterations == 0 {
        return Err(RelaxError::InvalidArgument(
            "iterations must be at least 1".into(),
        ));
    }
    if let Some(&bad) = sizes.iter().find(|&&n| n < 2) {
        return Err(RelaxError::NoInterior { side: bad });
    }
    for backend in backends.iter().filter(|b| !b.is_conformant()) {
        warn!(
            backend = backend.name(),
            "backend does not zero output boundaries; timings only"
        );
    }

    info!(
        sizes = ?sizes,
        backends = backends.len(),
        iterations,
        "starting stencil sweep"
    );

    let mut samples = Vec::with_capacity(sizes.len() * backends.len());
    for &size in sizes {
        let input = init.build(size)?;
        for backend in backends {
            let elapsed = time_relaxation(&**backend, input.clone(), iterations)
                .map_err(|source| abort(backend.name(), size, source))?;
            debug!(
                backend = backend.name(),
                size,
                elapsed_s = elapsed.as_secs_f64(),
                "stencil sample"
            );
            samples.push(TimingSample::new(
                backend.name(),
                size,
                elapsed.as_secs_f64(),
            ));
        }
    }

    Ok(samples)
}

fn time_relaxation(
    backend: &dyn StencilBackend,
    input: Field,
    iterations: usize,
) -> Result<Duration> {
    let mut x = input;
    let start = Instant::now();
    for _ in 0..iterations {
        x = backend.relax(&x)?;
    }
    let elapsed = start.elapsed();
    std::hint::black_box(&x);
    Ok(elapsed)
}

fn abort(backend: &str, size: usize, source: RelaxError) -> RelaxError {
    error!(backend, size, error = %source, "measurement failed, aborting sweep");
    RelaxError::Measurement {
        backend: backend.to_string(),
        size,
        source: Box::new(source),
    }
}

/// Run Copy, Scale, Add and Triad once each per size and buffer kind.
///
/// Buffers are initialised once per (size, kind) and then overwritten by
/// each kernel in turn.
pub fn measure_stream(
    kinds: &[BufferKind],
    sizes: &[usize],
    scalar: f64,
) -> Result<Vec<BandwidthSample>> {
    if sizes.contains(&0) {
        return Err(RelaxError::EmptyBuffer);
    }

    info!(sizes = ?sizes, kinds = ?kinds, "starting STREAM sweep");

    let mut samples = Vec::with_capacity(sizes.len() * kinds.len() * StreamOp::ALL.len());
    for &size in sizes {
        for &kind in kinds {
            let mut buffers = new_buffers(kind, size)?;
            for op in StreamOp::ALL {
                let bytes = bytes_per_iteration(op, kind, size)?;
                let start = Instant::now();
                buffers.run(op, scalar);
                let elapsed = start.elapsed();
                std::hint::black_box(buffers.a());

                let sample = BandwidthSample {
                    op,
                    buffer_kind: kind,
                    size,
                    bytes_per_iteration: bytes,
                    elapsed_seconds: elapsed.as_secs_f64(),
                };
                debug!(
                    op = %op,
                    kind = %kind,
                    size,
                    gb_per_s = ?sample.gigabytes_per_second(),
                    "stream sample"
                );
                samples.push(sample);
            }
        }
    }

    Ok(samples)
}

/// A workload and the backends it runs on.
pub enum Workload {
    Stencil {
        backends: Vec<Box<dyn StencilBackend>>,
        init: FieldInit,
    },
    Stream {
        kinds: Vec<BufferKind>,
        scalar: f64,
    },
}

/// Samples produced by [`measure`].
#[derive(Debug, Clone, PartialEq)]
pub enum Measurements {
    Timing(Vec<TimingSample>),
    Bandwidth(Vec<BandwidthSample>),
}

impl Measurements {
    pub fn len(&self) -> usize {
        match self {
            Measurements::Timing(s) => s.len(),
            Measurements::Bandwidth(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Measure `workload` over `sizes`.
///
/// `iterations` is the number of chained sweeps for stencil workloads.
/// STREAM workloads run each kernel once per size and reject any other
/// count, so bytes-per-iteration stays exact.
pub fn measure(workload: &Workload, sizes: &[usize], iterations: usize) -> Result<Measurements> {
    match workload {
        Workload::Stencil { backends, init } => {
            measure_stencil(backends, sizes, iterations, *init).map(Measurements::Timing)
        }
        Workload::Stream { kinds, scalar } => {
            if iterations != 1 {
                return Err(RelaxError::InvalidArgument(format!(
                    "STREAM runs each kernel once per size, got {iterations} iterations"
                )));
            }
            measure_stream(kinds, sizes, *scalar).map(Measurements::Bandwidth)
        }
    }
}
