//! Benchmarks for the STREAM kernels over both buffer representations

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use relax_core::{bytes_per_iteration, BufferKind, StreamOp, STREAM_SCALAR};
use relax_cpu::new_buffers;

fn bench_stream_ops(c: &mut Criterion) {
    let sizes = [10, 100, 10_000, 1_000_000];

    for op in StreamOp::ALL {
        let mut group = c.benchmark_group(format!("stream_{}", op.as_str().to_lowercase()));

        for &size in sizes.iter() {
            for kind in BufferKind::ALL {
                let bytes = bytes_per_iteration(op, kind, size).unwrap();
                group.throughput(Throughput::Bytes(bytes));

                let mut buffers = new_buffers(kind, size).unwrap();
                group.bench_function(BenchmarkId::new(kind.as_str(), size), |bench| {
                    bench.iter(|| {
                        buffers.run(op, STREAM_SCALAR);
                        black_box(buffers.c()[0])
                    });
                });
            }
        }

        group.finish();
    }
}

criterion_group!(benches, bench_stream_ops);
criterion_main!(benches);
