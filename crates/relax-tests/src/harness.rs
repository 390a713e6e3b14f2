//! Harness plans run end to end over real backends

#[cfg(test)]
mod tests {
    use crate::utils::*;
    use relax_accel::AcceleratorConfig;
    use relax_core::{BufferKind, ErrorCategory, Field, StencilKind};
    use relax_cpu::{all_cpu_backends, cpu_backends, ScalarBackend};
    use relax_harness::{
        measure, measure_stencil, resolve_backends, validate_backends, FieldInit, HarnessConfig,
        JsonSink, LegacyTable, Measurements, ResultSink, SnapshotStore, Workload,
    };

    #[test]
    fn test_one_sample_per_backend_and_size() {
        let backends = cpu_backends();
        let samples = measure_stencil(&backends, &[3, 10], 5, FieldInit::Ones).unwrap();
        assert_eq!(samples.len(), 2 * backends.len());
        assert!(samples.iter().all(|s| s.elapsed_seconds >= 0.0));
        assert_eq!(samples[0].size, 3);
        assert_eq!(samples.last().unwrap().size, 10);
    }

    #[test]
    fn test_accelerator_missing_fails_before_timing() {
        let err = resolve_backends(&["scalar", "accelerator"], &AcceleratorConfig::default())
            .err()
            .unwrap();
        assert_eq!(err.category(), ErrorCategory::Resource);
    }

    #[test]
    fn test_accelerator_timed_when_enabled() {
        let backends =
            resolve_backends(&["accelerator"], &AcceleratorConfig::enabled()).unwrap();
        let samples = measure_stencil(&backends, &[4], 3, FieldInit::Zeros).unwrap();
        assert_eq!(samples[0].backend, StencilKind::AcceleratorResident.as_str());
    }

    #[test]
    fn test_stream_workload_through_measure() {
        let workload = Workload::Stream {
            kinds: BufferKind::ALL.to_vec(),
            scalar: 3.0,
        };
        match measure(&workload, &[10, 100], 1).unwrap() {
            Measurements::Bandwidth(samples) => assert_eq!(samples.len(), 2 * 2 * 4),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_validation_flags_only_unzeroed() {
        let field = FieldInit::Random { seed: Some(9) }.build(12).unwrap();
        let report =
            validate_backends(&ScalarBackend, &all_cpu_backends(), &field, DEFAULT_TOL).unwrap();
        let flagged: Vec<_> = report.nonconformant().map(|r| r.backend.as_str()).collect();
        assert_eq!(flagged, vec!["shift-unzeroed"]);
    }

    #[test]
    fn test_default_config_plans_run() {
        let mut config = HarnessConfig::default();
        config.stencil.sizes = vec![3, 5];
        config.stencil.iterations = 2;
        let backends = resolve_backends(&config.stencil.backends, &config.accelerator).unwrap();
        let mut samples = measure_stencil(
            &backends,
            &config.stencil.sizes,
            config.stencil.iterations,
            FieldInit::Random { seed: Some(1) },
        )
        .unwrap();
        samples.extend(LegacyTable::builtin().samples());

        let mut sink = JsonSink::new(Vec::new());
        sink.write_timings(&samples).unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert!(out.contains("\"slice\""));
        assert!(out.contains("cupy_gauss_seidel"));
    }

    #[test]
    fn test_snapshot_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relax_output.json");

        let field = relax_n(&ScalarBackend, &Field::full(10, 2.0).unwrap(), 20);
        let mut store = SnapshotStore::new();
        let key = store.insert("scalar", field.clone());
        store.save(&path).unwrap();

        let loaded = SnapshotStore::load(&path).unwrap();
        assert_eq!(key, "/scalar/x");
        assert_eq!(loaded.get(&key), Some(&field));
    }
}
