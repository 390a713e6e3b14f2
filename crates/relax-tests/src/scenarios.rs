//! End-to-end relaxation scenarios with hand-computed results

#[cfg(test)]
mod tests {
    use crate::utils::*;
    use relax_core::Field;
    use relax_cpu::ScalarBackend;

    #[test]
    fn test_ones_4x4_single_sweep() {
        // Each interior cell of a 4x4 has two boundary neighbours and two
        // interior neighbours.
        let out = relax_n(&ScalarBackend, &Field::ones(4).unwrap(), 1);
        assert!(out.has_zero_boundary());
        for (i, j) in [(1, 1), (1, 2), (2, 1), (2, 2)] {
            assert_eq!(out.get(i, j), 0.5, "cell ({i}, {j})");
        }
    }

    #[test]
    fn test_ones_3x3_single_sweep_is_zero() {
        let field = Field::from_vec(3, vec![1.0; 9]).unwrap();
        for backend in conformant_backends() {
            let out = backend.relax(&field).unwrap();
            assert_eq!(out, Field::zeros(3).unwrap(), "{}", backend.name());
        }
    }

    #[test]
    fn test_zero_field_is_fixed_point() {
        let zeros = Field::zeros(6).unwrap();
        for backend in conformant_backends() {
            assert_eq!(relax_n(&*backend, &zeros, 100), zeros, "{}", backend.name());
        }
    }

    #[test]
    fn test_iteration_decays_towards_zero() {
        let field = Field::full(8, 10.0).unwrap();
        let early = relax_n(&ScalarBackend, &field, 5);
        let late = relax_n(&ScalarBackend, &field, 500);
        let max = |f: &Field| f.as_array().iter().copied().fold(0.0, f64::max);
        assert!(max(&late) < max(&early));
        assert!(approx_eq(max(&late), 0.0, 1e-6));
    }
}
