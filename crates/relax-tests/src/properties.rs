//! Property tests over arbitrary fields

#[cfg(test)]
mod tests {
    use crate::utils::*;
    use proptest::prelude::*;
    use relax_core::{Field, StencilBackend};
    use relax_cpu::ScalarBackend;

    fn field_strategy() -> impl Strategy<Value = Field> {
        (2usize..12).prop_flat_map(|side| {
            prop::collection::vec(-1.0e3f64..1.0e3, side * side)
                .prop_map(move |data| Field::from_vec(side, data).unwrap())
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_boundary_zero_after_sweep(field in field_strategy()) {
            for backend in conformant_backends() {
                let out = backend.relax(&field).unwrap();
                prop_assert!(out.has_zero_boundary(), "{}", backend.name());
            }
        }

        #[test]
        fn prop_interior_is_neighbour_mean(field in field_strategy()) {
            let out = ScalarBackend.relax(&field).unwrap();
            let mut x = field.clone();
            relax_core::BoundaryPolicy::Dirichlet.apply(&mut x);
            let n = field.side();
            for i in 1..n - 1 {
                for j in 1..n - 1 {
                    let mean = 0.25
                        * (x.get(i - 1, j) + x.get(i + 1, j) + x.get(i, j - 1) + x.get(i, j + 1));
                    prop_assert!(approx_eq(out.get(i, j), mean, 1e-9));
                }
            }
        }

        #[test]
        fn prop_backends_agree(field in field_strategy()) {
            let expected = ScalarBackend.relax(&field).unwrap();
            for backend in conformant_backends() {
                let out = backend.relax(&field).unwrap();
                prop_assert!(fields_approx_eq(&out, &expected, DEFAULT_TOL), "{}", backend.name());
            }
        }

        #[test]
        fn prop_sweep_never_grows_max_norm(field in field_strategy()) {
            let norm = |f: &Field| f.as_array().iter().fold(0.0f64, |m, v| m.max(v.abs()));
            let out = ScalarBackend.relax(&field).unwrap();
            prop_assert!(norm(&out) <= norm(&field));
        }
    }
}
