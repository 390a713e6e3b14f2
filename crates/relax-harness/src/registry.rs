//! Name-based backend registration

use relax_accel::{AcceleratorBackend, AcceleratorConfig};
use relax_core::{Result, StencilBackend, StencilKind};
use relax_cpu::cpu_backend;

/// Resolve registration names into backends.
///
/// Accelerator backends open their device here, so a missing device is
/// reported before any sample is taken.
pub fn resolve_backends<S: AsRef<str>>(
    names: &[S],
    accelerator: &AcceleratorConfig,
) -> Result<Vec<Box<dyn StencilBackend>>> {
    names
        .iter()
        .map(|name| {
            let kind: StencilKind = name.as_ref().parse()?;
            match cpu_backend(kind) {
                Some(backend) => Ok(backend),
                None => {
                    let backend: Box<dyn StencilBackend> =
                        Box::new(AcceleratorBackend::new(accelerator)?);
                    Ok(backend)
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use relax_core::{ErrorCategory, RelaxError};

    #[test]
    fn test_resolves_cpu_names_in_order() {
        let backends =
            resolve_backends(&["typed", "scalar"], &AcceleratorConfig::default()).unwrap();
        let names: Vec<_> = backends.iter().map(|b| b.name()).collect();
        assert_eq!(names, vec!["typed", "scalar"]);
    }

    #[test]
    fn test_unknown_name() {
        let err = resolve_backends(&["numba"], &AcceleratorConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, RelaxError::UnknownBackend(ref n) if n == "numba"));
    }

    #[test]
    fn test_accelerator_without_device_is_resource_error() {
        let err = resolve_backends(&["scalar", "accelerator"], &AcceleratorConfig::default())
            .err()
            .unwrap();
        assert_eq!(err.category(), ErrorCategory::Resource);
    }

    #[test]
    fn test_accelerator_when_enabled() {
        let backends =
            resolve_backends(&["accelerator"], &AcceleratorConfig::enabled()).unwrap();
        assert_eq!(backends[0].kind(), StencilKind::AcceleratorResident);
    }
}
