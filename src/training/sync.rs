use crate::error::ModelError;
use crate::model::ModelHandle;

/// Copy every parameter of `dest` that also exists in `source`, by value.
///
/// Parameters only `dest` has are left alone. Every matching pair is
/// shape-checked before anything is written, so a `ShapeMismatch` leaves
/// `dest` exactly as it was. Returns the number of parameters copied.
pub fn sync<S, D>(source: &S, dest: &mut D) -> Result<usize, ModelError>
where
    S: ModelHandle + ?Sized,
    D: ModelHandle + ?Sized,
{
    let source_params = source.parameters()?;
    let dest_params = dest.parameters()?;

    let mut updates = Vec::new();
    for (name, current) in dest_params.iter() {
        if let Some(value) = source_params.get(name) {
            value.check_shape(name, current.shape())?;
            updates.push((name, value));
        }
    }

    for (name, value) in &updates {
        dest.set_parameter(name, value)?;
    }

    log::trace!(
        "synced {} parameters {} -> {}",
        updates.len(),
        source.role(),
        dest.role()
    );
    Ok(updates.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::testing::{call_log, FakeHandle};
    use crate::model::{GanModels, ModelConfig, Role};

    #[test]
    fn test_sync_copies_matching_names() {
        let log = call_log();
        let source = FakeHandle::new(Role::GeneratorTraining, &log)
            .with_param("shared", vec![2], 3.0)
            .with_param("source_only", vec![1], 9.0);
        let mut dest = FakeHandle::new(Role::DiscriminatorTraining, &log)
            .with_param("shared", vec![2], 0.0)
            .with_param("dest_only", vec![3], 7.0);

        let copied = sync(&source, &mut dest).unwrap();
        assert_eq!(copied, 1);
        assert_eq!(dest.param("shared").values(), &[3.0, 3.0]);
        assert_eq!(dest.param("dest_only").values(), &[7.0, 7.0, 7.0]);
        assert!(!dest.parameters().unwrap().contains("source_only"));
    }

    #[test]
    fn test_sync_is_idempotent() {
        let log = call_log();
        let source = FakeHandle::new(Role::GeneratorTraining, &log)
            .with_param("a", vec![2, 2], 1.5)
            .with_param("b", vec![3], -2.0);
        let mut dest = FakeHandle::new(Role::GeneratorInference, &log)
            .with_param("a", vec![2, 2], 0.0)
            .with_param("b", vec![3], 0.0);

        sync(&source, &mut dest).unwrap();
        let once = dest.parameters().unwrap();
        sync(&source, &mut dest).unwrap();
        assert_eq!(dest.parameters().unwrap(), once);
    }

    #[test]
    fn test_shape_mismatch_leaves_dest_unmodified() {
        let log = call_log();
        let source = FakeHandle::new(Role::GeneratorTraining, &log)
            .with_param("a", vec![2], 1.0)
            .with_param("b", vec![4], 1.0);
        let mut dest = FakeHandle::new(Role::DiscriminatorTraining, &log)
            .with_param("a", vec![2], 0.0)
            .with_param("b", vec![5], 0.0);
        let before = dest.parameters().unwrap();

        let err = sync(&source, &mut dest).unwrap_err();
        match err {
            ModelError::ShapeMismatch {
                name,
                expected,
                found,
            } => {
                assert_eq!(name, "b");
                assert_eq!(expected, vec![5]);
                assert_eq!(found, vec![4]);
            }
            other => panic!("expected ShapeMismatch, got {other:?}"),
        }
        assert_eq!(dest.parameters().unwrap(), before);
        assert!(log.borrow().iter().all(|entry| !entry.starts_with("set")));
    }

    #[test]
    fn test_sync_between_burn_handles() {
        let mut models = GanModels::build(&ModelConfig {
            hidden_dim: 8,
            ..Default::default()
        })
        .unwrap();

        let copied = sync(&models.generator, &mut models.sampler).unwrap();
        assert_eq!(copied, 4);
        let gen = models.generator.parameters().unwrap();
        for (name, value) in models.sampler.parameters().unwrap().iter() {
            assert_eq!(gen.get(name), Some(value));
        }

        let copied = sync(&models.discriminator, &mut models.generator).unwrap();
        assert_eq!(copied, 4);
        let dis = models.discriminator.parameters().unwrap();
        let gen = models.generator.parameters().unwrap();
        for (name, value) in dis.iter() {
            assert_eq!(gen.get(name), Some(value));
        }
    }
}
