mod discriminator;
mod generator;

pub use discriminator::{Discriminator, DiscriminatorConfig, DIS_PREFIX};
pub use generator::{Generator, GeneratorConfig, GeneratorTrainingNet, GEN_PREFIX};

/// Split `"<net>.<layer>.<field>"` into `(layer, field)` when it belongs to `prefix`.
pub(crate) fn split_name<'a>(prefix: &str, name: &'a str) -> Option<(&'a str, &'a str)> {
    let rest = name.strip_prefix(prefix)?.strip_prefix('.')?;
    rest.split_once('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_name() {
        assert_eq!(split_name("gen", "gen.fc1.weight"), Some(("fc1", "weight")));
        assert_eq!(split_name("gen", "dis.fc1.weight"), None);
        assert_eq!(split_name("gen", "generator.fc1.weight"), None);
        assert_eq!(split_name("gen", "gen.fc1"), None);
    }
}
