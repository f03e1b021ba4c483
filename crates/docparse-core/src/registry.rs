use crate::schema::{ModelRef, ModelSchema};

/// Immutable lookup of model schemas by type name.
///
/// Each schema is itself a lazy static, so building a registry does not force
/// any schema until it is looked up.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    models: Vec<(&'static str, ModelRef)>,
}

impl SchemaRegistry {
    pub fn new(models: impl IntoIterator<Item = (&'static str, ModelRef)>) -> Self {
        Self {
            models: models.into_iter().collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&'static ModelSchema> {
        self.models
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, schema)| schema())
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.models.iter().map(|(n, _)| *n)
    }

    pub fn schemas(&self) -> impl Iterator<Item = &'static ModelSchema> + '_ {
        self.models.iter().map(|(_, schema)| schema())
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
