//! Decoded property values handed to struct builders.

use std::any::Any;

use indexmap::IndexMap;

use super::property::{PropertyId, StructProperty};
use crate::error::ErrorBuilder;

/// The values decoded for each property of a struct reader, keyed by
/// property identity.
///
/// Values are retrieved through the [`StructProperty`] handles returned when
/// the properties were declared, so the output type is known statically.
#[derive(Default)]
pub struct PropertyValues {
    values: IndexMap<PropertyId, Box<dyn Any + Send>>,
}

impl PropertyValues {
    /// An empty set of values.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, id: PropertyId, value: Box<dyn Any + Send>) {
        self.values.insert(id, value);
    }

    /// Borrows the value decoded for `property`.
    pub fn get<O, EB, CTX>(&self, property: &StructProperty<O, EB, CTX>) -> Option<&O>
    where
        O: 'static,
        EB: ErrorBuilder + 'static,
        CTX: 'static,
    {
        self.values.get(&property.id())?.downcast_ref::<O>()
    }

    /// Moves the value decoded for `property` out of the collection.
    pub fn take<O, EB, CTX>(&mut self, property: &StructProperty<O, EB, CTX>) -> Option<O>
    where
        O: 'static,
        EB: ErrorBuilder + 'static,
        CTX: 'static,
    {
        let boxed = self.values.shift_remove(&property.id())?;
        boxed.downcast::<O>().ok().map(|value| *value)
    }

    /// Whether a value was stored for `property`.
    pub fn contains<O, EB, CTX>(&self, property: &StructProperty<O, EB, CTX>) -> bool
    where
        O: 'static,
        EB: ErrorBuilder + 'static,
        CTX: 'static,
    {
        self.values.contains_key(&property.id())
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no value was stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl std::fmt::Debug for PropertyValues {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.values.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StandardErrors;
    use crate::reader::primitive::{number, string};
    use crate::reader::property::Property;

    #[test]
    fn test_get_and_take() {
        let name = StructProperty::new(Property::required("name", string::<StandardErrors, ()>()));
        let age =
            StructProperty::new(Property::required("age", number::<u32, StandardErrors, ()>()));

        let mut values = PropertyValues::new();
        values.insert(name.id(), Box::new("Alice".to_string()));
        values.insert(age.id(), Box::new(30u32));

        assert_eq!(values.len(), 2);
        assert_eq!(values.get(&name).map(String::as_str), Some("Alice"));
        assert_eq!(values.take(&age), Some(30));
        assert!(!values.contains(&age));
        assert_eq!(values.take(&age), None);
    }

    #[test]
    fn test_same_name_distinct_handles() {
        let first = StructProperty::new(Property::required("id", string::<StandardErrors, ()>()));
        let second = StructProperty::new(Property::required("id", string::<StandardErrors, ()>()));

        let mut values = PropertyValues::new();
        values.insert(first.id(), Box::new("one".to_string()));

        assert!(values.contains(&first));
        assert!(!values.contains(&second));
        assert!(!values.is_empty());
    }
}
