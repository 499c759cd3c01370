//! Resolved per-element property maps.

use strum::{EnumCount, IntoEnumIterator};

use super::declaration::Priority;
use super::properties::Property;
use super::value::Value;

/// A resolved value and the priority of the declaration that set it.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedEntry {
    /// The resolved value.
    pub value: Value,
    /// Priority of the winning declaration.
    pub priority: Priority,
}

/// One entry per registry property, indexed by the property's discriminant.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyMap {
    entries: Vec<ComputedEntry>,
}

impl PropertyMap {
    /// Every property at its initial value with normal priority.
    #[must_use]
    pub fn initial() -> Self {
        let mut entries = Vec::with_capacity(Property::COUNT);
        entries.extend(Property::iter().map(|property| ComputedEntry {
            value: property.initial_value(),
            priority: Priority::Normal,
        }));
        Self { entries }
    }

    /// The resolved value of `property`.
    #[must_use]
    pub fn get(&self, property: Property) -> &Value {
        &self.entries[property as usize].value
    }

    /// Apply a declaration under the priority guard: an entry that already
    /// holds an important value is never replaced.
    pub fn apply(&mut self, property: Property, value: Value, priority: Priority) {
        let entry = &mut self.entries[property as usize];
        if entry.priority != Priority::Important {
            *entry = ComputedEntry { value, priority };
        }
    }

    /// Replace the value of `property`, keeping its priority.
    pub fn replace_value(&mut self, property: Property, value: Value) {
        self.entries[property as usize].value = value;
    }

    /// Iterate over every property and its entry in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (Property, &ComputedEntry)> {
        Property::iter().zip(self.entries.iter())
    }
}

impl Default for PropertyMap {
    fn default() -> Self {
        Self::initial()
    }
}
