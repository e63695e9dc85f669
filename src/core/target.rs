// Attribute access capability for element-like handles, plus an in-memory element.
use std::collections::{BTreeMap, HashMap};

/// Anything that can answer "does it carry this attribute" and "what is its value".
///
/// DOM bindings, parsed HTML nodes, and test doubles all fit behind this trait.
pub trait AttributeTarget {
    fn has_attribute(&self, name: &str) -> bool;

    fn get_attribute(&self, name: &str) -> Option<String>;
}

impl<T: AttributeTarget + ?Sized> AttributeTarget for &T {
    fn has_attribute(&self, name: &str) -> bool {
        (**self).has_attribute(name)
    }

    fn get_attribute(&self, name: &str) -> Option<String> {
        (**self).get_attribute(name)
    }
}

impl AttributeTarget for BTreeMap<String, String> {
    fn has_attribute(&self, name: &str) -> bool {
        self.contains_key(name)
    }

    fn get_attribute(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl AttributeTarget for HashMap<String, String> {
    fn has_attribute(&self, name: &str) -> bool {
        self.contains_key(name)
    }

    fn get_attribute(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AttributeMap {
    attributes: BTreeMap<String, String>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(name)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl From<BTreeMap<String, String>> for AttributeMap {
    fn from(attributes: BTreeMap<String, String>) -> Self {
        Self { attributes }
    }
}

impl AttributeTarget for AttributeMap {
    fn has_attribute(&self, name: &str) -> bool {
        self.attributes.has_attribute(name)
    }

    fn get_attribute(&self, name: &str) -> Option<String> {
        self.attributes.get_attribute(name)
    }
}

#[cfg(test)]
mod tests {
    use super::{AttributeMap, AttributeTarget};
    use std::collections::HashMap;

    #[test]
    fn attribute_map_tracks_presence_separately_from_value() {
        let mut element = AttributeMap::new().with_attribute("data-options", "");
        assert_eq!(element.len(), 1);
        assert!(element.has_attribute("data-options"));
        assert_eq!(element.get_attribute("data-options").as_deref(), Some(""));
        assert!(!element.has_attribute("data-other"));

        assert_eq!(element.remove_attribute("data-options").as_deref(), Some(""));
        assert!(element.is_empty());
        assert!(!element.has_attribute("data-options"));
    }

    #[test]
    fn plain_maps_and_references_are_targets() {
        let mut attrs = HashMap::new();
        attrs.insert("id".to_string(), "hero".to_string());
        fn id_of<T: AttributeTarget>(target: T) -> Option<String> {
            target.get_attribute("id")
        }

        let by_ref: &dyn AttributeTarget = &attrs;
        assert!(by_ref.has_attribute("id"));
        assert_eq!(id_of(&attrs).as_deref(), Some("hero"));
        assert_eq!(id_of(by_ref).as_deref(), Some("hero"));
    }
}
