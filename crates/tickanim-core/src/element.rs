//! Animation targets.
//!
//! Properties write their interpolated values through [`AnimationTarget`]. The
//! in-memory [`Element`] is a minimal document element with string attributes;
//! hosts backed by a real document implement the trait on their own handle.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Attribute surface of an animated element.
pub trait AnimationTarget {
    /// Current value of an attribute, if set.
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Assign an attribute, replacing any previous value.
    fn set_attribute(&mut self, name: &str, value: String);
}

/// Element handle shared between the caller and its animations.
///
/// Animations never own the element; the caller controls its lifetime.
pub type SharedTarget = Rc<RefCell<dyn AnimationTarget>>;

/// In-memory element with ordered string attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    tag: String,
    id: Option<String>,
    attributes: BTreeMap<String, String>,
    writes: u64,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Seed an attribute without counting it as an animation write.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(name)
    }

    /// Number of `set_attribute` calls received so far.
    pub fn write_count(&self) -> u64 {
        self.writes
    }

    /// Wrap the element in a shared handle.
    pub fn into_shared(self) -> Rc<RefCell<Element>> {
        Rc::new(RefCell::new(self))
    }
}

impl AnimationTarget for Element {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    fn set_attribute(&mut self, name: &str, value: String) {
        self.writes += 1;
        self.attributes.insert(name.to_string(), value);
    }
}
