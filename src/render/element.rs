use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::core::{ElementId, EventKind};

/// Mutable visual state of one element held by the headless surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementState {
    pub parent: Option<ElementId>,
    pub classes: SmallVec<[String; 4]>,
    pub styles: IndexMap<String, String>,
    pub attributes: IndexMap<String, String>,
    pub text: String,
    pub subscriptions: SmallVec<[EventKind; 2]>,
}

impl ElementState {
    #[must_use]
    pub fn with_classes(parent: Option<ElementId>, classes: &[&str]) -> Self {
        let mut state = Self {
            parent,
            ..Self::default()
        };
        for class in classes {
            state.add_class(class);
        }
        state
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_owned());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    #[must_use]
    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }

    #[must_use]
    pub fn is_subscribed(&self, kind: EventKind) -> bool {
        self.subscriptions.contains(&kind)
    }
}
