//! Partitioning of the input bindings
//!
//! Every binding lands in exactly one category, checked in order: a keystroke
//! with an exact rule, then a sequence starting with the prefix chord, then
//! everything else.

use crate::keymap::{Keybinding, RuleSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Whole keystroke has an exact rule
    Exact,
    /// First chord is the prefix chord
    Prefixed,
    /// Handled by the general table
    Other,
}

pub fn categorize(binding: &Keybinding, rules: &RuleSet) -> Category {
    if rules.exact_for(binding.key).is_some() {
        Category::Exact
    } else if binding.key.first() == rules.prefix {
        Category::Prefixed
    } else {
        Category::Other
    }
}

/// Input bindings split by category, each keeping input order
#[derive(Debug, Default)]
pub struct Partitions<'a> {
    pub exact: Vec<&'a Keybinding>,
    pub prefixed: Vec<&'a Keybinding>,
    pub other: Vec<&'a Keybinding>,
}

impl<'a> Partitions<'a> {
    pub fn len(&self) -> usize {
        self.exact.len() + self.prefixed.len() + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn classify<'a>(bindings: &'a [Keybinding], rules: &RuleSet) -> Partitions<'a> {
    let mut partitions = Partitions::default();
    for binding in bindings {
        match categorize(binding, rules) {
            Category::Exact => partitions.exact.push(binding),
            Category::Prefixed => partitions.prefixed.push(binding),
            Category::Other => partitions.other.push(binding),
        }
    }
    partitions
}
