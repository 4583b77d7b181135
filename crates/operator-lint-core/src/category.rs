//! Target categories and first-match classification.

use crate::model::{Target, TargetKind};

/// Predicate deciding whether a target belongs to a category.
pub type Recognizer = fn(&Target<'_>) -> bool;

/// A named partition of targets with its own set of checks.
#[derive(Debug, Clone, Copy)]
pub struct Category {
    /// Category name; also the plugin sub-namespace resolved for it.
    pub name: &'static str,
    /// Decides membership.
    pub recognizer: Recognizer,
}

impl Category {
    /// Creates a category.
    #[must_use]
    pub const fn new(name: &'static str, recognizer: Recognizer) -> Self {
        Self { name, recognizer }
    }

    /// Returns true if the target belongs to this category.
    #[must_use]
    pub fn recognizes(&self, target: &Target<'_>) -> bool {
        (self.recognizer)(target)
    }
}

fn is_operator(target: &Target<'_>) -> bool {
    target.kind() == TargetKind::Operator
}

fn is_bundle(target: &Target<'_>) -> bool {
    target.kind() == TargetKind::Bundle
}

/// Categories checked by default, in declaration order.
///
/// Repositories have no category of their own and are skipped.
pub const SUPPORTED_CATEGORIES: &[Category] = &[
    Category::new("operator", is_operator),
    Category::new("bundle", is_bundle),
];

/// Ordered category list; the first category that recognizes a target wins.
#[derive(Debug, Clone)]
pub struct Classifier {
    categories: Vec<Category>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(SUPPORTED_CATEGORIES.to_vec())
    }
}

impl Classifier {
    /// Creates a classifier over the given categories, in order.
    #[must_use]
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// The declared categories.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Returns the first category recognizing the target, if any.
    #[must_use]
    pub fn classify(&self, target: &Target<'_>) -> Option<&Category> {
        self.categories.iter().find(|c| c.recognizes(target))
    }
}
