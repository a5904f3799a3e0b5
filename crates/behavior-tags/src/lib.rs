//! Behavior tags: short archetype labels derived from a wallet's metrics.
//!
//! Every rule is evaluated against the raw metrics, never against other
//! tags, so the output order is the rule order.

pub mod catalog;
pub mod classifier;

pub use catalog::{BehaviorTag, TagCategory, TagKind};
pub use classifier::{categorize_tags, classify, tag_summary, TagCategories, TagInputs};
