//! Graph model: categorized nodes grouped by input file.

pub mod category;
pub mod node;
pub mod style;

pub use category::{Category, Classifier};
pub use node::{Node, NodeGroup, ordered_present_categories};
