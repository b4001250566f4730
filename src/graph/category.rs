//! Node categories: what a node looks like and how a service gets one.

use crate::Result;
use crate::graph::style::{Color, Decorations, Palette, Shape, Style};
use regex::Regex;
use std::fmt;

/// Display category of a node. Declaration order is the legend order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    None,
    Service1,
    Service2,
    Service3,
    Vault,
    Cadence,
    UserInterface,
    Tool,
    Database,
    Storage,
    Script,
    Volume,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Category::None,
        Category::Service1,
        Category::Service2,
        Category::Service3,
        Category::Vault,
        Category::Cadence,
        Category::UserInterface,
        Category::Tool,
        Category::Database,
        Category::Storage,
        Category::Script,
        Category::Volume,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Name used in the legend and matched by the `graph.category` label.
    pub fn name(self) -> &'static str {
        NAMES[self as usize]
    }

    /// Exact, case-sensitive lookup in the category vocabulary.
    pub fn from_name(name: &str) -> Option<Category> {
        NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| Category::ALL[i])
    }

    pub fn decorations(self) -> &'static Decorations {
        match DECORATIONS.get(self as usize) {
            Some(d) => d,
            None => panic!("decorations missing for '{}' category", self),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Both tables are indexed by `Category as usize`.
const NAMES: &[&str] = &[
    "none", "service1", "service2", "service3", "vault", "cadence", "ui", "tool", "database",
    "storage", "script", "volume",
];

const FILLED: &[Style] = &[Style::Rounded, Style::Bold, Style::Filled];

const fn filled(shape: Shape, fill: Color, border: Color) -> Decorations {
    Decorations {
        styles: FILLED,
        shape,
        palette: Palette {
            fill,
            border,
            font: Color::White,
        },
    }
}

const DECORATIONS: &[Decorations] = &[
    filled(Shape::Box, Color::Grey, Color::DarkGrey),
    filled(Shape::Box, Color::Blue, Color::DarkBlue),
    filled(Shape::Box, Color::Purple, Color::DarkPurple),
    filled(Shape::Box, Color::Orange, Color::DarkOrange),
    filled(Shape::Record, Color::Teal, Color::DarkTeal),
    filled(Shape::Box, Color::Red, Color::DarkRed),
    filled(Shape::Component, Color::Teal, Color::DarkTeal),
    filled(Shape::Octagon, Color::Blue, Color::DarkBlue),
    filled(Shape::Cylinder, Color::Green, Color::DarkGreen),
    filled(Shape::Cylinder, Color::Red, Color::DarkRed),
    filled(Shape::Hexagon, Color::Grey, Color::DarkGrey),
    Decorations {
        styles: &[Style::Rounded, Style::Bold, Style::Dashed],
        shape: Shape::Cylinder,
        palette: Palette {
            fill: Color::White,
            border: Color::DarkGrey,
            font: Color::DarkGrey,
        },
    },
];

const _: () = assert!(NAMES.len() == Category::COUNT);
const _: () = assert!(DECORATIONS.len() == Category::COUNT);

/// Ordered name rules. The first match wins, so a name like
/// `postgres-ui` is a database and `storage-proxy` is a tool.
const RULES: &[(Category, &str)] = &[
    (Category::Script, r"(?i)^.*(script)$"),
    (Category::Tool, r"(?i)^.*(tool|proxy)$"),
    (Category::Storage, r"(?i)^.*(s3|storage)"),
    (Category::Database, r"(?i)^.*(database|postgres)"),
    (Category::UserInterface, r"(?i)^.*(ui)"),
    (Category::Cadence, r"(?i)^.*(cadence|temporal)"),
    (Category::Vault, r"(?i)^.*(vault)"),
];

/// Assigns categories to services by label or by name.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<(Category, Regex)>,
}

impl Classifier {
    pub fn new() -> Result<Self> {
        let mut rules = Vec::with_capacity(RULES.len());
        for (category, pattern) in RULES {
            rules.push((*category, Regex::new(pattern)?));
        }
        Ok(Self { rules })
    }

    /// An `explicit` label naming a category wins; otherwise the name rules
    /// are tried in order, falling back to `Service1`.
    pub fn classify(&self, name: &str, explicit: &str) -> Category {
        if !explicit.is_empty() {
            if let Some(category) = Category::from_name(explicit) {
                return category;
            }
        }

        self.rules
            .iter()
            .find(|(_, re)| re.is_match(name))
            .map(|(category, _)| *category)
            .unwrap_or(Category::Service1)
    }
}
