//! DOT visual attributes.
//!
//! Colors use Graphviz brewer schemes (`/<scheme>/<index>`).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Blue,
    Green,
    Teal,
    Red,
    Grey,
    Purple,
    Orange,

    DarkBlue,
    DarkGreen,
    DarkTeal,
    DarkRed,
    DarkGrey,
    DarkPurple,
    DarkOrange,

    White,
}

impl Color {
    pub fn as_str(self) -> &'static str {
        match self {
            Color::Blue => "/blues8/7",
            Color::Green => "/bugn8/7",
            Color::Teal => "/brbg8/7",
            Color::Red => "/orrd8/7",
            Color::Grey => "/greys8/7",
            Color::Purple => "/bupu8/7",
            Color::Orange => "/oranges8/7",

            Color::DarkBlue => "/blues8/8",
            Color::DarkGreen => "/bugn8/8",
            Color::DarkTeal => "/brbg8/8",
            Color::DarkRed => "/orrd8/8",
            Color::DarkGrey => "/greys8/8",
            Color::DarkPurple => "/bupu8/8",
            Color::DarkOrange => "/oranges8/8",

            Color::White => "white",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Box,
    Cylinder,
    Hexagon,
    Octagon,
    Record,
    Component,
}

impl Shape {
    pub fn as_str(self) -> &'static str {
        match self {
            Shape::Box => "box",
            Shape::Cylinder => "cylinder",
            Shape::Hexagon => "hexagon",
            Shape::Octagon => "octagon",
            Shape::Record => "record",
            Shape::Component => "component",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Rounded,
    Filled,
    Bold,
    Dashed,
}

impl Style {
    pub fn as_str(self) -> &'static str {
        match self {
            Style::Rounded => "rounded",
            Style::Filled => "filled",
            Style::Bold => "bold",
            Style::Dashed => "dashed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub fill: Color,
    pub border: Color,
    pub font: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decorations {
    pub styles: &'static [Style],
    pub shape: Shape,
    pub palette: Palette,
}

/// Border style used for clusters and host mounts.
pub const CLUSTER_STYLES: &[Style] = &[Style::Rounded, Style::Bold, Style::Dashed];

pub fn join_styles(styles: &[Style], sep: &str) -> String {
    styles
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(sep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn joins_styles() {
        assert_eq!(join_styles(&[], ","), "");
        assert_eq!(join_styles(&[Style::Bold], ","), "bold");
        assert_eq!(join_styles(&[Style::Filled, Style::Dashed], ","), "filled,dashed");
        assert_eq!(
            join_styles(&[Style::Filled, Style::Dashed, Style::Rounded], ","),
            "filled,dashed,rounded"
        );
    }
}
