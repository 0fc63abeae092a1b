//! Abstract Syntax Tree types for the netlist language.
//!
//! The tree is flat: four statements, each an ordered list of entities in
//! declaration order. Nothing in it is resolved or validated; identifiers
//! are kept exactly as written.

use std::fmt;

/// An inclusive pair of pin indices.
///
/// Ports use it as a width (`[4]` is `1..=4`); wire endpoints use it as a
/// positional selector (`[4]` is `4..=4`, `[1:3]` is `1..=3`). An endpoint
/// without a selector keeps the `(0, 0)` default, which means "no explicit
/// pin selection" rather than pin zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Range {
    /// First pin index
    pub start: u32,
    /// Last pin index, inclusive
    pub end: u32,
}

impl Range {
    /// Create a range from its two ends.
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Width-style range `1..=width`, as declared by `Port[width]`.
    pub fn width(width: u32) -> Self {
        Self::new(1, width)
    }

    /// Positional range selecting the single pin `index`.
    pub fn pin(index: u32) -> Self {
        Self::new(index, index)
    }

    /// Number of pins from `start` up to `end`, i.e. `end - start + 1`.
    ///
    /// A range whose end lies before its start is empty, so a zero-width
    /// port `(1, 0)` counts 0 pins. Saturates at `u32::MAX`.
    pub fn count(&self) -> u32 {
        let count = (u64::from(self.end) + 1).saturating_sub(u64::from(self.start));
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Number of pins touched by a positional selector in either direction.
    ///
    /// `[3:1]` and `[1:3]` both select three pins.
    pub fn span(&self) -> u32 {
        self.start.abs_diff(self.end).saturating_add(1)
    }

    /// Whether the selector runs from a higher pin down to a lower one.
    pub fn is_descending(&self) -> bool {
        self.start > self.end
    }

    /// Whether this is the `(0, 0)` default of an endpoint without a selector.
    pub fn is_unspecified(&self) -> bool {
        *self == Self::default()
    }
}

/// A named input or output port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port {
    /// Port name
    pub id: String,
    /// Declared pins, `(1, 1)` unless a width was given
    pub pins: Range,
}

impl Port {
    /// Create a port of the given width.
    pub fn new(id: impl Into<String>, width: u32) -> Self {
        Self {
            id: id.into(),
            pins: Range::width(width),
        }
    }

    /// Number of declared pins, as written in `id[width]`.
    pub fn width(&self) -> u32 {
        self.pins.end
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pins == Range::width(1) {
            write!(f, "{}", self.id)
        } else {
            write!(f, "{}[{}]", self.id, self.pins.end)
        }
    }
}

/// An instance of a sub-circuit module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    /// Instance name
    pub id: String,
    /// Referenced module type
    pub module: String,
}

impl Part {
    /// Create a part instance.
    pub fn new(id: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            module: module.into(),
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.module)
    }
}

/// A directed connection between two endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wire {
    /// Numeric constant or port/part name driving the wire
    pub source: String,
    /// Output selector of the source, as in `part.out`
    pub source_out: Option<String>,
    /// Selected source pins, `(0, 0)` when unspecified
    pub source_range: Range,
    /// Port/part name driven by the wire
    pub target: String,
    /// Input selector of the target, as in `part.in`
    pub target_in: Option<String>,
    /// Selected target pins, `(0, 0)` when unspecified
    pub target_range: Range,
}

impl Wire {
    /// Create a wire between two bare endpoints.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            ..Self::default()
        }
    }

    /// Whether the source is a numeric constant rather than a name.
    pub fn is_constant(&self) -> bool {
        self.source.starts_with(|c: char| c.is_ascii_digit())
    }
}

impl fmt::Display for Wire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_endpoint(f, &self.source, self.source_out.as_deref(), self.source_range)?;
        f.write_str(" -> ")?;
        write_endpoint(f, &self.target, self.target_in.as_deref(), self.target_range)
    }
}

fn write_endpoint(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    selector: Option<&str>,
    range: Range,
) -> fmt::Result {
    f.write_str(name)?;
    if let Some(selector) = selector {
        write!(f, ".{}", selector)?;
    }
    if range.is_unspecified() {
        Ok(())
    } else if range.start == range.end {
        write!(f, "[{}]", range.start)
    } else {
        write!(f, "[{}:{}]", range.start, range.end)
    }
}

/// Ordered collection shared by the four statements. Entries are read-only
/// once built.
macro_rules! statement {
    ($(#[$doc:meta])* $name:ident, $item:ty, $keyword:literal, $items:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $name {
            $items: Vec<$item>,
        }

        impl $name {
            /// Create an empty statement.
            pub fn new() -> Self {
                Self::default()
            }

            /// Entries in declaration order.
            pub fn $items(&self) -> &[$item] {
                &self.$items
            }

            /// Number of entries.
            pub fn len(&self) -> usize {
                self.$items.len()
            }

            /// Whether the statement declares nothing.
            pub fn is_empty(&self) -> bool {
                self.$items.is_empty()
            }

            /// Iterate over entries in declaration order.
            pub fn iter(&self) -> std::slice::Iter<'_, $item> {
                self.$items.iter()
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = &'a $item;
            type IntoIter = std::slice::Iter<'a, $item>;

            fn into_iter(self) -> Self::IntoIter {
                self.iter()
            }
        }

        impl FromIterator<$item> for $name {
            fn from_iter<T: IntoIterator<Item = $item>>(iter: T) -> Self {
                Self {
                    $items: iter.into_iter().collect(),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(concat!($keyword, ":"))?;
                for (i, item) in self.$items.iter().enumerate() {
                    f.write_str(if i == 0 { " " } else { ", " })?;
                    write!(f, "{}", item)?;
                }
                f.write_str(";")
            }
        }
    };
}

statement!(
    /// The `Inputs:` statement.
    InputStatement,
    Port,
    "Inputs",
    ports
);

statement!(
    /// The `Outputs:` statement.
    OutputStatement,
    Port,
    "Outputs",
    ports
);

statement!(
    /// The `Parts:` statement.
    PartStatement,
    Part,
    "Parts",
    parts
);

statement!(
    /// The `Wires:` statement.
    WireStatement,
    Wire,
    "Wires",
    wires
);

/// A complete parsed program: the four statements in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub inputs: InputStatement,
    pub outputs: OutputStatement,
    pub parts: PartStatement,
    pub wires: WireStatement,
}

impl Program {
    /// Declared width of the input or output port named `id`.
    ///
    /// Inputs are searched before outputs.
    pub fn width_of(&self, id: &str) -> Option<u32> {
        self.inputs
            .iter()
            .chain(self.outputs.iter())
            .find(|port| port.id == id)
            .map(Port::width)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.inputs)?;
        writeln!(f, "{}", self.outputs)?;
        writeln!(f, "{}", self.parts)?;
        writeln!(f, "{}", self.wires)
    }
}
