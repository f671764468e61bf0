//! Node name and attribute payloads.
//!
//! A node is named either plainly or with a markup-qualified name. The tag is
//! carried explicitly so that children created beneath a node can follow the
//! same convention, and so that encoders know which nodes must round-trip
//! through markup.

/// The name of a template node, tagged with its construction convention.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeName {
    /// A plain identifier with no markup qualification.
    Plain(String),
    /// A markup-qualified name, used by nodes that round-trip through an encoder.
    Qualified(String),
}

impl NodeName {
    /// Creates a plain name.
    #[must_use]
    pub fn plain(name: impl Into<String>) -> Self {
        Self::Plain(name.into())
    }

    /// Creates a markup-qualified name.
    #[must_use]
    pub fn qualified(name: impl Into<String>) -> Self {
        Self::Qualified(name.into())
    }

    /// Returns the name string, whichever convention it uses.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Plain(name) | Self::Qualified(name) => name,
        }
    }

    /// Returns `true` for a markup-qualified name.
    #[must_use]
    pub fn is_qualified(&self) -> bool {
        matches!(self, Self::Qualified(_))
    }

    /// Builds a sibling name that uses this name's convention.
    #[must_use]
    pub fn same_kind(&self, name: impl Into<String>) -> Self {
        match self {
            Self::Plain(_) => Self::Plain(name.into()),
            Self::Qualified(_) => Self::Qualified(name.into()),
        }
    }

    /// Replaces the name string, keeping the convention.
    pub fn rename(&mut self, name: impl Into<String>) {
        match self {
            Self::Plain(n) | Self::Qualified(n) => *n = name.into(),
        }
    }
}

impl Default for NodeName {
    fn default() -> Self {
        Self::Plain(String::new())
    }
}

/// A named attribute on a template node.
///
/// Attribute lists keep insertion order and may hold duplicate names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// The attribute's local name.
    pub name: String,
    /// The attribute value.
    pub value: String,
    /// Namespace URI, if the decoder resolved one.
    pub namespace: Option<String>,
}

impl Attribute {
    /// Creates an attribute without a namespace.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            namespace: None,
        }
    }
}
