//! Contains the document tree built by the parser, and the utilities that
//! work on it: adding children, copying, releasing, field lookup and the
//! indented text dump.
//!
//! Every structural node owns its children outright. There are no parent
//! links and no sharing, so `Clone` is a deep copy and `Drop` releases the
//! whole subtree, children first.

use std::fmt;

/// A `key: value` member of an object.
#[derive(Debug, PartialEq, Clone)]
pub struct Pair {
    /// The raw key text, exactly as it appeared between the quotes.
    pub key: String,
    /// The value the key maps to.
    pub value: Box<Node>,
}

impl Pair {
    pub fn new(key: impl Into<String>, value: Node) -> Self {
        Pair {
            key: key.into(),
            value: Box::new(value),
        }
    }
}

/// One node of the document tree.
///
/// `Elements` and `Members` are the comma-separated lists the grammar
/// builds on the way to an `Array` or `Object`; a parsed document never
/// contains them, but the list rules return them when called directly.
#[derive(Debug, PartialEq, Clone)]
pub enum Node {
    /// A string value (raw, escapes not decoded).
    String(String),
    /// A number value.
    Number(f64),
    /// A single object member.
    Pair(Pair),
    /// The value list of an array, before it is wrapped.
    Elements(Vec<Node>),
    /// The member list of an object, before it is wrapped.
    Members(Vec<Pair>),
    /// `[ ... ]`, children in source order.
    Array(Vec<Node>),
    /// `{ ... }`, members in source order.
    Object(Vec<Pair>),
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
}

impl Node {
    /// The tag used for this node in the tree dump.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::String(_) => "STRING",
            Node::Number(_) => "NUMBER",
            Node::Pair(_) => "PAIR",
            Node::Elements(_) => "ELEMENTS",
            Node::Members(_) => "MEMBERS",
            Node::Array(_) => "ARRAY",
            Node::Object(_) => "OBJECT",
            Node::True => "TRUE",
            Node::False => "FALSE",
            Node::Null => "NULL",
        }
    }

    /// Appends `child` as the last child of a structural node.
    ///
    /// Arrays and element lists take any node; objects and member lists
    /// take only `Pair` nodes. Leaves and pairs take nothing.
    ///
    /// # Errors
    /// Hands `child` back unchanged if this node cannot hold it.
    pub fn add_child(&mut self, child: Node) -> Result<(), Node> {
        match (self, child) {
            (Node::Array(items) | Node::Elements(items), child) => {
                items.push(child);
                Ok(())
            }
            (Node::Object(pairs) | Node::Members(pairs), Node::Pair(pair)) => {
                pairs.push(pair);
                Ok(())
            }
            (_, child) => Err(child),
        }
    }

    /// A deep, fully independent copy of this subtree.
    pub fn copy(&self) -> Node {
        self.clone()
    }

    /// Releases a tree, if there is one.
    pub fn delete(tree: Option<Node>) {
        drop(tree);
    }

    /// Looks up the value of the first member named `key`.
    ///
    /// Returns `None` if this is not an `Object` or no member matches.
    pub fn get_field(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Object(pairs) => pairs
                .iter()
                .find(|pair| pair.key == key)
                .map(|pair| pair.value.as_ref()),
            _ => None,
        }
    }

    /// Mutable counterpart of [`Node::get_field`].
    pub fn get_field_mut(&mut self, key: &str) -> Option<&mut Node> {
        match self {
            Node::Object(pairs) => pairs
                .iter_mut()
                .find(|pair| pair.key == key)
                .map(|pair| pair.value.as_mut()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Node::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::True => Some(true),
            Node::False => Some(false),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    /// The children of an `Array` or `Elements` node.
    pub fn as_array(&self) -> Option<&[Node]> {
        match self {
            Node::Array(items) | Node::Elements(items) => Some(items),
            _ => None,
        }
    }

    /// The members of an `Object` or `Members` node.
    pub fn as_object(&self) -> Option<&[Pair]> {
        match self {
            Node::Object(pairs) | Node::Members(pairs) => Some(pairs),
            _ => None,
        }
    }

    /// Number of direct children. A pair always has two (key and value).
    pub fn len(&self) -> usize {
        match self {
            Node::Array(items) | Node::Elements(items) => items.len(),
            Node::Object(pairs) | Node::Members(pairs) => pairs.len(),
            Node::Pair(_) => 2,
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // --- Tree dump ---
    const INDENT: &'static str = "\t";

    /// Writes this node and everything under it, pre-order, one line per
    /// node, indented one tab per level.
    fn write_tree<W: fmt::Write>(&self, w: &mut W, depth: usize) -> fmt::Result {
        w.write_str(&Self::INDENT.repeat(depth))?;
        w.write_str(self.kind_name())?;
        match self {
            Node::String(s) => writeln!(w, ": {}", s),
            Node::Number(n) => writeln!(w, ": {:.6}", n),
            Node::Pair(pair) => {
                w.write_char('\n')?;
                Self::write_pair_children(pair, w, depth + 1)
            }
            Node::Array(items) | Node::Elements(items) => {
                w.write_char('\n')?;
                for item in items {
                    item.write_tree(w, depth + 1)?;
                }
                Ok(())
            }
            Node::Object(pairs) | Node::Members(pairs) => {
                w.write_char('\n')?;
                for pair in pairs {
                    Self::write_pair(pair, w, depth + 1)?;
                }
                Ok(())
            }
            Node::True | Node::False | Node::Null => w.write_char('\n'),
        }
    }

    /// Writes a member as a `PAIR` line followed by its key and value.
    fn write_pair<W: fmt::Write>(pair: &Pair, w: &mut W, depth: usize) -> fmt::Result {
        w.write_str(&Self::INDENT.repeat(depth))?;
        w.write_str("PAIR\n")?;
        Self::write_pair_children(pair, w, depth + 1)
    }

    fn write_pair_children<W: fmt::Write>(pair: &Pair, w: &mut W, depth: usize) -> fmt::Result {
        w.write_str(&Self::INDENT.repeat(depth))?;
        writeln!(w, "STRING: {}", pair.key)?;
        pair.value.write_tree(w, depth)
    }
}

/// The indented tree dump.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, 0)
    }
}

impl From<Pair> for Node {
    fn from(pair: Pair) -> Self {
        Node::Pair(pair)
    }
}
