use crate::{line::Line, tag};
use std::borrow::Cow;

/// A generic GEDCOM node: one structural line plus its nested children.
///
/// Nodes are the universal unit the parser produces before classification.
/// Text fields borrow from the parsed input and only become owned when
/// continuation merging or the mutation API rewrites them.
///
/// ```
/// use ahnen::Node;
///
/// let mut birth = Node::new("BIRT");
/// birth.push_child(Node::with_value("DATE", "3 Apr 1817"));
/// assert_eq!(birth.child("DATE").and_then(|n| n.value()), Some("3 Apr 1817"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<'a> {
    pub(crate) level: u8,
    pub(crate) tag: Cow<'a, str>,
    pub(crate) xref_id: Option<Cow<'a, str>>,
    pub(crate) value: Option<Cow<'a, str>>,
    pub(crate) children: Vec<Node<'a>>,
}

impl<'a> Node<'a> {
    /// Create a top-level node with the given tag and nothing else
    pub fn new(tag: impl Into<Cow<'a, str>>) -> Node<'a> {
        Node {
            level: 0,
            tag: tag.into(),
            xref_id: None,
            value: None,
            children: Vec::new(),
        }
    }

    /// Create a node carrying a value
    pub fn with_value(tag: impl Into<Cow<'a, str>>, value: impl Into<Cow<'a, str>>) -> Node<'a> {
        let mut node = Node::new(tag);
        node.value = Some(value.into());
        node
    }

    pub(crate) fn from_line(line: Line<'a>) -> Node<'a> {
        Node {
            level: line.level,
            tag: Cow::Borrowed(line.tag),
            xref_id: line.xref_id.map(Cow::Borrowed),
            value: line.value.map(Cow::Borrowed),
            children: Vec::new(),
        }
    }

    /// Nesting depth; every child reports `level() + 1`
    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Pointer-id declared by this node, verbatim (e.g. `@I1@`)
    pub fn xref_id(&self) -> Option<&str> {
        self.xref_id.as_deref()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn children(&self) -> &[Node<'a>] {
        &self.children
    }

    /// First direct child with the given tag, document order
    pub fn child(&self, tag: &str) -> Option<&Node<'a>> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// All direct children with the given tag, document order
    pub fn tagged<'n>(&'n self, tag: &'n str) -> TaggedIter<'n, 'a> {
        TaggedIter {
            children: self.children.iter(),
            tag,
        }
    }

    /// Value of the first direct child with the given tag
    pub fn child_value(&self, tag: &str) -> Option<&str> {
        self.child(tag).and_then(|c| c.value())
    }

    /// The value when it is a pointer reference (`@…@`) to another record
    pub fn pointer_value(&self) -> Option<&str> {
        let value = self.value()?;
        if value.len() > 2 && value.starts_with('@') && value.ends_with('@') {
            Some(value)
        } else {
            None
        }
    }

    pub fn set_value(&mut self, value: impl Into<Cow<'a, str>>) {
        self.value = Some(value.into());
    }

    pub fn set_xref_id(&mut self, id: impl Into<Cow<'a, str>>) {
        self.xref_id = Some(id.into());
    }

    /// Attach a child, renumbering the attached subtree so that the level
    /// invariant (child level = parent level + 1) holds by construction.
    ///
    /// The format caps levels at 99, so nesting a subtree deeper than that
    /// produces a tree the scanner would reject on reparse.
    pub fn push_child(&mut self, mut child: Node<'a>) {
        child.renumber(self.level.saturating_add(1));
        self.children.push(child);
    }

    pub(crate) fn renumber(&mut self, level: u8) {
        self.level = level;
        for child in &mut self.children {
            child.renumber(level.saturating_add(1));
        }
    }

    /// Fold `CONT`/`CONC` children into this node's value, recursively.
    ///
    /// `CONT` contributes a newline followed by the child's value, `CONC`
    /// contributes the child's value with no separator, and a valueless
    /// continuation contributes the empty string. Children are processed
    /// bottom-up so continuation chains merge correctly, and the operation
    /// is idempotent: once no `CONT`/`CONC` child remains, re-running it
    /// changes nothing.
    ///
    /// The parser runs this on every tree it builds; it is public so that
    /// hand-assembled trees can be normalized the same way.
    ///
    /// ```
    /// use ahnen::Node;
    ///
    /// let mut note = Node::with_value("NOTE", "first");
    /// note.push_child(Node::with_value("CONT", "second"));
    /// note.push_child(Node::with_value("CONC", " half"));
    /// note.merge_continuations();
    /// assert_eq!(note.value(), Some("first\nsecond half"));
    /// assert!(note.children().is_empty());
    /// ```
    pub fn merge_continuations(&mut self) {
        for child in &mut self.children {
            child.merge_continuations();
        }

        if !self.children.iter().any(|c| tag::is_continuation(&c.tag)) {
            return;
        }

        let mut value = match self.value.take() {
            Some(v) => v.into_owned(),
            None => String::new(),
        };

        let children = std::mem::take(&mut self.children);
        for mut child in children {
            if child.tag == tag::CONT {
                value.push('\n');
                if let Some(v) = child.value.take() {
                    value.push_str(&v);
                }
            } else if child.tag == tag::CONC {
                if let Some(v) = child.value.take() {
                    value.push_str(&v);
                }
            } else {
                self.children.push(child);
            }
        }

        // A bare `CONC` under a valueless parent would otherwise leave an
        // empty value behind, which the writer drops and a reparse reads
        // back as no value at all.
        self.value = if value.is_empty() {
            None
        } else {
            Some(Cow::Owned(value))
        };
    }
}

/// Iterator over the direct children carrying a specific tag.
///
/// Created by [`Node::tagged`].
#[derive(Debug, Clone)]
pub struct TaggedIter<'n, 'a> {
    children: std::slice::Iter<'n, Node<'a>>,
    tag: &'n str,
}

impl<'n, 'a> Iterator for TaggedIter<'n, 'a> {
    type Item = &'n Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.children.find(|c| c.tag == self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(value: &str, conts: &[(&'static str, Option<&'static str>)]) -> Node<'static> {
        let mut node = Node::with_value("NOTE", value.to_string());
        for (tag, v) in conts {
            let child = match v {
                Some(v) => Node::with_value(*tag, *v),
                None => Node::new(*tag),
            };
            node.push_child(child);
        }
        node
    }

    #[test]
    fn merge_cont_joins_with_newline() {
        let mut node = note("first", &[("CONT", Some("second"))]);
        node.merge_continuations();
        assert_eq!(node.value(), Some("first\nsecond"));
        assert!(node.children().is_empty());
    }

    #[test]
    fn merge_conc_joins_directly() {
        let mut node = note("fir", &[("CONC", Some("st")), ("CONC", Some(" line"))]);
        node.merge_continuations();
        assert_eq!(node.value(), Some("first line"));
    }

    #[test]
    fn merge_valueless_cont_is_empty_line() {
        let mut node = note("a", &[("CONT", None), ("CONT", Some("b"))]);
        node.merge_continuations();
        assert_eq!(node.value(), Some("a\n\nb"));
    }

    #[test]
    fn merge_into_valueless_parent() {
        let mut node = Node::new("NOTE");
        node.push_child(Node::with_value("CONT", "bar"));
        node.merge_continuations();
        assert_eq!(node.value(), Some("\nbar"));
    }

    #[test]
    fn merge_empty_conc_into_valueless_parent_stays_valueless() {
        // "0 NOTE\n1 CONC\n" must round-trip: an empty merged value is
        // normalized back to no value at all.
        let mut node = Node::new("NOTE");
        node.push_child(Node::new("CONC"));
        node.merge_continuations();
        assert_eq!(node.value(), None);
        assert!(node.children().is_empty());
    }

    #[test]
    fn merge_keeps_other_children_in_order() {
        let mut node = note("x", &[]);
        node.push_child(Node::with_value("SOUR", "@S1@"));
        node.push_child(Node::with_value("CONC", "y"));
        node.push_child(Node::with_value("DATE", "1901"));
        node.merge_continuations();
        assert_eq!(node.value(), Some("xy"));
        let tags: Vec<_> = node.children().iter().map(|c| c.tag()).collect();
        assert_eq!(tags, vec!["SOUR", "DATE"]);
    }

    #[test]
    fn merge_handles_chained_continuations() {
        // a CONT whose own value is continued by a nested CONC
        let mut inner = Node::with_value("CONT", "sec");
        inner.push_child(Node::with_value("CONC", "ond"));
        let mut node = Node::with_value("NOTE", "first");
        node.push_child(inner);
        node.merge_continuations();
        assert_eq!(node.value(), Some("first\nsecond"));
    }

    #[test]
    fn merge_is_idempotent() {
        let mut node = note("a", &[("CONT", Some("b")), ("CONC", Some("c"))]);
        node.merge_continuations();
        let merged = node.clone();
        node.merge_continuations();
        assert_eq!(node, merged);
    }

    #[test]
    fn push_child_renumbers_subtree() {
        let mut birth = Node::new("BIRT");
        birth.push_child(Node::with_value("DATE", "1901"));
        let mut indi = Node::new("INDI");
        indi.push_child(birth);
        assert_eq!(indi.level(), 0);
        assert_eq!(indi.children()[0].level(), 1);
        assert_eq!(indi.children()[0].children()[0].level(), 2);
    }

    #[test]
    fn pointer_values() {
        assert_eq!(
            Node::with_value("HUSB", "@I5@").pointer_value(),
            Some("@I5@")
        );
        assert_eq!(Node::with_value("SOUR", "inline text").pointer_value(), None);
        assert_eq!(Node::with_value("SOUR", "@@").pointer_value(), None);
        assert_eq!(Node::new("HUSB").pointer_value(), None);
    }

    #[test]
    fn tagged_filters_in_document_order() {
        let mut fam = Node::new("FAM");
        fam.push_child(Node::with_value("CHIL", "@I3@"));
        fam.push_child(Node::with_value("HUSB", "@I1@"));
        fam.push_child(Node::with_value("CHIL", "@I4@"));
        let values: Vec<_> = fam.tagged("CHIL").filter_map(|c| c.value()).collect();
        assert_eq!(values, vec!["@I3@", "@I4@"]);
    }
}
