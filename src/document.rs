use crate::{
    line::LineScanner,
    node::Node,
    records::{Family, Individual, Record},
    tag,
    tree::TreeBuilder,
    writer::Writer,
    Error, ErrorKind,
};
use std::borrow::Cow;
use std::collections::HashMap;

/// A parsed GEDCOM file: the top-level record forest plus the
/// cross-reference index.
///
/// The document owns its records in original order. The index maps each
/// declared pointer-id to its top-level record and is built eagerly during
/// [`parse`], so a duplicate declaration fails the parse while a dangling
/// reference surfaces only when an accessor tries to follow it.
///
/// ```
/// use ahnen::Document;
/// # use ahnen::AsRecord;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let doc = Document::parse("0 @I1@ INDI\n1 NAME John /Smith/\n")?;
/// let john = doc.individuals().next().unwrap();
/// assert_eq!(john.name()?, (Some("John"), Some("Smith")));
/// assert_eq!(john.id(), Some("@I1@"));
/// # Ok(())
/// # }
/// ```
///
/// Iteration is lazy and restartable: `individuals()` and friends re-scan
/// the forest on every call and never mutate the document.
///
/// [`parse`]: Document::parse
#[derive(Debug, Clone)]
pub struct Document<'a> {
    records: Vec<Node<'a>>,
    index: HashMap<Cow<'a, str>, usize>,
    next_id: usize,
}

impl<'a> Document<'a> {
    /// Create an empty document
    pub fn new() -> Document<'a> {
        Document {
            records: Vec::new(),
            index: HashMap::new(),
            next_id: 1,
        }
    }

    /// Parse a GEDCOM text into a document.
    ///
    /// The full pipeline runs here: scan lines, rebuild nesting, merge
    /// `CONT`/`CONC` continuations, and index pointer declarations. Any
    /// malformed line, skipped level, or duplicate pointer aborts the parse;
    /// no partial document is returned.
    pub fn parse(text: &'a str) -> Result<Document<'a>, Error> {
        let mut scanner = LineScanner::new(text);
        let mut builder = TreeBuilder::new();
        while let Some(line) = scanner.next() {
            builder.push(line?, scanner.line_number())?;
        }

        let mut records = builder.finish();
        for record in &mut records {
            record.merge_continuations();
        }

        let index = build_index(&records)?;
        Ok(Document {
            records,
            index,
            next_id: 1,
        })
    }

    /// Parse from raw bytes, validating them as UTF-8 first
    pub fn from_slice(data: &'a [u8]) -> Result<Document<'a>, Error> {
        let text = std::str::from_utf8(data).map_err(|e| Error::new(ErrorKind::Utf8(e)))?;
        Document::parse(text)
    }

    /// The top-level records, document order
    pub fn nodes(&self) -> &[Node<'a>] {
        &self.records
    }

    /// Iterate every top-level record, classified
    pub fn records(&self) -> RecordsIter<'_, 'a> {
        RecordsIter::new(self, &self.records)
    }

    /// Iterate the `INDI` records in document order.
    ///
    /// Each call returns a fresh iterator over the same forest.
    pub fn individuals(&self) -> IndividualsIter<'_, 'a> {
        IndividualsIter {
            document: self,
            nodes: self.records.iter(),
        }
    }

    /// Iterate the `FAM` records in document order
    pub fn families(&self) -> FamiliesIter<'_, 'a> {
        FamiliesIter {
            document: self,
            nodes: self.records.iter(),
        }
    }

    /// Look up a declared pointer-id, classifying the record it names
    ///
    /// ```
    /// use ahnen::{Document, Record};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let doc = Document::parse("0 @I1@ INDI\n0 @F1@ FAM\n")?;
    /// assert!(matches!(doc.get("@I1@"), Some(Record::Individual(_))));
    /// assert!(matches!(doc.get("@F1@"), Some(Record::Family(_))));
    /// assert!(doc.get("@X9@").is_none());
    /// # Ok(())
    /// # }
    /// ```
    pub fn get<'r>(&'r self, id: &str) -> Option<Record<'r, 'a>> {
        self.resolve(id).map(|node| Record::classify(self, node))
    }

    /// Mutable access to the record declaring `id`.
    ///
    /// Changing the record's own pointer-id through this handle desyncs the
    /// index; set ids through [`insert`](Document::insert) instead.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Node<'a>> {
        let i = *self.index.get(id)?;
        self.records.get_mut(i)
    }

    pub(crate) fn resolve(&self, id: &str) -> Option<&Node<'a>> {
        self.index.get(id).map(|&i| &self.records[i])
    }

    /// Attach a top-level record.
    ///
    /// `INDI`/`FAM` records without a pointer-id receive a generated one
    /// (`@I<n>@` / `@F<n>@`, first free number). Records of any other tag
    /// must carry an explicit id. Levels in the attached subtree are
    /// renumbered from 0. Returns the record's id.
    ///
    /// ```
    /// use ahnen::{Document, Node};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut doc = Document::new();
    /// let mut indi = Node::new("INDI");
    /// indi.push_child(Node::with_value("NAME", "Ada /Lovelace/"));
    /// let id = doc.insert(indi)?;
    /// assert_eq!(id, "@I1@");
    /// assert!(doc.get(&id).is_some());
    /// # Ok(())
    /// # }
    /// ```
    pub fn insert(&mut self, mut node: Node<'a>) -> Result<String, Error> {
        node.renumber(0);

        let id = match node.xref_id() {
            Some(id) if self.index.contains_key(id) => {
                return Err(Error::new(ErrorKind::DuplicatePointer {
                    id: id.to_string(),
                }))
            }
            Some(id) => id.to_string(),
            None => match node.tag() {
                tag::INDI => self.free_id('I'),
                tag::FAM => self.free_id('F'),
                other => {
                    return Err(Error::new(ErrorKind::MissingPointer {
                        tag: other.to_string(),
                    }))
                }
            },
        };

        if node.xref_id().is_none() {
            node.set_xref_id(id.clone());
        }
        self.index.insert(Cow::Owned(id.clone()), self.records.len());
        self.records.push(node);
        Ok(id)
    }

    /// Insert an empty individual record, returning its generated id
    pub fn add_individual(&mut self) -> String {
        let id = self.free_id('I');
        let mut node = Node::new(tag::INDI);
        node.set_xref_id(id.clone());
        self.index.insert(Cow::Owned(id.clone()), self.records.len());
        self.records.push(node);
        id
    }

    /// Insert an empty family record, returning its generated id
    pub fn add_family(&mut self) -> String {
        let id = self.free_id('F');
        let mut node = Node::new(tag::FAM);
        node.set_xref_id(id.clone());
        self.index.insert(Cow::Owned(id.clone()), self.records.len());
        self.records.push(node);
        id
    }

    /// Add a minimal `HEAD` record up front and a `TRLR` at the end when
    /// either is missing. Never implied by serialization; call it before
    /// writing a document that other GEDCOM software should accept.
    pub fn ensure_header_trailer(&mut self) {
        let has_head = self.records.first().map_or(false, |r| r.tag() == tag::HEAD);
        if !has_head {
            let mut source = Node::with_value(tag::SOUR, "ahnen");
            source.push_child(Node::with_value(tag::NAME, "ahnen"));
            source.push_child(Node::with_value(tag::VERS, env!("CARGO_PKG_VERSION")));

            let mut format = Node::new(tag::GEDC);
            format.push_child(Node::with_value(tag::VERS, "5.5"));
            format.push_child(Node::with_value(tag::FORM, "LINEAGE-LINKED"));

            let mut head = Node::new(tag::HEAD);
            head.push_child(source);
            head.push_child(Node::with_value(tag::CHAR, "UTF-8"));
            head.push_child(format);

            self.records.insert(0, head);
            for slot in self.index.values_mut() {
                *slot += 1;
            }
        }

        let has_trailer = self.records.last().map_or(false, |r| r.tag() == tag::TRLR);
        if !has_trailer {
            self.records.push(Node::new(tag::TRLR));
        }
    }

    /// Serialize the document back to GEDCOM text.
    ///
    /// ```
    /// use ahnen::Document;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let text = "0 @I1@ INDI\n1 NAME John /Smith/\n";
    /// let doc = Document::parse(text)?;
    /// assert_eq!(doc.serialize()?, text);
    /// # Ok(())
    /// # }
    /// ```
    pub fn serialize(&self) -> Result<String, Error> {
        let mut out = Vec::new();
        self.write_to(&mut out)?;
        String::from_utf8(out).map_err(|e| Error::new(ErrorKind::Utf8(e.utf8_error())))
    }

    /// Stream the document to a writer with default settings; see
    /// [`WriterBuilder`](crate::WriterBuilder) for width configuration
    pub fn write_to<W: std::io::Write>(&self, writer: W) -> Result<(), Error> {
        let mut writer = Writer::new(writer);
        writer.write_document(self)
    }

    fn free_id(&mut self, prefix: char) -> String {
        loop {
            let id = format!("@{}{}@", prefix, self.next_id);
            self.next_id += 1;
            if !self.index.contains_key(id.as_str()) {
                return id;
            }
        }
    }
}

impl<'a> Default for Document<'a> {
    fn default() -> Self {
        Document::new()
    }
}

fn build_index<'a>(records: &[Node<'a>]) -> Result<HashMap<Cow<'a, str>, usize>, Error> {
    let mut index = HashMap::new();
    for (i, record) in records.iter().enumerate() {
        if let Some(id) = &record.xref_id {
            if index.insert(id.clone(), i).is_some() {
                return Err(Error::new(ErrorKind::DuplicatePointer {
                    id: id.to_string(),
                }));
            }
        }
    }
    Ok(index)
}

/// Iterator over a document's individuals. Created by
/// [`Document::individuals`].
#[derive(Debug, Clone)]
pub struct IndividualsIter<'r, 'a> {
    document: &'r Document<'a>,
    nodes: std::slice::Iter<'r, Node<'a>>,
}

impl<'r, 'a> Iterator for IndividualsIter<'r, 'a> {
    type Item = Individual<'r, 'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let document = self.document;
        self.nodes
            .find(|n| n.tag() == tag::INDI)
            .map(|node| Individual::new(document, node))
    }
}

/// Iterator over a document's families. Created by [`Document::families`].
#[derive(Debug, Clone)]
pub struct FamiliesIter<'r, 'a> {
    document: &'r Document<'a>,
    nodes: std::slice::Iter<'r, Node<'a>>,
}

impl<'r, 'a> Iterator for FamiliesIter<'r, 'a> {
    type Item = Family<'r, 'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let document = self.document;
        self.nodes
            .find(|n| n.tag() == tag::FAM)
            .map(|node| Family::new(document, node))
    }
}

/// Iterator yielding classified records. Created by [`Document::records`]
/// and [`AsRecord::records`](crate::AsRecord::records).
#[derive(Debug, Clone)]
pub struct RecordsIter<'r, 'a> {
    document: &'r Document<'a>,
    nodes: std::slice::Iter<'r, Node<'a>>,
}

impl<'r, 'a> RecordsIter<'r, 'a> {
    pub(crate) fn new(document: &'r Document<'a>, nodes: &'r [Node<'a>]) -> RecordsIter<'r, 'a> {
        RecordsIter {
            document,
            nodes: nodes.iter(),
        }
    }
}

impl<'r, 'a> Iterator for RecordsIter<'r, 'a> {
    type Item = Record<'r, 'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let document = self.document;
        self.nodes.next().map(|node| Record::classify(document, node))
    }
}
