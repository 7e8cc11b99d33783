use crate::{document::Document, errors::Error, node::Node, tag};
use std::io::Write;

/// Column budget for a value before it spills onto `CONC` lines
const DEFAULT_VALUE_WIDTH: usize = 255;

/// Construct a [`Writer`] with non-default options.
///
/// ```
/// use ahnen::{Node, WriterBuilder};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut writer = WriterBuilder::new().value_width(4).from_writer(Vec::new());
/// writer.write_node(&Node::with_value("NOTE", "abcdefgh"))?;
/// let out = String::from_utf8(writer.into_inner())?;
/// assert_eq!(out, "0 NOTE abcd\n1 CONC efgh\n");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct WriterBuilder {
    value_width: usize,
}

impl WriterBuilder {
    pub fn new() -> WriterBuilder {
        WriterBuilder {
            value_width: DEFAULT_VALUE_WIDTH,
        }
    }

    /// Maximum number of characters a line's value may carry before the
    /// remainder is continued on a `CONC` line
    pub fn value_width(&mut self, width: usize) -> &mut WriterBuilder {
        self.value_width = width;
        self
    }

    pub fn from_writer<W>(&self, writer: W) -> Writer<W>
    where
        W: Write,
    {
        Writer {
            writer,
            // a zero width would never make progress
            value_width: self.value_width.max(1),
        }
    }
}

impl Default for WriterBuilder {
    fn default() -> Self {
        WriterBuilder::new()
    }
}

/// Serialize documents and nodes back into line syntax.
///
/// Output is canonical: single-space separators, every line terminated by a
/// newline, and synthetic continuation lines for values the grammar cannot
/// carry on one physical line. Values holding newlines become `CONT`
/// children and over-width segments become `CONC` children, so parsing the
/// output reproduces the original tree.
#[derive(Debug)]
pub struct Writer<W> {
    writer: W,
    value_width: usize,
}

impl<W> Writer<W>
where
    W: Write,
{
    /// Create a writer with the default value width (255 characters)
    pub fn new(writer: W) -> Writer<W> {
        WriterBuilder::new().from_writer(writer)
    }

    /// Write every record of the document
    pub fn write_document(&mut self, document: &Document) -> Result<(), Error> {
        for node in document.nodes() {
            self.write_node(node)?;
        }
        Ok(())
    }

    /// Write one node and, recursively, its children.
    ///
    /// Synthetic `CONT`/`CONC` lines are emitted before the node's real
    /// children so a reparse folds them back into the same value.
    pub fn write_node(&mut self, node: &Node) -> Result<(), Error> {
        let level = node.level();
        match node.value() {
            None => self.write_line(level, node.xref_id(), node.tag(), "")?,
            Some(value) => {
                let mut segments = value.split('\n');
                let first = segments.next().unwrap_or("");
                let (head, mut rest) = split_width(first, self.value_width);
                self.write_line(level, node.xref_id(), node.tag(), head)?;
                loop {
                    while !rest.is_empty() {
                        let (chunk, tail) = split_width(rest, self.value_width);
                        self.write_line(level + 1, None, tag::CONC, chunk)?;
                        rest = tail;
                    }
                    match segments.next() {
                        Some(segment) => {
                            let (head, tail) = split_width(segment, self.value_width);
                            self.write_line(level + 1, None, tag::CONT, head)?;
                            rest = tail;
                        }
                        None => break,
                    }
                }
            }
        }
        for child in node.children() {
            self.write_node(child)?;
        }
        Ok(())
    }

    /// Write a single physical line.
    ///
    /// An empty value is omitted rather than written as a trailing space.
    pub fn write_line(
        &mut self,
        level: u8,
        xref_id: Option<&str>,
        tag: &str,
        value: &str,
    ) -> Result<(), Error> {
        self.write_level(level)?;
        if let Some(id) = xref_id {
            self.writer.write_all(b" ")?;
            self.writer.write_all(id.as_bytes())?;
        }
        self.writer.write_all(b" ")?;
        self.writer.write_all(tag.as_bytes())?;
        if !value.is_empty() {
            self.writer.write_all(b" ")?;
            self.writer.write_all(value.as_bytes())?;
        }
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    #[cfg(feature = "faster_writer")]
    fn write_level(&mut self, level: u8) -> Result<(), Error> {
        let mut buffer = itoa::Buffer::new();
        self.writer.write_all(buffer.format(level).as_bytes())?;
        Ok(())
    }

    #[cfg(not(feature = "faster_writer"))]
    fn write_level(&mut self, level: u8) -> Result<(), Error> {
        write!(self.writer, "{}", level)?;
        Ok(())
    }

    /// Consume the writer, returning the underlying stream
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Split off the leading `width` characters. The split lands on a char
/// boundary by construction.
fn split_width(segment: &str, width: usize) -> (&str, &str) {
    match segment.char_indices().nth(width) {
        Some((at, _)) => segment.split_at(at),
        None => (segment, ""),
    }
}
