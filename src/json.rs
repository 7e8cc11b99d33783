//! Conversion to JSON
//!
//! A document serializes as an array of records; every node becomes a map
//! carrying its `tag` and whichever of `id`, `value`, and `children` it
//! actually has. Values hold the merged text, so continuation lines never
//! appear in the output.

use crate::{document::Document, node::Node};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// Customize the JSON output of [`Document::json`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonOptions {
    pretty: bool,
}

impl JsonOptions {
    pub fn new() -> Self {
        JsonOptions::default()
    }

    /// Pretty-print the output. Defaults to false.
    pub fn with_prettyprint(mut self, pretty: bool) -> JsonOptions {
        self.pretty = pretty;
        self
    }
}

/// A pending JSON conversion, created by [`Document::json`]
#[derive(Debug)]
pub struct JsonBuilder<'r, 'a> {
    document: &'r Document<'a>,
    options: JsonOptions,
}

impl<'r, 'a> JsonBuilder<'r, 'a> {
    pub(crate) fn new(document: &'r Document<'a>) -> JsonBuilder<'r, 'a> {
        JsonBuilder {
            document,
            options: JsonOptions::default(),
        }
    }

    pub fn with_options(mut self, options: JsonOptions) -> JsonBuilder<'r, 'a> {
        self.options = options;
        self
    }

    pub fn to_writer<W>(&self, writer: W) -> Result<(), serde_json::Error>
    where
        W: std::io::Write,
    {
        if self.options.pretty {
            serde_json::to_writer_pretty(writer, self)
        } else {
            serde_json::to_writer(writer, self)
        }
    }

    pub fn to_vec(&self) -> Result<Vec<u8>, serde_json::Error> {
        if self.options.pretty {
            serde_json::to_vec_pretty(self)
        } else {
            serde_json::to_vec(self)
        }
    }

    pub fn to_string(&self) -> Result<String, serde_json::Error> {
        if self.options.pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

impl Serialize for JsonBuilder<'_, '_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let records = self.document.nodes();
        let mut seq = serializer.serialize_seq(Some(records.len()))?;
        for node in records {
            seq.serialize_element(&JsonNode { node })?;
        }
        seq.end()
    }
}

struct JsonNode<'r, 'a> {
    node: &'r Node<'a>,
}

impl Serialize for JsonNode<'_, '_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let node = self.node;
        let mut fields = 1;
        if node.xref_id().is_some() {
            fields += 1;
        }
        if node.value().is_some() {
            fields += 1;
        }
        if !node.children().is_empty() {
            fields += 1;
        }

        let mut map = serializer.serialize_map(Some(fields))?;
        map.serialize_entry("tag", node.tag())?;
        if let Some(id) = node.xref_id() {
            map.serialize_entry("id", id)?;
        }
        if let Some(value) = node.value() {
            map.serialize_entry("value", value)?;
        }
        if !node.children().is_empty() {
            map.serialize_entry(
                "children",
                &JsonChildren {
                    children: node.children(),
                },
            )?;
        }
        map.end()
    }
}

struct JsonChildren<'r, 'a> {
    children: &'r [Node<'a>],
}

impl Serialize for JsonChildren<'_, '_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.children.len()))?;
        for node in self.children {
            seq.serialize_element(&JsonNode { node })?;
        }
        seq.end()
    }
}

impl<'a> Document<'a> {
    /// Convert the document to JSON.
    ///
    /// Requires the `json` feature.
    ///
    /// ```
    /// use ahnen::Document;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let doc = Document::parse("0 @I1@ INDI\n1 NAME Bob\n")?;
    /// let out = doc.json().to_string()?;
    /// assert_eq!(
    ///     out,
    ///     r#"[{"tag":"INDI","id":"@I1@","children":[{"tag":"NAME","value":"Bob"}]}]"#
    /// );
    /// # Ok(())
    /// # }
    /// ```
    pub fn json(&self) -> JsonBuilder<'_, 'a> {
        JsonBuilder::new(self)
    }
}
