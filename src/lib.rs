/*!

A lossless parser and writer for [GEDCOM](https://en.wikipedia.org/wiki/GEDCOM)
files, the lineage-linked interchange format genealogy software has traded
since the early 90s.

Ahnen keeps the whole file: every record is parsed into a uniform tree of
nodes, typed views classify the records people actually query (individuals,
families, events, sources), and the writer emits canonical text that parses
back to the identical tree.

## Features

- ✔ Lossless: unknown and vendor (`_…`) tags survive a parse and write cycle untouched
- ✔ Zero-copy: node values borrow from the input until a mutation forces an allocation
- ✔ Merged: `CONT`/`CONC` continuation lines fold into their parent's value at parse time
- ✔ Typed: individuals, families, events, partners, and sources get purpose-built accessors
- ✔ Safe: malformed input fails with the offending line number instead of panicking
- ✔ Small: the default build carries a single tiny dependency

## Quick Start

```rust
use ahnen::Document;

# fn main() -> Result<(), Box<dyn std::error::Error>> {
let data = concat!(
    "0 @I1@ INDI\n",
    "1 NAME Robert /Cox/\n",
    "1 SEX M\n",
    "1 BIRT\n",
    "2 DATE 3 Apr 1817\n",
    "2 PLAC Tetbury\n",
);

let doc = Document::parse(data)?;
let bob = doc.individuals().next().ok_or("empty archive")?;

assert_eq!(bob.name()?, (Some("Robert"), Some("Cox")));
assert!(bob.is_male());
assert_eq!(bob.birth()?.date()?, "3 Apr 1817");
assert_eq!(bob.birth()?.place()?, "Tetbury");
# Ok(())
# }
```

Pointers between records resolve through the document, so family structure
is a method call away:

```rust
use ahnen::Document;

# fn main() -> Result<(), Box<dyn std::error::Error>> {
let data = concat!(
    "0 @I1@ INDI\n",
    "1 NAME Bob /Cox/\n",
    "0 @I2@ INDI\n",
    "1 NAME Joann /Para/\n",
    "0 @I3@ INDI\n",
    "1 NAME Bobby Jo /Cox/\n",
    "1 FAMC @F1@\n",
    "0 @F1@ FAM\n",
    "1 HUSB @I1@\n",
    "1 WIFE @I2@\n",
    "1 CHIL @I3@\n",
);

let doc = Document::parse(data)?;
let child = doc.get("@I3@").and_then(|r| r.as_individual()).ok_or("missing")?;
assert_eq!(child.father()?.name()?, (Some("Bob"), Some("Cox")));
assert_eq!(child.mother()?.name()?, (Some("Joann"), Some("Para")));
# Ok(())
# }
```

## Building Documents

Documents can be assembled from scratch. Individuals and families receive
generated pointer-ids when inserted without one.

```rust
use ahnen::{Document, Node};

# fn main() -> Result<(), Box<dyn std::error::Error>> {
let mut doc = Document::new();

let mut ada = Node::new("INDI");
ada.push_child(Node::with_value("NAME", "Ada /Lovelace/"));
let id = doc.insert(ada)?;
assert_eq!(id, "@I1@");

doc.ensure_header_trailer();
let out = doc.serialize()?;
assert!(out.starts_with("0 HEAD\n"));
assert!(out.ends_with("0 TRLR\n"));
# Ok(())
# }
```

## One Level Lower

The typed views sit on a uniform node tree. Anything without a specialized
accessor, like vendor extension tags, stays reachable the generic way.

```rust
use ahnen::{AsRecord, Document};

# fn main() -> Result<(), Box<dyn std::error::Error>> {
let doc = Document::parse("0 @I1@ INDI\n1 _UID 9F3A\n")?;
let record = doc.get("@I1@").ok_or("missing")?;
assert_eq!(record.children()[0].tag(), "_UID");
assert_eq!(record.children()[0].value(), Some("9F3A"));
# Ok(())
# }
```

## Caveats

Caller is responsible for:

- Decoding: input must already be UTF-8, so ANSEL or other legacy encodings
  need converting first
- Interpretation: values come back exactly as the file spelled them, meaning
  `3 Apr 1817` is a string here, not a date
- Schema validation: the parser enforces the line grammar and nesting, not
  everything the GEDCOM standard says about which tags belong where

*/

mod document;
mod errors;
#[cfg(feature = "json")]
pub mod json;
mod line;
mod node;
mod records;
pub mod tag;
mod tree;
mod writer;

pub use self::document::{Document, FamiliesIter, IndividualsIter, RecordsIter};
pub use self::errors::{AccessError, AccessErrorKind, Error, ErrorKind};
pub use self::line::{Line, LineScanner};
pub use self::node::{Node, TaggedIter};
pub use self::records::{
    AsRecord, Event, Family, Generic, Individual, MembersIter, Partner, Record, Source,
    SourcesIter,
};
pub use self::tag::{EventKind, PartnerRole};
pub use self::writer::{Writer, WriterBuilder};
