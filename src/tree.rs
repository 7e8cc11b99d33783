use crate::{line::Line, node::Node, Error, ErrorKind};

/// Rebuilds level-based nesting from the ordered line sequence.
///
/// The stack holds the chain of current ancestors, one entry per level, so
/// `stack.len()` is always the deepest level a new line may legally extend.
/// Popped nodes fold into the node below them, or into the root forest when
/// the stack empties.
#[derive(Debug)]
pub(crate) struct TreeBuilder<'a> {
    roots: Vec<Node<'a>>,
    stack: Vec<Node<'a>>,
}

impl<'a> TreeBuilder<'a> {
    pub(crate) fn new() -> TreeBuilder<'a> {
        TreeBuilder {
            roots: Vec::new(),
            stack: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, line: Line<'a>, line_number: usize) -> Result<(), Error> {
        let target = usize::from(line.level);
        while self.stack.len() > target {
            self.flush_one();
        }

        if target > self.stack.len() {
            return Err(Error::new(ErrorKind::LevelSkip {
                line: line_number,
                level: line.level,
                depth: self.stack.len(),
            }));
        }

        self.stack.push(Node::from_line(line));
        Ok(())
    }

    pub(crate) fn finish(mut self) -> Vec<Node<'a>> {
        while !self.stack.is_empty() {
            self.flush_one();
        }
        self.roots
    }

    fn flush_one(&mut self) {
        if let Some(node) = self.stack.pop() {
            match self.stack.last_mut() {
                Some(parent) => parent.children.push(node),
                None => self.roots.push(node),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(lines: &[&'static str]) -> Result<Vec<Node<'static>>, Error> {
        let mut builder = TreeBuilder::new();
        for (i, raw) in lines.iter().enumerate() {
            builder.push(Line::parse(raw, i + 1)?, i + 1)?;
        }
        Ok(builder.finish())
    }

    #[test]
    fn nests_by_level() {
        let roots = build(&["0 INDI", "1 BIRT", "2 DATE 1901", "1 DEAT", "0 TRLR"]).unwrap();
        assert_eq!(roots.len(), 2);
        let indi = &roots[0];
        assert_eq!(indi.children().len(), 2);
        assert_eq!(indi.children()[0].tag(), "BIRT");
        assert_eq!(indi.children()[0].children()[0].tag(), "DATE");
        assert_eq!(indi.children()[1].tag(), "DEAT");
        assert_eq!(roots[1].tag(), "TRLR");
    }

    #[test]
    fn preserves_sibling_order() {
        let roots = build(&["0 FAM", "1 CHIL @I3@", "1 HUSB @I1@", "1 CHIL @I2@"]).unwrap();
        let tags: Vec<_> = roots[0].children().iter().map(|c| c.tag()).collect();
        assert_eq!(tags, vec!["CHIL", "HUSB", "CHIL"]);
    }

    #[test]
    fn rejects_skipped_level() {
        let err = build(&["0 INDI", "2 DATE 1901"]).unwrap_err();
        match err.kind() {
            ErrorKind::LevelSkip { line, level, depth } => {
                assert_eq!((*line, *level, *depth), (2, 2, 1));
            }
            kind => panic!("unexpected error kind: {:?}", kind),
        }
    }

    #[test]
    fn rejects_nonzero_first_level() {
        let err = build(&["1 NAME Bob"]).unwrap_err();
        assert_eq!(err.line(), Some(1));
    }

    #[test]
    fn level_can_drop_multiple_steps() {
        let roots = build(&["0 A", "1 B", "2 C", "3 D", "1 E"]).unwrap();
        let a = &roots[0];
        assert_eq!(a.children().len(), 2);
        assert_eq!(a.children()[1].tag(), "E");
    }
}
