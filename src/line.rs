use crate::Error;

/// A structural line record: one physical GEDCOM line after scanning.
///
/// Lines follow the grammar `LEVEL (SP POINTER)? SP TAG (SP VALUE)?` with
/// single spaces between fields. The scanner trims surrounding whitespace
/// from each physical line before decomposing it, so indented input is
/// accepted and values never carry trailing whitespace.
///
/// ```
/// use ahnen::Line;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let line = Line::parse("0 @I1@ INDI", 1)?;
/// assert_eq!(line.level, 0);
/// assert_eq!(line.xref_id, Some("@I1@"));
/// assert_eq!(line.tag, "INDI");
/// assert_eq!(line.value, None);
///
/// let line = Line::parse("1 NAME Robert /Cox/", 2)?;
/// assert_eq!(line.value, Some("Robert /Cox/"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// Nesting depth, `0`–`99`
    pub level: u8,

    /// Pointer-id when this line declares a cross-referenceable record
    pub xref_id: Option<&'a str>,

    /// Uppercase alphanumeric/underscore tag
    pub tag: &'a str,

    /// Remainder of the line, verbatim
    pub value: Option<&'a str>,
}

impl<'a> Line<'a> {
    /// Decompose a single physical line.
    ///
    /// `line_number` (1-based) seeds the position carried by a
    /// malformed-line error; it does not affect parsing.
    pub fn parse(raw: &'a str, line_number: usize) -> Result<Line<'a>, Error> {
        let malformed = || Error::malformed_line(line_number, raw);
        let text = raw.trim();

        let digits = text
            .as_bytes()
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        // wire format caps levels at two decimal digits
        if digits == 0 || digits > 2 {
            return Err(malformed());
        }
        let level = text[..digits].parse::<u8>().map_err(|_| malformed())?;

        let rest = match text[digits..].strip_prefix(' ') {
            Some(rest) => rest,
            None => return Err(malformed()),
        };

        let (xref_id, rest) = if rest.starts_with('@') {
            let close = match rest[1..].find('@') {
                Some(i) => i + 1,
                None => return Err(malformed()),
            };
            let inner = &rest[1..close];
            if inner.is_empty() || !inner.bytes().all(is_pointer_char) {
                return Err(malformed());
            }
            let pointer = &rest[..close + 1];
            match rest[close + 1..].strip_prefix(' ') {
                Some(after) => (Some(pointer), after),
                None => return Err(malformed()),
            }
        } else {
            (None, rest)
        };

        let tag_len = rest
            .as_bytes()
            .iter()
            .take_while(|b| is_tag_char(**b))
            .count();
        if tag_len == 0 {
            return Err(malformed());
        }
        let tag = &rest[..tag_len];

        let value = match &rest[tag_len..] {
            "" => None,
            trailing => match trailing.strip_prefix(' ') {
                Some(value) => Some(value),
                None => return Err(malformed()),
            },
        };

        Ok(Line {
            level,
            xref_id,
            tag,
            value,
        })
    }
}

#[inline]
fn is_pointer_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-'
}

#[inline]
fn is_tag_char(b: u8) -> bool {
    b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_'
}

/// Pull iterator over the structural lines of a GEDCOM text.
///
/// Blank lines are skipped; every other line either scans into a [`Line`] or
/// stops the iteration with a malformed-line error. [`line_number`] reports
/// the 1-based physical position of the most recently returned line, which
/// the tree builder threads into structural errors.
///
/// [`line_number`]: LineScanner::line_number
///
/// ```
/// use ahnen::LineScanner;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut scanner = LineScanner::new("0 HEAD\n\n1 CHAR UTF-8\n");
/// assert_eq!(scanner.next().unwrap()?.tag, "HEAD");
/// assert_eq!(scanner.next().unwrap()?.tag, "CHAR");
/// assert_eq!(scanner.line_number(), 3);
/// assert!(scanner.next().is_none());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct LineScanner<'a> {
    lines: std::str::Lines<'a>,
    line_number: usize,
}

impl<'a> LineScanner<'a> {
    pub fn new(text: &'a str) -> LineScanner<'a> {
        LineScanner {
            lines: text.lines(),
            line_number: 0,
        }
    }

    /// 1-based physical line number of the most recently yielded line
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl<'a> Iterator for LineScanner<'a> {
    type Item = Result<Line<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let raw = self.lines.next()?;
            self.line_number += 1;
            if raw.trim().is_empty() {
                continue;
            }
            return Some(Line::parse(raw, self.line_number));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use rstest::rstest;

    #[rstest]
    #[case("0 HEAD", Line { level: 0, xref_id: None, tag: "HEAD", value: None })]
    #[case("0 @I1@ INDI", Line { level: 0, xref_id: Some("@I1@"), tag: "INDI", value: None })]
    #[case("1 NAME Bob /Cox/", Line { level: 1, xref_id: None, tag: "NAME", value: Some("Bob /Cox/") })]
    #[case("2 DATE 3 Apr 1817", Line { level: 2, xref_id: None, tag: "DATE", value: Some("3 Apr 1817") })]
    #[case("1 HUSB @I5@", Line { level: 1, xref_id: None, tag: "HUSB", value: Some("@I5@") })]
    #[case("0 @FATHER-2@ INDI", Line { level: 0, xref_id: Some("@FATHER-2@"), tag: "INDI", value: None })]
    #[case("1 _UID 1234", Line { level: 1, xref_id: None, tag: "_UID", value: Some("1234") })]
    #[case("  1 CHAR UTF-8  ", Line { level: 1, xref_id: None, tag: "CHAR", value: Some("UTF-8") })]
    #[case("99 NOTE deep", Line { level: 99, xref_id: None, tag: "NOTE", value: Some("deep") })]
    #[case("1 NAME ", Line { level: 1, xref_id: None, tag: "NAME", value: None })]
    fn scans(#[case] input: &str, #[case] expected: Line) {
        assert_eq!(Line::parse(input, 1).unwrap(), expected);
    }

    #[rstest]
    #[case("HEAD")]
    #[case("x HEAD")]
    #[case("100 HEAD")]
    #[case("0")]
    #[case("0  HEAD")]
    #[case("0 head")]
    #[case("0 @I1@INDI")]
    #[case("0 @@ INDI")]
    #[case("0 @I 1@ INDI")]
    #[case("0 @I1 INDI")]
    #[case("-1 HEAD")]
    fn rejects(#[case] input: &str) {
        let err = Line::parse(input, 12).unwrap_err();
        assert_eq!(err.line(), Some(12));
        match err.kind() {
            ErrorKind::MalformedLine { line, content } => {
                assert_eq!(*line, 12);
                assert_eq!(content, input);
            }
            kind => panic!("unexpected error kind: {:?}", kind),
        }
    }

    #[test]
    fn value_whitespace_is_verbatim() {
        let line = Line::parse("1 NOTE two  spaces kept", 1).unwrap();
        assert_eq!(line.value, Some("two  spaces kept"));
    }

    #[test]
    fn scanner_skips_blank_lines_and_counts() {
        let text = "0 HEAD\r\n\r\n   \n1 SOUR x\n";
        let mut scanner = LineScanner::new(text);
        let first = scanner.next().unwrap().unwrap();
        assert_eq!((first.level, scanner.line_number()), (0, 1));
        let second = scanner.next().unwrap().unwrap();
        assert_eq!((second.tag, scanner.line_number()), ("SOUR", 4));
        assert!(scanner.next().is_none());
    }

    #[test]
    fn scanner_stops_at_malformed() {
        let mut scanner = LineScanner::new("0 HEAD\nbogus\n");
        assert!(scanner.next().unwrap().is_ok());
        let err = scanner.next().unwrap().unwrap_err();
        assert_eq!(err.line(), Some(2));
    }
}
