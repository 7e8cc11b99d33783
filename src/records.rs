use crate::{
    document::{Document, RecordsIter},
    errors::{AccessError, AccessErrorKind},
    node::Node,
    tag::{self, EventKind, PartnerRole, RecordType},
};

/// The contract shared by every classified record: the generic node
/// underneath and the document it belongs to.
///
/// Typed records are views. They copy nothing, borrow the node they wrap for
/// the life of the document borrow, and derive everything else on demand, so
/// structure that has no specialized type (a birth's `DATE`, vendor `_…`
/// tags) stays reachable through [`children`](AsRecord::children) and
/// [`records`](AsRecord::records).
pub trait AsRecord<'r, 'a: 'r> {
    /// The document this record lives in
    fn document(&self) -> &'r Document<'a>;

    /// The generic node backing this record
    fn node(&self) -> &'r Node<'a>;

    fn level(&self) -> u8 {
        self.node().level()
    }

    fn tag(&self) -> &'r str {
        self.node().tag()
    }

    /// The record's pointer-id, verbatim
    fn id(&self) -> Option<&'r str> {
        self.node().xref_id()
    }

    fn value(&self) -> Option<&'r str> {
        self.node().value()
    }

    /// Direct children as generic nodes
    fn children(&self) -> &'r [Node<'a>] {
        self.node().children()
    }

    /// Direct children, classified through the tag table
    fn records(&self) -> RecordsIter<'r, 'a> {
        RecordsIter::new(self.document(), self.node().children())
    }

    /// Text of the first `NOTE` child; continuation lines were already
    /// merged at parse time
    fn note(&self) -> Option<&'r str> {
        self.node().child_value(tag::NOTE)
    }

    /// Resolve this record's `SOUR` citations.
    ///
    /// Pointer-valued citations resolve through the index to the cited
    /// top-level source; inline citations wrap the child node itself.
    fn sources(&self) -> SourcesIter<'r, 'a> {
        SourcesIter {
            document: self.document(),
            children: self.node().children().iter(),
        }
    }
}

/// A classified record: the tag-driven dispatch over every typed view.
///
/// Unrecognized and vendor (`_…`) tags land on [`Record::Other`], which
/// still exposes the full generic contract.
#[derive(Debug, Clone, Copy)]
pub enum Record<'r, 'a> {
    Individual(Individual<'r, 'a>),
    Family(Family<'r, 'a>),
    Event(Event<'r, 'a>),
    Partner(Partner<'r, 'a>),
    Source(Source<'r, 'a>),
    Other(Generic<'r, 'a>),
}

impl<'r, 'a> Record<'r, 'a> {
    pub(crate) fn classify(document: &'r Document<'a>, node: &'r Node<'a>) -> Record<'r, 'a> {
        match RecordType::from_tag(node.tag()) {
            RecordType::Individual => Record::Individual(Individual { document, node }),
            RecordType::Family => Record::Family(Family { document, node }),
            RecordType::Event(kind) => Record::Event(Event {
                document,
                node,
                kind,
            }),
            RecordType::Partner(role) => Record::Partner(Partner {
                document,
                node,
                role,
            }),
            RecordType::Source => Record::Source(Source { document, node }),
            RecordType::Other => Record::Other(Generic { document, node }),
        }
    }

    pub fn as_individual(&self) -> Option<Individual<'r, 'a>> {
        match *self {
            Record::Individual(individual) => Some(individual),
            _ => None,
        }
    }

    pub fn as_family(&self) -> Option<Family<'r, 'a>> {
        match *self {
            Record::Family(family) => Some(family),
            _ => None,
        }
    }
}

impl<'r, 'a> AsRecord<'r, 'a> for Record<'r, 'a> {
    fn document(&self) -> &'r Document<'a> {
        match self {
            Record::Individual(v) => v.document,
            Record::Family(v) => v.document,
            Record::Event(v) => v.document,
            Record::Partner(v) => v.document,
            Record::Source(v) => v.document,
            Record::Other(v) => v.document,
        }
    }

    fn node(&self) -> &'r Node<'a> {
        match self {
            Record::Individual(v) => v.node,
            Record::Family(v) => v.node,
            Record::Event(v) => v.node,
            Record::Partner(v) => v.node,
            Record::Source(v) => v.node,
            Record::Other(v) => v.node,
        }
    }
}

/// An `INDI` record.
///
/// ```
/// use ahnen::Document;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let doc = Document::parse(concat!(
///     "0 @I1@ INDI\n",
///     "1 NAME Robert /Cox/\n",
///     "1 SEX M\n",
///     "1 BIRT\n",
///     "2 DATE 3 Apr 1817\n",
/// ))?;
///
/// let bob = doc.individuals().next().unwrap();
/// assert_eq!(bob.name()?, (Some("Robert"), Some("Cox")));
/// assert!(bob.is_male());
/// assert_eq!(bob.birth()?.date()?, "3 Apr 1817");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Individual<'r, 'a> {
    document: &'r Document<'a>,
    node: &'r Node<'a>,
}

impl<'r, 'a> Individual<'r, 'a> {
    pub(crate) fn new(document: &'r Document<'a>, node: &'r Node<'a>) -> Individual<'r, 'a> {
        Individual { document, node }
    }

    /// (given, surname) from the first `NAME` child.
    ///
    /// A `John /Smith/` value splits on the slash pair; without one the
    /// whole value is the given name. A valueless `NAME` falls back to its
    /// `GIVN`/`SURN` children. Fails when no `NAME` child exists.
    pub fn name(&self) -> Result<(Option<&'r str>, Option<&'r str>), AccessError> {
        let name = self
            .node
            .child(tag::NAME)
            .ok_or_else(|| AccessError::not_found(tag::NAME))?;
        Ok(name_parts(name))
    }

    /// "Also known as" names: additional `NAME` children with `TYPE aka`
    /// (matched case-insensitively, so `TYPE AKA` counts too)
    pub fn aka(&self) -> Vec<(Option<&'r str>, Option<&'r str>)> {
        self.node
            .tagged(tag::NAME)
            .filter(|n| {
                n.child_value(tag::TYPE)
                    .is_some_and(|t| t.eq_ignore_ascii_case("aka"))
            })
            .map(name_parts)
            .collect()
    }

    /// Value of the first `TITL` child
    pub fn title(&self) -> Option<&'r str> {
        self.node.child_value(tag::TITL)
    }

    /// Raw value of the `SEX` child
    pub fn sex(&self) -> Result<&'r str, AccessError> {
        self.node
            .child_value(tag::SEX)
            .ok_or_else(|| AccessError::not_found(tag::SEX))
    }

    /// Whether the `SEX` child reads `M`; false when it is absent
    pub fn is_male(&self) -> bool {
        self.node.child_value(tag::SEX) == Some("M")
    }

    /// Whether the `SEX` child reads `F`; false when it is absent
    pub fn is_female(&self) -> bool {
        self.node.child_value(tag::SEX) == Some("F")
    }

    /// First `BIRT` child as an event
    pub fn birth(&self) -> Result<Event<'r, 'a>, AccessError> {
        self.event(EventKind::Birth)
    }

    /// First `DEAT` child as an event
    pub fn death(&self) -> Result<Event<'r, 'a>, AccessError> {
        self.event(EventKind::Death)
    }

    /// First `RESI` child as an event; absent residence behaves like any
    /// other missing event
    pub fn residence(&self) -> Result<Event<'r, 'a>, AccessError> {
        self.event(EventKind::Residence)
    }

    /// The husband of the first `FAMC` family
    pub fn father(&self) -> Result<Individual<'r, 'a>, AccessError> {
        self.family_as_child()?.husband()
    }

    /// The wife of the first `FAMC` family
    pub fn mother(&self) -> Result<Individual<'r, 'a>, AccessError> {
        self.family_as_child()?.wife()
    }

    /// Resolved parents across every `FAMC` link: husband then wife per
    /// family, absent slots skipped.
    ///
    /// An individual with no `FAMC` child gets an empty list, not an error;
    /// a pointer that fails to resolve is still an error.
    pub fn parents(&self) -> Result<Vec<Individual<'r, 'a>>, AccessError> {
        let mut out = Vec::new();
        for famc in self.node.tagged(tag::FAMC) {
            let family = resolve_family(self.document, famc)?;
            push_slot(&mut out, family.husband())?;
            push_slot(&mut out, family.wife())?;
        }
        Ok(out)
    }

    /// Positional form of [`parents`](Individual::parents)
    pub fn parent(&self, index: usize) -> Result<Individual<'r, 'a>, AccessError> {
        let parents = self.parents()?;
        let len = parents.len();
        parents
            .into_iter()
            .nth(index)
            .ok_or_else(|| AccessError::out_of_range(index, len))
    }

    fn family_as_child(&self) -> Result<Family<'r, 'a>, AccessError> {
        let famc = self
            .node
            .child(tag::FAMC)
            .ok_or_else(|| AccessError::not_found(tag::FAMC))?;
        resolve_family(self.document, famc)
    }

    fn event(&self, kind: EventKind) -> Result<Event<'r, 'a>, AccessError> {
        let node = self
            .node
            .child(kind.tag())
            .ok_or_else(|| AccessError::not_found(kind.tag()))?;
        Ok(Event {
            document: self.document,
            node,
            kind,
        })
    }
}

impl<'r, 'a> AsRecord<'r, 'a> for Individual<'r, 'a> {
    fn document(&self) -> &'r Document<'a> {
        self.document
    }

    fn node(&self) -> &'r Node<'a> {
        self.node
    }
}

/// A `FAM` record.
///
/// The inherent [`children`](Family::children) resolves the family's `CHIL`
/// pointers to individuals; the generic child nodes stay available through
/// `AsRecord::children`.
#[derive(Debug, Clone, Copy)]
pub struct Family<'r, 'a> {
    document: &'r Document<'a>,
    node: &'r Node<'a>,
}

impl<'r, 'a> Family<'r, 'a> {
    pub(crate) fn new(document: &'r Document<'a>, node: &'r Node<'a>) -> Family<'r, 'a> {
        Family { document, node }
    }

    /// Resolve the first `HUSB` pointer
    pub fn husband(&self) -> Result<Individual<'r, 'a>, AccessError> {
        let node = self
            .node
            .child(tag::HUSB)
            .ok_or_else(|| AccessError::not_found(tag::HUSB))?;
        resolve_individual(self.document, node)
    }

    /// Resolve the first `WIFE` pointer
    pub fn wife(&self) -> Result<Individual<'r, 'a>, AccessError> {
        let node = self
            .node
            .child(tag::WIFE)
            .ok_or_else(|| AccessError::not_found(tag::WIFE))?;
        resolve_individual(self.document, node)
    }

    /// First `MARR` child as an event
    pub fn marriage(&self) -> Result<Event<'r, 'a>, AccessError> {
        let node = self
            .node
            .child(tag::MARR)
            .ok_or_else(|| AccessError::not_found(tag::MARR))?;
        Ok(Event {
            document: self.document,
            node,
            kind: EventKind::Marriage,
        })
    }

    /// Resolve the `HUSB`/`WIFE` pointers, document order
    pub fn partners(&self) -> MembersIter<'r, 'a> {
        MembersIter {
            document: self.document,
            children: self.node.children().iter(),
            roles: &[tag::HUSB, tag::WIFE],
        }
    }

    /// Resolve the `CHIL` pointers, document order
    pub fn children(&self) -> MembersIter<'r, 'a> {
        MembersIter {
            document: self.document,
            children: self.node.children().iter(),
            roles: &[tag::CHIL],
        }
    }
}

impl<'r, 'a> AsRecord<'r, 'a> for Family<'r, 'a> {
    fn document(&self) -> &'r Document<'a> {
        self.document
    }

    fn node(&self) -> &'r Node<'a> {
        self.node
    }
}

/// A `BIRT`/`DEAT`/`MARR`/`RESI` node
#[derive(Debug, Clone, Copy)]
pub struct Event<'r, 'a> {
    document: &'r Document<'a>,
    node: &'r Node<'a>,
    kind: EventKind,
}

impl<'r, 'a> Event<'r, 'a> {
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Value of the first `DATE` child, verbatim (no date parsing)
    pub fn date(&self) -> Result<&'r str, AccessError> {
        let node = self
            .node
            .child(tag::DATE)
            .ok_or_else(|| AccessError::not_found(tag::DATE))?;
        Ok(node.value().unwrap_or(""))
    }

    /// Value of the first `PLAC` child
    pub fn place(&self) -> Result<&'r str, AccessError> {
        let node = self
            .node
            .child(tag::PLAC)
            .ok_or_else(|| AccessError::not_found(tag::PLAC))?;
        Ok(node.value().unwrap_or(""))
    }
}

impl<'r, 'a> AsRecord<'r, 'a> for Event<'r, 'a> {
    fn document(&self) -> &'r Document<'a> {
        self.document
    }

    fn node(&self) -> &'r Node<'a> {
        self.node
    }
}

/// A `HUSB`/`WIFE`/`CHIL` pointer inside a family
#[derive(Debug, Clone, Copy)]
pub struct Partner<'r, 'a> {
    document: &'r Document<'a>,
    node: &'r Node<'a>,
    role: PartnerRole,
}

impl<'r, 'a> Partner<'r, 'a> {
    pub fn role(&self) -> PartnerRole {
        self.role
    }

    /// The pointed-at id, when the value has pointer shape
    pub fn target_id(&self) -> Option<&'r str> {
        self.node.pointer_value()
    }

    /// Resolve the pointer to the individual it names
    pub fn individual(&self) -> Result<Individual<'r, 'a>, AccessError> {
        resolve_individual(self.document, self.node)
    }
}

impl<'r, 'a> AsRecord<'r, 'a> for Partner<'r, 'a> {
    fn document(&self) -> &'r Document<'a> {
        self.document
    }

    fn node(&self) -> &'r Node<'a> {
        self.node
    }
}

/// A `SOUR` record or inline citation
#[derive(Debug, Clone, Copy)]
pub struct Source<'r, 'a> {
    document: &'r Document<'a>,
    node: &'r Node<'a>,
}

impl<'r, 'a> Source<'r, 'a> {
    /// Value of the first `TITL` child
    pub fn title(&self) -> Result<&'r str, AccessError> {
        let node = self
            .node
            .child(tag::TITL)
            .ok_or_else(|| AccessError::not_found(tag::TITL))?;
        Ok(node.value().unwrap_or(""))
    }
}

impl<'r, 'a> AsRecord<'r, 'a> for Source<'r, 'a> {
    fn document(&self) -> &'r Document<'a> {
        self.document
    }

    fn node(&self) -> &'r Node<'a> {
        self.node
    }
}

/// Fallback view for tags with no specialized semantics (`HEAD`, `TRLR`,
/// `NOTE`, vendor extensions, …)
#[derive(Debug, Clone, Copy)]
pub struct Generic<'r, 'a> {
    document: &'r Document<'a>,
    node: &'r Node<'a>,
}

impl<'r, 'a> AsRecord<'r, 'a> for Generic<'r, 'a> {
    fn document(&self) -> &'r Document<'a> {
        self.document
    }

    fn node(&self) -> &'r Node<'a> {
        self.node
    }
}

/// Iterator resolving a family's role pointers. Created by
/// [`Family::partners`] and [`Family::children`].
#[derive(Debug, Clone)]
pub struct MembersIter<'r, 'a> {
    document: &'r Document<'a>,
    children: std::slice::Iter<'r, Node<'a>>,
    roles: &'static [&'static str],
}

impl<'r, 'a> Iterator for MembersIter<'r, 'a> {
    type Item = Result<Individual<'r, 'a>, AccessError>;

    fn next(&mut self) -> Option<Self::Item> {
        let document = self.document;
        let roles = self.roles;
        self.children
            .find(|n| roles.contains(&n.tag()))
            .map(|node| resolve_individual(document, node))
    }
}

/// Iterator resolving `SOUR` citations. Created by [`AsRecord::sources`].
#[derive(Debug, Clone)]
pub struct SourcesIter<'r, 'a> {
    document: &'r Document<'a>,
    children: std::slice::Iter<'r, Node<'a>>,
}

impl<'r, 'a> Iterator for SourcesIter<'r, 'a> {
    type Item = Result<Source<'r, 'a>, AccessError>;

    fn next(&mut self) -> Option<Self::Item> {
        let document = self.document;
        self.children
            .find(|n| n.tag() == tag::SOUR)
            .map(|node| match node.pointer_value() {
                Some(id) => {
                    let target = document
                        .resolve(id)
                        .ok_or_else(|| AccessError::unresolved(id))?;
                    if target.tag() != tag::SOUR {
                        return Err(AccessError::unresolved(id));
                    }
                    Ok(Source {
                        document,
                        node: target,
                    })
                }
                None => Ok(Source { document, node }),
            })
    }
}

fn name_parts<'r>(name: &'r Node<'_>) -> (Option<&'r str>, Option<&'r str>) {
    match name.value() {
        Some(value) if !value.is_empty() => split_name(value),
        _ => (
            name.child_value(tag::GIVN),
            name.child_value(tag::SURN),
        ),
    }
}

fn split_name(value: &str) -> (Option<&str>, Option<&str>) {
    if let Some(open) = value.find('/') {
        if let Some(len) = value[open + 1..].find('/') {
            let given = value[..open].trim();
            let surname = value[open + 1..open + 1 + len].trim();
            return (not_empty(given), not_empty(surname));
        }
    }
    (not_empty(value.trim()), None)
}

fn not_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

fn resolve_individual<'r, 'a>(
    document: &'r Document<'a>,
    node: &Node<'a>,
) -> Result<Individual<'r, 'a>, AccessError> {
    let id = node
        .pointer_value()
        .ok_or_else(|| AccessError::unresolved(node.value().unwrap_or("")))?;
    let target = document
        .resolve(id)
        .ok_or_else(|| AccessError::unresolved(id))?;
    if target.tag() != tag::INDI {
        return Err(AccessError::unresolved(id));
    }
    Ok(Individual {
        document,
        node: target,
    })
}

fn resolve_family<'r, 'a>(
    document: &'r Document<'a>,
    node: &Node<'a>,
) -> Result<Family<'r, 'a>, AccessError> {
    let id = node
        .pointer_value()
        .ok_or_else(|| AccessError::unresolved(node.value().unwrap_or("")))?;
    let target = document
        .resolve(id)
        .ok_or_else(|| AccessError::unresolved(id))?;
    if target.tag() != tag::FAM {
        return Err(AccessError::unresolved(id));
    }
    Ok(Family {
        document,
        node: target,
    })
}

fn push_slot<'r, 'a>(
    out: &mut Vec<Individual<'r, 'a>>,
    slot: Result<Individual<'r, 'a>, AccessError>,
) -> Result<(), AccessError> {
    match slot {
        Ok(parent) => {
            out.push(parent);
            Ok(())
        }
        Err(err) if matches!(err.kind(), AccessErrorKind::NotFound { .. }) => Ok(()),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn doc(text: &str) -> Document {
        Document::parse(text).unwrap()
    }

    #[rstest]
    #[case("John /Smith/", (Some("John"), Some("Smith")))]
    #[case("Bob", (Some("Bob"), None))]
    #[case("/Smith/", (None, Some("Smith")))]
    #[case("John /Smith/ Jr", (Some("John"), Some("Smith")))]
    #[case("Bob /Russel", (Some("Bob /Russel"), None))]
    fn name_splitting(
        #[case] value: &str,
        #[case] expected: (Option<&str>, Option<&str>),
    ) {
        assert_eq!(split_name(value), expected);
    }

    #[test]
    fn name_missing_is_not_found() {
        let doc = doc("0 @I1@ INDI\n1 SEX M\n");
        let err = doc.individuals().next().unwrap().name().unwrap_err();
        assert!(matches!(err.kind(), AccessErrorKind::NotFound { tag } if tag == "NAME"));
    }

    #[test]
    fn name_falls_back_to_givn_surn() {
        let doc = doc("0 @I1@ INDI\n1 NAME\n2 GIVN Greg\n2 SURN Brown\n");
        let name = doc.individuals().next().unwrap().name().unwrap();
        assert_eq!(name, (Some("Greg"), Some("Brown")));
    }

    #[test]
    fn aka_names() {
        let doc = doc(concat!(
            "0 @I1@ INDI\n",
            "1 NAME Anna /Lee/\n",
            "1 NAME Ann /Lee/\n",
            "2 TYPE aka\n",
        ));
        let indi = doc.individuals().next().unwrap();
        assert_eq!(indi.name().unwrap(), (Some("Anna"), Some("Lee")));
        assert_eq!(indi.aka(), vec![(Some("Ann"), Some("Lee"))]);
    }

    #[test]
    fn sex_predicates() {
        let doc = doc("0 @I1@ INDI\n1 SEX F\n0 @I2@ INDI\n");
        let mut people = doc.individuals();
        let eva = people.next().unwrap();
        assert!(eva.is_female());
        assert!(!eva.is_male());
        assert_eq!(eva.sex().unwrap(), "F");

        let unknown = people.next().unwrap();
        assert!(!unknown.is_male());
        assert!(!unknown.is_female());
        assert!(unknown.sex().is_err());
    }

    #[test]
    fn event_date_and_place() {
        let doc = doc(concat!(
            "0 @I1@ INDI\n",
            "1 BIRT\n",
            "2 DATE 3 Apr 1817\n",
            "2 PLAC Tetbury\n",
            "1 DEAT\n",
        ));
        let indi = doc.individuals().next().unwrap();
        let birth = indi.birth().unwrap();
        assert_eq!(birth.kind(), EventKind::Birth);
        assert_eq!(birth.date().unwrap(), "3 Apr 1817");
        assert_eq!(birth.place().unwrap(), "Tetbury");

        let death = indi.death().unwrap();
        let err = death.place().unwrap_err();
        assert!(matches!(err.kind(), AccessErrorKind::NotFound { tag } if tag == "PLAC"));

        assert!(indi.residence().is_err());
    }

    #[test]
    fn partner_resolution_is_deterministic() {
        let doc = doc(concat!(
            "0 @P1@ INDI\n",
            "0 @P5@ INDI\n",
            "0 @F1@ FAM\n",
            "1 HUSB @P5@\n",
            "1 WIFE @P1@\n",
        ));
        let family = doc.families().next().unwrap();
        assert_eq!(family.husband().unwrap().id(), Some("@P5@"));
        assert_eq!(family.wife().unwrap().id(), Some("@P1@"));

        let ids: Vec<_> = family
            .partners()
            .map(|p| p.unwrap().id().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["@P5@", "@P1@"]);
    }

    #[test]
    fn family_children_resolve_in_order() {
        let doc = doc(concat!(
            "0 @I1@ INDI\n",
            "0 @I2@ INDI\n",
            "0 @F1@ FAM\n",
            "1 CHIL @I2@\n",
            "1 CHIL @I1@\n",
        ));
        let family = doc.families().next().unwrap();
        let ids: Vec<_> = family
            .children()
            .map(|c| c.unwrap().id().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["@I2@", "@I1@"]);
    }

    #[test]
    fn dangling_partner_is_unresolved() {
        let doc = doc("0 @F1@ FAM\n1 HUSB @I404@\n");
        let err = doc.families().next().unwrap().husband().unwrap_err();
        assert!(matches!(err.kind(), AccessErrorKind::Unresolved { id } if id == "@I404@"));
    }

    #[test]
    fn wrong_type_target_is_unresolved() {
        // HUSB pointing at a family record cannot resolve as an individual
        let doc = doc("0 @F1@ FAM\n1 HUSB @F1@\n");
        let err = doc.families().next().unwrap().husband().unwrap_err();
        assert!(matches!(err.kind(), AccessErrorKind::Unresolved { .. }));
    }

    #[test]
    fn missing_parent_policy() {
        let doc = doc("0 @I1@ INDI\n1 NAME Bob\n");
        let indi = doc.individuals().next().unwrap();
        assert!(matches!(
            indi.father().unwrap_err().kind(),
            AccessErrorKind::NotFound { tag } if tag == "FAMC"
        ));
        assert!(indi.mother().is_err());
        assert_eq!(indi.parents().unwrap().len(), 0);
    }

    #[test]
    fn parents_resolve_through_family() {
        let doc = doc(concat!(
            "0 @I1@ INDI\n",
            "1 SEX M\n",
            "0 @I2@ INDI\n",
            "1 SEX F\n",
            "0 @I3@ INDI\n",
            "1 FAMC @F1@\n",
            "0 @F1@ FAM\n",
            "1 HUSB @I1@\n",
            "1 WIFE @I2@\n",
        ));
        let child = doc.get("@I3@").unwrap().as_individual().unwrap();
        assert_eq!(child.father().unwrap().id(), Some("@I1@"));
        assert_eq!(child.mother().unwrap().id(), Some("@I2@"));

        let parents = child.parents().unwrap();
        let ids: Vec<_> = parents.iter().filter_map(|p| p.id()).collect();
        assert_eq!(ids, vec!["@I1@", "@I2@"]);

        assert_eq!(child.parent(1).unwrap().id(), Some("@I2@"));
        let err = child.parent(2).unwrap_err();
        assert!(matches!(
            err.kind(),
            AccessErrorKind::OutOfRange { index: 2, len: 2 }
        ));
    }

    #[test]
    fn parents_skip_absent_slots_but_propagate_dangling() {
        let doc = doc(concat!(
            "0 @I2@ INDI\n",
            "1 FAMC @F1@\n",
            "0 @F1@ FAM\n",
            "1 WIFE @I1@\n",
            "0 @I1@ INDI\n",
        ));
        let child = doc.get("@I2@").unwrap().as_individual().unwrap();
        let parents = child.parents().unwrap();
        assert_eq!(parents.len(), 1);
        assert_eq!(parents[0].id(), Some("@I1@"));

        let doc = doc2_dangling();
        let child = doc.get("@I2@").unwrap().as_individual().unwrap();
        assert!(child.parents().is_err());
    }

    fn doc2_dangling() -> Document<'static> {
        Document::parse("0 @I2@ INDI\n1 FAMC @F1@\n0 @F1@ FAM\n1 HUSB @I404@\n").unwrap()
    }

    #[test]
    fn note_text_is_merged() {
        let doc = doc(concat!(
            "0 @I1@ INDI\n",
            "1 NOTE first\n",
            "2 CONT second\n",
            "2 CONC  half\n",
        ));
        let indi = doc.individuals().next().unwrap();
        assert_eq!(indi.note(), Some("first\nsecond half"));
    }

    #[test]
    fn sources_resolve_pointers_and_inline() {
        let doc = doc(concat!(
            "0 @I1@ INDI\n",
            "1 SOUR @S1@\n",
            "1 SOUR inline text\n",
            "1 SOUR @S404@\n",
            "0 @S1@ SOUR\n",
            "1 TITL Parish register\n",
        ));
        let indi = doc.individuals().next().unwrap();
        let mut sources = indi.sources();

        let cited = sources.next().unwrap().unwrap();
        assert_eq!(cited.title().unwrap(), "Parish register");
        assert_eq!(cited.id(), Some("@S1@"));

        let inline = sources.next().unwrap().unwrap();
        assert_eq!(inline.value(), Some("inline text"));

        assert!(sources.next().unwrap().is_err());
        assert!(sources.next().is_none());
    }

    #[test]
    fn records_classify_children() {
        let doc = doc("0 @I1@ INDI\n1 BIRT\n1 _UID 12\n");
        let indi = doc.individuals().next().unwrap();
        let kinds: Vec<_> = indi
            .records()
            .map(|r| match r {
                Record::Event(e) => format!("event:{:?}", e.kind()),
                Record::Other(g) => format!("other:{}", g.tag()),
                _ => "?".to_string(),
            })
            .collect();
        assert_eq!(kinds, vec!["event:Birth", "other:_UID"]);
    }

    #[test]
    fn generic_contract_on_the_enum() {
        let doc = doc("0 @X1@ _VENDOR custom payload\n");
        let record = doc.get("@X1@").unwrap();
        assert!(matches!(record, Record::Other(_)));
        assert_eq!(record.tag(), "_VENDOR");
        assert_eq!(record.id(), Some("@X1@"));
        assert_eq!(record.value(), Some("custom payload"));
        assert_eq!(record.level(), 0);
    }
}
