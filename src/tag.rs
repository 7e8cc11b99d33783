//! GEDCOM tag vocabulary and the table that drives record classification.
//!
//! Standard tags are uppercase alphanumerics; anything starting with an
//! underscore is a vendor extension and flows through classification as a
//! generic record.

/// Top-level individual record
pub const INDI: &str = "INDI";
/// Top-level family record
pub const FAM: &str = "FAM";
/// File header record
pub const HEAD: &str = "HEAD";
/// File trailer record
pub const TRLR: &str = "TRLR";
/// Source record or inline source citation
pub const SOUR: &str = "SOUR";
/// Note, with continuation text merged at parse time
pub const NOTE: &str = "NOTE";

/// Personal name, `given /surname/`
pub const NAME: &str = "NAME";
/// Given name fallback under `NAME`
pub const GIVN: &str = "GIVN";
/// Surname fallback under `NAME`
pub const SURN: &str = "SURN";
/// Name type qualifier (e.g. `aka`)
pub const TYPE: &str = "TYPE";
/// Title of an individual or a source
pub const TITL: &str = "TITL";
/// Sex of an individual, `M` or `F`
pub const SEX: &str = "SEX";

/// Birth event
pub const BIRT: &str = "BIRT";
/// Death event
pub const DEAT: &str = "DEAT";
/// Marriage event
pub const MARR: &str = "MARR";
/// Residence event
pub const RESI: &str = "RESI";
/// Date of an event, verbatim text
pub const DATE: &str = "DATE";
/// Place of an event
pub const PLAC: &str = "PLAC";

/// Family-as-child link on an individual
pub const FAMC: &str = "FAMC";
/// Family-as-spouse link on an individual
pub const FAMS: &str = "FAMS";
/// Husband pointer inside a family
pub const HUSB: &str = "HUSB";
/// Wife pointer inside a family
pub const WIFE: &str = "WIFE";
/// Child pointer inside a family
pub const CHIL: &str = "CHIL";

/// Continuation: newline-joined into the parent value
pub const CONT: &str = "CONT";
/// Continuation: concatenated into the parent value
pub const CONC: &str = "CONC";

/// Character set declaration under `HEAD`
pub const CHAR: &str = "CHAR";
/// GEDCOM metadata under `HEAD`
pub const GEDC: &str = "GEDC";
/// Version, under `HEAD`/`SOUR` or `GEDC`
pub const VERS: &str = "VERS";
/// Transmission format under `GEDC`
pub const FORM: &str = "FORM";

/// The kind of event a `BIRT`/`DEAT`/`MARR`/`RESI` node describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Birth,
    Death,
    Marriage,
    Residence,
}

impl EventKind {
    pub(crate) fn from_tag(tag: &str) -> Option<EventKind> {
        match tag {
            BIRT => Some(EventKind::Birth),
            DEAT => Some(EventKind::Death),
            MARR => Some(EventKind::Marriage),
            RESI => Some(EventKind::Residence),
            _ => None,
        }
    }

    pub(crate) fn tag(self) -> &'static str {
        match self {
            EventKind::Birth => BIRT,
            EventKind::Death => DEAT,
            EventKind::Marriage => MARR,
            EventKind::Residence => RESI,
        }
    }
}

/// The role a `HUSB`/`WIFE`/`CHIL` pointer plays inside a family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartnerRole {
    Husband,
    Wife,
    Child,
}

impl PartnerRole {
    pub(crate) fn from_tag(tag: &str) -> Option<PartnerRole> {
        match tag {
            HUSB => Some(PartnerRole::Husband),
            WIFE => Some(PartnerRole::Wife),
            CHIL => Some(PartnerRole::Child),
            _ => None,
        }
    }
}

/// Classification table entry. Tag is authoritative: pointer-id prefixes are
/// never consulted, and unknown or vendor tags land on `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RecordType {
    Individual,
    Family,
    Event(EventKind),
    Partner(PartnerRole),
    Source,
    Other,
}

impl RecordType {
    pub(crate) fn from_tag(tag: &str) -> RecordType {
        if let Some(kind) = EventKind::from_tag(tag) {
            return RecordType::Event(kind);
        }

        if let Some(role) = PartnerRole::from_tag(tag) {
            return RecordType::Partner(role);
        }

        match tag {
            INDI => RecordType::Individual,
            FAM => RecordType::Family,
            SOUR => RecordType::Source,
            _ => RecordType::Other,
        }
    }
}

#[inline]
pub(crate) fn is_continuation(tag: &str) -> bool {
    tag == CONT || tag == CONC
}
