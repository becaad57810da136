//! The fixed field schema shared by extraction and every output shape.

/// Placeholder stored for any field that could not be extracted.
pub const SENTINEL: &str = "NA";

/// Number of fields in the schema.
pub const FIELD_COUNT: usize = 10;

/// A field of a directory listing entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// Unlabeled leading entity name.
    SchoolName,
    Location,
    Address,
    CityTown,
    County,
    Country,
    Website,
    Phone,
    Email,
    Fax,
}

/// All fields in output order.
pub const FIELDS: [Field; FIELD_COUNT] = [
    Field::SchoolName,
    Field::Location,
    Field::Address,
    Field::CityTown,
    Field::County,
    Field::Country,
    Field::Website,
    Field::Phone,
    Field::Email,
    Field::Fax,
];

/// The labeled fields, i.e. everything except the entity name.
pub const LABELED_FIELDS: [Field; FIELD_COUNT - 1] = [
    Field::Location,
    Field::Address,
    Field::CityTown,
    Field::County,
    Field::Country,
    Field::Website,
    Field::Phone,
    Field::Email,
    Field::Fax,
];

/// How a captured value is cleaned before it is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleaningRule {
    /// Stored trimmed, as captured.
    Verbatim,
    /// Local phone numbers, digit-normalized and deduplicated.
    Phone,
    /// Email addresses, deduplicated.
    Email,
    /// URLs, deduplicated.
    Website,
}

impl Field {
    /// Output column name.
    pub fn key(self) -> &'static str {
        match self {
            Field::SchoolName => "School Name",
            Field::Location => "Location",
            Field::Address => "Address",
            Field::CityTown => "City/Town",
            Field::County => "County",
            Field::Country => "Country",
            Field::Website => "Website",
            Field::Phone => "Phone",
            Field::Email => "Email",
            Field::Fax => "Fax",
        }
    }

    /// Regex fragment matching the label token (without the colon).
    ///
    /// Returns `None` for the unlabeled entity name.
    pub fn label_pattern(self) -> Option<&'static str> {
        match self {
            Field::SchoolName => None,
            Field::Location => Some("Location"),
            Field::Address => Some("Address"),
            // Typeset listings print "City/ Town"; accept the joined form too.
            Field::CityTown => Some(r"City/ ?Town"),
            Field::County => Some("County"),
            Field::Country => Some("Country"),
            Field::Website => Some("Website"),
            Field::Phone => Some("Phone"),
            Field::Email => Some("Email"),
            Field::Fax => Some("Fax"),
        }
    }

    pub fn cleaning_rule(self) -> CleaningRule {
        match self {
            Field::Website => CleaningRule::Website,
            Field::Phone => CleaningRule::Phone,
            Field::Email => CleaningRule::Email,
            _ => CleaningRule::Verbatim,
        }
    }

    /// Position of this field in [`FIELDS`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
