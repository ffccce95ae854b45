use std::borrow::Cow;
use std::fmt;

/// Field identifier. Names are case-insensitive and stored lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Field(Cow<'static, str>);

impl Field {
    /// Pseudo-field standing for the entry type in the merge grid. The space
    /// keeps it apart from any real field name.
    pub const TYPE_HEADER: Field = Field(Cow::Borrowed("entry type"));
    pub const GROUPS: Field = Field(Cow::Borrowed("groups"));

    pub fn new(name: &str) -> Self {
        let lowered = name.trim().to_lowercase();
        match lowered.as_str() {
            "groups" => Self::GROUPS,
            _ => Self(Cow::Owned(lowered)),
        }
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn display_name(&self) -> String {
        if *self == Self::TYPE_HEADER {
            return "Entry Type".into();
        }
        capitalize(&self.0)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Field {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryType(String);

impl EntryType {
    /// Accepts raw names (`article`) as well as display names (`Article`).
    pub fn parse(name: &str) -> Self {
        Self(name.trim().to_lowercase())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn display_name(&self) -> String {
        capitalize(&self.0)
    }
}

impl Default for EntryType {
    fn default() -> Self {
        Self::parse("misc")
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A bibliographic record: a type, an optional citation key and an
/// insertion-ordered set of fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BibEntry {
    entry_type: EntryType,
    citation_key: Option<String>,
    fields: Vec<(Field, String)>,
}

impl BibEntry {
    pub fn new(entry_type: EntryType) -> Self {
        Self {
            entry_type,
            citation_key: None,
            fields: Vec::new(),
        }
    }

    pub fn with_citation_key(mut self, key: impl Into<String>) -> Self {
        self.set_citation_key(key);
        self
    }

    pub fn with_field(mut self, field: impl Into<Field>, value: impl Into<String>) -> Self {
        self.set_field(field.into(), value);
        self
    }

    pub fn entry_type(&self) -> &EntryType {
        &self.entry_type
    }

    pub fn set_entry_type(&mut self, entry_type: EntryType) {
        self.entry_type = entry_type;
    }

    pub fn citation_key(&self) -> Option<&str> {
        self.citation_key.as_deref()
    }

    pub fn set_citation_key(&mut self, key: impl Into<String>) {
        let key = key.into();
        self.citation_key = if key.is_empty() { None } else { Some(key) };
    }

    pub fn field(&self, field: &Field) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    pub fn field_or_empty(&self, field: &Field) -> &str {
        self.field(field).unwrap_or("")
    }

    pub fn has_field(&self, field: &Field) -> bool {
        self.field(field).is_some()
    }

    /// Sets `field` and returns the previous value. An empty value clears the
    /// field instead of storing an empty string.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> Option<String> {
        let value = value.into();
        if value.is_empty() {
            return self.clear_field(&field);
        }

        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.fields.push((field, value));
                None
            }
        }
    }

    pub fn clear_field(&mut self, field: &Field) -> Option<String> {
        let pos = self.fields.iter().position(|(name, _)| name == field)?;
        Some(self.fields.remove(pos).1)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&Field, &str)> {
        self.fields.iter().map(|(field, value)| (field, value.as_str()))
    }

    pub fn field_names(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().map(|(field, _)| field)
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{BibEntry, EntryType, Field};

    #[test]
    fn field_names_are_case_insensitive() {
        assert_eq!(Field::new("Title"), Field::new("title"));
        assert_eq!(Field::new("GROUPS"), Field::GROUPS);
        assert_eq!(Field::new("title").display_name(), "Title");
        assert_eq!(Field::TYPE_HEADER.display_name(), "Entry Type");
    }

    #[test]
    fn entry_type_round_trips_display_name() {
        let article = EntryType::parse("Article");
        assert_eq!(article.name(), "article");
        assert_eq!(article.display_name(), "Article");
        assert_eq!(EntryType::parse(&article.display_name()), article);
    }

    #[test]
    fn set_field_keeps_insertion_order_and_returns_previous() {
        let mut entry = BibEntry::new(EntryType::parse("book"))
            .with_field("title", "A")
            .with_field("year", "2020");
        assert_eq!(entry.set_field(Field::new("title"), "B"), Some("A".into()));
        let names: Vec<_> = entry.field_names().map(Field::name).collect();
        assert_eq!(names, vec!["title", "year"]);
        assert_eq!(entry.field(&Field::new("title")), Some("B"));
    }

    #[test]
    fn empty_value_clears_field() {
        let mut entry = BibEntry::default().with_field("note", "x");
        assert_eq!(entry.set_field(Field::new("note"), ""), Some("x".into()));
        assert!(!entry.has_field(&Field::new("note")));
        assert_eq!(entry.field_or_empty(&Field::new("note")), "");
        assert_eq!(entry.clear_field(&Field::new("note")), None);
    }

    #[test]
    fn citation_key_empty_means_absent() {
        let mut entry = BibEntry::default().with_citation_key("knuth84");
        assert_eq!(entry.citation_key(), Some("knuth84"));
        entry.set_citation_key("");
        assert_eq!(entry.citation_key(), None);
    }
}
