use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::entry::{BibEntry, Field};

pub const LEFT_DEFAULT_HEADER: &str = "Left Entry";
pub const RIGHT_DEFAULT_HEADER: &str = "Right Entry";

/// Owns the two source entries (copies of the caller's) and the merged entry
/// being synthesized from the rows.
#[derive(Debug)]
pub struct MergeViewModel {
    left_entry: BibEntry,
    right_entry: BibEntry,
    merged_entry: Rc<RefCell<BibEntry>>,
    left_header: String,
    right_header: String,
    all_fields: Vec<Field>,
}

impl MergeViewModel {
    pub fn new(
        left_entry: &BibEntry,
        right_entry: &BibEntry,
        left_header: impl Into<String>,
        right_header: impl Into<String>,
    ) -> Self {
        let left_entry = left_entry.clone();
        let right_entry = right_entry.clone();
        let all_fields = field_catalogue(&left_entry, &right_entry);

        Self {
            left_entry,
            right_entry,
            merged_entry: Rc::new(RefCell::new(BibEntry::default())),
            left_header: left_header.into(),
            right_header: right_header.into(),
            all_fields,
        }
    }

    pub fn all_fields(&self) -> &[Field] {
        &self.all_fields
    }

    pub fn all_fields_size(&self) -> usize {
        self.all_fields.len()
    }

    pub fn field_at(&self, index: usize) -> Option<&Field> {
        self.all_fields.get(index)
    }

    pub fn index_of(&self, field: &Field) -> Option<usize> {
        self.all_fields.iter().position(|f| f == field)
    }

    pub fn left_entry(&self) -> &BibEntry {
        &self.left_entry
    }

    pub fn right_entry(&self) -> &BibEntry {
        &self.right_entry
    }

    pub(crate) fn source_entries_mut(&mut self) -> (&mut BibEntry, &mut BibEntry) {
        (&mut self.left_entry, &mut self.right_entry)
    }

    pub fn merged_entry(&self) -> Ref<'_, BibEntry> {
        self.merged_entry.borrow()
    }

    pub(crate) fn merged_entry_handle(&self) -> Rc<RefCell<BibEntry>> {
        Rc::clone(&self.merged_entry)
    }

    pub fn left_header(&self) -> &str {
        &self.left_header
    }

    pub fn right_header(&self) -> &str {
        &self.right_header
    }

    pub fn set_left_header(&mut self, header: impl Into<String>) {
        self.left_header = header.into();
    }

    pub fn set_right_header(&mut self, header: impl Into<String>) {
        self.right_header = header.into();
    }
}

/// Type header first, then left fields in entry order, then fields only the
/// right entry has.
fn field_catalogue(left: &BibEntry, right: &BibEntry) -> Vec<Field> {
    let mut fields = vec![Field::TYPE_HEADER];
    for field in left.field_names().chain(right.field_names()) {
        if !fields.contains(field) {
            fields.push(field.clone());
        }
    }
    fields
}

#[cfg(test)]
mod tests {
    use crate::entry::{BibEntry, EntryType, Field};

    use super::{LEFT_DEFAULT_HEADER, MergeViewModel, RIGHT_DEFAULT_HEADER};

    fn names(model: &MergeViewModel) -> Vec<&str> {
        model.all_fields().iter().map(Field::name).collect()
    }

    #[test]
    fn catalogue_is_union_in_first_seen_order() {
        let left = BibEntry::new(EntryType::parse("article"))
            .with_field("title", "T")
            .with_field("year", "1999");
        let right = BibEntry::new(EntryType::parse("article"))
            .with_field("doi", "10/x")
            .with_field("title", "T2");
        let model = MergeViewModel::new(&left, &right, LEFT_DEFAULT_HEADER, RIGHT_DEFAULT_HEADER);

        assert_eq!(names(&model), vec!["entry type", "title", "year", "doi"]);
        assert_eq!(model.all_fields_size(), 4);
        assert_eq!(model.index_of(&Field::new("doi")), Some(3));
        assert_eq!(model.index_of(&Field::GROUPS), None);
        assert_eq!(names(&model), names(&model));
    }

    #[test]
    fn holds_copies_not_originals() {
        let left = BibEntry::default().with_field("title", "T");
        let right = BibEntry::default();
        let mut model = MergeViewModel::new(&left, &right, "L", "R");

        let (l, _) = model.source_entries_mut();
        l.set_field(Field::new("title"), "changed");

        assert_eq!(left.field(&Field::new("title")), Some("T"));
        assert_eq!(model.left_entry().field(&Field::new("title")), Some("changed"));
    }

    #[test]
    fn headers_are_settable() {
        let entry = BibEntry::default();
        let mut model = MergeViewModel::new(&entry, &entry, "Local", "Import");
        model.set_right_header("Fetched");
        assert_eq!(model.left_header(), "Local");
        assert_eq!(model.right_header(), "Fetched");
    }

    #[test]
    fn merged_entry_starts_empty() {
        let entry = BibEntry::default().with_field("title", "T");
        let model = MergeViewModel::new(&entry, &entry, "L", "R");
        assert_eq!(model.merged_entry().fields().count(), 0);
    }
}
