pub mod cell;
pub mod entry;
pub mod error;
pub mod field_values;
pub mod groups;
pub mod observable;
pub mod text_diff;
pub mod toolbar;
pub mod view;
pub mod view_model;

pub use cell::{BackgroundTone, Cell, FieldNameCell, MergeAction};
pub use entry::{BibEntry, EntryType, Field};
pub use error::{MergeError, Result};
pub use field_values::{Rendering, Selection, ThreeFieldValues};
pub use groups::{CompoundEdit, FieldChange, GROUPS_SEPARATOR, Side, merge_groups, split_groups};
pub use observable::{ListenerId, Observable};
pub use text_diff::{DiffSegment, FieldDiff, SegmentKind, diff_field, diff_segments};
pub use toolbar::{
    DiffHighlightMode, DiffView, MergeToolbar, PlainTextOrDiff, ShowDiffConfig, ToolbarAction,
    ToolbarEvent,
};
pub use view::{GroupsMergeState, RowLayout, ThreeWayMergeView};
pub use view_model::{LEFT_DEFAULT_HEADER, MergeViewModel, RIGHT_DEFAULT_HEADER};
