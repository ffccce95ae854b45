use ratatui::layout::Rect;

pub const FIELD_NAME_WIDTH: u16 = 16;
pub const MIN_VALUE_WIDTH: u16 = 12;

/// Column rectangles of the merge grid, one line tall at `area.y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridColumns {
    pub name: Rect,
    pub left: Rect,
    pub right: Rect,
    pub merged: Rect,
}

impl GridColumns {
    /// The left and right columns joined, for rows with equal values.
    pub fn left_and_right(&self) -> Rect {
        Rect {
            width: self.right.x + self.right.width - self.left.x,
            ..self.left
        }
    }

    pub fn at_row(&self, y: u16) -> Self {
        let row = |r: Rect| Rect { y, height: 1, ..r };
        Self {
            name: row(self.name),
            left: row(self.left),
            right: row(self.right),
            merged: row(self.merged),
        }
    }
}

pub fn compute_grid_columns(area: Rect) -> GridColumns {
    let name_width = if area.width < FIELD_NAME_WIDTH + 3 * MIN_VALUE_WIDTH {
        (area.width / 5).max(4)
    } else {
        FIELD_NAME_WIDTH
    };

    let value_width = area.width.saturating_sub(name_width) / 3;
    let column = |x: u16, width: u16| Rect {
        x,
        y: area.y,
        width,
        height: 1,
    };
    let left_x = area.x + name_width;
    let right_x = left_x + value_width;
    let merged_x = right_x + value_width;

    GridColumns {
        name: column(area.x, name_width.min(area.width)),
        left: column(left_x, value_width),
        right: column(right_x, value_width),
        merged: column(merged_x, (area.x + area.width).saturating_sub(merged_x)),
    }
}
