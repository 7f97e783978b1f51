use crate::frame::{Cell, Frame};
use linreg_core::{LinregError, LinregResult};

/// One-hot encode the categorical columns at `categorical_indices`.
///
/// Each named column is replaced, in place, by one 0/1 indicator column per
/// distinct value, ordered by the column's sorted value domain. With
/// `drop_first` the first (lowest-sorting) value's indicator is omitted to
/// avoid perfect collinearity with an intercept term.
///
/// Indices refer to positions in the *original* frame. Columns are processed
/// in descending index order so that splicing indicator columns for a higher
/// index never shifts the position of a lower index that is still pending —
/// the ordering is a correctness requirement.
pub fn one_hot_encode(
    frame: &Frame,
    categorical_indices: &[usize],
    drop_first: bool,
) -> LinregResult<Frame> {
    for &index in categorical_indices {
        if index >= frame.cols() {
            return Err(LinregError::IndexOutOfBounds {
                index,
                axis: 1,
                size: frame.cols(),
            });
        }
    }

    let mut indices = categorical_indices.to_vec();
    indices.sort_unstable();
    indices.dedup();
    indices.reverse();

    let mut columns = frame.to_columns();
    for index in indices {
        let column = columns.remove(index);

        let mut domain: Vec<Cell> = column.to_vec();
        domain.sort_by(|a, b| a.domain_cmp(b));
        domain.dedup();
        if drop_first && !domain.is_empty() {
            domain.remove(0);
        }

        let indicators: Vec<Vec<Cell>> = domain
            .iter()
            .map(|value| {
                column
                    .iter()
                    .map(|cell| Cell::Number(if cell == value { 1.0 } else { 0.0 }))
                    .collect()
            })
            .collect();

        columns.splice(index..index, indicators);
    }

    Frame::from_columns(&columns)
}
