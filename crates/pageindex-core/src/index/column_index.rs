use crate::{
    error::InternalError,
    index::{BoundaryOrder, FormatColumnIndex, FormatIndexError, ValueArena},
    value::{ColumnType, Value},
};
use std::borrow::Cow;

///
/// ColumnIndex
///
/// Queryable per-page statistics for one column chunk: null flag, null
/// count, min and max per page, plus the chunk boundary order.
///
/// A snapshot taken from a [`ColumnIndexer`](crate::index::ColumnIndexer)
/// borrows the indexer's storage and cannot outlive its next mutation; call
/// [`ColumnIndex::into_owned`] to keep it longer.
///
/// Every non-null page bound decodes under the column type; construction
/// enforces it.
///

#[derive(Clone, Debug, PartialEq)]
pub struct ColumnIndex<'a> {
    column: ColumnType,
    null_pages: Cow<'a, [bool]>,
    null_counts: Cow<'a, [i64]>,
    min_values: Cow<'a, ValueArena>,
    max_values: Cow<'a, ValueArena>,
    boundary_order: BoundaryOrder,
}

impl<'a> ColumnIndex<'a> {
    // Assemble validated parts; panics if the per-page sequences disagree in length.
    pub(crate) fn from_parts(
        column: ColumnType,
        null_pages: Cow<'a, [bool]>,
        null_counts: Cow<'a, [i64]>,
        min_values: Cow<'a, ValueArena>,
        max_values: Cow<'a, ValueArena>,
        boundary_order: BoundaryOrder,
    ) -> Self {
        let pages = null_pages.len();
        assert!(
            null_counts.len() == pages && min_values.len() == pages && max_values.len() == pages,
            "column index invariant violated: per-page sequences disagree in length"
        );

        Self {
            column,
            null_pages,
            null_counts,
            min_values,
            max_values,
            boundary_order,
        }
    }

    /// Index of a chunk with no pages.
    #[must_use]
    pub fn empty(column: ColumnType) -> Self {
        Self::from_parts(
            column,
            Cow::Borrowed(&[]),
            Cow::Borrowed(&[]),
            Cow::Owned(ValueArena::new()),
            Cow::Owned(ValueArena::new()),
            BoundaryOrder::Unordered,
        )
    }

    /// Rebuild a queryable index from a container record.
    ///
    /// The per-page arrays are validated up front: unequal lengths, negative
    /// null counts, or bounds that do not decode under `column` are corruption.
    /// Bounds of null pages are opaque placeholders and are not checked.
    pub fn from_format(
        record: &'a FormatColumnIndex,
        column: ColumnType,
    ) -> Result<Self, InternalError> {
        let pages = record.null_pages.len();
        if record.null_counts.len() != pages
            || record.min_values.len() != pages
            || record.max_values.len() != pages
        {
            return Err(FormatIndexError::LengthMismatch {
                null_pages: pages,
                null_counts: record.null_counts.len(),
                min_values: record.min_values.len(),
                max_values: record.max_values.len(),
            }
            .into());
        }

        if let Some((page, &count)) = record
            .null_counts
            .iter()
            .enumerate()
            .find(|(_, count)| **count < 0)
        {
            return Err(FormatIndexError::NegativeNullCount { page, count }.into());
        }

        let min_values = pack_bounds(&record.min_values, &record.null_pages, column, "min")?;
        let max_values = pack_bounds(&record.max_values, &record.null_pages, column, "max")?;

        Ok(Self::from_parts(
            column,
            Cow::Borrowed(&record.null_pages),
            Cow::Borrowed(&record.null_counts),
            Cow::Owned(min_values),
            Cow::Owned(max_values),
            record.boundary_order,
        ))
    }

    /// Copy the snapshot out into the container record shape.
    #[must_use]
    pub fn to_format(&self) -> FormatColumnIndex {
        FormatColumnIndex {
            null_pages: self.null_pages.to_vec(),
            null_counts: self.null_counts.to_vec(),
            min_values: self.min_values.to_vecs(),
            max_values: self.max_values.to_vecs(),
            boundary_order: self.boundary_order,
        }
    }

    /// Detach the snapshot from the storage it borrows.
    #[must_use]
    pub fn into_owned(self) -> ColumnIndex<'static> {
        ColumnIndex {
            column: self.column,
            null_pages: Cow::Owned(self.null_pages.into_owned()),
            null_counts: Cow::Owned(self.null_counts.into_owned()),
            min_values: Cow::Owned(self.min_values.into_owned()),
            max_values: Cow::Owned(self.max_values.into_owned()),
            boundary_order: self.boundary_order,
        }
    }

    #[must_use]
    pub const fn column_type(&self) -> ColumnType {
        self.column
    }

    #[must_use]
    pub fn num_pages(&self) -> usize {
        self.null_pages.len()
    }

    #[must_use]
    pub fn null_count(&self, page: usize) -> i64 {
        self.null_counts[page]
    }

    #[must_use]
    pub fn null_page(&self, page: usize) -> bool {
        self.null_pages[page]
    }

    /// Native encoding of the page's lower bound.
    #[must_use]
    pub fn min_value(&self, page: usize) -> &[u8] {
        self.min_values.get(page)
    }

    /// Native encoding of the page's upper bound.
    #[must_use]
    pub fn max_value(&self, page: usize) -> &[u8] {
        self.max_values.get(page)
    }

    /// Decoded lower bound of a page; null pages yield the zero placeholder.
    #[must_use]
    pub fn min(&self, page: usize) -> Value {
        self.decode_page_bound(page, self.min_value(page))
    }

    /// Decoded upper bound of a page; null pages yield the zero placeholder.
    #[must_use]
    pub fn max(&self, page: usize) -> Value {
        self.decode_page_bound(page, self.max_value(page))
    }

    fn decode_page_bound(&self, page: usize, bytes: &[u8]) -> Value {
        if self.null_pages[page] {
            return self.column.zero_value();
        }

        decode_bound(self.column, bytes)
    }

    #[must_use]
    pub const fn boundary_order(&self) -> BoundaryOrder {
        self.boundary_order
    }

    #[must_use]
    pub const fn is_ascending(&self) -> bool {
        matches!(self.boundary_order, BoundaryOrder::Ascending)
    }

    #[must_use]
    pub const fn is_descending(&self) -> bool {
        matches!(self.boundary_order, BoundaryOrder::Descending)
    }
}

// Non-null bounds reaching this point were produced by the column encoder or
// checked by `pack_bounds`.
pub(crate) fn decode_bound(column: ColumnType, bytes: &[u8]) -> Value {
    column
        .decode(bytes)
        .expect("column index bounds are validated on construction")
}

fn pack_bounds(
    bounds: &[Vec<u8>],
    null_pages: &[bool],
    column: ColumnType,
    side: &'static str,
) -> Result<ValueArena, FormatIndexError> {
    let total = bounds.iter().map(Vec::len).sum();
    let mut arena = ValueArena::with_capacity(bounds.len(), total);

    for (page, (bound, &null_page)) in bounds.iter().zip(null_pages).enumerate() {
        if !null_page {
            column
                .decode(bound)
                .map_err(|source| FormatIndexError::InvalidBound { page, side, source })?;
        }
        arena.push(bound);
    }

    Ok(arena)
}
