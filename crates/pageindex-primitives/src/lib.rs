#[macro_use]
mod macros;

///
/// PhysicalKind
///
/// Closed set of physical storage kinds a column chunk can carry.
/// Registry order matches the container format's physical type codes.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PhysicalKind {
    Boolean,
    Int32,
    Int64,
    Int96,
    Float,
    Double,
    ByteArray,
    FixedLenByteArray,
}

impl PhysicalKind {
    /// Return the full metadata descriptor for one physical kind.
    #[must_use]
    pub const fn metadata(self) -> KindMetadata {
        physical_kind_registry!(metadata_from_registry, self)
    }

    /// Stable physical type code used by the container metadata schema.
    #[must_use]
    pub const fn format_code(self) -> i32 {
        self.metadata().format_code
    }

    /// Encoded width in bytes, when it does not depend on the column.
    #[must_use]
    pub const fn fixed_width(self) -> Option<usize> {
        self.metadata().fixed_width
    }

    /// Return whether encoded values of this kind vary in length.
    #[must_use]
    pub const fn is_variable_length(self) -> bool {
        self.metadata().is_variable_length
    }

    /// Return whether page bounds of this kind may be shortened on output.
    #[must_use]
    pub const fn supports_truncation(self) -> bool {
        self.metadata().supports_truncation
    }

    /// Stable human-readable kind label for diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        physical_kind_registry!(label_from_registry, self)
    }

    /// Resolve a physical type code back into its kind.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn from_format_code(code: i32) -> Option<Self> {
        if code < 0 || code as usize >= ALL_PHYSICAL_KINDS.len() {
            return None;
        }

        Some(ALL_PHYSICAL_KINDS[code as usize])
    }
}

///
/// KindMetadata
///
/// Capability metadata for one physical kind.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct KindMetadata {
    pub format_code: i32,
    pub fixed_width: Option<usize>,
    pub is_variable_length: bool,
    pub supports_truncation: bool,
}

/// Ordered list of all physical kinds in registry order.
pub const ALL_PHYSICAL_KINDS: [PhysicalKind; 8] = physical_kind_registry!(all_kinds_from_registry);

///
/// TESTS
///
