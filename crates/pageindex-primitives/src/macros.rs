#[macro_export]
macro_rules! physical_kind_registry_entries {
    ($macro:ident $(, @args $($args:tt)+ )?) => {
        $macro! {
            $(
                @args $($args)+;
            )?
            @entries
            (
                Boolean,
                format_code = 0,
                fixed_width = Some(1),
                is_variable_length = false,
                supports_truncation = false
            ),
            (
                Int32,
                format_code = 1,
                fixed_width = Some(4),
                is_variable_length = false,
                supports_truncation = false
            ),
            (
                Int64,
                format_code = 2,
                fixed_width = Some(8),
                is_variable_length = false,
                supports_truncation = false
            ),
            (
                Int96,
                format_code = 3,
                fixed_width = Some(12),
                is_variable_length = false,
                supports_truncation = false
            ),
            (
                Float,
                format_code = 4,
                fixed_width = Some(4),
                is_variable_length = false,
                supports_truncation = false
            ),
            (
                Double,
                format_code = 5,
                fixed_width = Some(8),
                is_variable_length = false,
                supports_truncation = false
            ),
            (
                ByteArray,
                format_code = 6,
                fixed_width = None,
                is_variable_length = true,
                supports_truncation = true
            ),
            (
                FixedLenByteArray,
                format_code = 7,
                fixed_width = None,
                is_variable_length = false,
                supports_truncation = false
            ),
        }
    };
}

#[macro_export]
macro_rules! physical_kind_registry {
    ($macro:ident) => {
        $crate::physical_kind_registry_entries!($macro)
    };
    ($macro:ident, $($args:tt)+) => {
        $crate::physical_kind_registry_entries!($macro, @args $($args)+)
    };
}

macro_rules! metadata_from_registry {
    ( @args $kind:expr; @entries $( ($physical:ident, format_code = $code:expr, fixed_width = $width:expr, is_variable_length = $variable:expr, supports_truncation = $truncation:expr) ),* $(,)? ) => {
        match $kind {
            $(
                $crate::PhysicalKind::$physical => $crate::KindMetadata {
                    format_code: $code,
                    fixed_width: $width,
                    is_variable_length: $variable,
                    supports_truncation: $truncation,
                },
            )*
        }
    };
}

macro_rules! all_kinds_from_registry {
    ( @entries $( ($physical:ident, format_code = $code:expr, fixed_width = $width:expr, is_variable_length = $variable:expr, supports_truncation = $truncation:expr) ),* $(,)? ) => {
        [ $( $crate::PhysicalKind::$physical ),* ]
    };
}

macro_rules! label_from_registry {
    ( @args $kind:expr; @entries $( ($physical:ident, format_code = $code:expr, fixed_width = $width:expr, is_variable_length = $variable:expr, supports_truncation = $truncation:expr) ),* $(,)? ) => {
        match $kind {
            $(
                $crate::PhysicalKind::$physical => stringify!($physical),
            )*
        }
    };
}
