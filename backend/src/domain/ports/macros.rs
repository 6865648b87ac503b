//! `define_port_error!`: error enums for driven ports.
//!
//! Expands to a `thiserror` enum plus one constructor per variant, named after
//! the variant in snake case, taking `impl Into<FieldType>` for every field.

macro_rules! define_port_error {
    (
        $(#[$enum_meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:literal
            ),* $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $( define_port_error!(@constructor $variant $( { $($field : $ty),* } )?); )*
        }
    };

    (@constructor $variant:ident) => {
        ::paste::paste! {
            #[must_use]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@constructor $variant:ident { $($field:ident : $ty:ty),* }) => {
        ::paste::paste! {
            #[must_use]
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum ProbePortError {
            Offline => "probe offline",
            Refused { message: String } => "probe refused: {message}",
            Stale { observed: i32 } => "probe stale at rank {observed}",
            Mixed { message: String, observed: i32 } => "probe mixed: {message} ({observed})",
        }
    }

    #[test]
    fn unit_variant_has_nullary_constructor() {
        assert_eq!(ProbePortError::offline().to_string(), "probe offline");
    }

    #[test]
    fn string_fields_accept_str() {
        let err = ProbePortError::refused("pool exhausted");
        assert_eq!(err.to_string(), "probe refused: pool exhausted");
    }

    #[test]
    fn non_string_fields_keep_their_type() {
        let err = ProbePortError::stale(7_i32);
        assert_eq!(err, ProbePortError::Stale { observed: 7 });
    }

    #[test]
    fn mixed_fields_format_in_order() {
        let err = ProbePortError::mixed("swap", 3_i32);
        assert_eq!(err.to_string(), "probe mixed: swap (3)");
    }
}
