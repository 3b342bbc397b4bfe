//! Helper macro for generating domain port error enums.
//!
//! Every driven port exposes a small `thiserror` enum with snake_case helper
//! constructors so adapters can say `Error::query("...")` instead of
//! spelling out struct variants. The macro keeps the enums uniform across
//! ports.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Constructs the [`", stringify!($variant), "`](Self::", stringify!($variant), ") variant.")]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            #[doc = concat!("Constructs the [`", stringify!($variant), "`](Self::", stringify!($variant), ") variant.")]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $(
                    #[doc = concat!("The `", stringify!($field), "` detail for this error.")]
                    $field : $ty
                ),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    define_port_error! {
        pub enum SamplePortError {
            Connection { message: String } => "connection failed: {message}",
            Missing => "record not found",
            Conflict { message: String, attempts: u32 } => "conflict: {message} ({attempts})",
        }
    }

    #[test]
    fn string_fields_accept_str_slices() {
        let err = SamplePortError::connection("socket closed");
        assert_eq!(err.to_string(), "connection failed: socket closed");
    }

    #[test]
    fn unit_variants_get_constructors_too() {
        let err = SamplePortError::missing();
        assert_eq!(err.to_string(), "record not found");
    }

    #[test]
    fn mixed_fields_are_supported() {
        let err = SamplePortError::conflict("duplicate key", 2_u32);
        assert_eq!(err.to_string(), "conflict: duplicate key (2)");
    }
}
