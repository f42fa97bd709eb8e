//! Helper macro for declaring port error enums.
//!
//! Every variant carries named fields and a display message. The macro derives
//! `thiserror::Error` and generates a snake_case constructor per variant whose
//! parameters accept anything convertible into the field type.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field: $ty),* },
            )*
        }

        impl $name {
            $(
                ::paste::paste! {
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                        Self::$variant { $($field: $field.into()),* }
                    }
                }
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for generated constructors.

    define_port_error! {
        pub enum StoragePortError {
            Unreachable { message: String } => "storage unreachable: {message}",
            Rejected { code: u16 } => "storage rejected request with {code}",
            Partial { message: String, written: u32 } => "partial write ({written}): {message}",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = StoragePortError::unreachable("refused");
        assert_eq!(err.to_string(), "storage unreachable: refused");
    }

    #[test]
    fn constructors_preserve_non_string_types() {
        let err = StoragePortError::rejected(409_u16);
        assert_eq!(err, StoragePortError::Rejected { code: 409 });
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = StoragePortError::partial("disk full", 3_u32);
        assert_eq!(err.to_string(), "partial write (3): disk full");
    }
}
