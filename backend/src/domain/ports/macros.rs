//! Helper macro for adapter error enums exposed by driven ports.

/// Declare a `thiserror` enum whose variants all carry named fields, plus a
/// snake_case constructor per variant accepting `impl Into<_>` arguments.
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
                $variant { $($field : $ty),* },
            )*
        }

        impl $name {
            $(
                ::paste::paste! {
                    #[doc = "Build the `" $variant "` variant."]
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
    define_port_error! {
        pub enum SamplePortError {
            Offline { message: String } => "store offline: {message}",
            Timeout { attempts: u32 } => "gave up after {attempts} attempts",
            Rejected { message: String, status: u16 } => "rejected ({status}): {message}",
        }
    }

    #[test]
    fn string_fields_accept_str() {
        assert_eq!(
            SamplePortError::offline("refused").to_string(),
            "store offline: refused"
        );
    }

    #[test]
    fn numeric_fields_keep_their_type() {
        assert_eq!(
            SamplePortError::timeout(3_u32),
            SamplePortError::Timeout { attempts: 3 }
        );
    }

    #[test]
    fn multiple_fields_are_passed_in_order() {
        assert_eq!(
            SamplePortError::rejected("bad", 409_u16).to_string(),
            "rejected (409): bad"
        );
    }
}
