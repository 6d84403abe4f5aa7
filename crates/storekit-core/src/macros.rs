//! Macro for the vendor's integer-coded enumerations.
//!
//! The `vendor_enum!` macro generates a `#[repr(u8)]` enum together with:
//! - `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `Debug`
//! - `Serialize`, `Deserialize` (as the integer code)
//! - `TryFrom<u8>`, `Into<u8>`
//! - `code()` and `as_str()` (the vendor's symbolic name)
//!
//! # Example
//!
//! ```ignore
//! vendor_enum! {
//!     /// Whether the customer liked it.
//!     Verdict {
//!         /// Thumbs up.
//!         Up = 1 => "UP",
//!     }
//! }
//! ```
macro_rules! vendor_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $code:literal => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(try_from = "u8", into = "u8")]
        #[repr(u8)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $code, )+
        }

        impl $name {
            /// The integer code sent to the vendor.
            #[must_use]
            pub const fn code(self) -> u8 {
                self as u8
            }

            /// The vendor's symbolic name for this value.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $label, )+
                }
            }
        }

        impl TryFrom<u8> for $name {
            type Error = $crate::error::CoreError;

            fn try_from(value: u8) -> Result<Self, Self::Error> {
                match value {
                    $( $code => Ok(Self::$variant), )+
                    other => Err($crate::error::CoreError::InvalidEnumValue {
                        kind: stringify!($name),
                        value: other,
                    }),
                }
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> Self {
                value.code()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}
