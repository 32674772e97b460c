//! XDR Codec
//!
//! Explicit, trait-based encoding of the network's ledger and transaction
//! structures. Every type implements [`WriteXdr`] and [`ReadXdr`]; composite
//! types are assembled from the primitive reader/writer operations so that
//! encoding stays total and inspectable.
//!
//! # Example
//!
//! ```rust,ignore
//! use stellar_wire::xdr::{ReadXdr, TransactionEnvelope, WriteXdr};
//!
//! let envelope = TransactionEnvelope::from_xdr_base64(blob)?;
//! let bytes = envelope.to_xdr()?;
//! ```

/// Plain enums encoded as a 32-bit signed discriminant
macro_rules! xdr_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $value:expr),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "snake_case")]
        #[repr(i32)]
        pub enum $name {
            $($(#[$vmeta])* $variant = $value),+
        }

        impl $name {
            pub const VARIANTS: &'static [$name] = &[$($name::$variant),+];

            pub const fn discriminant(self) -> i32 {
                self as i32
            }

            pub fn from_discriminant(value: i32) -> Option<Self> {
                match value {
                    $(v if v == $value => Some($name::$variant),)+
                    _ => None,
                }
            }

            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }
        }

        impl $crate::xdr::WriteXdr for $name {
            fn write_xdr(&self, w: &mut $crate::xdr::XdrWriter) -> $crate::xdr::XdrResult<()> {
                w.write_discriminant(self.discriminant());
                Ok(())
            }
        }

        impl $crate::xdr::ReadXdr for $name {
            fn read_xdr(r: &mut $crate::xdr::XdrReader<'_>) -> $crate::xdr::XdrResult<Self> {
                let (value, offset) = r.read_discriminant()?;
                Self::from_discriminant(value).ok_or($crate::xdr::XdrError::UnknownDiscriminant {
                    type_name: stringify!($name),
                    value,
                    offset,
                })
            }
        }
    };
}

/// Structs whose fields all encode themselves, in declaration order
macro_rules! xdr_struct {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $($(#[$fmeta:meta])* pub $field:ident : $ty:ty),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        pub struct $name {
            $($(#[$fmeta])* pub $field: $ty),+
        }

        impl $crate::xdr::WriteXdr for $name {
            fn write_xdr(&self, w: &mut $crate::xdr::XdrWriter) -> $crate::xdr::XdrResult<()> {
                $($crate::xdr::WriteXdr::write_xdr(&self.$field, w)?;)+
                Ok(())
            }
        }

        impl $crate::xdr::ReadXdr for $name {
            fn read_xdr(r: &mut $crate::xdr::XdrReader<'_>) -> $crate::xdr::XdrResult<Self> {
                Ok(Self {
                    $($field: <$ty as $crate::xdr::ReadXdr>::read_xdr(r)?),+
                })
            }
        }
    };
}

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod operations;
pub mod results;
pub mod transaction;
pub mod types;

#[cfg(test)]
mod tests;

pub use decoder::{Limits, ReadXdr, XdrReader, DEFAULT_DEPTH_LIMIT, DEFAULT_LEN_LIMIT};
pub use encoder::{WriteXdr, XdrWriter};
pub use error::{XdrError, XdrResult};
pub use operations::*;
pub use results::*;
pub use transaction::*;
pub use types::*;
