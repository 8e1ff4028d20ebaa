//! # Record Identifiers
//!
//! Newtype wrappers for the identifiers records use to reference each
//! other. These prevent identifier confusion: a `LocationId` cannot be
//! resolved against the object collection.
//!
//! Identifiers and slugs are kept as the literal strings from the source
//! documents. `id` values are stable references and never appear in URLs;
//! slugs are the URL-facing keys.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw identifier string.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

string_id!(
    /// Identifier of an image record.
    ImageId
);

string_id!(
    /// Identifier of a celestial object record.
    ObjectId
);

string_id!(
    /// Identifier of an equipment record (scope, mount, camera or filter).
    EquipmentId
);

string_id!(
    /// Identifier of an observing location record.
    LocationId
);

string_id!(
    /// URL-facing key of an object, equipment or location record.
    Slug
);
