//! Newtype IDs for type-safe entity references.
//!
//! Identifiers in FreshFold are opaque strings: order IDs are either
//! client-generated (`ORD-<millis>`) or assigned by the server, and
//! notification IDs always come from the server. The `define_string_id!`
//! macro creates a newtype per entity so the two can never be mixed up.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `Ord`
/// - `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>`, and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use fresh_fold_core::define_string_id;
/// define_string_id!(TicketId);
///
/// let id = TicketId::new("TKT-42");
/// assert_eq!(id.as_str(), "TKT-42");
/// ```
#[macro_export]
macro_rules! define_string_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// The ID as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(OrderId);
define_string_id!(NotificationId);
define_string_id!(ServiceId);

impl OrderId {
    /// Prefix used for client-generated order IDs.
    pub const CLIENT_PREFIX: &'static str = "ORD";

    /// Build a client-side order ID from a millisecond timestamp.
    #[must_use]
    pub fn from_timestamp_millis(millis: i64) -> Self {
        Self(format!("{}-{millis}", Self::CLIENT_PREFIX))
    }

    /// Whether this ID was generated client-side (as opposed to
    /// server-assigned).
    #[must_use]
    pub fn is_client_generated(&self) -> bool {
        self.0.starts_with(Self::CLIENT_PREFIX)
    }
}
