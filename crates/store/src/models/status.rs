//! Status helper enums for document entities.
//!
//! Each variant maps to the exact string stored in the persisted JSON
//! document, so renaming a variant's wire name is a breaking change to
//! previously persisted data.

use buildmatch_core::error::CoreError;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant ),+
        }

        impl $name {
            /// Wire name as stored in the document.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $wire ),+
                }
            }

            /// Parse from a stored wire name.
            pub fn from_name(name: &str) -> Result<Self, CoreError> {
                match name {
                    $( $wire => Ok(Self::$variant), )+
                    other => Err(CoreError::Validation(format!(
                        "Unknown {} '{other}'",
                        stringify!($name)
                    ))),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

define_status_enum! {
    /// Project lifecycle status.
    ProjectStatus {
        Open = "open",
        Pending = "pending",
        Active = "active",
        Completed = "completed",
    }
}

define_status_enum! {
    /// Matching-request lifecycle status.
    RequestStatus {
        Pending = "pending",
        Accepted = "accepted",
        Rejected = "rejected",
    }
}
