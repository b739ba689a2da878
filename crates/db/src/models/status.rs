//! Status enums mapping to `TEXT` columns guarded by `CHECK` constraints.
//!
//! Each variant's literal matches the value allowed by the constraint in
//! the corresponding migration. Decoding an unknown value is an error
//! rather than a silent fallback.

use serde::{Deserialize, Serialize};
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef};
use sqlx::{Decode, Encode, Postgres, Type};

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The database literal for this status.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $val ),+
                }
            }

            /// Parse a database literal.
            pub fn parse(value: &str) -> Option<Self> {
                match value {
                    $( $val => Some($name::$variant), )+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Type<Postgres> for $name {
            fn type_info() -> PgTypeInfo {
                <String as Type<Postgres>>::type_info()
            }

            fn compatible(ty: &PgTypeInfo) -> bool {
                <String as Type<Postgres>>::compatible(ty)
            }
        }

        impl<'q> Encode<'q, Postgres> for $name {
            fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
                <&str as Encode<'q, Postgres>>::encode_by_ref(&self.as_str(), buf)
            }
        }

        impl<'r> Decode<'r, Postgres> for $name {
            fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
                let raw = <&str as Decode<'r, Postgres>>::decode(value)?;
                Self::parse(raw).ok_or_else(|| {
                    format!("unknown {} value '{raw}'", stringify!($name)).into()
                })
            }
        }
    };
}

define_status_enum! {
    /// Wishlist item lifecycle. Only `Active` items take part in matching.
    WishlistItemStatus {
        Active = "active",
        Acquired = "acquired",
        Archived = "archived",
    }
}

define_status_enum! {
    /// Marketplace listing lifecycle. `Deleted` is the soft-delete state.
    ListingStatus {
        Active = "active",
        Reserved = "reserved",
        Sold = "sold",
        Deleted = "deleted",
    }
}

define_status_enum! {
    /// User-facing state of a wishlist match.
    WishlistMatchStatus {
        New = "new",
        Viewed = "viewed",
        Dismissed = "dismissed",
        Interested = "interested",
    }
}

define_status_enum! {
    /// Match job lifecycle.
    ///
    /// `Failed` may be retried after its backoff elapses; `Dead` is terminal.
    MatchJobStatus {
        Pending = "pending",
        Processing = "processing",
        Completed = "completed",
        Failed = "failed",
        Dead = "dead",
    }
}

define_status_enum! {
    /// Which side of the marketplace a match job starts from.
    MatchJobType {
        MatchListing = "match_listing",
        MatchWishlist = "match_wishlist",
    }
}

impl WishlistMatchStatus {
    /// Statuses a user may set directly. `New` is only ever set by the matcher.
    pub fn is_user_settable(self) -> bool {
        !matches!(self, WishlistMatchStatus::New)
    }
}

impl MatchJobStatus {
    /// Whether a manual retry may move the job back to `Pending`.
    pub fn is_retryable(self) -> bool {
        matches!(self, MatchJobStatus::Failed | MatchJobStatus::Dead)
    }
}
