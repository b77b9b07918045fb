/// Maximum board title length, counted in UTF-16 code units after trimming
pub const MAX_TITLE_LENGTH: usize = 60;

/// Placeholder backgrounds a new board can be given
/// One is drawn uniformly at random on create and never changes afterwards
pub const PLACEHOLDER_IMAGES: [&str; 10] = [
    "/placeholders/1.svg",
    "/placeholders/2.svg",
    "/placeholders/3.svg",
    "/placeholders/4.svg",
    "/placeholders/5.svg",
    "/placeholders/6.svg",
    "/placeholders/7.svg",
    "/placeholders/8.svg",
    "/placeholders/9.svg",
    "/placeholders/10.svg",
];

/// Maximum age of a signed identity in seconds (5 minutes)
/// Prevents replay of captured identity headers
pub const DEFAULT_IDENTITY_MAX_AGE_SECS: i64 = 300;

// =============================================================================
// Identity Headers
// =============================================================================

/// Identity subject forwarded by the auth gateway
pub const HEADER_IDENTITY_SUBJECT: &str = "x-identity-subject";

/// Display name forwarded by the auth gateway
pub const HEADER_IDENTITY_NAME: &str = "x-identity-name";

/// Unix timestamp (seconds) at which the gateway signed the identity
pub const HEADER_IDENTITY_TIMESTAMP: &str = "x-identity-timestamp";

/// Hex HMAC-SHA256 over `subject\nname\ntimestamp`
pub const HEADER_IDENTITY_SIGNATURE: &str = "x-identity-signature";

// =============================================================================
// Error Messages
// =============================================================================

/// Title is empty once surrounding whitespace is removed
pub const ERR_TITLE_REQUIRED: &str = "Title is required";

/// Title exceeds MAX_TITLE_LENGTH once trimmed
pub const ERR_TITLE_TOO_LONG: &str = "Title too long";
