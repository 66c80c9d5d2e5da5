/// Schema generation written to the `meta` table on first open
/// Files carrying any other value are refused, there are no migrations
pub const SCHEMA_VERSION: u64 = 1;

/// Minimum name length in characters (after trimming)
pub const NAME_MIN_CHARS: usize = 3;

/// Maximum name length in characters (after trimming)
pub const NAME_MAX_CHARS: usize = 50;

/// Maximum email length in characters (after trimming)
pub const EMAIL_MAX_CHARS: usize = 100;

/// How long a notification stays on the page unless dismissed
pub const DEFAULT_NOTIFICATION_TTL_MS: u64 = 5_000;

// =============================================================================
// Form Labels
// =============================================================================

/// Submit label used when a form is opened without an explicit one
pub const LABEL_SAVE: &str = "Save";

/// Submit label of the create form
pub const LABEL_REGISTER: &str = "Register";

/// Submit label of the edit form
pub const LABEL_UPDATE: &str = "Update";

// =============================================================================
// Notification Messages
// =============================================================================

pub const MSG_LOAD_FAILED: &str = "Failed to load users";

pub const MSG_REGISTERED: &str = "User registered successfully!";

pub const MSG_REGISTER_FAILED: &str = "Failed to register user";

/// Shown when a new record collides with an existing email
pub const MSG_EMAIL_REGISTERED: &str = "This e-mail is already registered";

pub const MSG_UPDATED: &str = "User updated!";

pub const MSG_UPDATE_FAILED: &str = "Failed to update user";

/// Shown when an edit collides with another record's email
pub const MSG_EMAIL_BELONGS_TO_OTHER: &str = "This e-mail already belongs to another user";

pub const MSG_REMOVED: &str = "User removed!";

pub const MSG_REMOVE_FAILED: &str = "Failed to remove user";

/// Shown when a mutation is attempted while another one is pending
pub const MSG_BUSY: &str = "Another operation is still in progress";

// =============================================================================
// Validation Messages
// =============================================================================

pub const ERR_NAME_REQUIRED: &str = "Name is required";

pub const ERR_NAME_TOO_SHORT: &str = "Minimum 3 characters";

pub const ERR_NAME_TOO_LONG: &str = "Maximum 50 characters";

pub const ERR_EMAIL_REQUIRED: &str = "E-mail is required";

pub const ERR_EMAIL_INVALID: &str = "Enter a valid e-mail";

pub const ERR_EMAIL_TOO_LONG: &str = "Maximum 100 characters";
