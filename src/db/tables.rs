use redb::TableDefinition;

/// Users table: user id -> UserRecord (serialized)
pub const USERS: TableDefinition<u64, &[u8]> = TableDefinition::new("users");

/// Unique email index: normalized email -> user id
/// The index is case-sensitive, so only lowercased emails are ever inserted
pub const USERS_BY_EMAIL: TableDefinition<&str, u64> = TableDefinition::new("users_by_email");

/// Metadata: schema version and the auto-increment counter
pub const META: TableDefinition<&str, u64> = TableDefinition::new("meta");

/// `META` key holding the schema generation
pub const META_SCHEMA_VERSION: &str = "schema_version";

/// `META` key holding the next id to assign
pub const META_NEXT_ID: &str = "next_id";
