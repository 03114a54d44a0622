//! Keys recognized in an `.astrarc` section.
//!
//! The store treats them as opaque strings; they matter to credential
//! resolution and to profile provisioning.

pub const ASTRA_DB_APPLICATION_TOKEN: &str = "ASTRA_DB_APPLICATION_TOKEN";
pub const ASTRA_DB_ID: &str = "ASTRA_DB_ID";
pub const ASTRA_DB_REGION: &str = "ASTRA_DB_REGION";
pub const ASTRA_DB_KEYSPACE: &str = "ASTRA_DB_KEYSPACE";
pub const ASTRA_DB_CLIENT_ID: &str = "ASTRA_DB_CLIENT_ID";
pub const ASTRA_DB_CLIENT_SECRET: &str = "ASTRA_DB_CLIENT_SECRET";
pub const ASTRA_DB_SCB_FOLDER: &str = "ASTRA_DB_SCB_FOLDER";

pub const ALL: [&str; 7] = [
    ASTRA_DB_APPLICATION_TOKEN,
    ASTRA_DB_ID,
    ASTRA_DB_REGION,
    ASTRA_DB_KEYSPACE,
    ASTRA_DB_CLIENT_ID,
    ASTRA_DB_CLIENT_SECRET,
    ASTRA_DB_SCB_FOLDER,
];
