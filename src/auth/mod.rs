pub mod credentials;
pub mod env;

pub use credentials::{CredentialResolver, Credentials, read_variable};
pub use env::Env;
