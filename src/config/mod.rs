pub mod keys;
pub mod paths;
pub mod profile;
pub mod provision;
pub mod rc_file;
pub mod store;

pub use paths::default_config_file;
pub use profile::{DEFAULT_PROFILE, resolve_profile};
pub use rc_file::{ConfigFile, Section};
pub use store::{ConfigStore, load_from, save_to};
