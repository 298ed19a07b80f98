pub mod provider_profile;

pub use provider_profile::*;
