pub mod auth0;
pub mod provider;

pub use auth0::Auth0Client;
pub use provider::{IdentityProvider, ProviderError};
