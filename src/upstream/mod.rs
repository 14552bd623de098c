//! Clients for the two services the relay sits in front of: the internal
//! token service and the third-party routing provider.

pub mod route_forwarder;
pub mod token_provider;

pub use route_forwarder::RouteForwarder;
pub use token_provider::TokenProvider;
