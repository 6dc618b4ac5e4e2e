//! Adapter layer modules for external system integration.
//!
//! Provides the signing engine seam and the outbound fetch transport,
//! including the proxy-routing decorator.

pub mod engine;
pub mod transport;

pub use engine::{EngineError, NativeSigningConfig, SigningEngine};
pub use transport::{
    FetchMethod, FetchRequest, FetchResponse, FetchTransport, HttpTransport, ProxyTransport,
    TransportError,
};
