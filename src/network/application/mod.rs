//! # Application Layer Network Protocols
//!
//! This module contains the application layer (OSI Layer 7) protocol clients.
//! Each client is designed to work with the core network traits and keeps
//! its memory use fixed at compile time.
//!
//! ## Available Protocols
//!
//! - **[`http`]**: HTTP/1.0 client for RESTful API communication
//!
//! ## Design Principles
//!
//! - **Connection Agnostic**: Work with any type implementing [`Connect`](crate::network::Connect)
//! - **No-std Compatible**: Designed for embedded systems without heap allocation
//! - **Resource Conscious**: Use fixed-size buffers and minimal memory
//! - **Error Handling**: Every failure closes its socket before it is reported
//!
//! ## Usage Pattern
//!
//! 1. Implement [`Connect`](crate::network::Connect) for your socket stack
//! 2. Wrap it with the protocol client
//! 3. Use protocol-specific methods for communication

/// HTTP client implementation.
///
/// Provides a simple HTTP/1.0 client suitable for embedded systems, with
/// custom headers, JSON bodies and a single followed redirect.
pub mod http;
