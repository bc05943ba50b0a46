/// Try-on generation module
///
/// This module talks to the generative image API:
/// - Wire types for the generateContent call (wire.rs)
/// - The stateless remote client (client.rs)

pub mod client;
pub mod wire;
