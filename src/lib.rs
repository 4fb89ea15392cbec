// Weaver - request-to-code automation pipeline
// Library exports

// Core modules
pub mod agent;
pub mod claude;
pub mod config;
pub mod error;
pub mod generators;
pub mod pipeline;
pub mod tools;
