pub mod config;
pub mod corpus;
pub mod error;
pub mod keyboard;
pub mod layouts;
pub mod optimizer;
pub mod scorer;
// cmd and reports are modules of the binary crate (main.rs).
