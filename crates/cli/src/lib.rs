// xgrep library surface, shared by the binary and the integration tests

pub mod app;
pub mod exit_codes;
pub mod render;
