pub mod assembler;
pub mod error;
pub mod pacing;
pub mod writer;
