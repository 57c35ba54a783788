// src/blocks/mod.rs

// ============================================================================
// Submodules
// ============================================================================

mod common;
mod cpu_block;
mod gpu_block;

// Re-export the decoding trait and token helpers
pub use common::{SensorBlock, nth_token, parse_float, parse_integer, strip_unit};

// Re-export block types
pub use cpu_block::CpuBlock;
pub use gpu_block::GpuBlock;
