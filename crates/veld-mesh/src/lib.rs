//! Surface-mesh synthesis: turns chunk block grids into per-face instance
//! transforms batched by material, ready for instanced draw submission.
#![forbid(unsafe_code)]

mod batch;
mod build;
mod face;

pub use batch::{Batch, BatchAllocator, FaceInstance};
pub use build::mesh_chunk;
pub use face::Face;
