// Linear algebra operations on rank-2 nodes.
pub mod matmul;
pub mod transpose;

pub use matmul::matmul_op;
pub use transpose::transpose_op;
