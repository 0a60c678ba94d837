// Elementwise math functions, all implemented through `ElementwiseFunction`.
pub mod abs;
pub mod exp;
pub mod ln;

pub use abs::{abs_op, Abs};
pub use exp::{exp_op, Exp};
pub use ln::{ln_op, Ln};
