mod mat;
mod vec;
mod trans;
mod snf;

pub use mat::{Mat, MatType};
pub use vec::DVec;
pub use trans::Trans;
pub use snf::{snf, snf_in_place, SnfFlags, SnfResult};
