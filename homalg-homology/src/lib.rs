mod grid;
mod chain_type;
mod summand;
mod complex;
mod chain_map;
mod homology;
mod map;
mod exact;
mod samples;

pub mod utils;

pub use grid::{Grid, GridIter, DisplayForGrid};
pub use chain_type::ChainType;
pub use summand::{RModStr, SimpleRModStr, rmod_str_symbol};
pub use complex::{ChainComplex, ChainComplexSummand};
pub use chain_map::ChainMap;
pub use homology::{Homology, HomologySummand};
pub use map::HomologyMap;
pub use exact::{HomologyExactSequence, ExactnessReport, ExactnessError};
