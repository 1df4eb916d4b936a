mod homology_calc;

pub use homology_calc::HomologyCalc;
