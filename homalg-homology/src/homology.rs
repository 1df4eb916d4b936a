use homalg::{EucRing, EucRingOps};

use crate::{ChainComplex, Grid, SimpleRModStr};
use crate::utils::HomologyCalc;

pub type HomologySummand<R> = SimpleRModStr<R>;
pub type Homology<R> = Grid<HomologySummand<R>>;

impl<R> ChainComplex<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    pub fn homology_at(&self, i: isize, with_trans: bool) -> HomologySummand<R> {
        let d_in  = self.d_matrix(i - self.d_deg());
        let d_out = self.d_matrix(i);
        HomologyCalc::calculate(d_in, d_out, with_trans)
    }

    pub fn homology(&self, with_trans: bool) -> Homology<R> {
        Homology::generate(
            self.support(),
            |i| self.homology_at(i, with_trans)
        )
    }
}
