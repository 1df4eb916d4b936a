use homalg::{EucRing, EucRingOps};
use homalg_matrix::dense::{Mat, DVec};

use crate::{ChainMap, Grid, Homology, RModStr};
use crate::summand::reduce_mod;

/// The map induced on homology by a chain map,
/// given degree-wise on homology coordinates.
pub struct HomologyMap<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    deg: isize,
    mats: Grid<Mat<R>>,
    tgt_tors: Grid<Vec<R>>
}

impl<R> HomologyMap<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    /// Both homologies must be computed with trans.
    pub fn induced(f: &ChainMap<R>, src: &Homology<R>, tgt: &Homology<R>) -> Self {
        let deg = f.deg();

        let mats = Grid::generate(src.support(), |n| {
            let s = &src[n];
            let t = &tgt[n + deg];

            let cols = (0..s.dim()).map(|j| {
                let x = s.gen_vec(j);
                let fx = f.apply(n, &x);
                t.vectorize(&fx)
            });

            Mat::from_col_vecs(t.dim(), cols)
        });

        let tgt_tors = Grid::generate(src.support(), |n|
            tgt[n + deg].tors().to_vec()
        );

        Self { deg, mats, tgt_tors }
    }

    pub fn deg(&self) -> isize {
        self.deg
    }

    pub fn mat(&self, n: isize) -> &Mat<R> {
        &self.mats[n]
    }

    pub fn apply(&self, n: isize, v: &DVec<R>) -> DVec<R> {
        assert!(self.mats.is_supported(n));

        let w = self.mat(n) * v;
        reduce_mod(w, &self.tgt_tors[n])
    }

    pub fn is_zero(&self) -> bool {
        self.mats.iter().all(|(_, f)| f.is_zero())
    }
}

#[cfg(test)]
mod tests {
    use homalg::Ring;
    use homalg_matrix::dense::MatType;
    use crate::ChainComplex;
    use super::*;

    #[test]
    fn id() {
        let c = ChainComplex::<i32>::t2();
        let h = c.homology(true);

        let f = ChainMap::id();
        let fh = HomologyMap::induced(&f, &h, &h);

        assert!(!fh.is_zero());

        for n in h.support() {
            assert!(fh.mat(n).is_id());
        }
    }

    #[test]
    fn s2_to_d3() {
        let s2 = ChainComplex::<i32>::s2();
        let d3 = ChainComplex::<i32>::d3();

        let f = ChainMap::new(0, |i, z|
            if i == 3 { DVec::zero(1) } else { z.clone() }
        );

        let h_s2 = s2.homology(true);
        let h_d3 = d3.homology(true);

        let fh = HomologyMap::induced(&f, &h_s2, &h_d3);

        // iso on H_0, zero on H_2
        assert_eq!(fh.mat(0).shape(), (1, 1));
        assert!(fh.mat(0)[(0, 0)].is_pm_one());

        assert_eq!(fh.mat(2).shape(), (0, 1));

        let v = DVec::unit(1, 0);
        assert_eq!(fh.apply(0, &v).dim(), 1);
        assert!(!fh.apply(0, &v).is_zero());
    }

    #[test]
    fn doubling() {
        let c = ChainComplex::<i32>::t2();
        let h = c.homology(true);

        let f = ChainMap::new(0, |_, v| v * &2);
        let fh = HomologyMap::induced(&f, &h, &h);

        for n in h.support() {
            let d = h[n].dim();
            assert_eq!(fh.mat(n), &Mat::diag((d, d), vec![2; d]));
        }

        // linearity
        let v = DVec::from_data([1, -1]);
        let w = DVec::from_data([0, 2]);
        let lhs = fh.apply(1, &(&v * &3 + &w));
        let rhs = fh.apply(1, &v) * 3 + fh.apply(1, &w);
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn torsion_target() {
        let rp2 = ChainComplex::<i32>::rp2();
        let h = rp2.homology(true);

        let f = ChainMap::id();
        let fh = HomologyMap::induced(&f, &h, &h);

        // H_1 = Z/2, identity descends to the identity on the quotient
        let v = DVec::unit(1, 0);
        assert_eq!(fh.apply(1, &v), v);

        let w = DVec::from_data([2]);
        assert!(fh.apply(1, &w).is_zero());
    }
}
