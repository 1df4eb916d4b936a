use std::sync::Arc;

use homalg::{Ring, RingOps};
use homalg_matrix::dense::{Mat, MatType, DVec};

use crate::{ChainComplex, Grid};

/// A degree-shifting map between chain complexes,
/// given degree-wise on coordinate vectors.
#[derive(Clone)]
pub struct ChainMap<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    deg: isize,
    map: Arc<dyn Fn(isize, &DVec<R>) -> DVec<R> + Send + Sync>,
}

impl<R> ChainMap<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    pub fn new<F>(deg: isize, map: F) -> Self
    where F: Fn(isize, &DVec<R>) -> DVec<R> + Send + Sync + 'static {
        Self { deg, map: Arc::new(map) }
    }

    pub fn id() -> Self {
        Self::new(0, |_, v| v.clone())
    }

    pub fn from_mats(deg: isize, mats: Grid<Mat<R>>) -> Self {
        Self::new(deg, move |i, v| {
            let f = &mats[i];
            assert_eq!(f.cols(), v.dim());
            f * v
        })
    }

    pub fn deg(&self) -> isize {
        self.deg
    }

    pub fn apply(&self, i: isize, z: &DVec<R>) -> DVec<R> {
        (self.map)(i, z)
    }

    pub fn check_at(&self, source: &ChainComplex<R>, target: &ChainComplex<R>, i: isize) {
        assert_eq!(source.d_deg(), target.d_deg());

        let d_deg = source.d_deg();

        for j in 0..source.rank(i) {
            let x = DVec::unit(source.rank(i), j);
            let dx = source.d(i, &x);
            let fdx = self.apply(i + d_deg, &dx);
            let fx = self.apply(i, &x);
            let dfx = target.d(i + self.deg, &fx);
            assert!(dfx == fdx, "df != fd for e{j} at {i}.");
        }
    }

    pub fn check_all(&self, source: &ChainComplex<R>, target: &ChainComplex<R>) {
        for i in source.support() {
            self.check_at(source, target, i);
        }
    }
}
