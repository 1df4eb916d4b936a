use homalg::{Ring, RingOps};
use super::{Mat, DVec};

/// A composable change-of-basis between a source module `R^n`
/// and a reduced target module `R^m`.
#[derive(Clone, Debug)]
pub struct Trans<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    src_dim: usize,
    tgt_dim: usize,
    f_mats: Vec<Mat<R>>,
    b_mats: Vec<Mat<R>>,
}

impl<R> Trans<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    pub fn id(n: usize) -> Self {
        Self {
            src_dim: n,
            tgt_dim: n,
            f_mats: vec![],
            b_mats: vec![]
        }
    }

    pub fn zero() -> Self {
        Self::id(0)
    }

    pub fn new(f: Mat<R>, b: Mat<R>) -> Self {
        let mut t = Self::id(f.ncols());
        t.append(f, b);
        t
    }

    pub fn src_dim(&self) -> usize {
        self.src_dim
    }

    pub fn tgt_dim(&self) -> usize {
        self.tgt_dim
    }

    pub fn is_id(&self) -> bool {
        self.f_mats.is_empty()
    }

    pub fn forward(&self, v: &DVec<R>) -> DVec<R> {
        assert_eq!(v.dim(), self.src_dim);
        self.f_mats.iter().fold(v.clone(), |v, f| f * v)
    }

    pub fn backward(&self, v: &DVec<R>) -> DVec<R> {
        assert_eq!(v.dim(), self.tgt_dim);
        self.b_mats.iter().rev().fold(v.clone(), |v, b| b * v)
    }

    pub fn append(&mut self, f: Mat<R>, b: Mat<R>) {
        assert_eq!(f.ncols(), b.nrows());
        assert_eq!(f.nrows(), b.ncols());
        assert_eq!(f.ncols(), self.tgt_dim);

        self.tgt_dim = f.nrows();
        self.f_mats.push(f);
        self.b_mats.push(b);
    }

    pub fn merge(&mut self, mut other: Trans<R>) {
        assert_eq!(self.tgt_dim, other.src_dim);

        self.tgt_dim = other.tgt_dim;
        self.f_mats.append(&mut other.f_mats);
        self.b_mats.append(&mut other.b_mats);
    }

    pub fn forward_mat(&self) -> Mat<R> {
        self.f_mats.iter().fold(
            Mat::id(self.src_dim),
            |res, f| f * res
        )
    }

    pub fn backward_mat(&self) -> Mat<R> {
        self.b_mats.iter().rev().fold(
            Mat::id(self.tgt_dim),
            |res, b| b * res
        )
    }
}

impl<R> Default for Trans<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn default() -> Self {
        Self::zero()
    }
}
