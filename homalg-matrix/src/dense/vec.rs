use std::ops::{Add, Neg, Sub, Mul, Index, AddAssign, SubAssign, MulAssign};
use nalgebra::DVector;
use derive_more::Display;
use auto_impl_ops::auto_ops;
use homalg::{Ring, RingOps};
use super::{Mat, MatType};

/// A column vector with entries in `R`.
#[derive(Clone, Debug, Display, PartialEq, Eq)]
pub struct DVec<R> {
    inner: DVector<R>
}

impl<R> DVec<R> {
    pub fn inner(&self) -> &DVector<R> {
        &self.inner
    }

    pub fn into_inner(self) -> DVector<R> {
        self.inner
    }

    pub fn dim(&self) -> usize {
        self.inner.nrows()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &R)> {
        self.inner.iter().enumerate()
    }
}

impl<R> DVec<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    pub fn zero(dim: usize) -> Self {
        Self::from(DVector::zeros(dim))
    }

    pub fn is_zero(&self) -> bool {
        self.inner.iter().all(|a| a.is_zero())
    }

    pub fn unit(dim: usize, i: usize) -> Self {
        assert!(i < dim);
        let mut v = Self::zero(dim);
        v.inner[i] = R::one();
        v
    }

    pub fn from_data<I>(data: I) -> Self
    where I: IntoIterator<Item = R> {
        let data = data.into_iter().collect::<Vec<_>>();
        Self::from(DVector::from_vec(data))
    }

    pub fn from_entries<I>(dim: usize, entries: I) -> Self
    where I: IntoIterator<Item = (usize, R)> {
        let mut v = Self::zero(dim);
        for (i, a) in entries {
            v.inner[i] += a;
        }
        v
    }

    pub fn to_mat(&self) -> Mat<R> {
        Mat::from_col_vecs(self.dim(), [self.clone()])
    }
}

impl<R> From<DVector<R>> for DVec<R> {
    fn from(inner: DVector<R>) -> Self {
        Self { inner }
    }
}

impl<R> Index<usize> for DVec<R> {
    type Output = R;
    fn index(&self, i: usize) -> &R {
        &self.inner[i]
    }
}

impl<R> Neg for DVec<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    type Output = Self;
    fn neg(self) -> Self::Output {
        DVec::from(-self.inner)
    }
}

impl<R> Neg for &DVec<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    type Output = DVec<R>;
    fn neg(self) -> Self::Output {
        DVec::from(-&self.inner)
    }
}

#[auto_ops]
impl<R> AddAssign<&DVec<R>> for DVec<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn add_assign(&mut self, rhs: &Self) {
        self.inner += &rhs.inner;
    }
}

#[auto_ops]
impl<R> SubAssign<&DVec<R>> for DVec<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn sub_assign(&mut self, rhs: &Self) {
        self.inner -= &rhs.inner
    }
}

#[auto_ops]
impl<'a, 'b, R> Mul<&'b R> for &'a DVec<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    type Output = DVec<R>;
    fn mul(self, rhs: &'b R) -> Self::Output {
        DVec::from(&self.inner * rhs.clone())
    }
}

// Mat * DVec
#[auto_ops(val_val, val_ref, ref_val)]
impl<'a, 'b, R> Mul<&'b DVec<R>> for &'a Mat<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    type Output = DVec<R>;
    fn mul(self, rhs: &'b DVec<R>) -> Self::Output {
        assert_eq!(self.cols(), rhs.dim());
        DVec::from(self.inner() * &rhs.inner)
    }
}
