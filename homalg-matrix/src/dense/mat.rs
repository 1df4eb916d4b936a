use std::ops::{Add, Neg, Sub, Mul, Index, IndexMut, AddAssign, SubAssign, MulAssign, Range};
use nalgebra::DMatrix;
use delegate::delegate;
use derive_more::Display;
use auto_impl_ops::auto_ops;
use itertools::Itertools;
use homalg::{Ring, RingOps};
use super::DVec;

pub trait MatType {
    fn shape(&self) -> (usize, usize);
    fn rows(&self) -> usize { self.shape().0 }
    fn cols(&self) -> usize { self.shape().1 }
    fn is_square(&self) -> bool {
        let (m, n) = self.shape();
        m == n
    }
}

#[derive(Clone, Debug, Display, PartialEq, Eq)]
pub struct Mat<R> {
    inner: DMatrix<R>
}

impl<R> MatType for Mat<R> {
    fn shape(&self) -> (usize, usize) {
        (self.inner.nrows(), self.inner.ncols())
    }
}

impl<R> Mat<R> {
    pub fn inner(&self) -> &DMatrix<R> {
        &self.inner
    }

    pub fn into_inner(self) -> DMatrix<R> {
        self.inner
    }

    delegate! {
        to self.inner {
            pub fn nrows(&self) -> usize;
            pub fn ncols(&self) -> usize;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &R)> {
        let m = self.rows();
        self.inner.iter().enumerate().map(move |(i, a)|
            (i % m, i / m, a)
        )
    }
}

impl<R> Mat<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    pub fn from_data<I>(shape: (usize, usize), data: I) -> Self
    where I: IntoIterator<Item = R> {
        DMatrix::from_row_iterator(shape.0, shape.1, data).into()
    }

    pub fn zero(shape: (usize, usize)) -> Self {
        let inner = DMatrix::zeros(shape.0, shape.1);
        Self::from(inner)
    }

    pub fn is_zero(&self) -> bool {
        self.iter().all(|e| e.2.is_zero())
    }

    pub fn id(size: usize) -> Self {
        let inner = DMatrix::identity(size, size);
        Self::from(inner)
    }

    pub fn is_id(&self) -> bool {
        self.is_square() && self.iter().all(|(i, j, a)|
            i == j && a.is_one() ||
            i != j && a.is_zero()
        )
    }

    pub fn diag<I>(shape: (usize, usize), entries: I) -> Self
    where I: IntoIterator<Item = R> {
        let mut mat = Self::zero(shape);
        for (i, a) in entries.into_iter().enumerate() {
            mat[(i, i)] = a;
        }
        mat
    }

    pub fn is_diag(&self) -> bool {
        self.iter().all(|(i, j, a)|
            i == j || a.is_zero()
        )
    }

    pub fn submat(&self, rows: Range<usize>, cols: Range<usize>) -> Mat<R> {
        let (i0, i1) = (rows.start, rows.end);
        let (j0, j1) = (cols.start, cols.end);

        assert!(i0 <= i1 && i1 <= self.rows());
        assert!(j0 <= j1 && j1 <= self.cols());

        let view = self.inner.view((i0, j0), (i1 - i0, j1 - j0));
        Self::from(view.clone_owned())
    }

    pub fn submat_rows(&self, rows: Range<usize>) -> Mat<R> {
        let n = self.cols();
        self.submat(rows, 0..n)
    }

    pub fn submat_cols(&self, cols: Range<usize>) -> Mat<R> {
        let m = self.rows();
        self.submat(0..m, cols)
    }

    pub fn col_vec(&self, j: usize) -> DVec<R> {
        assert!(j < self.cols());
        DVec::from(self.inner.column(j).clone_owned())
    }

    pub fn from_col_vecs<I>(rows: usize, cols: I) -> Self
    where I: IntoIterator<Item = DVec<R>> {
        let cols = cols.into_iter().collect_vec();

        assert!(cols.iter().all(|v| v.dim() == rows));

        let inner = DMatrix::from_fn(rows, cols.len(), |i, j|
            cols[j][i].clone()
        );
        Self::from(inner)
    }

    pub fn transpose(&self) -> Mat<R> {
        Self::from(self.inner.transpose())
    }

    // Vertical concatenation, `[self; other]`.
    pub fn stack(&self, other: &Mat<R>) -> Mat<R> {
        assert_eq!(self.cols(), other.cols());

        let m = self.rows();
        let inner = DMatrix::from_fn(m + other.rows(), self.cols(), |i, j|
            if i < m {
                self.inner[(i, j)].clone()
            } else {
                other.inner[(i - m, j)].clone()
            }
        );
        Self::from(inner)
    }

    // Horizontal concatenation, `[self, other]`.
    pub fn concat(&self, other: &Mat<R>) -> Mat<R> {
        assert_eq!(self.rows(), other.rows());

        let n = self.cols();
        let inner = DMatrix::from_fn(self.rows(), n + other.cols(), |i, j|
            if j < n {
                self.inner[(i, j)].clone()
            } else {
                other.inner[(i, j - n)].clone()
            }
        );
        Self::from(inner)
    }
}

impl<R> From<DMatrix<R>> for Mat<R> {
    fn from(inner: DMatrix<R>) -> Self {
        Self { inner }
    }
}

impl<R> Index<(usize, usize)> for Mat<R> {
    type Output = R;
    delegate! {
        to self.inner {
            fn index(&self, index: (usize, usize)) -> &R;
        }
    }
}

impl<R> IndexMut<(usize, usize)> for Mat<R> {
    delegate! {
        to self.inner {
            fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output;
        }
    }
}

impl<R> Default for Mat<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn default() -> Self {
        Self::zero((0, 0))
    }
}

impl<R> Neg for Mat<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Mat::from(-self.inner)
    }
}

impl<R> Neg for &Mat<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    type Output = Mat<R>;
    fn neg(self) -> Self::Output {
        Mat::from(-&self.inner)
    }
}

#[auto_ops]
impl<R> AddAssign<&Mat<R>> for Mat<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn add_assign(&mut self, rhs: &Self) {
        self.inner += &rhs.inner;
    }
}

#[auto_ops]
impl<R> SubAssign<&Mat<R>> for Mat<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn sub_assign(&mut self, rhs: &Self) {
        self.inner -= &rhs.inner
    }
}

#[auto_ops]
impl<'a, 'b, R> Mul<&'b Mat<R>> for &'a Mat<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    type Output = Mat<R>;
    fn mul(self, rhs: &'b Mat<R>) -> Self::Output {
        let prod = &self.inner * &rhs.inner;
        Mat::from(prod)
    }
}

impl<R> Mat<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    pub fn swap_rows(&mut self, i: usize, j: usize) {
        self.inner.swap_rows(i, j);
    }

    pub fn swap_cols(&mut self, i: usize, j: usize) {
        self.inner.swap_columns(i, j);
    }

    pub fn mul_row(&mut self, i: usize, r: &R) {
        self.inner.row_mut(i).mul_assign(r.clone())
    }

    pub fn mul_col(&mut self, j: usize, r: &R) {
        self.inner.column_mut(j).mul_assign(r.clone())
    }

    pub fn add_row_to(&mut self, i: usize, j: usize, r: &R) {
        let row = self.inner.row(i).mul(r.clone());
        self.inner.row_mut(j).add_assign(row)
    }

    pub fn add_col_to(&mut self, i: usize, j: usize, r: &R) {
        let col = self.inner.column(i).mul(r.clone());
        self.inner.column_mut(j).add_assign(col)
    }

    // Multiply [a, b; c, d] from left.
    pub fn left_elementary(&mut self, comps: [&R; 4], i: usize, j: usize) {
        let [a, b, c, d] = comps.map(Clone::clone);

        let r_i = self.inner.row(i);
        let r_j = self.inner.row(j);

        let s_i = &r_i * a + &r_j * b;
        let s_j = &r_i * c + &r_j * d;

        self.inner.set_row(i, &s_i);
        self.inner.set_row(j, &s_j);
    }

    // Multiply [a, c; b, d] from right.
    pub fn right_elementary(&mut self, comps: [&R; 4], i: usize, j: usize) {
        let [a, b, c, d] = comps.map(Clone::clone);

        let c_i = self.inner.column(i);
        let c_j = self.inner.column(j);

        let s_i = &c_i * a + &c_j * b;
        let s_j = &c_i * c + &c_j * d;

        self.inner.set_column(i, &s_i);
        self.inner.set_column(j, &s_j);
    }
}
