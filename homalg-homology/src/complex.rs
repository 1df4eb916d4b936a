use std::mem;
use std::ops::Index;

use itertools::{Itertools, Either};
use delegate::delegate;
use homalg::{Ring, RingOps};
use homalg_matrix::dense::{Mat, MatType, DVec, Trans};

use crate::{ChainType, Grid, GridIter};
use crate::summand::{RModStr, SimpleRModStr, rmod_str_symbol};

pub type ChainComplexSummand<R> = SimpleRModStr<R>;

/// A finitely supported complex of free `R`-modules,
/// graded over `isize` with differentials given by matrices.
pub struct ChainComplex<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    summands: Grid<ChainComplexSummand<R>>,
    chain_type: ChainType,
    d_matrices: Grid<Mat<R>>
}

impl<R> ChainComplex<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    pub fn new(summands: Grid<ChainComplexSummand<R>>, chain_type: ChainType, mut d_matrices: Grid<Mat<R>>) -> Self {
        assert!(summands.iter().all(|(_, s)| s.is_free()));

        let d_deg = chain_type.d_deg();
        for i in summands.support() {
            let r = summands[i].rank();
            if r > 0 && !d_matrices.is_supported(i - d_deg) {
                let d = Mat::zero((r, 0));
                d_matrices.insert(i - d_deg, d);
            }
        }

        Self { summands, chain_type, d_matrices }
    }

    pub fn generate<It, F>(support: It, chain_type: ChainType, d_matrix_map: F) -> Self
    where
        It: IntoIterator<Item = isize>,
        F: FnMut(isize) -> Mat<R>
    {
        let d_matrices = Grid::generate(support, d_matrix_map);

        let summands = Grid::generate(d_matrices.support(), |i| {
            let r = d_matrices[i].cols();
            let t = Trans::id(r);
            ChainComplexSummand::new(r, vec![], Some(t))
        });

        Self::new(summands, chain_type, d_matrices)
    }

    pub fn from_mats(chain_type: ChainType, offset: isize, mut mats: Vec<Mat<R>>) -> Self {
        let n = mats.len() as isize;
        let range = offset .. offset + n;
        let range = if chain_type.is_descending() {
            Either::Right(range.rev())
        } else {
            Either::Left(range)
        };

        Self::generate(
            range, chain_type,
            move |i| {
                let i = (i - offset) as usize;
                mem::take(&mut mats[i])
            }
        )
    }

    pub fn summands(&self) -> &Grid<ChainComplexSummand<R>> {
        &self.summands
    }

    pub fn chain_type(&self) -> ChainType {
        self.chain_type
    }

    pub fn d_deg(&self) -> isize {
        self.chain_type.d_deg()
    }

    pub fn rank(&self, i: isize) -> usize {
        self[i].rank()
    }

    delegate! {
        to self.summands {
            pub fn support(&self) -> GridIter;
            pub fn is_supported(&self, i: isize) -> bool;
            pub fn get(&self, i: isize) -> &ChainComplexSummand<R>;
        }
    }

    /// The differential out of degree `i`.
    /// Unsupported degrees yield a zero matrix of the right shape.
    pub fn d_matrix(&self, i: isize) -> Mat<R> {
        if self.d_matrices.is_supported(i) {
            self.d_matrices[i].clone()
        } else {
            Mat::zero((self.rank(i + self.d_deg()), self.rank(i)))
        }
    }

    pub fn d_matrix_ref(&self, i: isize) -> &Mat<R> {
        &self.d_matrices[i]
    }

    pub fn d(&self, i: isize, v: &DVec<R>) -> DVec<R> {
        assert_eq!(self.rank(i), v.dim());

        if self.d_matrices.is_supported(i) {
            self.d_matrix_ref(i) * v
        } else {
            DVec::zero(self.rank(i + self.d_deg()))
        }
    }

    pub fn check_d_at(&self, i0: isize) {
        let i1 = i0 + self.d_deg();
        if !(self.is_supported(i0) && self.is_supported(i1)) {
            return
        }

        let d0 = self.d_matrix(i0);
        let d1 = self.d_matrix(i1);
        let res = d1 * d0;

        assert!( res.is_zero(), "d² is non-zero at {i0}." );
    }

    pub fn check_d_all(&self) {
        for i in self.support() {
            self.check_d_at(i);
        }
    }

    pub fn display_d_at(&self, i: isize) -> String {
        let c = |i| rmod_str_symbol(self.rank(i), &[], "0");
        let c0 = c(i);
        let c1 = c(i + self.d_deg());
        let d = self.d_matrix(i);

        if d.is_zero() {
            format!("C[{i}] {c0} -> {c1}; zero.")
        } else {
            format!("C[{i}] {c0} -> {c1}\n{d}.")
        }
    }

    pub fn display_d(&self) -> String {
        self.support().filter_map(|i|
            if self.rank(i) > 0 && self.rank(i + self.d_deg()) > 0 {
                Some(self.display_d_at(i))
            } else {
                None
            }
        ).join("\n\n")
    }

    pub fn print_d(&self) {
        println!("{}", self.display_d());
    }
}

impl<R> Index<isize> for ChainComplex<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    type Output = ChainComplexSummand<R>;
    fn index(&self, i: isize) -> &Self::Output {
        self.get(i)
    }
}
