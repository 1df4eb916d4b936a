use std::fmt::{self, Display};

use itertools::Itertools;

use homalg::{EucRing, EucRingOps, Ring, RingOps};
use homalg_matrix::dense::{Trans, DVec};

/// A finitely generated module over `R`,
/// presented as `R^rank ⊕ R/t_1 ⊕ ... ⊕ R/t_k`.
pub trait RModStr
where Self::R: Ring, for<'x> &'x Self::R: RingOps<Self::R> {
    type R;

    fn rank(&self) -> usize;
    fn tors(&self) -> &[Self::R];

    fn dim(&self) -> usize {
        self.rank() + self.tors().len()
    }

    fn is_zero(&self) -> bool {
        self.rank() == 0 && self.is_free()
    }

    fn is_free(&self) -> bool {
        self.tors().is_empty()
    }

    fn math_symbol(&self) -> String {
        rmod_str_symbol(self.rank(), self.tors(), "0")
    }
}

pub fn rmod_str_symbol<R>(rank: usize, tors: &[R], dflt: &str) -> String
where R: Ring, for<'x> &'x R: RingOps<R> {
    use homalg::util::format::superscript;

    let tors = tors.iter()
        .into_group_map_by(|r| r.to_string())
        .into_iter().map(|(k, list)| (k, list.len()))
        .sorted()
        .collect_vec();

    if rank == 0 && tors.is_empty() {
        return dflt.to_string()
    }

    let mut res = vec![];
    let symbol = R::math_symbol();

    if rank > 1 {
        let str = format!("{}{}", symbol, superscript(rank as isize));
        res.push(str);
    } else if rank == 1 {
        let str = symbol.to_string();
        res.push(str);
    }

    for (t, r) in tors.iter() {
        let str = if r > &1 {
            format!("({}/{}){}", symbol, t, superscript(*r as isize))
        } else {
            format!("({}/{})", symbol, t)
        };
        res.push(str);
    }

    res.join(" ⊕ ")
}

/// Reduce the torsion coordinates of `v` by the given factors.
/// The first `v.dim() - tors.len()` coordinates are free.
/// Remainders are canonicalized so that equal classes reduce equally,
/// e.g. `-1` and `1` both reduce to `1` mod `2`.
pub(crate) fn reduce_mod<R>(v: DVec<R>, tors: &[R]) -> DVec<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    if tors.is_empty() {
        return v
    }

    let r = v.dim() - tors.len();
    DVec::from_data(v.iter().map(|(i, a)|
        if i < r {
            a.clone()
        } else {
            let t = &tors[i - r];
            ((a % t) + t) % t
        }
    ))
}

#[derive(Clone, Debug)]
pub struct SimpleRModStr<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    rank: usize,
    tors: Vec<R>,
    trans: Option<Trans<R>>
}

impl<R> SimpleRModStr<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    pub fn new(rank: usize, tors: Vec<R>, trans: Option<Trans<R>>) -> Self {
        if let Some(t) = &trans {
            assert_eq!(rank + tors.len(), t.tgt_dim());
        }
        Self { rank, tors, trans }
    }

    pub fn free(rank: usize) -> Self {
        Self::new(rank, vec![], Some(Trans::id(rank)))
    }

    pub fn zero() -> Self {
        Self::new(0, vec![], Some(Trans::zero()))
    }

    pub fn trans(&self) -> Option<&Trans<R>> {
        self.trans.as_ref()
    }

    /// The chain representing the i-th generator.
    pub fn gen_vec(&self, i: usize) -> DVec<R> {
        let Some(t) = &self.trans else {
            panic!("trans is not available.")
        };

        assert!(i < self.dim());

        t.backward_mat().col_vec(i)
    }
}

impl<R> SimpleRModStr<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    /// The coordinates of the class of the given chain,
    /// with torsion coordinates reduced by their factors.
    pub fn vectorize(&self, v: &DVec<R>) -> DVec<R> {
        let Some(t) = &self.trans else {
            panic!("trans is not available.")
        };

        assert_eq!(v.dim(), t.src_dim());

        let w = t.forward(v);
        reduce_mod(w, &self.tors)
    }
}

impl<R> Default for SimpleRModStr<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<R> RModStr for SimpleRModStr<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    type R = R;

    fn rank(&self) -> usize {
        self.rank
    }

    fn tors(&self) -> &[R] {
        &self.tors
    }
}

impl<R> Display for SimpleRModStr<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.math_symbol())
    }
}
