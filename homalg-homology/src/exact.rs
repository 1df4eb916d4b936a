use std::fmt::{self, Display};
use std::ops::Index;

use cfg_if::cfg_if;
use itertools::{Either, Itertools};
use log::debug;

use homalg::{EucRing, EucRingOps};
use homalg_matrix::dense::DVec;

use crate::{ChainComplex, ChainMap, ChainType, Homology, HomologyMap, HomologySummand, RModStr, DisplayForGrid};

/// A failed exactness check: the composition of the two arrows
/// around position `index` does not annihilate generator `gen_index`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExactnessError<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    pub index: isize,
    pub gen_index: usize,
    pub residue: DVec<R>
}

impl<R> Display for ExactnessError<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f,
            "non-zero composition at k = {} (generator {}): {}",
            self.index, self.gen_index, self.residue
        )
    }
}

#[derive(Clone, Debug, Default)]
pub struct ExactnessReport<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    errors: Vec<ExactnessError<R>>
}

impl<R> ExactnessReport<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    pub fn is_exact(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ExactnessError<R>] {
        &self.errors
    }
}

impl<R> Display for ExactnessReport<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_exact() {
            write!(f, "exact")
        } else {
            write!(f, "{}", self.errors.iter().join("\n"))
        }
    }
}

/// The triangle
///
/// ```text
///   C0 --f0--> C1 --f1--> C2 --f2--> C0 (deg shift)
/// ```
///
/// unrolled into the sequence
///
/// ```text
///   ... -> H[n](C0) -> H[n](C1) -> H[n](C2) -> H[n'](C0) -> ...
/// ```
///
/// over the degree window of the three complexes,
/// where `n'` is `n` shifted by the differential degree.
pub struct HomologyExactSequence<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    maps: [HomologyMap<R>; 3],
    homology: [Homology<R>; 3],
    chain_type: ChainType,
    bottom: isize,
    top: isize
}

impl<R> HomologyExactSequence<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    pub fn new(complexes: [&ChainComplex<R>; 3], maps: [ChainMap<R>; 3]) -> Self {
        let chain_type = complexes[0].chain_type();

        assert!(complexes.iter().all(|c| c.chain_type() == chain_type));
        assert_eq!(maps[0].deg(), 0);
        assert_eq!(maps[1].deg(), 0);
        assert_eq!(maps[2].deg(), chain_type.d_deg());

        let homology = [
            complexes[0].homology(true),
            complexes[1].homology(true),
            complexes[2].homology(true)
        ];

        let maps = [
            HomologyMap::induced(&maps[0], &homology[0], &homology[1]),
            HomologyMap::induced(&maps[1], &homology[1], &homology[2]),
            HomologyMap::induced(&maps[2], &homology[2], &homology[0])
        ];

        let (bottom, top) = complexes.iter()
            .flat_map(|c| c.support())
            .minmax()
            .into_option()
            .unwrap_or((0, -1));

        debug!("exact sequence over degrees {bottom}..={top}.");

        Self { maps, homology, chain_type, bottom, top }
    }

    pub fn chain_type(&self) -> ChainType {
        self.chain_type
    }

    pub fn degrees(&self) -> std::ops::RangeInclusive<isize> {
        self.bottom ..= self.top
    }

    pub fn len(&self) -> usize {
        (3 * (self.top - self.bottom + 1).max(0)) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The position `k` in the unrolled sequence corresponds to
    /// the `i`-th complex at degree `n`.
    pub fn grid_index(&self, k: isize) -> (usize, isize) {
        let i = k.rem_euclid(3) as usize;
        let j = k.div_euclid(3);

        let n = if self.chain_type.is_descending() {
            self.top - j
        } else {
            self.bottom + j
        };

        (i, n)
    }

    pub fn seq_index(&self, i: usize, n: isize) -> isize {
        assert!(i < 3);

        let j = if self.chain_type.is_descending() {
            self.top - n
        } else {
            n - self.bottom
        };

        3 * j + i as isize
    }

    pub fn object(&self, k: isize) -> &HomologySummand<R> {
        let (i, n) = self.grid_index(k);
        &self.homology[i][n]
    }

    pub fn objects(&self) -> impl Iterator<Item = &HomologySummand<R>> {
        (0..self.len() as isize).map(|k| self.object(k))
    }

    /// The induced map leaving `object(k)`.
    pub fn arrow(&self, k: isize) -> &HomologyMap<R> {
        let (i, _) = self.grid_index(k);
        &self.maps[i]
    }

    /// Checks that the composition of the two arrows around `k` vanishes,
    /// i.e. the image of the incoming arrow lies in the kernel of the
    /// outgoing one. The reverse inclusion is not verified.
    pub fn exactness_at(&self, k: isize) -> Vec<ExactnessError<R>> {
        let h1 = self.object(k);
        if h1.is_zero() {
            return vec![]
        }

        let (i0, n0) = self.grid_index(k - 1);
        let (i1, n1) = self.grid_index(k);

        let h0 = self.object(k - 1);

        let f0 = &self.maps[i0];
        let f1 = &self.maps[i1];

        (0..h0.dim()).filter_map(|j| {
            let x = DVec::unit(h0.dim(), j);
            let fx = f0.apply(n0, &x);
            let z = f1.apply(n1, &fx);

            if z.is_zero() {
                None
            } else {
                Some(ExactnessError { index: k, gen_index: j, residue: z })
            }
        }).collect()
    }

    pub fn exactness(&self) -> ExactnessReport<R> {
        let range = 0 .. self.len() as isize;

        cfg_if! {
            if #[cfg(feature = "multithread")] {
                use rayon::prelude::*;
                let mut errors = range.into_par_iter().flat_map(|k|
                    self.exactness_at(k)
                ).collect::<Vec<_>>();
            } else {
                let mut errors = range.flat_map(|k|
                    self.exactness_at(k)
                ).collect::<Vec<_>>();
            }
        }

        errors.sort_by_key(|e| (e.index, e.gen_index));

        ExactnessReport { errors }
    }

    pub fn is_exact(&self) -> bool {
        self.exactness().is_exact()
    }

    pub fn display_table(&self) -> String {
        use homalg::util::format::table;

        let cols = if self.chain_type.is_descending() {
            Either::Right(self.degrees().rev())
        } else {
            Either::Left(self.degrees())
        };

        table("i\\n", 0..3usize, cols, |&i, &n|
            self.homology[i][n].display_for_grid()
        )
    }

    pub fn print_table(&self) {
        println!("{}", self.display_table());
    }
}

impl<R> Index<usize> for HomologyExactSequence<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    type Output = HomologySummand<R>;
    fn index(&self, k: usize) -> &Self::Output {
        assert!(k < self.len());
        self.object(k as isize)
    }
}

impl<R> Display for HomologyExactSequence<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_table())
    }
}

#[cfg(test)]
mod tests {
    use homalg::Ring;
    use homalg_matrix::dense::Mat;
    use super::*;

    // 0 -> C(S²) -> C(D³) -> C(D³, S²) -> 0
    fn pair_d3_s2() -> HomologyExactSequence<i32> {
        let c0 = ChainComplex::<i32>::s2();
        let c1 = ChainComplex::<i32>::d3();
        let c2 = ChainComplex::<i32>::from_mats(
            ChainType::Descending, 3,
            vec![Mat::from_data((0, 1), [])]
        );

        let f0 = ChainMap::new(0, |n, v|
            if n == 3 { DVec::zero(1) } else { v.clone() }
        );
        let f1 = ChainMap::new(0, |n, v|
            if n == 3 { v.clone() } else { DVec::zero(0) }
        );

        // the quotient generator lifts to the 3-cell,
        // whose boundary lies in C(S²).
        let del = ChainMap::new(-1, move |n, v|
            if n == 3 {
                &Mat::from_data((4, 1), [-1, 1, -1, 1]) * v
            } else {
                DVec::zero(0)
            }
        );

        f0.check_all(&c0, &c1);

        HomologyExactSequence::new([&c0, &c1, &c2], [f0, f1, del])
    }

    #[test]
    fn indexing() {
        let seq = pair_d3_s2();

        assert_eq!(seq.degrees(), 0..=3);
        assert_eq!(seq.len(), 12);

        assert_eq!(seq.grid_index(0), (0, 3));
        assert_eq!(seq.grid_index(1), (1, 3));
        assert_eq!(seq.grid_index(2), (2, 3));
        assert_eq!(seq.grid_index(3), (0, 2));
        assert_eq!(seq.grid_index(11), (2, 0));

        // round-trip
        for k in 0..12 {
            let (i, n) = seq.grid_index(k);
            assert_eq!(seq.seq_index(i, n), k);
        }

        // out of window
        assert_eq!(seq.grid_index(-1), (2, 4));
        assert_eq!(seq.grid_index(12), (0, -1));
    }

    #[test]
    fn objects() {
        let seq = pair_d3_s2();

        // n = 3: H(C0) = 0, H(C1) = 0, H(C2) = Z
        assert!(seq[0].is_zero());
        assert!(seq[1].is_zero());
        assert_eq!(seq[2].rank(), 1);

        // n = 2: H(C0) = Z, rest trivial
        assert_eq!(seq[3].rank(), 1);
        assert!(seq[4].is_zero());
        assert!(seq[5].is_zero());

        // n = 0: H(C0) = Z, H(C1) = Z, H(C2) = 0
        assert_eq!(seq[9].rank(), 1);
        assert_eq!(seq[10].rank(), 1);
        assert!(seq[11].is_zero());

        assert_eq!(seq.objects().count(), 12);
    }

    #[test]
    fn exact_pair() {
        let seq = pair_d3_s2();
        let report = seq.exactness();

        assert!(report.is_exact(), "{report}");
        assert!(seq.is_exact());
    }

    #[test]
    fn connecting_iso() {
        let seq = pair_d3_s2();

        // δ: H[3](C2) -> H[2](C0) carries the generator to a generator.
        let k = seq.seq_index(2, 3);
        let (_, n) = seq.grid_index(k);

        let del = seq.arrow(k);
        assert_eq!(del.deg(), -1);

        let x = DVec::unit(seq.object(k).dim(), 0);
        let y = del.apply(n, &x);

        assert!(!y.is_zero());
        assert!(y[0].is_pm_one());
    }

    #[test]
    fn split_ses() {
        // 0 -> Z -> Z² -> Z -> 0, concentrated in degree 0
        let c0 = ChainComplex::<i32>::one();
        let c1 = ChainComplex::<i32>::from_mats(
            ChainType::Descending, 0,
            vec![Mat::zero((0, 2))]
        );
        let c2 = ChainComplex::<i32>::one();

        let f0 = ChainMap::new(0, |_, v| DVec::from_data([v[0], 0]));
        let f1 = ChainMap::new(0, |_, v| DVec::from_data([v[1]]));
        let del = ChainMap::new(-1, |_, _| DVec::zero(0));

        let seq = HomologyExactSequence::new([&c0, &c1, &c2], [f0, f1, del]);

        assert_eq!(seq.len(), 3);
        assert!(seq.is_exact());
    }

    #[test]
    fn ascending() {
        // id: C -> C followed by the zero map to a trivial complex
        let c = ChainComplex::<i32>::from_mats(ChainType::Ascending, 0, vec![
            Mat::from_data((1, 1), [2]),
            Mat::from_data((0, 1), []),
        ]);
        let z = ChainComplex::<i32>::from_mats(ChainType::Ascending, 0, vec![
            Mat::zero((0, 0)),
            Mat::zero((0, 0)),
        ]);

        let f0 = ChainMap::id();
        let f1 = ChainMap::new(0, |_, _| DVec::zero(0));
        let del = ChainMap::new(1, |_, _| DVec::zero(0));

        let seq = HomologyExactSequence::new([&c, &c, &z], [f0, f1, del]);

        assert_eq!(seq.chain_type(), ChainType::Ascending);
        assert_eq!(seq.degrees(), 0..=1);
        assert_eq!(seq.grid_index(0), (0, 0));
        assert_eq!(seq.grid_index(3), (0, 1));
        assert_eq!(seq.seq_index(1, 1), 4);

        assert!(seq.is_exact());
    }

    #[test]
    fn detects_violation() {
        // three copies of the same complex with identity arrows:
        // the composition H(C0) -> H(C1) -> H(C2) is non-zero.
        let c = ChainComplex::<i32>::one();

        let f0 = ChainMap::id();
        let f1 = ChainMap::id();
        let del = ChainMap::new(-1, |_, _| DVec::zero(0));

        let seq = HomologyExactSequence::new([&c, &c, &c], [f0, f1, del]);
        let report = seq.exactness();

        assert!(!report.is_exact());
        assert_eq!(report.errors().len(), 1);

        let e = &report.errors()[0];
        assert_eq!(e.index, 1);
        assert_eq!(e.gen_index, 0);
        assert!(!e.residue.is_zero());
    }

    #[test]
    fn empty() {
        let c = ChainComplex::<i32>::from_mats(ChainType::Descending, 0, vec![]);
        let seq = HomologyExactSequence::new(
            [&c, &c, &c],
            [ChainMap::id(), ChainMap::id(), ChainMap::new(-1, |_, v| v.clone())]
        );

        assert!(seq.is_empty());
        assert!(seq.is_exact());
    }

    #[test]
    fn display() {
        let seq = pair_d3_s2();
        let table = seq.display_table();

        assert!(table.contains("Z"));
    }
}
