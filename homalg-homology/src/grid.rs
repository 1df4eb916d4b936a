use std::fmt::Display;
use std::ops::{Index, RangeInclusive};

use ahash::AHashMap;
use itertools::Itertools;

pub type GridIter = std::vec::IntoIter<isize>;

/// A sequence of objects indexed over a finite set of degrees.
/// Degrees outside the support yield the default object.
#[derive(Clone)]
pub struct Grid<E> {
    support: Vec<isize>,
    data: AHashMap<isize, E>,
    default: E
}

impl<E> Grid<E> {
    fn new(support: Vec<isize>, data: AHashMap<isize, E>, default: E) -> Self {
        Self { support, data, default }
    }

    pub fn generate<It, F>(support: It, e_map: F) -> Self
    where
        It: IntoIterator<Item = isize>,
        F: FnMut(isize) -> E,
        E: Default
    {
        Self::generate_with_default(support, e_map, E::default())
    }

    pub fn generate_with_default<It, F>(support: It, mut e_map: F, default: E) -> Self
    where
        It: IntoIterator<Item = isize>,
        F: FnMut(isize) -> E
    {
        let support = support.into_iter().collect_vec();
        let data = support.iter().map(|&i| (i, e_map(i))).collect();
        Self::new(support, data, default)
    }

    pub fn get_default(&self) -> &E {
        &self.default
    }

    pub fn support(&self) -> GridIter {
        self.support.clone().into_iter()
    }

    pub fn is_supported(&self, i: isize) -> bool {
        self.data.contains_key(&i)
    }

    pub fn get(&self, i: isize) -> &E {
        self.data.get(&i).unwrap_or(&self.default)
    }

    pub fn get_mut(&mut self, i: isize) -> Option<&mut E> {
        self.data.get_mut(&i)
    }

    pub fn insert(&mut self, i: isize, e: E) {
        self.data.insert(i, e);
    }

    pub fn remove(&mut self, i: isize) -> Option<E> {
        self.data.remove(&i)
    }

    pub fn iter(&self) -> impl Iterator<Item = (isize, &E)> {
        self.support.iter().map(|&i| (i, self.get(i)))
    }

    pub fn map<E2, F>(&self, mut f: F) -> Grid<E2>
    where F: FnMut(&E) -> E2
    {
        let d = f(self.get_default());
        Grid::generate_with_default(
            self.support(),
            |i| f(self.get(i)),
            d
        )
    }

    pub fn truncated(&self, range: RangeInclusive<isize>) -> Self
    where E: Clone {
        let support = self.support().filter(|i| range.contains(i));
        Self::generate_with_default(support, |i| self[i].clone(), self.default.clone())
    }
}

impl<E> Default for Grid<E>
where E: Default {
    fn default() -> Self {
        Self::new(Vec::default(), AHashMap::default(), E::default())
    }
}

impl<E> Index<isize> for Grid<E> {
    type Output = E;
    fn index(&self, i: isize) -> &Self::Output {
        self.get(i)
    }
}

impl<E> IntoIterator for Grid<E> {
    type Item = (isize, E);
    type IntoIter = std::vec::IntoIter<(isize, E)>;

    fn into_iter(mut self) -> Self::IntoIter {
        let support = self.support();
        support.flat_map(|i| {
            self.data.remove(&i).map(|e| (i, e))
        }).collect_vec().into_iter()
    }
}

impl<E> FromIterator<(isize, E)> for Grid<E>
where E: Default {
    fn from_iter<T: IntoIterator<Item = (isize, E)>>(iter: T) -> Self {
        let init = (vec![], AHashMap::new());
        let (support, data) = iter.into_iter().fold(init, |(mut support, mut data), (i, e)| {
            support.push(i);
            data.insert(i, e);
            (support, data)
        });
        Self::new(support, data, E::default())
    }
}

pub trait DisplayForGrid {
    fn display_for_grid(&self) -> String;
}

impl<T> DisplayForGrid for T
where T: Display {
    fn display_for_grid(&self) -> String {
        self.to_string()
    }
}

impl<E> Grid<E>
where E: DisplayForGrid {
    pub fn display_seq(&self, label: &str) -> String {
        use homalg::util::format::table;
        table(label, [""].iter(), self.support(), |_, &i| {
            self.get(i).display_for_grid()
        })
    }

    pub fn print_seq(&self, label: &str) {
        println!("{}", self.display_seq(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid() {
        let g = Grid::generate(0..=3, |i| i * 10);

        assert!( g.is_supported( 1));
        assert!(!g.is_supported(-1));
        assert_eq!(g.get( 1), &10);
        assert_eq!(g.get(-1), &0); // default

        let _seq = g.display_seq("i");
    }

    #[test]
    fn truncated() {
        let g = Grid::generate(0..=3, |i| i * 10);
        let t = g.truncated(1..=2);

        assert!(!t.is_supported(0));
        assert!( t.is_supported(1));
        assert_eq!(t.get(2), &20);
        assert_eq!(t.get(3), &0);
    }

    #[test]
    fn map() {
        let g = Grid::generate(0..=3, |i| i * 10);
        let h = g.map(|&e| e + 1);

        assert_eq!(h.get(2), &21);
    }
}
