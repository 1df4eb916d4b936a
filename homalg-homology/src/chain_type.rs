use derive_more::Display;

/// The direction of the differential of a complex.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Default)]
pub enum ChainType {
    #[default]
    #[display("descending")]
    Descending,

    #[display("ascending")]
    Ascending
}

impl ChainType {
    pub fn d_deg(&self) -> isize {
        match self {
            ChainType::Descending => -1,
            ChainType::Ascending  =>  1
        }
    }

    pub fn is_descending(&self) -> bool {
        matches!(self, ChainType::Descending)
    }
}
