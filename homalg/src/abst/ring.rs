use crate::{AddGrp, AddGrpOps, Mon, MonOps};

// Rings

pub trait RingOps<T = Self>:
    AddGrpOps<T> +
    MonOps<T>
{}

pub trait Ring:
    AddGrp +
    Mon +
    RingOps +
    From<i32>
where
    for<'a> &'a Self: RingOps<Self>
{
    fn inv(&self) -> Option<Self>;
    fn is_unit(&self) -> bool;

    /// The unit `u` such that `self * u` is in canonical form,
    /// e.g. non-negative for integers.
    fn normalizing_unit(&self) -> Self;

    fn is_pm_one(&self) -> bool {
        self.is_one() || (-self).is_one()
    }
}

#[cfg(test)]
mod tests {
    use crate::Ring;

    #[test]
    fn is_pm_one() {
        assert!(1.is_pm_one());
        assert!((-1).is_pm_one());
        assert!(!2.is_pm_one());
        assert!(!(-2).is_pm_one());
    }
}
