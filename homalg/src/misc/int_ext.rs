use num_bigint::BigInt;
use num_traits::Signed;
use crate::{Elem, AddMonOps, AddMon, AddGrpOps, AddGrp, MonOps, Mon, RingOps, Ring, EucRingOps, EucRing};

pub trait Integer: num_integer::Integer + EucRing
where for<'x> &'x Self: EucRingOps<Self> {}

macro_rules! impl_ops {
    ($trait:ident, $type:ty) => {
        impl $trait for $type {}
        impl<'a> $trait<$type> for &'a $type {}
    };
}

macro_rules! impl_integer {
    ($type:ty) => {
        impl Elem for $type {
            fn math_symbol() -> String {
                String::from("Z")
            }
        }

        impl_ops!(AddMonOps, $type);
        impl_ops!(AddGrpOps, $type);
        impl_ops!(MonOps, $type);
        impl_ops!(RingOps, $type);
        impl_ops!(EucRingOps, $type);

        impl AddMon for $type {}
        impl AddGrp for $type {}
        impl Mon for $type {}

        impl Ring for $type {
            fn inv(&self) -> Option<Self> {
                if self.is_unit() {
                    Some(self.clone())
                } else {
                    None
                }
            }

            fn is_unit(&self) -> bool {
                self.is_pm_one()
            }

            fn normalizing_unit(&self) -> Self {
                if self.is_negative() {
                    -<Self as num_traits::One>::one()
                } else {
                    <Self as num_traits::One>::one()
                }
            }
        }

        impl EucRing for $type {
            fn divides(&self, y: &Self) -> bool {
                // qualified: `num_integer::Integer` also has `divides`,
                // importing it here would clash with `EucRing::divides`.
                !num_traits::Zero::is_zero(self)
                    && num_integer::Integer::is_multiple_of(y, self)
            }

            fn gcd(x: &Self, y: &Self) -> Self {
                num_integer::Integer::gcd(x, y)
            }

            fn gcdx(x: &Self, y: &Self) -> (Self, Self, Self) {
                let num_integer::ExtendedGcd { gcd: d, x: s, y: t } =
                    num_integer::Integer::extended_gcd(x, y);

                if d.is_negative() {
                    (-d, -s, -t)
                } else {
                    (d, s, t)
                }
            }

            fn lcm(x: &Self, y: &Self) -> Self {
                num_integer::Integer::lcm(x, y)
            }
        }

        impl Integer for $type {}
    };
}

impl_integer!(i32);
impl_integer!(i64);
impl_integer!(i128);
impl_integer!(BigInt);
