use core::fmt::{Debug, Display};
use core::ops::{Add, AddAssign, Mul, Sub};

//Trait Definitions
pub trait ScalarConstants {
    fn one() -> Self;
    fn zero() -> Self;
    /// An index converted to a scalar, used for the synthetic fills.
    fn from_index(i: usize) -> Self;
}

pub trait Scalar
where
    Self: Add<Self, Output = Self>,
    Self: Mul<Self, Output = Self>,
    Self: Sub<Self, Output = Self>,
    Self: AddAssign<Self>,
    Self: Sized,
    Self: Copy,
    Self: Display,
    Self: Debug,
    Self: PartialEq,
    Self: Send,
    Self: Sync,
    Self: 'static,
    Self: ScalarConstants,
{
    fn to_f64(self) -> f64;
}

impl ScalarConstants for f64 {
    #[inline(always)]
    fn one() -> Self {
        1.0
    }
    #[inline(always)]
    fn zero() -> Self {
        0.0
    }
    #[inline(always)]
    fn from_index(i: usize) -> Self {
        i as f64
    }
}
impl Scalar for f64 {
    #[inline(always)]
    fn to_f64(self) -> f64 {
        self
    }
}

impl ScalarConstants for f32 {
    #[inline(always)]
    fn one() -> Self {
        1.0
    }
    #[inline(always)]
    fn zero() -> Self {
        0.0
    }
    #[inline(always)]
    fn from_index(i: usize) -> Self {
        i as f32
    }
}
impl Scalar for f32 {
    #[inline(always)]
    fn to_f64(self) -> f64 {
        self as f64
    }
}
