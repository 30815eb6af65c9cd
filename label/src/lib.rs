use bbox::{Rect, Transform, TLBR};
use noisy_float::prelude::*;
use num_traits::Num;
use std::ops::Mul;

/// A box annotation: a rectangle with a class id and a loss weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label<R, C>
where
    R: Rect,
{
    pub rect: R,
    pub class: C,
    pub weight: R64,
}

impl<'a, T, C> Mul<&'a Label<TLBR<T>, C>> for &'a Transform<T>
where
    T: Copy + Num + PartialOrd,
    C: Copy,
{
    type Output = Label<TLBR<T>, C>;

    fn mul(self, rhs: &'a Label<TLBR<T>, C>) -> Self::Output {
        Label {
            rect: self * &rhs.rect,
            class: rhs.class,
            weight: rhs.weight,
        }
    }
}
