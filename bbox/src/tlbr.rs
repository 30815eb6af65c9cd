use super::Rect;
use crate::{common::*, Transform};

/// Bounding box in TLBR format.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TLBR<T> {
    pub(crate) t: T,
    pub(crate) l: T,
    pub(crate) b: T,
    pub(crate) r: T,
}

impl<T> TLBR<T>
where
    T: Copy + Num,
{
    pub fn transform(&self, transform: &Transform<T>) -> Self {
        TLBR {
            t: self.t * transform.sy + transform.ty,
            l: self.l * transform.sx + transform.tx,
            b: self.b * transform.sy + transform.ty,
            r: self.r * transform.sx + transform.tx,
        }
    }

    /// Mirror a box in unit-ratio coordinates across the vertical axis.
    ///
    /// The left edge becomes `1 - r` and the right edge `1 - l`, so the
    /// edge order is preserved without an explicit min/max swap.
    pub fn flip_left_right(&self) -> Self {
        let one = T::one();
        TLBR {
            t: self.t,
            l: one - self.r,
            b: self.b,
            r: one - self.l,
        }
    }
}

impl<T> Rect for TLBR<T>
where
    T: Copy + Num + PartialOrd,
{
    type Type = T;

    fn t(&self) -> Self::Type {
        self.t
    }

    fn l(&self) -> Self::Type {
        self.l
    }

    fn b(&self) -> Self::Type {
        self.b
    }

    fn r(&self) -> Self::Type {
        self.r
    }

    fn h(&self) -> Self::Type {
        self.b - self.t
    }

    fn w(&self) -> Self::Type {
        self.r - self.l
    }

    fn try_from_tlbr(tlbr: [Self::Type; 4]) -> Result<Self> {
        let [t, l, b, r] = tlbr;
        ensure!(b >= t && r >= l, "b >= t and r >= l must hold");

        Ok(Self { t, l, b, r })
    }

    fn try_from_tlhw(tlhw: [Self::Type; 4]) -> Result<Self> {
        let [t, l, h, w] = tlhw;
        let b = t + h;
        let r = l + w;
        Self::try_from_tlbr([t, l, b, r])
    }
}
