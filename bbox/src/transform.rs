use super::{Rect, TLBR};
use crate::{common::*, RectNum, HW};

/// An axis-aligned scale-and-translate transform on box coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transform<T> {
    pub sy: T,
    pub sx: T,
    pub ty: T,
    pub tx: T,
}

impl<T> Transform<T>
where
    T: Copy + Num + PartialOrd,
{
    pub fn from_rects<R>(src: &R, tgt: &R) -> Self
    where
        R: Rect<Type = T>,
    {
        let sy = tgt.h() / src.h();
        let sx = tgt.w() / src.w();
        let ty = tgt.t() - src.t() * sy;
        let tx = tgt.l() - src.l() * sx;

        Self { sy, sx, ty, tx }
    }

    /// The transform mapping boxes in a `src_size` image onto a `tgt_size`
    /// image, stretching both axes independently.
    pub fn from_sizes_exact(src_size: &HW<T>, tgt_size: &HW<T>) -> Self {
        let zero = T::zero();
        let src = TLBR::from_tlhw([zero, zero, src_size.h(), src_size.w()]);
        let tgt = TLBR::from_tlhw([zero, zero, tgt_size.h(), tgt_size.w()]);
        Self::from_rects(&src, &tgt)
    }
}

impl<T> Transform<T>
where
    T: Copy + Num + Neg<Output = T>,
{
    pub fn inverse(&self) -> Self {
        let sy = T::one() / self.sy;
        let sx = T::one() / self.sx;
        let ty = -self.ty / self.sy;
        let tx = -self.tx / self.sx;

        Self { sy, sx, ty, tx }
    }
}

impl<T> Mul<&TLBR<T>> for &Transform<T>
where
    T: Copy + Num,
{
    type Output = TLBR<T>;

    fn mul(self, rhs: &TLBR<T>) -> Self::Output {
        rhs.transform(self)
    }
}
