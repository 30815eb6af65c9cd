use crate::common::*;

/// A height/width pair, such as an image size.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HW<T> {
    h: T,
    w: T,
}

impl<T> HW<T> {
    pub fn try_cast<U>(self) -> Option<HW<U>>
    where
        T: ToPrimitive,
        U: NumCast,
    {
        Some(HW {
            h: U::from(self.h)?,
            w: U::from(self.w)?,
        })
    }

    pub fn cast<U>(self) -> HW<U>
    where
        T: ToPrimitive,
        U: NumCast,
    {
        self.try_cast().unwrap()
    }
}

impl<T> HW<T>
where
    T: Num + PartialOrd + Copy,
{
    pub fn try_from_hw(hw: [T; 2]) -> Result<Self> {
        let [h, w] = hw;
        let zero = T::zero();
        ensure!(
            h >= zero && w >= zero,
            "height and width parameters must be non-negative"
        );
        Ok(Self { h, w })
    }

    pub fn from_hw(hw: [T; 2]) -> Self {
        Self::try_from_hw(hw).unwrap()
    }

    pub fn h(&self) -> T {
        self.h
    }

    pub fn w(&self) -> T {
        self.w
    }

    pub fn area(&self) -> T {
        self.h * self.w
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn size_area() {
        let size = HW::from_hw([3.0, 2.0]);
        let area: f64 = size.area();
        assert_abs_diff_eq!(area, 6.0);
    }

    #[test]
    fn size_cast() {
        let size = HW::from_hw([1024usize, 2048]).cast::<f64>();
        assert_abs_diff_eq!(size.h(), 1024.0);
        assert_abs_diff_eq!(size.w(), 2048.0);
    }
}
