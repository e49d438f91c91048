/// Width and height in whole pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    pub const fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    pub fn is_empty(self) -> bool {
        self.w == 0 || self.h == 0
    }
}

impl From<(u32, u32)> for Size {
    fn from((w, h): (u32, u32)) -> Self {
        Self { w, h }
    }
}

/// Integer rectangle: top-left corner plus size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.w, size.h)
    }

    /// A rectangle of `size` whose center is `center`.
    ///
    /// Half extents use integer division, so odd sizes lean towards the top-left.
    pub fn with_center(center: (i32, i32), size: Size) -> Self {
        let x = center.0 - (size.w / 2) as i32;
        let y = center.1 - (size.h / 2) as i32;
        Self::new(x, y, size.w, size.h)
    }

    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + (self.w / 2) as i32, self.y + (self.h / 2) as i32)
    }

    pub fn right(&self) -> i32 {
        self.x + self.w as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h as i32
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_round_trips_for_even_sizes() {
        let target = Rect::new(0, 0, 100, 100);
        assert_eq!(target.center(), (50, 50));
        let placed = Rect::with_center(target.center(), Size::new(10, 10));
        assert_eq!((placed.x, placed.y), (45, 45));
        assert_eq!(placed.center(), (50, 50));
    }

    #[test]
    fn odd_sizes_lean_top_left() {
        let r = Rect::with_center((10, 10), Size::new(5, 3));
        assert_eq!((r.x, r.y), (8, 9));
    }

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(2, 2, 3, 3);
        assert!(r.contains(2, 2));
        assert!(r.contains(4, 4));
        assert!(!r.contains(5, 4));
        assert!(!r.contains(1, 3));
    }
}
