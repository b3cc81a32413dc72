use serde::Serialize;

/// Pixel box of a segment. A `width` of `None` means the horizontal extent
/// was never established, which is not the same as a zero-width box.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: Option<i32>,
    pub height: i32,
}

impl Region {
    pub fn new(x: i32, y: i32, width: Option<i32>, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Vertical band without horizontal extent, as produced by line records.
    pub fn band(y: i32, height: i32) -> Self {
        Self::new(0, y, None, height)
    }

    pub fn right(&self) -> Option<i32> {
        self.width.map(|w| self.x.saturating_add(w))
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Shifts the box, clamping at the i32 bounds. Boxes without a width
    /// keep their horizontal position.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.y = self.y.saturating_add(dy);
        if self.width.is_some() {
            self.x = self.x.saturating_add(dx);
        }
    }

    /// Divides every coordinate by `factor`, truncating toward zero.
    pub fn scale_down(&mut self, factor: f64) {
        self.x = scale_coord(self.x, factor);
        self.y = scale_coord(self.y, factor);
        self.width = self.width.map(|w| scale_coord(w, factor));
        self.height = scale_coord(self.height, factor);
    }

    /// SVG rectangle markup; an unset width is written as -1.
    pub fn svg_rect(&self) -> String {
        format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"/>",
            self.x,
            self.y,
            self.width.unwrap_or(-1),
            self.height
        )
    }
}

pub fn scale_coord(value: i32, factor: f64) -> i32 {
    (f64::from(value) / factor) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn translate_skips_x_without_width() {
        let mut band = Region::band(10, 20);
        band.translate(5, 7);
        assert_eq!(band, Region::new(0, 17, None, 20));

        let mut word = Region::new(3, 10, Some(40), 20);
        word.translate(5, 7);
        assert_eq!(word, Region::new(8, 17, Some(40), 20));
    }

    #[test]
    fn edges_and_shifts_clamp_at_i32_bounds() {
        let mut region = Region::new(i32::MAX - 5, i32::MAX - 5, Some(40), 20);
        assert_eq!(region.right(), Some(i32::MAX));
        assert_eq!(region.bottom(), i32::MAX);
        region.translate(10, 10);
        assert_eq!(region, Region::new(i32::MAX, i32::MAX, Some(40), 20));
    }

    #[test]
    fn scale_truncates_toward_zero() {
        let mut region = Region::new(101, -7, Some(45), 31);
        region.scale_down(2.0);
        assert_eq!(region, Region::new(50, -3, Some(22), 15));
    }

    #[test]
    fn scale_keeps_unset_width() {
        let mut region = Region::new(101, 0, None, 10);
        region.scale_down(2.0);
        assert_eq!(region.width, None);
        assert_eq!(region.x, 50);
    }

    #[test]
    fn renders_unset_width_as_minus_one() {
        let region = Region::band(4, 6);
        assert_eq!(
            region.svg_rect(),
            r#"<rect x="0" y="4" width="-1" height="6"/>"#
        );
    }
}
