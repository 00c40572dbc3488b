// raster.rs
//
// Copyright (c) 2026  Douglas Lau
//
//! Line and triangle rasterization
use crate::buffer::PixelBuffer;
use pix::rgb::SRgb8;
use std::ops::Range;

/// Point with signed integer coordinates.
///
/// Points are not required to lie inside a buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    /// X coordinate
    pub x: i32,
    /// Y coordinate
    pub y: i32,
}

/// Triangle of three points
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Triangle {
    /// Vertices
    pub vertices: [Point; 3],
}

/// Iterator over the points of an integer line.
///
/// Points are stepped Bresenham-style from `start` to `end`, both
/// inclusive.  The path is 8-connected and has `max(|dx|, |dy|) + 1`
/// points.
#[derive(Clone, Debug)]
pub struct Line {
    /// Next point to yield
    pos: Point,
    /// Last point
    end: Point,
    /// Absolute horizontal delta
    dx: i64,
    /// Negated absolute vertical delta
    dy: i64,
    /// Horizontal step
    sx: i32,
    /// Vertical step
    sy: i32,
    /// Accumulated error term
    err: i64,
    /// Set after `end` has been yielded
    done: bool,
}

impl Point {
    /// Create a new point
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point { x, y }
    }
}

impl Triangle {
    /// Create a new triangle
    pub fn new<P: Into<Point>>(a: P, b: P, c: P) -> Self {
        Triangle {
            vertices: [a.into(), b.into(), c.into()],
        }
    }

    /// Create a triangle inset by one tenth of the buffer size.
    ///
    /// The apex is centered at the top, with the base along the bottom.
    pub fn inset(width: u32, height: u32) -> Self {
        let w = width as i32;
        let h = height as i32;
        let apex = Point::new(w / 2, h / 10);
        let left = Point::new(w / 10, h - h / 10);
        let right = Point::new(w - w / 10, h - h / 10);
        Triangle::new(apex, left, right)
    }

    /// Iterate over the three edges
    pub fn edges(&self) -> impl Iterator<Item = Line> + '_ {
        let v = &self.vertices;
        (0..3).map(move |i| Line::new(v[i], v[(i + 1) % 3]))
    }
}

impl Line {
    /// Create a line between two points
    pub fn new(start: Point, end: Point) -> Self {
        // deltas between any two i32 coordinates fit in i64
        let dx = (i64::from(end.x) - i64::from(start.x)).abs();
        let dy = -(i64::from(end.y) - i64::from(start.y)).abs();
        let sx = if start.x < end.x { 1 } else { -1 };
        let sy = if start.y < end.y { 1 } else { -1 };
        Line {
            pos: start,
            end,
            dx,
            dy,
            sx,
            sy,
            err: dx + dy,
            done: false,
        }
    }
}

impl Iterator for Line {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.done {
            return None;
        }
        let pt = self.pos;
        if pt == self.end {
            self.done = true;
            return Some(pt);
        }
        let e2 = 2 * self.err;
        if e2 >= self.dy {
            self.err += self.dy;
            self.pos.x += self.sx;
        }
        if e2 <= self.dx {
            self.err += self.dx;
            self.pos.y += self.sy;
        }
        Some(pt)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let rx = (i64::from(self.end.x) - i64::from(self.pos.x)).unsigned_abs();
        let ry = (i64::from(self.end.y) - i64::from(self.pos.y)).unsigned_abs();
        let n = rx.max(ry) as usize + 1;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Line {}

/// Draw a line between two points, inclusive.
pub fn draw_line(buf: &mut PixelBuffer, p0: Point, p1: Point, clr: SRgb8) {
    for pt in Line::new(p0, p1) {
        buf.set_pixel(pt.x, pt.y, clr);
    }
}

/// Draw the inset triangle of a buffer.
///
/// Edges are drawn first, then each row from the base-left vertex down to
/// (not including) the base-right vertex is filled between the leftmost and
/// rightmost opaque pixels.  The base vertices of the inset triangle share
/// a row, so only the outline is drawn.
pub fn draw_triangle(buf: &mut PixelBuffer, clr: SRgb8) {
    let tri = Triangle::inset(buf.width(), buf.height());
    let [apex, left, right] = tri.vertices;
    draw_line(buf, apex, left, clr);
    draw_line(buf, left, right, clr);
    draw_line(buf, right, apex, clr);
    fill_marked_rows(buf, left.y..right.y, clr);
}

/// Fill rows between the leftmost and rightmost opaque pixels.
///
/// Rows with no opaque pixels are left alone.
fn fill_marked_rows(buf: &mut PixelBuffer, rows: Range<i32>, clr: SRgb8) {
    for y in rows {
        if let Some((x0, x1)) = opaque_span(buf, y) {
            for x in x0..=x1 {
                buf.set_pixel(x, y, clr);
            }
        }
    }
}

/// Find the leftmost and rightmost opaque pixels in a row
fn opaque_span(buf: &PixelBuffer, y: i32) -> Option<(i32, i32)> {
    let mut xs = (0..buf.width() as i32).filter(|x| buf.is_opaque(*x, y));
    let x0 = xs.next()?;
    let x1 = xs.last().unwrap_or(x0);
    Some((x0, x1))
}

/// Fill a triangle with a solid color.
///
/// Edge points are traced to find the horizontal span of each row, so the
/// existing buffer contents do not matter.  Any vertex order works, and
/// degenerate triangles produce their edges.
pub fn fill_triangle(buf: &mut PixelBuffer, tri: &Triangle, clr: SRgb8) {
    let [a, b, c] = tri.vertices;
    // clip rows to the buffer before allocating spans
    let y0 = a.y.min(b.y).min(c.y).max(0);
    let y1 = a.y.max(b.y).max(c.y).min(buf.height() as i32 - 1);
    if y0 > y1 {
        return;
    }
    let mut spans: Vec<Option<(i32, i32)>> = vec![None; (y1 - y0 + 1) as usize];
    for pt in tri.edges().flatten() {
        if pt.y < y0 || pt.y > y1 {
            continue;
        }
        let span = &mut spans[(pt.y - y0) as usize];
        *span = match *span {
            Some((x0, x1)) => Some((x0.min(pt.x), x1.max(pt.x))),
            None => Some((pt.x, pt.x)),
        };
    }
    let w = buf.width() as i32;
    for (y, span) in (y0..).zip(spans) {
        if let Some((x0, x1)) = span {
            for x in x0.max(0)..=x1.min(w - 1) {
                buf.set_pixel(x, y, clr);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashSet;

    fn red() -> SRgb8 {
        SRgb8::new(255, 0, 0)
    }

    fn count_opaque(buf: &PixelBuffer) -> usize {
        buf.as_u8_slice()
            .chunks_exact(4)
            .filter(|p| p[3] == 255)
            .count()
    }

    #[test]
    fn single_point() {
        let p = Point::new(3, 4);
        let pts: Vec<Point> = Line::new(p, p).collect();
        assert_eq!(pts, vec![p]);
        let mut b = PixelBuffer::new(8, 8);
        draw_line(&mut b, p, p, red());
        assert_eq!(count_opaque(&b), 1);
        assert!(b.is_opaque(3, 4));
    }

    #[test]
    fn line_paths() {
        let cases = [
            ((0, 0), (7, 0)),
            ((0, 0), (0, 7)),
            ((7, 7), (0, 0)),
            ((1, 6), (6, 1)),
            ((0, 0), (7, 3)),
            ((5, 0), (2, 7)),
            ((-3, 2), (4, 5)),
        ];
        for (a, b) in cases {
            let (p0, p1) = (Point::from(a), Point::from(b));
            let line = Line::new(p0, p1);
            let n = (p1.x - p0.x).abs().max((p1.y - p0.y).abs()) as usize + 1;
            assert_eq!(line.len(), n);
            let pts: Vec<Point> = line.collect();
            assert_eq!(pts.len(), n);
            assert_eq!(pts.first(), Some(&p0));
            assert_eq!(pts.last(), Some(&p1));
            for w in pts.windows(2) {
                let (ax, ay) = ((w[1].x - w[0].x).abs(), (w[1].y - w[0].y).abs());
                assert!(ax <= 1 && ay <= 1 && ax + ay > 0, "{:?}", w);
            }
            let unique: HashSet<Point> = pts.iter().copied().collect();
            assert_eq!(unique.len(), n);
        }
    }

    #[test]
    fn line_extreme() {
        let line = Line::new(Point::new(i32::MIN, 0), Point::new(i32::MAX, 0));
        assert_eq!(line.len(), u32::MAX as usize + 1);
        let line = Line::new(
            Point::new(-1_200_000_000, 1),
            Point::new(1_200_000_000, 2),
        );
        assert_eq!(line.len(), 2_400_000_001);
        let pts: Vec<Point> = line.take(3).collect();
        assert_eq!(
            pts,
            vec![
                Point::new(-1_200_000_000, 1),
                Point::new(-1_199_999_999, 1),
                Point::new(-1_199_999_998, 1),
            ]
        );
        let mut line =
            Line::new(Point::new(i32::MAX, i32::MIN), Point::new(i32::MIN, i32::MAX));
        assert_eq!(line.next(), Some(Point::new(i32::MAX, i32::MIN)));
        assert_eq!(line.next(), Some(Point::new(i32::MAX - 1, i32::MIN + 1)));
    }

    #[test]
    fn marked_rows() {
        let mut b = PixelBuffer::new(8, 8);
        let gray = SRgb8::new(9, 9, 9);
        b.set_pixel(0, 0, gray);
        b.set_pixel(7, 0, gray);
        b.set_pixel(2, 1, gray);
        b.set_pixel(5, 1, gray);
        b.set_pixel(6, 2, gray);
        b.set_pixel(1, 2, gray);
        b.set_pixel(4, 2, gray);
        b.set_pixel(3, 3, gray);
        fill_marked_rows(&mut b, 1..5, red());
        // row before the range is untouched
        assert_eq!(b.pixel(3, 0), Some([0, 0, 0, 0]));
        assert_eq!(b.pixel(0, 0), Some([9, 9, 9, 255]));
        for x in 0..8 {
            let inside = (2..=5).contains(&x);
            assert_eq!(b.is_opaque(x, 1), inside, "row 1, x {}", x);
            let inside = (1..=6).contains(&x);
            assert_eq!(b.is_opaque(x, 2), inside, "row 2, x {}", x);
        }
        assert_eq!(b.pixel(3, 2), Some([255, 0, 0, 255]));
        // single marker fills just itself
        assert_eq!(b.pixel(3, 3), Some([255, 0, 0, 255]));
        assert_eq!(count_opaque_row(&b, 3), 1);
        // row without markers stays empty
        assert_eq!(count_opaque_row(&b, 4), 0);
    }

    fn count_opaque_row(buf: &PixelBuffer, y: i32) -> usize {
        (0..buf.width() as i32).filter(|x| buf.is_opaque(*x, y)).count()
    }

    #[test]
    fn line_pixels() {
        let mut b = PixelBuffer::new(16, 16);
        draw_line(&mut b, Point::new(1, 2), Point::new(13, 7), red());
        assert_eq!(count_opaque(&b), 13);
        assert!(b.is_opaque(1, 2));
        assert!(b.is_opaque(13, 7));
    }

    #[test]
    fn line_clipped() {
        let mut b = PixelBuffer::new(4, 4);
        draw_line(&mut b, Point::new(-4, 1), Point::new(7, 1), red());
        assert_eq!(count_opaque(&b), 4);
    }

    #[test]
    fn inset() {
        let t = Triangle::inset(256, 256);
        assert_eq!(
            t.vertices,
            [Point::new(128, 25), Point::new(25, 231), Point::new(231, 231)]
        );
        let t = Triangle::inset(10, 20);
        assert_eq!(
            t.vertices,
            [Point::new(5, 2), Point::new(1, 18), Point::new(9, 18)]
        );
    }

    #[test]
    fn triangle_256() {
        let mut b = PixelBuffer::new(256, 256);
        let clr = SRgb8::new(0, 0, 255);
        draw_triangle(&mut b, clr);
        for (x, y) in [(128, 25), (25, 231), (231, 231), (128, 231)] {
            assert_eq!(b.pixel(x, y), Some([0, 0, 255, 255]), "{},{}", x, y);
        }
        assert_eq!(b.pixel(0, 0), Some([0, 0, 0, 0]));
        // base vertices share a row: interior stays empty
        assert_eq!(b.pixel(128, 128), Some([0, 0, 0, 0]));
        let edges: usize = Triangle::inset(256, 256)
            .edges()
            .flatten()
            .collect::<HashSet<Point>>()
            .len();
        assert_eq!(count_opaque(&b), edges);
    }

    #[test]
    fn triangle_idempotent() {
        let clr = SRgb8::new(255, 0, 255);
        let mut a = PixelBuffer::new(64, 64);
        draw_triangle(&mut a, clr);
        let b = a.clone();
        draw_triangle(&mut a, clr);
        assert_eq!(a, b);
    }

    #[test]
    fn triangle_tiny() {
        for sz in 0..4 {
            let mut b = PixelBuffer::new(sz, sz);
            draw_triangle(&mut b, red());
        }
        let mut b = PixelBuffer::new(1, 1);
        draw_triangle(&mut b, red());
        assert_eq!(b.pixel(0, 0), Some([255, 0, 0, 255]));
    }

    #[test]
    fn fill_spans() {
        let mut b = PixelBuffer::new(256, 256);
        let tri = Triangle::inset(256, 256);
        fill_triangle(&mut b, &tri, red());
        for pt in tri.edges().flatten() {
            assert!(b.is_opaque(pt.x, pt.y));
        }
        assert!(b.is_opaque(128, 128));
        assert!(!b.is_opaque(0, 0));
        assert!(!b.is_opaque(128, 232));
        let mut prev = 0;
        for y in 25..=231 {
            let xs: Vec<i32> = (0..256).filter(|x| b.is_opaque(*x, y)).collect();
            let (x0, x1) = (xs[0], xs[xs.len() - 1]);
            // contiguous span
            assert_eq!(xs.len() as i32, x1 - x0 + 1);
            // flat bottom: spans only widen going down
            assert!(x1 - x0 >= prev);
            prev = x1 - x0;
        }
    }

    #[test]
    fn fill_over_content() {
        let mut b = PixelBuffer::new(32, 32);
        b.set_pixel(0, 16, SRgb8::new(9, 9, 9));
        b.set_pixel(31, 16, SRgb8::new(9, 9, 9));
        let tri = Triangle::new((16, 4), (8, 28), (24, 28));
        fill_triangle(&mut b, &tri, red());
        // stray opaque pixels do not widen the fill
        assert_eq!(b.pixel(1, 16), Some([0, 0, 0, 0]));
        assert_eq!(b.pixel(30, 16), Some([0, 0, 0, 0]));
        assert_eq!(b.pixel(16, 16), Some([255, 0, 0, 255]));
    }

    #[test]
    fn fill_degenerate() {
        let mut b = PixelBuffer::new(8, 8);
        fill_triangle(&mut b, &Triangle::new((2, 2), (2, 2), (2, 2)), red());
        assert_eq!(count_opaque(&b), 1);
        let mut b = PixelBuffer::new(8, 8);
        fill_triangle(&mut b, &Triangle::new((0, 0), (3, 3), (6, 6)), red());
        assert_eq!(count_opaque(&b), 7);
    }

    #[test]
    fn fill_clipped() {
        let mut b = PixelBuffer::new(8, 8);
        let tri = Triangle::new((-20, -20), (40, -20), (-20, 40));
        fill_triangle(&mut b, &tri, red());
        assert_eq!(count_opaque(&b), 64);
        let mut b = PixelBuffer::new(8, 8);
        fill_triangle(&mut b, &Triangle::new((0, 20), (5, 30), (9, 25)), red());
        assert_eq!(count_opaque(&b), 0);
    }
}
