/// Geometry helpers on the 2D viewing plane
use crate::error::{Error, Result};
use crate::point::Point2D;

/// Twice the signed area of the triangle `(a, b, c)`.
///
/// Positive when the vertices run counter-clockwise (y axis up).
pub fn signed_area2(a: &Point2D, b: &Point2D, c: &Point2D) -> f64 {
    (a.x - c.x) * (b.y - c.y) - (a.y - c.y) * (b.x - c.x)
}

/// True if `p` lies inside or on the boundary of the counter-clockwise
/// triangle `(a, b, c)`
pub fn inside_triangle(a: &Point2D, b: &Point2D, c: &Point2D, p: &Point2D) -> bool {
    signed_area2(a, b, p) >= 0.0 && signed_area2(b, c, p) >= 0.0 && signed_area2(c, a, p) >= 0.0
}

/// Ear-clipping triangulation of a simple counter-clockwise polygon.
///
/// Returns `polygon.len() - 2` triangles as index triples into `polygon`,
/// each counter-clockwise. Fails when the polygon has fewer than three
/// points, or when a full pass over the remaining vertices finds no ear
/// (clockwise or self-intersecting input).
pub fn triangulate(polygon: &[Point2D]) -> Result<Vec<[usize; 3]>> {
    let n = polygon.len();
    if n < 3 {
        return Err(Error::Triangulation(format!(
            "need at least 3 points, got {n}"
        )));
    }

    // next[i] is the successor of vertex i in the remaining polygon
    let mut next: Vec<usize> = (1..=n).map(|i| i % n).collect();
    let mut triangles = Vec::with_capacity(n - 2);
    let mut ia = 0;

    for k in 0..n - 2 {
        let remaining = n - k;
        let mut found = false;
        let mut attempts = 0;

        while !found && attempts < remaining {
            attempts += 1;
            let ib = next[ia];
            let ic = next[ib];
            let (a, b, c) = (&polygon[ia], &polygon[ib], &polygon[ic]);

            if signed_area2(a, b, c) >= 0.0 {
                // An ear must not contain any other remaining vertex
                let mut j = next[ic];
                while j != ia && !inside_triangle(a, b, c, &polygon[j]) {
                    j = next[j];
                }
                if j == ia {
                    triangles.push([ia, ib, ic]);
                    next[ia] = ic;
                    found = true;
                }
            }
            ia = next[ia];
        }

        if !found {
            return Err(Error::Triangulation(format!(
                "no ear found among {remaining} remaining vertices"
            )));
        }
    }

    Ok(triangles)
}

/// The mean of a set of points, or `None` if there are none
pub fn centre_point(points: &[Point2D]) -> Option<Point2D> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(Point2D::new(sx / n, sy / n))
}

/// Minimum and maximum corners of the bounding box of `points`
pub fn bounds(points: &[Point2D]) -> Option<(Point2D, Point2D)> {
    let first = points.first()?;
    Some(points.iter().fold((*first, *first), |(min, max), p| {
        (
            Point2D::new(min.x.min(p.x), min.y.min(p.y)),
            Point2D::new(max.x.max(p.x), max.y.max(p.y)),
        )
    }))
}
