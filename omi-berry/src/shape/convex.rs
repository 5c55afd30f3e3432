use itertools::Itertools;

use crate::data::Region;

/// 放大两倍后的整数平面坐标 `(2h, 2w)`. 像素四条边的中点恰有一个奇数分量,
/// 像素中心两个分量均为偶数, 因此全程不需要浮点比较.
type Point = (i64, i64);

#[inline]
fn cross(o: Point, a: Point, b: Point) -> i64 {
    (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0)
}

/// 区域所有像素的菱形顶点 (四条边的中点) 的凸包, 逆时针, 无共线点.
fn hull(region: &Region) -> Vec<Point> {
    let points: Vec<Point> = region
        .pixels()
        .iter()
        .flat_map(|&(h, w)| {
            let (h, w) = (2 * h as i64, 2 * w as i64);
            [(h - 1, w), (h + 1, w), (h, w - 1), (h, w + 1)]
        })
        .sorted_unstable()
        .dedup()
        .collect();
    if points.len() < 3 {
        return points;
    }

    // Andrew 单调链.
    let mut lower: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points.iter() {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0 {
            lower.pop();
        }
        lower.push(p);
    }
    let mut upper: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0 {
            upper.pop();
        }
        upper.push(p);
    }
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// 点是否在逆时针凸多边形内部或边上.
#[inline]
fn contains(hull: &[Point], p: Point) -> bool {
    hull.iter()
        .circular_tuple_windows()
        .all(|(&a, &b)| cross(a, b, p) >= 0)
}

/// 凸包面积: 中心位于区域凸包内 (含边上) 的像素个数.
pub(super) fn convex_area(region: &Region) -> usize {
    if region.is_empty() {
        return 0;
    }
    let hull = hull(region);
    region
        .bbox()
        .pos_iter()
        .filter(|&(h, w)| contains(&hull, (2 * h as i64, 2 * w as i64)))
        .count()
}

#[cfg(test)]
mod tests {
    use super::{convex_area, hull};
    use crate::data::Region;

    #[test]
    fn test_single_pixel_hull() {
        let r = Region::new(1, vec![(0, 0)]);
        assert_eq!(hull(&r).len(), 4);
        assert_eq!(convex_area(&r), 1);
    }

    #[test]
    fn test_l_shape() {
        // X.
        // XX
        let r = Region::new(1, vec![(0, 0), (1, 0), (1, 1)]);
        // 缺角像素的中心在斜边外侧.
        assert_eq!(convex_area(&r), 3);
    }

    #[test]
    fn test_sparse_diagonal() {
        // X..
        // ...
        // ..X
        let r = Region::new(1, vec![(0, 0), (2, 2)]);
        assert_eq!(convex_area(&r), 3);
    }

    #[test]
    fn test_empty() {
        assert_eq!(convex_area(&Region::new(1, vec![])), 0);
    }
}
