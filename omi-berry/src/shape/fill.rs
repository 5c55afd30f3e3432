use std::collections::VecDeque;

use ndarray::Array2;

use crate::data::PosIter;
use crate::Idx2d;

/// 判断一个索引是否位于 `(h, w)` 图像的边缘.
#[inline]
fn is_at_border((h, w): Idx2d, (h_len, w_len): Idx2d) -> bool {
    h == 0 || h + 1 == h_len || w == 0 || w + 1 == w_len
}

/// 获得 `(h, w)` 的 4-邻居索引. 不检查越界.
#[inline]
pub(super) fn neighbour4((h, w): Idx2d) -> [Idx2d; 4] {
    [
        (h.wrapping_sub(1), w),
        (h.saturating_add(1), w),
        (h, w.wrapping_sub(1)),
        (h, w.saturating_add(1)),
    ]
}

/// 获得 `(h, w)` 的 8-邻居索引. 不检查越界.
#[inline]
fn neighbour8((h, w): Idx2d) -> [Idx2d; 8] {
    let (hu, hd) = (h.wrapping_sub(1), h.saturating_add(1));
    let (wl, wr) = (w.wrapping_sub(1), w.saturating_add(1));
    [
        (hu, wl),
        (hu, w),
        (hu, wr),
        (h, wl),
        (h, wr),
        (hd, wl),
        (hd, w),
        (hd, wr),
    ]
}

/// 填充背景空洞后的前景像素个数.
///
/// 背景空洞指不能经由 8-相邻背景路径到达图像边缘的背景像素.
/// `image` 通常是区域的包围盒局部掩膜.
pub(super) fn filled_area(image: &Array2<bool>) -> usize {
    let shape = image.dim();
    let mut reached = Array2::from_elem(shape, false);
    let mut q: VecDeque<Idx2d> = PosIter::new(shape)
        .filter(|&p| is_at_border(p, shape) && !image[p])
        .collect();

    while let Some(cur) = q.pop_front() {
        if reached[cur] {
            continue;
        }
        reached[cur] = true;
        for neigh in neighbour8(cur) {
            if matches!(image.get(neigh), Some(&false)) && !reached[neigh] {
                q.push_back(neigh);
            }
        }
    }
    reached.len() - reached.iter().filter(|&&r| r).count()
}

#[cfg(test)]
mod tests {
    use super::filled_area;
    use ndarray::array;

    #[test]
    fn test_no_hole() {
        let im = array![[true, true], [true, false]];
        assert_eq!(filled_area(&im), 3);
    }

    #[test]
    fn test_hole_filled() {
        let im = array![
            [false, true, true, true],
            [false, true, false, true],
            [false, true, true, true],
        ];
        assert_eq!(filled_area(&im), 9);
    }

    #[test]
    fn test_diagonal_gap_is_not_a_hole() {
        // 中心背景经由对角线与边缘背景相连.
        let im = array![
            [true, true, false],
            [true, false, true],
            [true, true, true],
        ];
        assert_eq!(filled_area(&im), 7);
    }

    #[test]
    fn test_closed_ring() {
        let mut im = ndarray::Array2::from_elem((3, 3), true);
        im[(1, 1)] = false;
        assert_eq!(filled_area(&im), 9);
    }
}
