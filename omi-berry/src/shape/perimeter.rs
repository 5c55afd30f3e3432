use std::f64::consts::SQRT_2;

use ndarray::Array2;

use super::fill::neighbour4;
use crate::data::PosIter;
use crate::Idx2d;

/// 邻域编码卷积核: 边 2, 角 10, 中心 1.
const KERNEL: [[usize; 3]; 3] = [[10, 2, 10], [2, 1, 2], [10, 2, 10]];

/// 邻域编码到周长贡献的映射. 未列出的编码贡献为 0.
fn weight(code: usize) -> f64 {
    match code {
        5 | 7 | 15 | 17 | 25 | 27 => 1.0,
        21 | 33 => SQRT_2,
        13 | 23 => (1.0 + SQRT_2) / 2.0,
        _ => 0.0,
    }
}

/// 边缘像素: 前景, 且 4-邻域内有背景或图像外像素.
fn border(image: &Array2<bool>) -> Array2<bool> {
    let mut ans = Array2::from_elem(image.dim(), false);
    for pos in PosIter::new(image.dim()) {
        ans[pos] = image[pos]
            && neighbour4(pos)
                .into_iter()
                .any(|n| !matches!(image.get(n), Some(&true)));
    }
    ans
}

/// 区域周长 (4-邻域).
///
/// 先取出边缘像素, 再以 [`KERNEL`] 对每个边缘像素的 3x3 邻域编码,
/// 按编码对应的局部形态 (直边, 角, 斜边) 累加长度.
pub(super) fn perimeter(image: &Array2<bool>) -> f64 {
    let b = border(image);
    let mut total = 0.0;
    for (pos, _) in b.indexed_iter().filter(|(_, on)| **on) {
        let code: usize = (0..3)
            .flat_map(|i| (0..3).map(move |j| (i, j)))
            .filter(|&(i, j)| is_border_at(&b, pos, (i, j)))
            .map(|(i, j)| KERNEL[i][j])
            .sum();
        total += weight(code);
    }
    total
}

/// `pos` 的 3x3 邻域中 `(i, j)` 处 (`(1, 1)` 为中心) 是否为边缘像素.
#[inline]
fn is_border_at(b: &Array2<bool>, (h, w): Idx2d, (i, j): Idx2d) -> bool {
    let pos = ((h + i).wrapping_sub(1), (w + j).wrapping_sub(1));
    matches!(b.get(pos), Some(&true))
}

#[cfg(test)]
mod tests {
    use super::perimeter;
    use ndarray::{array, Array2};

    #[test]
    fn test_squares() {
        assert_eq!(perimeter(&Array2::from_elem((1, 1), true)), 0.0);
        assert_eq!(perimeter(&Array2::from_elem((2, 2), true)), 4.0);
        assert_eq!(perimeter(&Array2::from_elem((3, 3), true)), 8.0);
        assert_eq!(perimeter(&Array2::from_elem((4, 4), true)), 12.0);
    }

    #[test]
    fn test_diagonal_step() {
        let im = array![[true, false], [true, true]];
        let p = perimeter(&im);
        assert!(p > 2.0 && p < 4.0);
    }
}
