//! 单个标注区域.

use ndarray::{Array2, ArrayView2};

use super::iter::PosIter;
use crate::{Idx2d, Label};

/// 区域的轴对齐包围盒. 上界不包含在内.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Bbox {
    /// 最小行索引.
    pub min_h: usize,
    /// 最小列索引.
    pub min_w: usize,
    /// 最大行索引 + 1.
    pub max_h: usize,
    /// 最大列索引 + 1.
    pub max_w: usize,
}

impl Bbox {
    /// 包围盒的高.
    #[inline]
    pub fn height(&self) -> usize {
        self.max_h - self.min_h
    }

    /// 包围盒的宽.
    #[inline]
    pub fn width(&self) -> usize {
        self.max_w - self.min_w
    }

    /// 包围盒形状 (高, 宽).
    #[inline]
    pub fn shape(&self) -> Idx2d {
        (self.height(), self.width())
    }

    /// 包围盒面积 (像素数).
    #[inline]
    pub fn area(&self) -> usize {
        self.height() * self.width()
    }

    /// 将全图索引转换为包围盒局部索引. 不检查越界.
    #[inline]
    pub fn to_local(&self, (h, w): Idx2d) -> Idx2d {
        (h - self.min_h, w - self.min_w)
    }

    /// 以行优先规则迭代包围盒内所有全图索引.
    #[inline]
    pub fn pos_iter(&self) -> PosIter {
        PosIter::with_origin((self.min_h, self.min_w), self.shape())
    }
}

/// 标签图像中值为 `label` 的全部像素.
///
/// 像素索引按行优先存储. 区域只在一次特征提取调用内存在,
/// 不保证像素间连通 (一个标签值就是一个区域).
#[derive(Clone, Debug)]
pub struct Region {
    label: Label,
    pixels: Vec<Idx2d>,
    bbox: Bbox,
}

impl Region {
    /// 由标签值和行优先的像素索引直接创建.
    pub(crate) fn new(label: Label, pixels: Vec<Idx2d>) -> Self {
        let mut bbox = Bbox {
            min_h: usize::MAX,
            min_w: usize::MAX,
            max_h: 0,
            max_w: 0,
        };
        for &(h, w) in pixels.iter() {
            bbox.min_h = bbox.min_h.min(h);
            bbox.min_w = bbox.min_w.min(w);
            bbox.max_h = bbox.max_h.max(h + 1);
            bbox.max_w = bbox.max_w.max(w + 1);
        }
        if pixels.is_empty() {
            bbox.min_h = 0;
            bbox.min_w = 0;
        }
        Self {
            label,
            pixels,
            bbox,
        }
    }

    /// 区域标签值.
    #[inline]
    pub fn label(&self) -> Label {
        self.label
    }

    /// 区域面积 (像素数).
    #[inline]
    pub fn area(&self) -> usize {
        self.pixels.len()
    }

    /// 区域是否不含任何像素?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// 区域包围盒.
    #[inline]
    pub fn bbox(&self) -> Bbox {
        self.bbox
    }

    /// 区域像素的全图索引, 行优先.
    #[inline]
    pub fn pixels(&self) -> &[Idx2d] {
        &self.pixels
    }

    /// 按像素顺序取出 `image` 在区域内的值. 区域外的像素永远不会被读取.
    ///
    /// 如果 `image` 形状小于标签图像, 则程序 panic.
    pub fn values(&self, image: ArrayView2<f64>) -> Vec<f64> {
        self.pixels.iter().map(|&p| image[p]).collect()
    }

    /// 包围盒局部的二值掩膜, 区域像素为 `true`.
    pub fn image(&self) -> Array2<bool> {
        let mut ans = Array2::from_elem(self.bbox.shape(), false);
        for &p in self.pixels.iter() {
            ans[self.bbox.to_local(p)] = true;
        }
        ans
    }
}

#[cfg(test)]
mod tests {
    use super::Region;
    use ndarray::array;

    #[test]
    fn test_region_bbox() {
        let r = Region::new(3, vec![(1, 2), (1, 3), (2, 1)]);
        let b = r.bbox();
        assert_eq!((b.min_h, b.min_w, b.max_h, b.max_w), (1, 1, 3, 4));
        assert_eq!(b.shape(), (2, 3));
        assert_eq!(b.area(), 6);
        assert_eq!(r.area(), 3);
        assert_eq!(r.label(), 3);
    }

    #[test]
    fn test_region_image() {
        let r = Region::new(1, vec![(1, 2), (1, 3), (2, 1)]);
        assert_eq!(
            r.image(),
            array![[false, true, true], [true, false, false]]
        );
    }

    #[test]
    fn test_empty_region() {
        let r = Region::new(9, vec![]);
        assert!(r.is_empty());
        assert_eq!(r.bbox().area(), 0);
        assert_eq!(r.image().len(), 0);
    }

    #[test]
    fn test_values_only_read_members() {
        let image = array![[1.0, 2.0], [3.0, 4.0]];
        let r = Region::new(1, vec![(0, 1), (1, 0)]);
        let v = r.values(image.view());
        assert_eq!(v, vec![2.0, 3.0]);
    }
}
