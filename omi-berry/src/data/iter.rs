use crate::Idx2d;

/// 行优先索引迭代器, 覆盖以 `origin` 为左上角、形状为 `(h, w)` 的矩形窗口.
///
/// 虽然如下函数也能实现相同的功能:
///
/// ```
/// type Idx2d = (usize, usize);
///
/// fn pos_iter_auto((oh, ow): Idx2d, (h, w): Idx2d) -> impl Iterator<Item = Idx2d> {
///     (oh..oh + h).flat_map(move |first| (ow..ow + w).map(move |second| (first, second)))
/// }
///
/// // ...
/// ```
///
/// 但手写迭代器对象占用的空间更小, 且能在逐区域扫描包围盒时被廉价地复制.
#[derive(Copy, Clone, Debug)]
pub struct PosIter {
    origin: Idx2d,
    cur_h: usize,
    cur_w: usize,
    h: usize,
    w: usize,
}

impl PosIter {
    /// 覆盖整幅 `(h, w)` 图像.
    #[inline]
    pub fn new(shape: Idx2d) -> Self {
        Self::with_origin((0, 0), shape)
    }

    /// 覆盖以 `origin` 为左上角的 `(h, w)` 窗口.
    #[inline]
    pub fn with_origin(origin: Idx2d, (h, w): Idx2d) -> Self {
        Self {
            origin,
            cur_h: 0,
            cur_w: 0,
            h,
            w,
        }
    }
}

impl Iterator for PosIter {
    type Item = Idx2d;

    fn next(&mut self) -> Option<Self::Item> {
        if self.h == 0 || self.w == 0 || self.cur_h == self.h {
            return None;
        }
        let ret_pos = (self.origin.0 + self.cur_h, self.origin.1 + self.cur_w);
        if self.cur_w + 1 == self.w {
            self.cur_w = 0;
            self.cur_h += 1;
        } else {
            self.cur_w += 1;
        }
        Some(ret_pos)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = if self.h == 0 || self.w == 0 {
            0
        } else {
            (self.h - self.cur_h) * self.w - self.cur_w
        };
        (left, Some(left))
    }
}

impl ExactSizeIterator for PosIter {}

#[cfg(test)]
mod completeness_tests {
    use super::PosIter;
    use crate::Idx2d;

    fn pos_iter_builtin((oh, ow): Idx2d, (h, w): Idx2d) -> impl Iterator<Item = Idx2d> {
        (oh..oh + h).flat_map(move |first| (ow..ow + w).map(move |second| (first, second)))
    }

    #[test]
    fn test_pos_iter() {
        for i in 0..=4 {
            for j in 0..=4 {
                let tup = (i, j);
                assert!(Iterator::eq(
                    pos_iter_builtin((0, 0), tup),
                    PosIter::new(tup)
                ));
                assert!(Iterator::eq(
                    pos_iter_builtin((3, 7), tup),
                    PosIter::with_origin((3, 7), tup)
                ));
            }
        }
    }

    #[test]
    fn test_pos_iter_len() {
        let mut it = PosIter::with_origin((1, 1), (2, 3));
        assert_eq!(it.len(), 6);
        it.next();
        it.next();
        assert_eq!(it.len(), 4);
        assert_eq!(PosIter::new((0, 5)).len(), 0);
    }
}
