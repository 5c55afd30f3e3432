use std::collections::BTreeMap;

use itertools::Itertools;
use ndarray::{Array2, ArrayView2};
use num::ToPrimitive;

use crate::consts::{is_foreground, BACKGROUND};
use crate::{Idx2d, Label, OmiError, OmiResult};

pub mod channel;
mod iter;
mod region;

pub use channel::{Channel, Feature, Fluorophore};
pub use iter::PosIter;
pub use region::{Bbox, Region};

/// 单个逐像素测量通道, 行优先的 (高, 宽) 二维浮点数组.
pub type ChannelImage = Array2<f64>;

/// 二维标签图像. `0` 为背景, 每个不同的正整数代表一个区域实例.
///
/// 标签图像由外部的分割步骤产生, 本 crate 不做连通性检查.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelImage {
    data: Array2<Label>,
}

impl From<Array2<Label>> for LabelImage {
    #[inline]
    fn from(data: Array2<Label>) -> Self {
        Self::new(data)
    }
}

impl LabelImage {
    /// 直接初始化.
    #[inline]
    pub fn new(data: Array2<Label>) -> Self {
        Self { data }
    }

    /// 从任意整数 (或可无损转换为整数的) 数组创建标签图像.
    ///
    /// 若存在负值、非整数值或超出 [`Label`] 表示范围的值, 则返回 `None`.
    pub fn from_array<T: ToPrimitive>(data: ArrayView2<T>) -> Option<Self> {
        let mut buf = Vec::with_capacity(data.len());
        for v in data.iter() {
            let f = v.to_f64()?;
            if f.fract() != 0.0 {
                return None;
            }
            buf.push(v.to_u32()?);
        }
        Array2::from_shape_vec(data.dim(), buf).ok().map(Self::new)
    }

    /// 获得数据的一份不可变 shallow copy.
    #[inline]
    pub fn array_view(&self) -> ArrayView2<'_, Label> {
        self.data.view()
    }

    /// 图像的分辨率 (高, 宽).
    #[inline]
    pub fn shape(&self) -> Idx2d {
        self.data.dim()
    }

    /// 该图是否为全背景图?
    #[inline]
    pub fn is_background(&self) -> bool {
        self.data.iter().all(|&l| l == BACKGROUND)
    }

    /// 升序排列的所有不同正标签值.
    pub fn labels(&self) -> Vec<Label> {
        self.data
            .iter()
            .copied()
            .filter(|&l| is_foreground(l))
            .sorted_unstable()
            .dedup()
            .collect()
    }

    /// 一次遍历收集所有区域, 按标签值升序排列.
    ///
    /// 每个区域的像素索引按行优先存储. 背景不构成区域.
    pub fn regions(&self) -> Vec<Region> {
        let mut book: BTreeMap<Label, Vec<Idx2d>> = BTreeMap::new();
        for (pos, &label) in self.data.indexed_iter() {
            if is_foreground(label) {
                book.entry(label).or_default().push(pos);
            }
        }
        book.into_iter()
            .map(|(label, pixels)| Region::new(label, pixels))
            .collect()
    }
}

/// 从封闭通道枚举到 (可选) 通道图像的映射.
///
/// 未插入的通道视为未采集: 这不是错误, 只会让依赖它的特征被跳过.
#[derive(Debug, Clone, Default)]
pub struct ChannelSet {
    images: BTreeMap<Channel, ChannelImage>,
}

impl ChannelSet {
    /// 空集合.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入 (或替换) 一个通道, 返回被替换的旧图像.
    #[inline]
    pub fn insert(&mut self, channel: Channel, image: ChannelImage) -> Option<ChannelImage> {
        self.images.insert(channel, image)
    }

    /// 链式插入.
    #[inline]
    pub fn with(mut self, channel: Channel, image: ChannelImage) -> Self {
        self.insert(channel, image);
        self
    }

    /// 获取通道图像视图. 通道缺失时返回 `None`.
    #[inline]
    pub fn get(&self, channel: Channel) -> Option<ArrayView2<'_, f64>> {
        self.images.get(&channel).map(|a| a.view())
    }

    /// 通道是否存在?
    #[inline]
    pub fn contains(&self, channel: Channel) -> bool {
        self.images.contains_key(&channel)
    }

    /// `channels` 是否全部存在?
    #[inline]
    pub fn contains_all(&self, channels: &[Channel]) -> bool {
        channels.iter().all(|&c| self.contains(c))
    }

    /// 已有通道个数.
    #[inline]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// 是否一个通道也没有?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// 按枚举顺序迭代已有通道.
    pub fn iter(&self) -> impl Iterator<Item = (Channel, ArrayView2<'_, f64>)> {
        self.images.iter().map(|(&c, a)| (c, a.view()))
    }

    /// 检查每个已有通道的形状是否为 `expected`. 返回第一个不一致的通道.
    pub fn check_shape(&self, expected: Idx2d) -> OmiResult<()> {
        match self.iter().find(|(_, a)| a.dim() != expected) {
            Some((channel, a)) => Err(OmiError::ShapeMismatch {
                channel,
                expected,
                found: a.dim(),
            }),
            None => Ok(()),
        }
    }
}

impl FromIterator<(Channel, ChannelImage)> for ChannelSet {
    fn from_iter<T: IntoIterator<Item = (Channel, ChannelImage)>>(iter: T) -> Self {
        Self {
            images: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Channel, ChannelSet, LabelImage};
    use crate::OmiError;
    use ndarray::{array, Array2};

    #[test]
    fn test_labels_sorted_unique() {
        let l = LabelImage::new(array![[0, 5, 5], [2, 0, 9], [2, 2, 0]]);
        assert_eq!(l.labels(), vec![2, 5, 9]);
        assert!(!l.is_background());
    }

    #[test]
    fn test_regions() {
        let l = LabelImage::new(array![[0, 5, 5], [2, 0, 9], [2, 2, 0]]);
        let regions = l.regions();
        let labels: Vec<_> = regions.iter().map(|r| r.label()).collect();
        assert_eq!(labels, vec![2, 5, 9]);
        assert_eq!(regions[0].pixels(), &[(1, 0), (2, 0), (2, 1)]);
        assert_eq!(regions[2].area(), 1);
    }

    #[test]
    fn test_from_array() {
        let ok = LabelImage::from_array(array![[0i64, 1], [2, 3]].view()).unwrap();
        assert_eq!(ok.labels(), vec![1, 2, 3]);
        assert!(LabelImage::from_array(array![[0i32, -1]].view()).is_none());
        assert!(LabelImage::from_array(array![[0.0f64, 1.5]].view()).is_none());
        assert!(LabelImage::from_array(array![[2.0f32, 1.0]].view()).is_some());
    }

    #[test]
    fn test_background_only() {
        let l = LabelImage::new(Array2::zeros((3, 3)));
        assert!(l.is_background());
        assert!(l.labels().is_empty());
        assert!(l.regions().is_empty());
    }

    #[test]
    fn test_check_shape() {
        let set = ChannelSet::new()
            .with(Channel::NadhIntensity, Array2::zeros((4, 4)))
            .with(Channel::FadIntensity, Array2::zeros((4, 5)));
        assert_eq!(
            set.check_shape((4, 4)),
            Err(OmiError::ShapeMismatch {
                channel: Channel::FadIntensity,
                expected: (4, 4),
                found: (4, 5),
            })
        );
        assert!(set.contains_all(&[Channel::NadhIntensity, Channel::FadIntensity]));
        assert!(!set.contains(Channel::StainA1));
    }
}
