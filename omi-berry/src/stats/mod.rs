//! 逐区域、逐通道的掩膜统计量.
//!
//! 每个区域只读取自身标签的像素: 背景和其他区域的像素永远不参与计算.
//! 空区域不会报错, 其统计量定义为 `NaN`.

use std::collections::BTreeMap;

use ndarray::ArrayView2;
use ordered_float::OrderedFloat;

use crate::data::{Feature, Region};
use crate::options::PlanEntry;
use crate::Label;

mod weighted;

pub use weighted::{intensity_weighted, WeightedStatistic};

/// 一个 (特征, 区域) 对的统计量.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RegionStatistic {
    /// 区域像素数.
    pub area: usize,

    /// 算术平均值.
    pub mean: f64,

    /// 总体标准差 (ddof = 0).
    pub stdev: f64,

    /// 中位数, 仅 χ² 特征统计.
    pub median: Option<f64>,

    /// 强度加权统计量, 仅寿命类特征且强度通道存在时统计.
    pub weighted: Option<WeightedStatistic>,
}

/// 区域内取值的算术平均值. 空输入为 `NaN`.
pub fn masked_mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// 区域内取值关于 `mean` 的总体标准差. 空输入为 `NaN`.
pub fn masked_stdev(values: &[f64], mean: f64) -> f64 {
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

/// 区域内取值的中位数, 偶数个时取中间两数的平均值. 空输入为 `NaN`.
///
/// 会就地重排 `values`.
pub fn masked_median(values: &mut [f64]) -> f64 {
    let n = values.len();
    if n == 0 {
        return f64::NAN;
    }
    values.sort_unstable_by_key(|&v| OrderedFloat(v));
    if n % 2 == 1 {
        values[n / 2]
    } else {
        (values[n / 2 - 1] + values[n / 2]) / 2.0
    }
}

/// 统计单个区域.
///
/// `weights` 为强度加权所用的强度图像; 为 `None` 时不计算加权统计量.
pub fn measure_region(
    region: &Region,
    image: ArrayView2<f64>,
    median: bool,
    weights: Option<ArrayView2<f64>>,
) -> RegionStatistic {
    let mut values = region.values(image);
    if values.is_empty() {
        log::warn!("region {} has no pixels, statistics are NaN", region.label());
    }
    let mean = masked_mean(&values);
    let stdev = masked_stdev(&values, mean);
    let weighted = weights.map(|w| intensity_weighted(&values, &region.values(w)));
    let median = median.then(|| masked_median(&mut values));
    RegionStatistic {
        area: region.area(),
        mean,
        stdev,
        median,
        weighted,
    }
}

/// 单个特征在全部区域上的统计表.
#[derive(Clone, Debug, PartialEq)]
pub struct StatTable {
    feature: Feature,
    rows: BTreeMap<Label, RegionStatistic>,
}

impl StatTable {
    /// 按计划项 `entry` 统计 `image` 在全部 `regions` 上的统计量.
    ///
    /// `weights` 应为 `entry.weight` 对应的强度图像.
    pub fn measure(
        regions: &[Region],
        entry: &PlanEntry,
        image: ArrayView2<f64>,
        weights: Option<ArrayView2<f64>>,
    ) -> Self {
        let rows = regions
            .iter()
            .map(|r| (r.label(), measure_region(r, image, entry.median, weights)))
            .collect();
        Self {
            feature: entry.feature,
            rows,
        }
    }

    /// 被统计的特征.
    #[inline]
    pub fn feature(&self) -> Feature {
        self.feature
    }

    /// 查询区域 `label` 的统计量.
    #[inline]
    pub fn get(&self, label: Label) -> Option<&RegionStatistic> {
        self.rows.get(&label)
    }

    /// 区域个数.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// 是否没有任何区域?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
