//! 合成通道: 由两个及以上原始通道逐像素计算得到的特征图像.
//!
//! 只计算通道计划中出现的合成特征. 比值类特征 (氧化还原比, FLIRR)
//! 只在前景像素上计算, 背景像素取 `0.0`; 比值中出现的非有限值被替换为 `0.0`.

use std::collections::BTreeMap;

use ndarray::{Array2, ArrayView2, Zip};

use crate::consts::{is_foreground, PERCENT};
use crate::data::{Channel, ChannelSet, Feature, LabelImage};
use crate::options::ChannelPlan;
use crate::Label;

/// 振幅加权平均寿命 `(a1 / 100) * t1 + (a2 / 100) * t2`.
pub fn mean_lifetime(
    a1: ArrayView2<f64>,
    a2: ArrayView2<f64>,
    t1: ArrayView2<f64>,
    t2: ArrayView2<f64>,
) -> Array2<f64> {
    Zip::from(&a1)
        .and(&a2)
        .and(&t1)
        .and(&t2)
        .map_collect(|&a1, &a2, &t1, &t2| a1 / PERCENT * t1 + a2 / PERCENT * t2)
}

/// 在前景像素上逐像素计算 `f(x, y)`, 背景取 `0.0`.
///
/// 非有限结果被替换为 `0.0`, 返回值的第二项为被替换的像素个数.
fn masked_ratio<F>(
    labels: ArrayView2<Label>,
    x: ArrayView2<f64>,
    y: ArrayView2<f64>,
    f: F,
) -> (Array2<f64>, usize)
where
    F: Fn(f64, f64) -> f64,
{
    let mut replaced = 0;
    let ans = Zip::from(&labels).and(&x).and(&y).map_collect(|&l, &x, &y| {
        if !is_foreground(l) {
            return 0.0;
        }
        let v = f(x, y);
        if v.is_finite() {
            v
        } else {
            replaced += 1;
            0.0
        }
    });
    (ans, replaced)
}

fn report(feature: Feature, (image, replaced): (Array2<f64>, usize)) -> Array2<f64> {
    if replaced > 0 {
        log::warn!(
            "{}: {replaced} non-finite pixel(s) inside the mask replaced with 0",
            feature.name()
        );
    }
    image
}

/// 氧化还原比 `nadh / fad`, 仅前景.
pub fn redox_ratio(
    labels: ArrayView2<Label>,
    nadh: ArrayView2<f64>,
    fad: ArrayView2<f64>,
) -> Array2<f64> {
    report(
        Feature::RedoxRatio,
        masked_ratio(labels, nadh, fad, |n, f| n / f),
    )
}

/// 归一化氧化还原比 `nadh / (fad + nadh)`, 仅前景.
pub fn redox_ratio_norm(
    labels: ArrayView2<Label>,
    nadh: ArrayView2<f64>,
    fad: ArrayView2<f64>,
) -> Array2<f64> {
    report(
        Feature::RedoxRatioNorm,
        masked_ratio(labels, nadh, fad, |n, f| n / (f + n)),
    )
}

/// FLIRR `(nadh_a2 / 100) / (fad_a1 / 100)`, 仅前景.
///
/// FAD α1 为零的前景像素取 `0.0`.
pub fn flirr(
    labels: ArrayView2<Label>,
    nadh_a2: ArrayView2<f64>,
    fad_a1: ArrayView2<f64>,
) -> Array2<f64> {
    report(
        Feature::Flirr,
        masked_ratio(labels, nadh_a2, fad_a1, |a2, a1| {
            (a2 / PERCENT) / (a1 / PERCENT)
        }),
    )
}

/// 一次特征提取中算出的全部合成通道.
#[derive(Clone, Debug, Default)]
pub struct Composites {
    images: BTreeMap<Feature, Array2<f64>>,
}

impl Composites {
    /// 按计划计算合成通道.
    ///
    /// 计划保证每个合成特征的前置通道都存在; 不在计划中的合成特征不会被计算.
    pub fn derive(labels: &LabelImage, channels: &ChannelSet, plan: &ChannelPlan) -> Self {
        let mut images = BTreeMap::new();
        for feature in plan.composites() {
            if let Some(image) = derive_one(labels.array_view(), channels, feature) {
                images.insert(feature, image);
            }
        }
        Self { images }
    }

    /// 获取合成通道图像. 未计算时返回 `None`.
    #[inline]
    pub fn get(&self, feature: Feature) -> Option<ArrayView2<'_, f64>> {
        self.images.get(&feature).map(|a| a.view())
    }

    /// 已计算的合成通道个数.
    #[inline]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// 是否一个合成通道也没有?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

fn derive_one(
    labels: ArrayView2<Label>,
    channels: &ChannelSet,
    feature: Feature,
) -> Option<Array2<f64>> {
    use Channel::*;

    let get = |c: Channel| channels.get(c);
    let image = match feature {
        Feature::Raw(_) => return None,
        Feature::NadhTauMean => {
            mean_lifetime(get(NadhA1)?, get(NadhA2)?, get(NadhT1)?, get(NadhT2)?)
        }
        Feature::FadTauMean => mean_lifetime(get(FadA1)?, get(FadA2)?, get(FadT1)?, get(FadT2)?),
        Feature::RedoxRatio => redox_ratio(labels, get(NadhIntensity)?, get(FadIntensity)?),
        Feature::RedoxRatioNorm => {
            redox_ratio_norm(labels, get(NadhIntensity)?, get(FadIntensity)?)
        }
        Feature::Flirr => flirr(labels, get(NadhA2)?, get(FadA1)?),
    };
    Some(image)
}
