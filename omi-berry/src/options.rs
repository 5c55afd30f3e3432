//! 特征开关与通道计划.
//!
//! 所有开关只在流水线开始时被读取一次, 与通道的存在情况一起生成静态的
//! [`ChannelPlan`]. 之后的各阶段只按计划工作, 不再检查开关.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::data::{Channel, ChannelSet, Feature, Fluorophore};
use crate::shape::{parse_requests, PropertyRequest};
use crate::OmiResult;

/// 特征提取选项.
///
/// 默认值打开所有开关, 且不请求任何形状属性.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OmiOptions {
    /// 是否统计 FAD 通道及依赖 FAD 的合成特征 (FAD 平均寿命, 氧化还原比, FLIRR).
    pub compute_fad: bool,

    /// 是否统计染色强度.
    pub compute_stain_intensity: bool,

    /// 是否统计染色寿命 (α1, α2, τ1, τ2).
    pub compute_stain_lifetime: bool,

    /// 是否为 NADH/FAD 寿命类特征计算强度加权统计量.
    pub compute_intensity_weighted: bool,

    /// 额外的、仅依赖标签图像的形状属性.
    pub other_props: Vec<PropertyRequest>,
}

impl Default for OmiOptions {
    fn default() -> Self {
        Self {
            compute_fad: true,
            compute_stain_intensity: true,
            compute_stain_lifetime: true,
            compute_intensity_weighted: true,
            other_props: vec![],
        }
    }
}

impl OmiOptions {
    /// 设置 [`Self::compute_fad`].
    #[inline]
    pub fn with_fad(mut self, on: bool) -> Self {
        self.compute_fad = on;
        self
    }

    /// 设置 [`Self::compute_stain_intensity`].
    #[inline]
    pub fn with_stain_intensity(mut self, on: bool) -> Self {
        self.compute_stain_intensity = on;
        self
    }

    /// 设置 [`Self::compute_stain_lifetime`].
    #[inline]
    pub fn with_stain_lifetime(mut self, on: bool) -> Self {
        self.compute_stain_lifetime = on;
        self
    }

    /// 设置 [`Self::compute_intensity_weighted`].
    #[inline]
    pub fn with_intensity_weighted(mut self, on: bool) -> Self {
        self.compute_intensity_weighted = on;
        self
    }

    /// 按名称请求形状属性 (如 `"area"`, `"eccentricity"`).
    ///
    /// 任何一个名称无法识别都会返回 `Err(OmiError::UnknownProperty)`.
    pub fn with_other_props<I, S>(mut self, names: I) -> OmiResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.other_props = parse_requests(names)?;
        Ok(self)
    }

    /// 开关是否允许 `feature`? 不考虑通道是否存在.
    pub fn allows(&self, feature: Feature) -> bool {
        match feature {
            Feature::Raw(Channel::NadhChi | Channel::FadChi) => true,
            Feature::Raw(Channel::StainIntensity) => self.compute_stain_intensity,
            Feature::Raw(c) => match c.fluorophore() {
                Fluorophore::Nadh => true,
                Fluorophore::Fad => self.compute_fad,
                Fluorophore::Stain => self.compute_stain_lifetime,
            },
            Feature::NadhTauMean => true,
            Feature::FadTauMean | Feature::RedoxRatio | Feature::RedoxRatioNorm | Feature::Flirr => {
                self.compute_fad
            }
        }
    }

    /// 根据开关和已有通道生成通道计划.
    pub fn plan(&self, channels: &ChannelSet) -> ChannelPlan {
        let entries = Feature::ALL
            .into_iter()
            .filter(|&f| self.allows(f) && channels.contains_all(f.prerequisites()))
            .map(|feature| PlanEntry {
                feature,
                median: feature.is_chi(),
                weight: feature
                    .weight_channel()
                    .filter(|&w| self.compute_intensity_weighted && channels.contains(w)),
            })
            .collect();
        ChannelPlan { entries }
    }
}

/// 通道计划中的一项.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PlanEntry {
    /// 要统计的特征.
    pub feature: Feature,

    /// 是否额外统计区域中位数.
    pub median: bool,

    /// 强度加权所用的强度通道. `None` 表示不计算强度加权统计量.
    pub weight: Option<Channel>,
}

/// 一次特征提取中要统计的全部特征, 按 [`Feature::ALL`] 的顺序排列.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChannelPlan {
    entries: Vec<PlanEntry>,
}

impl ChannelPlan {
    /// 计划中的全部项.
    #[inline]
    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    /// 计划中是否包含 `feature`?
    #[inline]
    pub fn contains(&self, feature: Feature) -> bool {
        self.entries.iter().any(|e| e.feature == feature)
    }

    /// 计划中的合成特征.
    pub fn composites(&self) -> impl Iterator<Item = Feature> + '_ {
        self.entries
            .iter()
            .map(|e| e.feature)
            .filter(Feature::is_composite)
    }

    /// 计划项个数.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 计划是否为空?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
