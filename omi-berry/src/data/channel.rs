//! 通道与特征的封闭枚举.
//!
//! [`Channel`] 是外部输入的原始逐像素测量量 (SPCImage 一类软件的输出),
//! [`Feature`] 则是实际参与区域统计的图像, 包括原始通道和由其派生的合成通道.
//! 两者的声明顺序就是输出记录中特征的处理顺序.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 荧光团.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Fluorophore {
    /// NAD(P)H.
    Nadh,
    /// FAD.
    Fad,
    /// 额外染色.
    Stain,
}

/// 原始输入通道.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Channel {
    /// NADH 强度.
    NadhIntensity,
    /// NADH α1 (%).
    NadhA1,
    /// NADH α2 (%).
    NadhA2,
    /// NADH τ1, 短寿命分量.
    NadhT1,
    /// NADH τ2, 长寿命分量.
    NadhT2,
    /// FAD 强度.
    FadIntensity,
    /// FAD α1 (%).
    FadA1,
    /// FAD α2 (%).
    FadA2,
    /// FAD τ1.
    FadT1,
    /// FAD τ2.
    FadT2,
    /// 染色强度.
    StainIntensity,
    /// 染色 α1 (%).
    StainA1,
    /// 染色 α2 (%).
    StainA2,
    /// 染色 τ1.
    StainT1,
    /// 染色 τ2.
    StainT2,
    /// NADH 拟合优度 χ².
    NadhChi,
    /// FAD 拟合优度 χ².
    FadChi,
}

impl Channel {
    /// 全部通道, 按声明顺序.
    pub const ALL: [Channel; 17] = [
        Channel::NadhIntensity,
        Channel::NadhA1,
        Channel::NadhA2,
        Channel::NadhT1,
        Channel::NadhT2,
        Channel::FadIntensity,
        Channel::FadA1,
        Channel::FadA2,
        Channel::FadT1,
        Channel::FadT2,
        Channel::StainIntensity,
        Channel::StainA1,
        Channel::StainA2,
        Channel::StainT1,
        Channel::StainT2,
        Channel::NadhChi,
        Channel::FadChi,
    ];

    /// 通道名, 同时也是输出记录中的特征名前缀.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::NadhIntensity => "nadh_intensity",
            Self::NadhA1 => "nadh_a1",
            Self::NadhA2 => "nadh_a2",
            Self::NadhT1 => "nadh_t1",
            Self::NadhT2 => "nadh_t2",
            Self::FadIntensity => "fad_intensity",
            Self::FadA1 => "fad_a1",
            Self::FadA2 => "fad_a2",
            Self::FadT1 => "fad_t1",
            Self::FadT2 => "fad_t2",
            Self::StainIntensity => "stain_intensity",
            Self::StainA1 => "stain_a1",
            Self::StainA2 => "stain_a2",
            Self::StainT1 => "stain_t1",
            Self::StainT2 => "stain_t2",
            Self::NadhChi => "nadh_chi",
            Self::FadChi => "fad_chi",
        }
    }

    /// 所属荧光团.
    pub const fn fluorophore(&self) -> Fluorophore {
        use Channel::*;
        match self {
            NadhIntensity | NadhA1 | NadhA2 | NadhT1 | NadhT2 | NadhChi => Fluorophore::Nadh,
            FadIntensity | FadA1 | FadA2 | FadT1 | FadT2 | FadChi => Fluorophore::Fad,
            StainIntensity | StainA1 | StainA2 | StainT1 | StainT2 => Fluorophore::Stain,
        }
    }
}

/// 参与区域统计的特征图像.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Feature {
    /// 原始通道.
    Raw(Channel),
    /// NADH 振幅加权平均寿命.
    NadhTauMean,
    /// FAD 振幅加权平均寿命.
    FadTauMean,
    /// 氧化还原比 NADH / FAD.
    RedoxRatio,
    /// 归一化氧化还原比 NADH / (FAD + NADH).
    RedoxRatioNorm,
    /// 荧光寿命成像氧化还原比 (FLIRR), NADH α2 / FAD α1.
    Flirr,
}

impl From<Channel> for Feature {
    #[inline]
    fn from(value: Channel) -> Self {
        Self::Raw(value)
    }
}

impl Feature {
    /// 全部特征, 按处理顺序排列.
    pub const ALL: [Feature; 22] = {
        use Channel::*;
        [
            Feature::Raw(NadhIntensity),
            Feature::Raw(NadhA1),
            Feature::Raw(NadhA2),
            Feature::Raw(NadhT1),
            Feature::Raw(NadhT2),
            Feature::NadhTauMean,
            Feature::Raw(FadIntensity),
            Feature::Raw(FadA1),
            Feature::Raw(FadA2),
            Feature::Raw(FadT1),
            Feature::Raw(FadT2),
            Feature::FadTauMean,
            Feature::RedoxRatio,
            Feature::RedoxRatioNorm,
            Feature::Flirr,
            Feature::Raw(StainIntensity),
            Feature::Raw(StainA1),
            Feature::Raw(StainA2),
            Feature::Raw(StainT1),
            Feature::Raw(StainT2),
            Feature::Raw(NadhChi),
            Feature::Raw(FadChi),
        ]
    };

    /// 特征名.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Raw(c) => c.name(),
            Self::NadhTauMean => "nadh_tau_mean",
            Self::FadTauMean => "fad_tau_mean",
            Self::RedoxRatio => "redox_ratio",
            Self::RedoxRatioNorm => "redox_ratio_norm",
            Self::Flirr => "flirr",
        }
    }

    /// 是否是由多个原始通道派生的合成特征?
    #[inline]
    pub const fn is_composite(&self) -> bool {
        !matches!(self, Self::Raw(_))
    }

    /// 计算该特征所需的全部原始通道.
    pub const fn prerequisites(&self) -> &'static [Channel] {
        use Channel::*;
        match self {
            Self::Raw(NadhIntensity) => &[NadhIntensity],
            Self::Raw(NadhA1) => &[NadhA1],
            Self::Raw(NadhA2) => &[NadhA2],
            Self::Raw(NadhT1) => &[NadhT1],
            Self::Raw(NadhT2) => &[NadhT2],
            Self::Raw(FadIntensity) => &[FadIntensity],
            Self::Raw(FadA1) => &[FadA1],
            Self::Raw(FadA2) => &[FadA2],
            Self::Raw(FadT1) => &[FadT1],
            Self::Raw(FadT2) => &[FadT2],
            Self::Raw(StainIntensity) => &[StainIntensity],
            Self::Raw(StainA1) => &[StainA1],
            Self::Raw(StainA2) => &[StainA2],
            Self::Raw(StainT1) => &[StainT1],
            Self::Raw(StainT2) => &[StainT2],
            // χ² 只有两者同时给出时才有意义.
            Self::Raw(NadhChi) | Self::Raw(FadChi) => &[NadhChi, FadChi],
            Self::NadhTauMean => &[NadhA1, NadhA2, NadhT1, NadhT2],
            Self::FadTauMean => &[FadA1, FadA2, FadT1, FadT2],
            Self::RedoxRatio | Self::RedoxRatioNorm => &[NadhIntensity, FadIntensity],
            Self::Flirr => &[NadhA2, FadA1],
        }
    }

    /// 是否是拟合优度 (χ²) 特征? 这类特征额外统计区域中位数.
    #[inline]
    pub const fn is_chi(&self) -> bool {
        matches!(self, Self::Raw(Channel::NadhChi | Channel::FadChi))
    }

    /// 若该特征是 NADH 或 FAD 的寿命类量 (α1, α2, τ1, τ2, 平均寿命),
    /// 返回用作权重的同一荧光团的强度通道; 否则返回 `None`.
    ///
    /// 染色通道不参与强度加权.
    pub const fn weight_channel(&self) -> Option<Channel> {
        use Channel::*;
        match self {
            Self::Raw(NadhA1 | NadhA2 | NadhT1 | NadhT2) | Self::NadhTauMean => {
                Some(NadhIntensity)
            }
            Self::Raw(FadA1 | FadA2 | FadT1 | FadT2) | Self::FadTauMean => Some(FadIntensity),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Channel, Feature, Fluorophore};
    use itertools::Itertools;

    #[test]
    fn test_names_unique() {
        assert!(Feature::ALL.iter().map(Feature::name).all_unique());
        assert!(Channel::ALL.iter().map(Channel::name).all_unique());
    }

    #[test]
    fn test_every_channel_is_a_feature() {
        for c in Channel::ALL {
            assert!(Feature::ALL.contains(&Feature::from(c)));
            assert_eq!(Feature::from(c).name(), c.name());
        }
    }

    #[test]
    fn test_weight_channel() {
        assert_eq!(
            Feature::NadhTauMean.weight_channel(),
            Some(Channel::NadhIntensity)
        );
        assert_eq!(
            Feature::Raw(Channel::FadT2).weight_channel(),
            Some(Channel::FadIntensity)
        );
        assert_eq!(Feature::Raw(Channel::NadhIntensity).weight_channel(), None);
        assert_eq!(Feature::Raw(Channel::StainA1).weight_channel(), None);
        assert_eq!(Feature::Flirr.weight_channel(), None);
        assert_eq!(Feature::Raw(Channel::NadhChi).weight_channel(), None);
    }

    #[test]
    fn test_fluorophore() {
        assert_eq!(Channel::NadhChi.fluorophore(), Fluorophore::Nadh);
        assert_eq!(Channel::FadA1.fluorophore(), Fluorophore::Fad);
        assert_eq!(Channel::StainT2.fluorophore(), Fluorophore::Stain);
    }
}
