//! 通用常量.

use crate::Label;

/// 标签图像中背景的标签值.
pub const BACKGROUND: Label = 0;

/// α1/α2 以百分比形式给出, 参与计算前需除以该值.
pub const PERCENT: f64 = 100.0;

/// 两种强度加权平均值之间允许的相对误差.
pub const WEIGHTED_MEAN_RTOL: f64 = 1e-9;

/// 记录中保存区域标签值的字段名.
pub const MASK_LABEL: &str = "mask_label";

/// 特征名后缀. 完整字段名为 `{feature}{suffix}`.
pub mod suffix {
    /// 区域平均值.
    pub const MEAN: &str = "_mean";

    /// 区域 (总体) 标准差.
    pub const STDEV: &str = "_stdev";

    /// 区域中位数. 仅 χ² 通道拥有.
    pub const MEDIAN: &str = "_median";

    /// 强度加权平均值.
    pub const INTENSITY_WEIGHTED_MEAN: &str = "_intensity_weighted_mean";

    /// 强度加权标准差.
    pub const INTENSITY_WEIGHTED_STDEV: &str = "_intensity_weighted_stdev";
}

/// 标签是否为背景?
#[inline]
pub const fn is_background(label: Label) -> bool {
    label == BACKGROUND
}

/// 标签是否为前景 (属于某个区域)?
#[inline]
pub const fn is_foreground(label: Label) -> bool {
    !is_background(label)
}
