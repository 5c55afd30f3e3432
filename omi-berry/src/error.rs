//! 运行时错误.

use std::fmt::{Display, Formatter};

use crate::data::Channel;
use crate::Idx2d;

/// 导致整幅图像的特征提取失败的错误.
///
/// 单个区域或单个通道上的数值退化 (除零, 权重和为零等) 不属于此类,
/// 它们会被替换为哨兵值并记录日志.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OmiError {
    /// 通道图像与标签图像形状不一致.
    ShapeMismatch {
        /// 出错的通道.
        channel: Channel,
        /// 标签图像的形状 (高, 宽).
        expected: Idx2d,
        /// 通道图像的形状 (高, 宽).
        found: Idx2d,
    },

    /// 无法识别的形状属性名.
    UnknownProperty(String),
}

impl Display for OmiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ShapeMismatch {
                channel,
                expected,
                found,
            } => write!(
                f,
                "channel `{}` has shape {found:?}, but the label image has shape {expected:?}",
                channel.name()
            ),
            Self::UnknownProperty(name) => write!(f, "unknown region property `{name}`"),
        }
    }
}

impl std::error::Error for OmiError {}

/// 特征提取运行时结果.
pub type OmiResult<T> = Result<T, OmiError>;
