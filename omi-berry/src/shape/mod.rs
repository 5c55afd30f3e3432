//! 仅依赖标签图像的区域形状属性.
//!
//! 属性名与语义对齐 scikit-image 的 `regionprops`, 同时接受其新旧两套命名
//! (如 `area_bbox` / `bbox_area`). 多值属性按 `{name}-{i}` 展开为多个标量列.

use std::f64::consts::PI;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::data::Region;
use crate::{OmiError, OmiResult};

mod convex;
mod fill;
mod moments;
mod perimeter;

pub use moments::Moments;

/// 支持的形状属性.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ShapeProperty {
    /// 标签值.
    Label,
    /// 像素数.
    Area,
    /// 包围盒面积.
    AreaBbox,
    /// 凸包内像素数.
    AreaConvex,
    /// 填充孔洞后的像素数.
    AreaFilled,
    /// 包围盒 `(min_row, min_col, max_row, max_col)`, 上界不包含.
    Bbox,
    /// 质心 `(row, col)`.
    Centroid,
    /// 同二阶矩椭圆的离心率.
    Eccentricity,
    /// 与区域面积相同的圆的直径.
    EquivalentDiameter,
    /// 区域面积 / 包围盒面积.
    Extent,
    /// 同二阶矩椭圆的长轴长.
    MajorAxisLength,
    /// 同二阶矩椭圆的短轴长.
    MinorAxisLength,
    /// 行轴 (axis 0) 与长轴的夹角, 弧度, 范围 `[-pi/2, pi/2]`.
    Orientation,
    /// 4-邻域加权周长.
    Perimeter,
    /// 区域面积 / 凸包面积.
    Solidity,
}

impl ShapeProperty {
    /// 该属性展开后的标量个数.
    pub const fn arity(&self) -> usize {
        match self {
            Self::Bbox => 4,
            Self::Centroid => 2,
            _ => 1,
        }
    }

    /// 计算 `region` 的该属性. 返回值长度恒为 [`Self::arity`].
    pub fn compute(&self, region: &Region) -> Vec<f64> {
        let area = region.area() as f64;
        let bbox = region.bbox();
        match self {
            Self::Label => vec![region.label() as f64],
            Self::Area => vec![area],
            Self::AreaBbox => vec![bbox.area() as f64],
            Self::AreaConvex => vec![convex::convex_area(region) as f64],
            Self::AreaFilled => vec![fill::filled_area(&region.image()) as f64],
            Self::Bbox => [bbox.min_h, bbox.min_w, bbox.max_h, bbox.max_w]
                .map(|v| v as f64)
                .to_vec(),
            Self::Centroid => {
                let (h, w) = Moments::of(region).centroid();
                vec![h, w]
            }
            Self::Eccentricity => vec![Moments::of(region).eccentricity()],
            Self::EquivalentDiameter => vec![(4.0 * area / PI).sqrt()],
            Self::Extent => vec![area / bbox.area() as f64],
            Self::MajorAxisLength => vec![Moments::of(region).axis_lengths().0],
            Self::MinorAxisLength => vec![Moments::of(region).axis_lengths().1],
            Self::Orientation => vec![Moments::of(region).orientation()],
            Self::Perimeter => vec![perimeter::perimeter(&region.image())],
            Self::Solidity => vec![area / convex::convex_area(region) as f64],
        }
    }
}

impl FromStr for ShapeProperty {
    type Err = OmiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "label" => Self::Label,
            "area" => Self::Area,
            "area_bbox" | "bbox_area" => Self::AreaBbox,
            "area_convex" | "convex_area" => Self::AreaConvex,
            "area_filled" | "filled_area" => Self::AreaFilled,
            "bbox" => Self::Bbox,
            "centroid" => Self::Centroid,
            "eccentricity" => Self::Eccentricity,
            "equivalent_diameter_area" | "equivalent_diameter" => Self::EquivalentDiameter,
            "extent" => Self::Extent,
            "axis_major_length" | "major_axis_length" => Self::MajorAxisLength,
            "axis_minor_length" | "minor_axis_length" => Self::MinorAxisLength,
            "orientation" => Self::Orientation,
            "perimeter" => Self::Perimeter,
            "solidity" => Self::Solidity,
            _ => return Err(OmiError::UnknownProperty(s.to_string())),
        })
    }
}

/// 一个按名称请求的形状属性. 输出列使用请求时的名称, 而非规范名称.
///
/// 序列化形式就是请求名本身, 反序列化时同样经过名称校验.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct PropertyRequest {
    name: String,
    property: ShapeProperty,
}

impl FromStr for PropertyRequest {
    type Err = OmiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self {
            name: s.to_string(),
            property: s.parse()?,
        })
    }
}

impl TryFrom<String> for PropertyRequest {
    type Error = OmiError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        let property = name.parse()?;
        Ok(Self { name, property })
    }
}

impl From<PropertyRequest> for String {
    #[inline]
    fn from(value: PropertyRequest) -> Self {
        value.name
    }
}

impl PropertyRequest {
    /// 输出列名. 单值属性即请求名, 多值属性为 `{name}-{i}`.
    pub fn columns(&self) -> Vec<String> {
        match self.property.arity() {
            1 => vec![self.name.clone()],
            n => (0..n).map(|i| format!("{}-{i}", self.name)).collect(),
        }
    }

    /// 计算 `region` 的属性, 与 [`Self::columns`] 一一对应.
    pub fn measure(&self, region: &Region) -> impl Iterator<Item = (String, f64)> {
        self.columns()
            .into_iter()
            .zip(self.property.compute(region))
    }
}

/// 解析一组属性名. 任何一个无法识别都会导致整体失败.
pub fn parse_requests<I, S>(names: I) -> OmiResult<Vec<PropertyRequest>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names.into_iter().map(|n| n.as_ref().parse()).collect()
}
