#![warn(missing_docs)] // <= 合适时移除它.
// #![warn(clippy::missing_docs_in_private_items)]  // <= too strict.

//! 核心库. 从细胞分割标签图像和逐像素的光学代谢成像 (OMI) 通道中提取逐细胞的区域特征.
//!
//! 输入是一幅标签图像 (`0` 为背景, 每个正整数一个细胞) 和一组与之同形状的通道图像
//! (NADH/FAD/染色的强度, 双指数拟合的 α1, α2, τ1, τ2, 以及拟合 χ²).
//! 输出是以 `"{image_id}_{label}"` 为键的逐区域特征记录.
//!
//! 该 crate 不负责读取任何文件格式, 也不负责分割. 它只做纯计算.
//!
//! # 注意
//!
//! 1. 缺失的通道不是错误. 依赖它的特征会被静默跳过.
//! 2. 除零等数值退化不会中断计算, 会被替换为 `0` 并通过 `log` 输出警告.
//! 3. 只有形状不一致和无法识别的属性名会导致整体失败, 见 [`OmiError`].
//!
//! # 开发计划
//!
//! ### 合成通道 ✅
//!
//! 平均寿命, 氧化还原比, 归一化氧化还原比, FLIRR.
//!
//! 实现位于 `omi-berry/src/composite.rs`.
//!
//! ### 掩膜区域统计 & 强度加权统计 ✅
//!
//! 平均值, 总体标准差, χ² 中位数; 寿命类特征以同荧光团强度为权重的加权平均值和加权标准差.
//!
//! 实现位于 `omi-berry/src/stats`.
//!
//! ### 形状属性 ✅
//!
//! 面积, 包围盒, 质心, 惯性矩相关的轴长/离心率/方向, 周长, 凸包面积, 填充面积等.
//!
//! 实现位于 `omi-berry/src/shape`.
//!
//! ### 记录组装与表格视图 ✅
//!
//! 实现位于 `omi-berry/src/record.rs`.
//!
//! ### 逐特征并行 ✅
//!
//! 启用 `rayon` feature 时提供 [`par_regionprops_omi`].
//!
//! ### 完善代码文档 ✅
//!
//! 给每个 public API 提供文档, 并视情况给 private
//! API 提供文档.

/// 二维索引 (高, 宽).
pub type Idx2d = (usize, usize);

/// 标签图像的像素类型.
pub type Label = u32;

pub mod consts;

/// 标签图像, 通道图像与区域.
pub mod data;

mod error;

pub use error::{OmiError, OmiResult};

pub mod composite;
pub mod options;
pub mod record;
pub mod shape;
pub mod stats;

mod pipeline;

pub use pipeline::regionprops_omi;

#[cfg(feature = "rayon")]
pub use pipeline::par_regionprops_omi;

pub mod prelude;

#[cfg(test)]
mod test_log;
