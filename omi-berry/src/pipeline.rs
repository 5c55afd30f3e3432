//! 特征提取流水线.
//!
//! 校验形状 -> 生成通道计划 -> 合成通道 -> 收集区域 -> 逐特征统计 -> 组装记录.
//! 各阶段之间只通过不可变数据传递, 因此逐特征统计可以安全地并行.

use itertools::Itertools;
use ndarray::ArrayView2;

use crate::composite::Composites;
use crate::data::{ChannelSet, Feature, LabelImage, Region};
use crate::options::{ChannelPlan, OmiOptions, PlanEntry};
use crate::record::OmiRecord;
use crate::stats::StatTable;
use crate::OmiResult;

/// 统计阶段所需的全部只读输入.
struct Prepared<'a> {
    channels: &'a ChannelSet,
    plan: ChannelPlan,
    composites: Composites,
    regions: Vec<Region>,
}

impl<'a> Prepared<'a> {
    fn new(
        image_id: &str,
        labels: &LabelImage,
        channels: &'a ChannelSet,
        options: &OmiOptions,
    ) -> OmiResult<Self> {
        channels.check_shape(labels.shape())?;

        let plan = options.plan(channels);
        log::debug!(
            "{image_id}: {} feature(s) planned: {}",
            plan.len(),
            plan.entries().iter().map(|e| e.feature.name()).join(", ")
        );

        if labels.is_background() {
            log::warn!("{image_id}: label image has no foreground region");
        }
        if channels.is_empty() {
            log::warn!("{image_id}: no channel image supplied");
        }
        let regions = labels.regions();
        let composites = Composites::derive(labels, channels, &plan);
        log::debug!(
            "{image_id}: {} region(s), {} channel(s), {} composite(s) derived",
            regions.len(),
            channels.len(),
            composites.len()
        );
        Ok(Self {
            channels,
            plan,
            composites,
            regions,
        })
    }

    fn image(&self, feature: Feature) -> Option<ArrayView2<'_, f64>> {
        match feature {
            Feature::Raw(c) => self.channels.get(c),
            _ => self.composites.get(feature),
        }
    }

    fn measure(&self, entry: &PlanEntry) -> Option<StatTable> {
        let image = self.image(entry.feature)?;
        let weights = entry.weight.and_then(|w| self.channels.get(w));
        Some(StatTable::measure(&self.regions, entry, image, weights))
    }
}

/// 提取一幅图像中所有区域的 OMI 特征.
///
/// `image_id` 与区域标签一起构成输出记录的键 `"{image_id}_{label}"`.
/// 缺失的通道不是错误, 只会让依赖它的特征被跳过.
///
/// # 错误
///
/// 任一通道形状与 `labels` 不一致时返回 [`OmiError::ShapeMismatch`](crate::OmiError::ShapeMismatch).
pub fn regionprops_omi(
    image_id: &str,
    labels: &LabelImage,
    channels: &ChannelSet,
    options: &OmiOptions,
) -> OmiResult<OmiRecord> {
    let p = Prepared::new(image_id, labels, channels, options)?;
    let tables: Vec<StatTable> = p
        .plan
        .entries()
        .iter()
        .filter_map(|e| p.measure(e))
        .collect();
    Ok(OmiRecord::assemble(
        image_id,
        &p.regions,
        &tables,
        &options.other_props,
    ))
}

cfg_if::cfg_if! {
    if #[cfg(feature = "rayon")] {
        use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

        /// 借助 `rayon`, 并行地统计每个特征. 结果与 [`regionprops_omi`] 完全一致.
        pub fn par_regionprops_omi(
            image_id: &str,
            labels: &LabelImage,
            channels: &ChannelSet,
            options: &OmiOptions,
        ) -> OmiResult<OmiRecord> {
            let p = Prepared::new(image_id, labels, channels, options)?;
            let tables: Vec<StatTable> = p
                .plan
                .entries()
                .par_iter()
                .filter_map(|e| p.measure(e))
                .collect();
            Ok(OmiRecord::assemble(
                image_id,
                &p.regions,
                &tables,
                &options.other_props,
            ))
        }
    }
}
