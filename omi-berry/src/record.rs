//! 逐区域特征记录.
//!
//! 一次特征提取的输出是 `"{image_id}_{label}"` 到扁平字段表的映射.
//! 字段名为 `{feature}{suffix}`, 例如 `nadh_intensity_mean`,
//! `nadh_t1_intensity_weighted_stdev`, `fad_chi_median`.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::consts::{suffix, MASK_LABEL};
use crate::data::Region;
use crate::shape::PropertyRequest;
use crate::stats::StatTable;
use crate::Label;

/// 记录的键: 图像标识 + 区域标签. 显示为 `"{image_id}_{label}"`.
///
/// 按 (图像标识, 标签) 排序, 因此同一图像的区域按标签数值升序排列.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct RegionKey {
    image_id: String,
    label: Label,
}

impl RegionKey {
    /// 直接初始化.
    #[inline]
    pub fn new(image_id: impl Into<String>, label: Label) -> Self {
        Self {
            image_id: image_id.into(),
            label,
        }
    }

    /// 图像标识.
    #[inline]
    pub fn image_id(&self) -> &str {
        &self.image_id
    }

    /// 区域标签.
    #[inline]
    pub fn label(&self) -> Label {
        self.label
    }

    /// 从 `"{image_id}_{label}"` 解析. 以最后一个 `_` 分隔, 因此图像标识本身可以含 `_`.
    pub fn parse(s: &str) -> Option<Self> {
        let (id, label) = s.rsplit_once('_')?;
        Some(Self::new(id, label.parse().ok()?))
    }
}

impl Display for RegionKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.image_id, self.label)
    }
}

#[cfg(feature = "serde")]
impl Serialize for RegionKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for RegionKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).ok_or_else(|| serde::de::Error::custom(format!("bad region key `{s}`")))
    }
}

/// 单个区域的全部特征.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegionRecord {
    /// 区域标签值.
    pub mask_label: Label,

    /// 字段名到取值的映射.
    pub features: BTreeMap<String, f64>,
}

impl RegionRecord {
    /// 只含标签的空记录.
    #[inline]
    pub fn new(mask_label: Label) -> Self {
        Self {
            mask_label,
            features: BTreeMap::new(),
        }
    }

    /// 查询字段. `"mask_label"` 也可以查询.
    pub fn get(&self, field: &str) -> Option<f64> {
        if field == MASK_LABEL {
            return Some(self.mask_label as f64);
        }
        self.features.get(field).copied()
    }

    /// 写入字段.
    #[inline]
    pub fn insert(&mut self, field: impl Into<String>, value: f64) {
        self.features.insert(field.into(), value);
    }

    /// 写入一张统计表中属于本区域的全部字段.
    fn fill(&mut self, table: &StatTable) {
        let Some(s) = table.get(self.mask_label) else {
            return;
        };
        let name = table.feature().name();
        self.insert(format!("{name}{}", suffix::MEAN), s.mean);
        self.insert(format!("{name}{}", suffix::STDEV), s.stdev);
        if let Some(median) = s.median {
            self.insert(format!("{name}{}", suffix::MEDIAN), median);
        }
        if let Some(w) = s.weighted {
            self.insert(format!("{name}{}", suffix::INTENSITY_WEIGHTED_MEAN), w.mean);
            self.insert(format!("{name}{}", suffix::INTENSITY_WEIGHTED_STDEV), w.stdev);
        }
    }
}

/// 一次 (或多次) 特征提取的输出.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OmiRecord {
    regions: BTreeMap<RegionKey, RegionRecord>,
}

impl OmiRecord {
    /// 空记录.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// 一次遍历组装整幅图像的记录.
    ///
    /// 先为每个区域分配只含 `mask_label` 的记录, 再依次写入每张统计表,
    /// 最后写入形状属性.
    pub fn assemble(
        image_id: &str,
        regions: &[Region],
        tables: &[StatTable],
        other_props: &[PropertyRequest],
    ) -> Self {
        let regions = regions
            .iter()
            .map(|region| {
                let mut record = RegionRecord::new(region.label());
                for table in tables.iter() {
                    record.fill(table);
                }
                for prop in other_props.iter() {
                    for (column, value) in prop.measure(region) {
                        record.insert(column, value);
                    }
                }
                (RegionKey::new(image_id, region.label()), record)
            })
            .collect();
        Self { regions }
    }

    /// 查询 `image_id` 中区域 `label` 的记录.
    pub fn get(&self, image_id: &str, label: Label) -> Option<&RegionRecord> {
        self.regions.get(&RegionKey::new(image_id, label))
    }

    /// 按 `"{image_id}_{label}"` 查询.
    pub fn get_by_name(&self, name: &str) -> Option<&RegionRecord> {
        self.regions.get(&RegionKey::parse(name)?)
    }

    /// 区域个数.
    #[inline]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// 是否一个区域也没有?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// 按键升序迭代.
    pub fn iter(&self) -> impl Iterator<Item = (&RegionKey, &RegionRecord)> {
        self.regions.iter()
    }

    /// 所有键.
    pub fn keys(&self) -> impl Iterator<Item = &RegionKey> {
        self.regions.keys()
    }

    /// 合并另一份记录 (通常来自另一幅图像). 键相同时后者覆盖前者.
    pub fn extend(&mut self, other: OmiRecord) {
        self.regions.extend(other.regions);
    }

    /// 表格列名: `mask_label` 在前, 其余为所有区域字段名的并集, 按字典序.
    pub fn columns(&self) -> Vec<String> {
        let fields: BTreeSet<&String> = self
            .regions
            .values()
            .flat_map(|r| r.features.keys())
            .collect();
        std::iter::once(MASK_LABEL.to_string())
            .chain(fields.into_iter().cloned())
            .collect()
    }

    /// 表格行, 与 [`Self::columns`] 对齐. 区域缺少的字段填 `NaN`.
    pub fn rows(&self) -> Vec<(String, Vec<f64>)> {
        let columns = self.columns();
        self.regions
            .iter()
            .map(|(key, record)| {
                let row = columns
                    .iter()
                    .map(|c| record.get(c).unwrap_or(f64::NAN))
                    .collect();
                (key.to_string(), row)
            })
            .collect()
    }
}

impl FromIterator<(RegionKey, RegionRecord)> for OmiRecord {
    fn from_iter<T: IntoIterator<Item = (RegionKey, RegionRecord)>>(iter: T) -> Self {
        Self {
            regions: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{OmiRecord, RegionKey, RegionRecord};
    use crate::data::{Channel, Feature, LabelImage};
    use crate::options::PlanEntry;
    use crate::shape::parse_requests;
    use crate::stats::StatTable;
    use ndarray::array;

    #[test]
    fn test_region_key() {
        let k = RegionKey::new("img_01", 12);
        assert_eq!(k.to_string(), "img_01_12");
        assert_eq!(RegionKey::parse("img_01_12"), Some(k));
        assert_eq!(RegionKey::parse("img01"), None);
        assert_eq!(RegionKey::parse("img01_x"), None);
    }

    #[test]
    fn test_key_order_is_numeric() {
        let rec: OmiRecord = [2, 10, 1]
            .into_iter()
            .map(|l| (RegionKey::new("a", l), RegionRecord::new(l)))
            .collect();
        let labels: Vec<_> = rec.keys().map(|k| k.label()).collect();
        assert_eq!(labels, vec![1, 2, 10]);
    }

    #[test]
    fn test_assemble() {
        let labels = LabelImage::new(array![[1, 1, 0], [0, 3, 3]]);
        let image = array![[1.0, 3.0, 0.0], [0.0, 4.0, 4.0]];
        let regions = labels.regions();
        let entry = PlanEntry {
            feature: Feature::Raw(Channel::NadhT1),
            median: false,
            weight: Some(Channel::NadhIntensity),
        };
        let table = StatTable::measure(&regions, &entry, image.view(), Some(image.view()));
        let props = parse_requests(["area", "centroid"]).unwrap();
        let rec = OmiRecord::assemble("img", &regions, &[table], &props);

        assert_eq!(rec.len(), 2);
        let r1 = rec.get_by_name("img_1").unwrap();
        assert_eq!(r1.mask_label, 1);
        assert_eq!(r1.get("nadh_t1_mean"), Some(2.0));
        assert_eq!(r1.get("nadh_t1_stdev"), Some(1.0));
        // (1 * 1 + 3 * 3) / 4
        assert_eq!(r1.get("nadh_t1_intensity_weighted_mean"), Some(2.5));
        assert_eq!(r1.get("area"), Some(2.0));
        assert_eq!(r1.get("centroid-1"), Some(0.5));
        assert_eq!(r1.get("nadh_t1_median"), None);

        let r3 = rec.get("img", 3).unwrap();
        assert_eq!(r3.get("mask_label"), Some(3.0));
        assert_eq!(r3.get("nadh_t1_intensity_weighted_stdev"), Some(0.0));
    }

    #[test]
    fn test_table_view() {
        let mut a = RegionRecord::new(1);
        a.insert("x_mean", 1.0);
        let mut b = RegionRecord::new(2);
        b.insert("y_mean", 2.0);
        let mut rec: OmiRecord = [(RegionKey::new("p", 1), a)].into_iter().collect();
        rec.extend([(RegionKey::new("q", 2), b)].into_iter().collect());

        assert_eq!(rec.columns(), vec!["mask_label", "x_mean", "y_mean"]);
        let rows = rec.rows();
        assert_eq!(rows[0].0, "p_1");
        assert_eq!(rows[0].1[..2], [1.0, 1.0]);
        assert!(rows[0].1[2].is_nan());
        assert_eq!(rows[1].0, "q_2");
        assert!(rows[1].1[1].is_nan());
    }
}
