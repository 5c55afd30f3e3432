use crate::consts::WEIGHTED_MEAN_RTOL;

/// 强度加权统计量.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WeightedStatistic {
    /// `sum(C * I) / sum(I)`.
    pub mean: f64,

    /// 以归一化权重 `I / sum(I)` 求得的加权平均值. 解析上与 [`Self::mean`] 相等,
    /// 保留下来用于一致性检查.
    pub average: f64,

    /// `sqrt(average((C - average)^2, weights = I))`.
    pub stdev: f64,
}

impl WeightedStatistic {
    /// 权重和为零时使用的哨兵值.
    pub const ZERO: Self = Self {
        mean: 0.0,
        average: 0.0,
        stdev: 0.0,
    };

    /// 两种加权平均值是否在相对误差 `rtol` 内一致?
    pub fn is_consistent(&self, rtol: f64) -> bool {
        let scale = self.mean.abs().max(self.average.abs()).max(1.0);
        (self.mean - self.average).abs() <= rtol * scale
    }
}

/// 计算寿命类取值 `lifetime` 以 `intensity` 为权重的加权平均值和加权标准差.
///
/// 两个切片必须等长且按同样的像素顺序排列. 若权重之和为零 (包括空区域),
/// 返回 [`WeightedStatistic::ZERO`].
pub fn intensity_weighted(lifetime: &[f64], intensity: &[f64]) -> WeightedStatistic {
    debug_assert_eq!(lifetime.len(), intensity.len());
    let total: f64 = intensity.iter().sum();
    if total == 0.0 {
        log::warn!(
            "intensity weights sum to zero over {} pixels, weighted statistics set to 0",
            intensity.len()
        );
        return WeightedStatistic::ZERO;
    }

    let mean = lifetime
        .iter()
        .zip(intensity)
        .map(|(c, i)| c * i)
        .sum::<f64>()
        / total;
    let average: f64 = lifetime
        .iter()
        .zip(intensity)
        .map(|(c, i)| c * (i / total))
        .sum();
    let variance = lifetime
        .iter()
        .zip(intensity)
        .map(|(c, i)| i * (c - average).powi(2))
        .sum::<f64>()
        / total;

    let ans = WeightedStatistic {
        mean,
        average,
        // 负权重可能使方差略小于零.
        stdev: variance.max(0.0).sqrt(),
    };
    if !ans.is_consistent(WEIGHTED_MEAN_RTOL) {
        log::warn!(
            "weighted means disagree: sum(C*I)/sum(I) = {}, weighted average = {}",
            ans.mean,
            ans.average
        );
    }
    ans
}

#[cfg(test)]
mod tests {
    use super::{intensity_weighted, WeightedStatistic};
    use crate::consts::WEIGHTED_MEAN_RTOL;
    use crate::stats::{masked_mean, masked_stdev};

    fn float_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_uniform_weights_match_plain_stats() {
        let c = [400.0, 520.5, 610.25, 380.0, 455.0];
        for w in [1.0, 7.5, 1234.0] {
            let s = intensity_weighted(&c, &[w; 5]);
            let mean = masked_mean(&c);
            assert!(float_eq(s.mean, mean));
            assert!(float_eq(s.average, mean));
            assert!(float_eq(s.stdev, masked_stdev(&c, mean)));
        }
    }

    #[test]
    fn test_two_means_agree() {
        let c = [0.3, 1.7, 2.2, 5.9, 0.01, 3.3, 8.8];
        let i = [10.0, 0.5, 300.0, 42.0, 0.0, 7.0, 19.5];
        let s = intensity_weighted(&c, &i);
        assert!(s.is_consistent(WEIGHTED_MEAN_RTOL));
        assert!(float_eq(s.mean, s.average));
    }

    #[test]
    fn test_known_values() {
        // 权重 [1, 3]: 均值 (1 + 9) / 4 = 2.5, 方差 (1 * 2.25 + 3 * 0.25) / 4 = 0.75.
        let s = intensity_weighted(&[1.0, 3.0], &[1.0, 3.0]);
        assert!(float_eq(s.mean, 2.5));
        assert!(float_eq(s.stdev, 0.75f64.sqrt()));
    }

    #[test]
    fn test_zero_weights() {
        assert_eq!(
            intensity_weighted(&[1.0, 2.0], &[0.0, 0.0]),
            WeightedStatistic::ZERO
        );
        assert_eq!(intensity_weighted(&[], &[]), WeightedStatistic::ZERO);
    }

    #[test]
    fn test_zero_weights_are_reported() {
        crate::test_log::init();
        let s = intensity_weighted(&[5.0, 6.0, 7.0], &[0.0, 0.0, 0.0]);
        assert_eq!(s, WeightedStatistic::ZERO);
        assert!(crate::test_log::warned(
            "intensity weights sum to zero over 3 pixels"
        ));
    }
}
