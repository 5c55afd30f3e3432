use std::f64::consts::FRAC_PI_4;

use crate::data::Region;

/// 区域的零阶、一阶和二阶中心矩. 所有像素权重相同.
///
/// `mu_hh`, `mu_ww`, `mu_hw` 已除以面积, 即行方差、列方差和协方差.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Moments {
    /// 像素个数.
    pub m00: f64,
    /// 质心行坐标.
    pub centroid_h: f64,
    /// 质心列坐标.
    pub centroid_w: f64,
    /// 行方向方差.
    pub mu_hh: f64,
    /// 列方向方差.
    pub mu_ww: f64,
    /// 行列协方差.
    pub mu_hw: f64,
}

impl Moments {
    /// 计算 `region` 的矩. 空区域的各分量为 `NaN`.
    pub fn of(region: &Region) -> Self {
        let m00 = region.area() as f64;
        let (mut sh, mut sw) = (0.0, 0.0);
        for &(h, w) in region.pixels() {
            sh += h as f64;
            sw += w as f64;
        }
        let (ch, cw) = (sh / m00, sw / m00);

        let (mut hh, mut ww, mut hw) = (0.0, 0.0, 0.0);
        for &(h, w) in region.pixels() {
            let dh = h as f64 - ch;
            let dw = w as f64 - cw;
            hh += dh * dh;
            ww += dw * dw;
            hw += dh * dw;
        }
        Self {
            m00,
            centroid_h: ch,
            centroid_w: cw,
            mu_hh: hh / m00,
            mu_ww: ww / m00,
            mu_hw: hw / m00,
        }
    }

    /// 质心 (行, 列).
    #[inline]
    pub fn centroid(&self) -> (f64, f64) {
        (self.centroid_h, self.centroid_w)
    }

    /// 惯性张量 `[[a, b], [b, c]]` 的三个独立分量 `(a, b, c)`.
    #[inline]
    fn inertia_tensor(&self) -> (f64, f64, f64) {
        (self.mu_ww, -self.mu_hw, self.mu_hh)
    }

    /// 惯性张量的特征值, 降序, 截断到非负.
    pub fn eigenvalues(&self) -> (f64, f64) {
        let (a, b, c) = self.inertia_tensor();
        let mid = (a + c) / 2.0;
        let radius = (((a - c) / 2.0).powi(2) + b * b).sqrt();
        ((mid + radius).max(0.0), (mid - radius).max(0.0))
    }

    /// 同二阶矩椭圆的 (长轴长, 短轴长).
    #[inline]
    pub fn axis_lengths(&self) -> (f64, f64) {
        let (l1, l2) = self.eigenvalues();
        (4.0 * l1.sqrt(), 4.0 * l2.sqrt())
    }

    /// 同二阶矩椭圆的离心率. 单像素区域为 `0`.
    pub fn eccentricity(&self) -> f64 {
        let (l1, l2) = self.eigenvalues();
        if l1 == 0.0 {
            return 0.0;
        }
        (1.0 - l2 / l1).sqrt()
    }

    /// 行轴与长轴的夹角, 弧度.
    pub fn orientation(&self) -> f64 {
        let (a, b, c) = self.inertia_tensor();
        // a == c 时 atan2 退化, 按 b 的符号取 ±pi/4.
        if a - c == 0.0 {
            if b < 0.0 {
                -FRAC_PI_4
            } else {
                FRAC_PI_4
            }
        } else {
            0.5 * (-2.0 * b).atan2(c - a)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Moments;
    use crate::data::Region;

    #[test]
    fn test_single_pixel() {
        let m = Moments::of(&Region::new(1, vec![(4, 6)]));
        assert_eq!(m.centroid(), (4.0, 6.0));
        assert_eq!(m.eigenvalues(), (0.0, 0.0));
        assert_eq!(m.eccentricity(), 0.0);
        assert_eq!(m.axis_lengths(), (0.0, 0.0));
    }

    #[test]
    fn test_diagonal() {
        // 对角线, 长轴与行轴成 -45 度 (行增大时列增大).
        let m = Moments::of(&Region::new(1, vec![(0, 0), (1, 1), (2, 2)]));
        let (l1, l2) = m.eigenvalues();
        assert!(l1 > 0.0);
        assert!(l2.abs() < 1e-12);
        assert!((m.orientation().abs() - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
    }
}
