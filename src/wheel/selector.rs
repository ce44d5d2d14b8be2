use rand::Rng;

use super::{ANGLE_OFFSET, Segment, normalize_angle};

/// 落点距扇区边界的最大内缩角度
const MAX_LANDING_PAD: f64 = 2.0;
/// 内缩不超过扇区跨度的 20%
const LANDING_PAD_RATIO: f64 = 0.2;

/// 一次抽取的结果
#[derive(Debug, Clone, PartialEq)]
pub struct SpinOutcome<'a> {
    pub index: usize,
    pub segment: &'a Segment,
    /// 转盘坐标系下的落点 (未旋转)
    pub landing_angle: f64,
    /// 前端动画的目标角度: 旋转 -90° 后取模并保留两位小数
    pub target_angle: f64,
}

/// 按累计概率选择扇区
///
/// `r` 取值于 `[0, total)`；累加顺序与扇区构建顺序一致，
/// 浮点误差导致未命中时回退到最后一个扇区。
pub fn pick_segment(segments: &[Segment], r: f64) -> Option<usize> {
    if segments.is_empty() {
        return None;
    }
    let mut acc = 0.0;
    for (idx, seg) in segments.iter().enumerate() {
        acc += seg.prize.probability;
        if r <= acc {
            return Some(idx);
        }
    }
    Some(segments.len() - 1)
}

/// 内缩角度：min(2°, 20% 跨度)，两侧内缩会吃掉整个扇区时不内缩
pub fn landing_pad(span: f64) -> f64 {
    let pad = MAX_LANDING_PAD.min(span * LANDING_PAD_RATIO);
    if pad * 2.0 >= span { 0.0 } else { pad }
}

/// 在扇区内(内缩后)均匀取一个落点
pub fn landing_angle<R: Rng + ?Sized>(segment: &Segment, rng: &mut R) -> f64 {
    let span = segment.span();
    if span <= 0.0 {
        return segment.mid_angle;
    }
    let pad = landing_pad(span);
    rng.gen_range((segment.start_angle + pad)..=(segment.end_angle - pad))
}

/// 转盘坐标 -> 前端目标角度
pub fn target_angle(landing: f64) -> f64 {
    let rounded = (normalize_angle(landing + ANGLE_OFFSET) * 100.0).round() / 100.0;
    normalize_angle(rounded)
}

/// 抽取一个扇区并计算落点
///
/// 扇区列表为空或概率总和不是有限正数时返回 `None`，调用方应按“未配置奖品”处理。
pub fn draw<'a, R: Rng + ?Sized>(segments: &'a [Segment], rng: &mut R) -> Option<SpinOutcome<'a>> {
    let total: f64 = segments.iter().map(|s| s.prize.probability).sum();
    if segments.is_empty() || !total.is_finite() || total <= 0.0 {
        return None;
    }

    let r = rng.gen_range(0.0..total);
    let index = pick_segment(segments, r)?;
    let segment = &segments[index];
    let landing = landing_angle(segment, rng);

    Some(SpinOutcome {
        index,
        segment,
        landing_angle: landing,
        target_angle: target_angle(landing),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::{PrizeSpec, build_segments};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn segments(items: &[(&str, f64)]) -> Vec<Segment> {
        let prizes: Vec<PrizeSpec> = items
            .iter()
            .enumerate()
            .map(|(i, (name, p))| PrizeSpec::new(*name, *p, i as i32))
            .collect();
        build_segments(&prizes).segments
    }

    #[test]
    fn test_pick_segment_uses_cumulative_probability() {
        let segs = segments(&[("A", 50.0), ("B", 30.0), ("C", 20.0)]);
        assert_eq!(pick_segment(&segs, 0.0), Some(0));
        assert_eq!(pick_segment(&segs, 40.0), Some(0));
        assert_eq!(pick_segment(&segs, 50.0), Some(0));
        assert_eq!(pick_segment(&segs, 50.5), Some(1));
        assert_eq!(pick_segment(&segs, 79.9), Some(1));
        assert_eq!(pick_segment(&segs, 99.99), Some(2));
        // 超出总和时回退到最后一个
        assert_eq!(pick_segment(&segs, 100.0 + 1e-9), Some(2));
        assert_eq!(pick_segment(&[], 1.0), None);
    }

    #[test]
    fn test_draw_on_empty_wheel() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(draw(&[], &mut rng).is_none());
    }

    #[test]
    fn test_single_prize_always_selected() {
        let segs = segments(&[("Only", 10.0)]);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1_000 {
            let outcome = draw(&segs, &mut rng).expect("configured wheel");
            assert_eq!(outcome.segment.prize.name, "Only");
            assert!(outcome.landing_angle >= 2.0 && outcome.landing_angle <= 358.0);
        }
    }

    #[test]
    fn test_landing_pad_rules() {
        assert_eq!(landing_pad(180.0), 2.0);
        assert!((landing_pad(5.0) - 1.0).abs() < 1e-12);
        assert_eq!(landing_pad(0.0), 0.0);
    }

    #[test]
    fn test_landing_inside_padded_segment() {
        let segs = segments(&[("A", 50.0), ("B", 30.0), ("C", 20.0), ("Tiny", 0.5)]);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..10_000 {
            let outcome = draw(&segs, &mut rng).expect("configured wheel");
            let seg = outcome.segment;
            let pad = landing_pad(seg.span());
            assert!(outcome.landing_angle >= seg.start_angle + pad);
            assert!(outcome.landing_angle <= seg.end_angle - pad);

            // 还原 -90° 偏移后仍落在扇区内 (容忍两位小数的舍入)
            let undone = normalize_angle(outcome.target_angle - ANGLE_OFFSET);
            let inside = undone >= seg.start_angle - 0.01 && undone <= seg.end_angle + 0.01;
            let wrapped = seg.end_angle == 360.0 && undone <= 0.01;
            assert!(inside || wrapped, "{undone} outside {:?}", seg);
            assert!((0.0..360.0).contains(&outcome.target_angle));
        }
    }

    #[test]
    fn test_draw_refuses_overflowing_total() {
        // 手工构造: 单个权重有限但总和为 inf
        let seg = |name: &str, start: f64, end: f64| Segment {
            prize: PrizeSpec::new(name, 1e308, 0),
            start_angle: start,
            end_angle: end,
            mid_angle: (start + end) / 2.0,
            color: "#F59E0B",
        };
        let segs = vec![seg("A", 0.0, 180.0), seg("B", 180.0, 360.0)];
        let mut rng = StdRng::seed_from_u64(11);
        assert!(draw(&segs, &mut rng).is_none());

        let segs = segments(&[("A", 1e308), ("B", 1e308)]);
        assert!(draw(&segs, &mut rng).is_none());
    }

    #[test]
    fn test_zero_span_lands_on_midpoint() {
        let seg = Segment {
            prize: PrizeSpec::new("Edge", 1.0, 0),
            start_angle: 90.0,
            end_angle: 90.0,
            mid_angle: 90.0,
            color: "#F59E0B",
        };
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(landing_angle(&seg, &mut rng), 90.0);
    }

    #[test]
    fn test_target_angle_rotation() {
        assert_eq!(target_angle(90.0), 0.0);
        assert_eq!(target_angle(45.0), 315.0);
        assert_eq!(target_angle(180.123), 90.12);
        // 舍入到 360.00 时回到 0
        assert_eq!(target_angle(89.999), 0.0);
    }

    #[test]
    fn test_selection_frequency_matches_probability() {
        let weights = [("A", 50.0), ("B", 30.0), ("C", 15.0), ("D", 5.0)];
        let segs = segments(&weights);
        let mut rng = StdRng::seed_from_u64(20251019);
        let n = 100_000;
        let mut counts = [0usize; 4];
        for _ in 0..n {
            let outcome = draw(&segs, &mut rng).expect("configured wheel");
            counts[outcome.index] += 1;
        }

        let chi_square: f64 = weights
            .iter()
            .zip(counts.iter())
            .map(|((_, w), &observed)| {
                let expected = n as f64 * w / 100.0;
                (observed as f64 - expected).powi(2) / expected
            })
            .sum();
        // 自由度 3，p = 0.001 临界值
        assert!(chi_square < 16.27, "chi-square {chi_square}, counts {counts:?}");
    }
}
