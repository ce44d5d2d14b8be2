use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{ANGLE_OFFSET, NEUTRAL_GRADIENT, PALETTE, normalize_angle};

/// 参与布局的奖品 (与存储层解耦的值对象)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PrizeSpec {
    pub name: String,
    /// 相对权重，<= 0 的奖品不上转盘
    pub probability: f64,
    pub order: i32,
}

impl PrizeSpec {
    pub fn new(name: impl Into<String>, probability: f64, order: i32) -> Self {
        Self {
            name: name.into(),
            probability,
            order,
        }
    }

    fn is_usable(&self) -> bool {
        self.probability.is_finite() && self.probability > 0.0
    }
}

/// 转盘扇区 (每次请求重新计算，不落库)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub prize: PrizeSpec,
    pub start_angle: f64,
    pub end_angle: f64,
    pub mid_angle: f64,
    pub color: &'static str,
}

impl Segment {
    pub fn span(&self) -> f64 {
        (self.end_angle - self.start_angle).max(0.0)
    }
}

/// 扇区文字标签的渲染参数
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LabelInfo {
    pub name: String,
    /// 竖排逐字渲染用
    pub chars: Vec<String>,
    /// 已叠加 -90° 偏移的显示角度
    pub angle: f64,
    pub font_size: u32,
    pub radius: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WheelLayout {
    pub gradient: String,
    pub labels: Vec<LabelInfo>,
    #[serde(skip)]
    pub segments: Vec<Segment>,
}

impl WheelLayout {
    /// 未配置状态：灰色整圆，无标签无扇区
    pub fn empty() -> Self {
        Self {
            gradient: NEUTRAL_GRADIENT.to_string(),
            labels: Vec::new(),
            segments: Vec::new(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.segments.is_empty()
    }
}

/// 将有序奖品列表转换为转盘布局
///
/// 扇区按输入顺序连续排列，跨度与概率占比成正比，最后一个扇区的终止角固定为 360°。
pub fn build_segments(prizes: &[PrizeSpec]) -> WheelLayout {
    let usable: Vec<&PrizeSpec> = prizes.iter().filter(|p| p.is_usable()).collect();
    let total: f64 = usable.iter().map(|p| p.probability).sum();
    // 总和溢出为 inf 时无法按比例分配角度，按未配置处理
    if usable.is_empty() || !total.is_finite() || total <= 0.0 {
        return WheelLayout::empty();
    }

    let last = usable.len() - 1;
    let mut segments = Vec::with_capacity(usable.len());
    let mut start = 0.0;
    for (idx, prize) in usable.into_iter().enumerate() {
        let end = if idx == last {
            360.0
        } else {
            start + prize.probability / total * 360.0
        };
        segments.push(Segment {
            prize: prize.clone(),
            start_angle: start,
            end_angle: end,
            mid_angle: (start + end) / 2.0,
            color: PALETTE[idx % PALETTE.len()],
        });
        start = end;
    }

    let gradient = gradient_for(&segments);
    let labels = segments.iter().map(label_for).collect();

    WheelLayout {
        gradient,
        labels,
        segments,
    }
}

fn gradient_for(segments: &[Segment]) -> String {
    let parts: Vec<String> = segments
        .iter()
        .map(|s| format!("{} {:.2}deg {:.2}deg", s.color, s.start_angle, s.end_angle))
        .collect();
    format!("conic-gradient(from {ANGLE_OFFSET}deg, {})", parts.join(", "))
}

/// 扇区越宽字号越大、越靠外；名称超过 4 个字符时每多一个字符字号 -1、半径 -4
fn label_for(segment: &Segment) -> LabelInfo {
    let span = segment.span();
    let (base_size, base_radius) = if span >= 40.0 {
        (14u32, 104u32)
    } else if span >= 25.0 {
        (12, 96)
    } else {
        (10, 88)
    };

    let name = &segment.prize.name;
    let length = name.chars().count().max(1) as u32;
    let excess = length.saturating_sub(4);
    let font_size = base_size.saturating_sub(excess).max(9);
    let radius = base_radius.saturating_sub(excess * 4).max(78);

    LabelInfo {
        name: name.clone(),
        chars: name.chars().map(String::from).collect(),
        angle: normalize_angle(segment.mid_angle + ANGLE_OFFSET),
        font_size,
        radius,
    }
}
