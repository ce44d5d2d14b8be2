//! 转盘布局与抽取
//!
//! - `segments`: 奖品列表 -> 扇区 / conic-gradient / 标签
//! - `selector`: 按累计概率抽取扇区并计算落点角度
//!
//! 两者必须使用同一份扇区列表，保证中奖概率与视觉面积一致。

pub mod segments;
pub mod selector;

pub use segments::*;
pub use selector::*;

/// 指针在正上方，渲染与落点统一旋转 -90°
pub const ANGLE_OFFSET: f64 = -90.0;

/// 转盘配色，按扇区序号循环取色
pub const PALETTE: [&str; 12] = [
    "#F59E0B", "#FDE047", "#86EFAC", "#22C55E", "#A7F3D0", "#FCD34D", "#FDBA74", "#F97316",
    "#FCA5A5", "#FB7185", "#FBBF24", "#4ADE80",
];

/// 未配置奖品时的灰色整圆
pub const NEUTRAL_GRADIENT: &str = "conic-gradient(#E5E7EB 0deg 360deg)";

/// 角度归一化到 [0, 360)
pub(crate) fn normalize_angle(degrees: f64) -> f64 {
    let angle = degrees.rem_euclid(360.0);
    // rem_euclid 对极小负数可能返回 360.0
    if angle >= 360.0 { 0.0 } else { angle }
}
