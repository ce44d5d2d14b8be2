use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{prize_entity, roulette_config_entity};
use crate::wheel::{LabelInfo, WheelLayout};

use super::DrawHistoryItem;

/// 转盘配置摘要
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RouletteConfigSummary {
    pub id: i64,
    pub name: String,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<roulette_config_entity::Model> for RouletteConfigSummary {
    fn from(m: roulette_config_entity::Model) -> Self {
        RouletteConfigSummary {
            id: m.id,
            name: m.name,
            updated_at: m.updated_at,
        }
    }
}

/// 前台转盘展示数据
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WheelResponse {
    pub id: i64,
    pub name: String,
    /// CSS conic-gradient 背景
    #[schema(example = "conic-gradient(from -90deg, #F59E0B 0.00deg 180.00deg, #FDE047 180.00deg 360.00deg)")]
    pub gradient: String,
    pub labels: Vec<LabelInfo>,
    /// 最近抽奖记录 (倒序)
    pub history: Vec<DrawHistoryItem>,
}

impl WheelResponse {
    pub fn new(
        config: roulette_config_entity::Model,
        layout: WheelLayout,
        history: Vec<DrawHistoryItem>,
    ) -> Self {
        WheelResponse {
            id: config.id,
            name: config.name,
            gradient: layout.gradient,
            labels: layout.labels,
            history,
        }
    }
}

/// 后台奖品行
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PrizeInput {
    #[schema(example = "頭獎")]
    pub name: String,
    /// 相对权重；缺省或非有限数值的行会被忽略
    #[schema(example = 10.0)]
    pub probability: Option<f64>,
}

/// 保存转盘配置请求 (奖品整体替换)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SaveRouletteConfigRequest {
    /// 为空或不存在时新建配置
    #[serde(alias = "configId")]
    pub config_id: Option<i64>,
    /// 为空时保留原名称，新建时使用默认名称
    pub name: Option<String>,
    #[serde(default)]
    pub prizes: Vec<PrizeInput>,
}

/// 后台奖品信息
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PrizeResponse {
    pub id: i64,
    pub name: String,
    pub probability: f64,
    pub order: i32,
}

impl From<prize_entity::Model> for PrizeResponse {
    fn from(m: prize_entity::Model) -> Self {
        PrizeResponse {
            id: m.id,
            name: m.name,
            probability: m.probability,
            order: m.sort_order,
        }
    }
}

/// 后台配置详情
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RouletteConfigDetail {
    pub id: i64,
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub prizes: Vec<PrizeResponse>,
    /// 预览用转盘背景
    pub gradient: String,
}
