use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::draw_history_entity;

use super::PaginatedResponse;

/// 抽奖记录 (与存储层解耦的值对象)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawRecord {
    pub config_id: i64,
    pub nickname: String,
    pub prize_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<draw_history_entity::Model> for DrawRecord {
    fn from(m: draw_history_entity::Model) -> Self {
        DrawRecord {
            config_id: m.config_id,
            nickname: m.nickname,
            prize_name: m.prize_name,
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}

/// 抽奖请求
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DrawRequest {
    #[serde(alias = "configId")]
    #[schema(example = 1)]
    pub config_id: Option<i64>,
    #[schema(example = "小明")]
    pub nickname: Option<String>,
}

/// 前台展示的抽奖记录
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DrawHistoryItem {
    /// 本地时间 HH:MM
    #[schema(example = "14:05")]
    pub time: String,
    pub prize: String,
    pub nickname: String,
}

impl From<&DrawRecord> for DrawHistoryItem {
    fn from(r: &DrawRecord) -> Self {
        DrawHistoryItem {
            time: r.created_at.with_timezone(&Local).format("%H:%M").to_string(),
            prize: r.prize_name.clone(),
            nickname: r.nickname.clone(),
        }
    }
}

impl From<DrawRecord> for DrawHistoryItem {
    fn from(r: DrawRecord) -> Self {
        DrawHistoryItem::from(&r)
    }
}

/// 抽奖成功响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DrawResponse {
    pub success: bool,
    /// 中奖奖品名称
    pub prize: String,
    /// 前端转盘动画停止角度
    #[schema(example = 123.45)]
    pub target_angle: f64,
    pub history: Vec<DrawHistoryItem>,
}

/// 后台抽奖记录查询参数
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct DrawRecordQuery {
    /// 页码 (默认 1)
    pub page: Option<u32>,
    /// 每页数量 (默认 20)
    pub per_page: Option<u32>,
}

/// 后台抽奖记录
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DrawRecordResponse {
    pub id: i64,
    pub nickname: String,
    pub prize_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<draw_history_entity::Model> for DrawRecordResponse {
    fn from(m: draw_history_entity::Model) -> Self {
        DrawRecordResponse {
            id: m.id,
            nickname: m.nickname,
            prize_name: m.prize_name,
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}

/// 抽奖记录分页响应
pub type DrawRecordPageResponse = PaginatedResponse<DrawRecordResponse>;
