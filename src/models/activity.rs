use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{award_history_entity, award_list_entity};

/// 归档活动请求
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateActivityRequest {
    #[schema(example = "2025 尾牙")]
    pub activity_name: Option<String>,
    #[serde(alias = "configId")]
    pub config_id: Option<i64>,
}

/// 活动摘要
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ActivityResponse {
    pub id: i64,
    pub activity_name: String,
    pub config_id: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<award_list_entity::Model> for ActivityResponse {
    fn from(m: award_list_entity::Model) -> Self {
        ActivityResponse {
            id: m.id,
            activity_name: m.activity_name,
            config_id: m.config_id,
            created_at: m.created_at,
        }
    }
}

/// 活动获奖记录
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AwardHistoryResponse {
    pub nickname: String,
    pub prize_name: String,
    pub drawn_at: DateTime<Utc>,
}

impl From<award_history_entity::Model> for AwardHistoryResponse {
    fn from(m: award_history_entity::Model) -> Self {
        AwardHistoryResponse {
            nickname: m.nickname,
            prize_name: m.prize_name,
            drawn_at: m.drawn_at,
        }
    }
}

/// 活动详情
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ActivityDetailResponse {
    pub activity: ActivityResponse,
    pub history: Vec<AwardHistoryResponse>,
}

/// 归档结果
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ArchiveActivityResponse {
    pub activity: ActivityResponse,
    /// 从当前记录迁移的条数
    pub archived_count: u64,
}
