use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 当前抽奖记录实体
/// 说明:
/// - 每次抽奖追加一条，不修改
/// - prize_name 冗余存储 (奖品配置后续修改仍可回溯)
/// - 活动归档时整体拷贝到 award_histories 后清空
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "draw_histories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub config_id: i64,
    pub nickname: String,
    pub prize_name: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
