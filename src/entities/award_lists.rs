use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 活动实体 (归档后的抽奖结果集合)
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "award_lists")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// 活动名称 (唯一)
    pub activity_name: String,
    /// 来源配置，配置删除后为 NULL
    pub config_id: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
