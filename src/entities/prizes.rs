use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::wheel::PrizeSpec;

/// 转盘奖品实体
/// - probability: 相对权重 (不要求合计 100)，<= 0 不上转盘
/// - sort_order: 后台录入顺序，决定扇区排列
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "prizes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub config_id: i64,
    pub name: String,
    pub probability: f64,
    pub sort_order: i32,
}

impl From<Model> for PrizeSpec {
    fn from(m: Model) -> Self {
        PrizeSpec::new(m.name, m.probability, m.sort_order)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
