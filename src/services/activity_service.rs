use crate::entities::{
    award_history_entity as histories, award_list_entity as activities,
    draw_history_entity as draws,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    ActivityDetailResponse, ActivityResponse, ArchiveActivityResponse, AwardHistoryResponse,
    CreateActivityRequest,
};
use crate::services::roulette_service::find_config;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct ActivityService {
    pool: Arc<DatabaseConnection>,
}

impl ActivityService {
    pub fn new(pool: Arc<DatabaseConnection>) -> Self {
        Self { pool }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.pool
    }

    /// 活动列表 (新的在前)
    pub async fn list_activities(&self) -> AppResult<Vec<ActivityResponse>> {
        let list = activities::Entity::find()
            .order_by_desc(activities::Column::CreatedAt)
            .order_by_desc(activities::Column::Id)
            .all(self.db())
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// 活动详情与获奖记录
    pub async fn get_activity(&self, activity_name: &str) -> AppResult<ActivityDetailResponse> {
        let activity = self.find_activity(activity_name).await?;
        let history = histories::Entity::find()
            .filter(histories::Column::ActivityId.eq(activity.id))
            .order_by_desc(histories::Column::DrawnAt)
            .order_by_desc(histories::Column::Id)
            .all(self.db())
            .await?;

        Ok(ActivityDetailResponse {
            activity: activity.into(),
            history: history.into_iter().map(AwardHistoryResponse::from).collect(),
        })
    }

    /// 归档活动
    ///
    /// 逻辑:
    /// 1. 校验活动名称与配置
    /// 2. 活动名称不可重复
    /// 3. 事务内: 创建活动 -> 拷贝当前抽奖记录 (保留抽奖时间) -> 清空当前记录
    pub async fn archive(&self, req: CreateActivityRequest) -> AppResult<ArchiveActivityResponse> {
        let activity_name = req
            .activity_name
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        if activity_name.is_empty() {
            return Err(AppError::ValidationError(
                "Please enter an activity name".into(),
            ));
        }
        if activity_name.chars().count() > 100 {
            return Err(AppError::ValidationError(
                "Activity name must be at most 100 characters".into(),
            ));
        }
        let Some(config_id) = req.config_id else {
            return Err(AppError::NotFound("Roulette config not found".into()));
        };

        let config = find_config(self.db(), config_id).await?;

        let exists = activities::Entity::find()
            .filter(activities::Column::ActivityName.eq(activity_name.as_str()))
            .count(self.db())
            .await?
            > 0;
        if exists {
            return Err(AppError::ValidationError(
                "Activity name already exists, please choose another".into(),
            ));
        }

        let txn = self.db().begin().await?;

        let activity = activities::ActiveModel {
            activity_name: Set(activity_name),
            config_id: Set(Some(config.id)),
            created_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let records = draws::Entity::find()
            .filter(draws::Column::ConfigId.eq(config.id))
            .order_by_asc(draws::Column::CreatedAt)
            .order_by_asc(draws::Column::Id)
            .all(&txn)
            .await?;
        let archived_count = records.len() as u64;

        if !records.is_empty() {
            let rows = records.into_iter().map(|r| histories::ActiveModel {
                activity_id: Set(activity.id),
                nickname: Set(r.nickname),
                prize_name: Set(r.prize_name),
                drawn_at: Set(r.created_at.unwrap_or_else(Utc::now)),
                ..Default::default()
            });
            histories::Entity::insert_many(rows).exec(&txn).await?;
        }

        draws::Entity::delete_many()
            .filter(draws::Column::ConfigId.eq(config.id))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        log::info!(
            "Archived {} draw records of config {} into activity {}",
            archived_count,
            config.id,
            activity.activity_name
        );

        Ok(ArchiveActivityResponse {
            activity: activity.into(),
            archived_count,
        })
    }

    /// 删除活动及其获奖记录
    pub async fn delete_activity(&self, activity_name: &str) -> AppResult<()> {
        let activity_name = activity_name.trim();
        if activity_name.is_empty() {
            return Err(AppError::ValidationError("Missing activity name".into()));
        }
        let activity = self.find_activity(activity_name).await?;

        let txn = self.db().begin().await?;
        histories::Entity::delete_many()
            .filter(histories::Column::ActivityId.eq(activity.id))
            .exec(&txn)
            .await?;
        activities::Entity::delete_by_id(activity.id)
            .exec(&txn)
            .await?;
        txn.commit().await?;

        log::info!("Deleted activity {}", activity.activity_name);
        Ok(())
    }

    async fn find_activity(&self, activity_name: &str) -> AppResult<activities::Model> {
        activities::Entity::find()
            .filter(activities::Column::ActivityName.eq(activity_name.trim()))
            .one(self.db())
            .await?
            .ok_or_else(|| AppError::NotFound("Activity not found".into()))
    }
}
