use crate::entities::draw_history_entity as draws;
use crate::error::{AppError, AppResult};
use crate::models::{
    DrawHistoryItem, DrawRecord, DrawRecordPageResponse, DrawRecordQuery, DrawRecordResponse,
    DrawRequest, DrawResponse, PaginatedResponse, PaginationParams,
};
use crate::services::roulette_service::{find_config, load_layout};
use crate::wheel;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use std::sync::Arc;

const MAX_NICKNAME_CHARS: usize = 100;

#[derive(Clone)]
pub struct DrawService {
    pool: Arc<DatabaseConnection>,
    history_limit: u64,
}

impl DrawService {
    pub fn new(pool: Arc<DatabaseConnection>, history_limit: u64) -> Self {
        Self {
            pool,
            history_limit,
        }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.pool
    }

    /// 抽奖
    ///
    /// 逻辑:
    /// 1. 校验昵称与配置ID
    /// 2. 读取配置下的奖品并构建扇区 (概率 <= 0 的奖品不参与)
    /// 3. 按累计概率抽取扇区，并在扇区内部取落点角度
    /// 4. 写入抽奖记录，返回奖品、目标角度与最近记录
    pub async fn draw(&self, req: DrawRequest) -> AppResult<DrawResponse> {
        let nickname = req.nickname.as_deref().map(str::trim).unwrap_or_default();
        let Some(config_id) = req.config_id.filter(|_| !nickname.is_empty()) else {
            return Err(AppError::ValidationError(
                "Please enter a nickname and choose a wheel".into(),
            ));
        };
        if nickname.chars().count() > MAX_NICKNAME_CHARS {
            return Err(AppError::ValidationError(format!(
                "Nickname must be at most {MAX_NICKNAME_CHARS} characters"
            )));
        }

        let config = find_config(self.db(), config_id).await?;
        let layout = load_layout(self.db(), config.id).await?;

        // rng 不跨 await 持有
        let picked = {
            let mut rng = rand::thread_rng();
            wheel::draw(&layout.segments, &mut rng)
                .map(|outcome| (outcome.segment.prize.name.clone(), outcome.target_angle))
        };
        let Some((prize_name, target_angle)) = picked else {
            return Err(AppError::ValidationError(
                "No prizes or probabilities configured for this wheel".into(),
            ));
        };

        draws::ActiveModel {
            config_id: Set(config.id),
            nickname: Set(nickname.to_string()),
            prize_name: Set(prize_name.clone()),
            created_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(self.db())
        .await?;

        log::info!(
            "Draw on config {}: {} won {} (target angle {})",
            config.id,
            nickname,
            prize_name,
            target_angle
        );

        let history = recent_history(self.db(), config.id, self.history_limit)
            .await?
            .iter()
            .map(DrawHistoryItem::from)
            .collect();

        Ok(DrawResponse {
            success: true,
            prize: prize_name,
            target_angle,
            history,
        })
    }

    /// 后台分页查看当前抽奖记录 (倒序)
    pub async fn list_records(
        &self,
        config_id: i64,
        query: &DrawRecordQuery,
    ) -> AppResult<DrawRecordPageResponse> {
        find_config(self.db(), config_id).await?;
        let params = PaginationParams::new(query.page, query.per_page);

        let base_query = draws::Entity::find().filter(draws::Column::ConfigId.eq(config_id));
        let total = base_query.clone().count(self.db()).await?;

        let items: Vec<DrawRecordResponse> = base_query
            .order_by_desc(draws::Column::CreatedAt)
            .order_by_desc(draws::Column::Id)
            .limit(params.get_limit())
            .offset(params.get_offset())
            .all(self.db())
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(PaginatedResponse::new(items, &params, total))
    }

    /// 清空当前抽奖记录，返回删除条数
    pub async fn clear_records(&self, config_id: i64) -> AppResult<u64> {
        find_config(self.db(), config_id).await?;
        let result = draws::Entity::delete_many()
            .filter(draws::Column::ConfigId.eq(config_id))
            .exec(self.db())
            .await?;
        log::info!(
            "Cleared {} draw records of config {config_id}",
            result.rows_affected
        );
        Ok(result.rows_affected)
    }
}

/// 最近的抽奖记录 (新的在前)
pub(crate) async fn recent_history<C: ConnectionTrait>(
    conn: &C,
    config_id: i64,
    limit: u64,
) -> Result<Vec<DrawRecord>, DbErr> {
    let list = draws::Entity::find()
        .filter(draws::Column::ConfigId.eq(config_id))
        .order_by_desc(draws::Column::CreatedAt)
        .order_by_desc(draws::Column::Id)
        .limit(limit)
        .all(conn)
        .await?;
    Ok(list.into_iter().map(Into::into).collect())
}
