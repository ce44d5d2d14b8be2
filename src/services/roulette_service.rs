use crate::entities::{
    draw_history_entity as draws, prize_entity as prizes, roulette_config_entity as configs,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    DrawHistoryItem, PrizeInput, PrizeResponse, RouletteConfigDetail, RouletteConfigSummary,
    SaveRouletteConfigRequest, WheelResponse,
};
use crate::services::draw_service::recent_history;
use crate::wheel::{PrizeSpec, WheelLayout, build_segments};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;

/// 新建配置未填写名称时的默认名称
pub const DEFAULT_CONFIG_NAME: &str = "未命名抽獎";

#[derive(Clone)]
pub struct RouletteService {
    pool: Arc<DatabaseConnection>,
    history_limit: u64,
}

impl RouletteService {
    pub fn new(pool: Arc<DatabaseConnection>, history_limit: u64) -> Self {
        Self {
            pool,
            history_limit,
        }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.pool
    }

    /// 配置列表 (最近更新的在前)
    pub async fn list_configs(&self) -> AppResult<Vec<RouletteConfigSummary>> {
        let list = configs::Entity::find()
            .order_by_desc(configs::Column::UpdatedAt)
            .order_by_desc(configs::Column::Id)
            .all(self.db())
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// 前台转盘：背景、标签与最近抽奖记录
    pub async fn get_wheel(&self, config_id: i64) -> AppResult<WheelResponse> {
        let config = find_config(self.db(), config_id).await?;
        let layout = load_layout(self.db(), config_id).await?;
        let history = recent_history(self.db(), config_id, self.history_limit)
            .await?
            .iter()
            .map(DrawHistoryItem::from)
            .collect();
        Ok(WheelResponse::new(config, layout, history))
    }

    /// 后台配置详情 (含全部奖品，包括概率 <= 0 的)
    pub async fn get_config_detail(&self, config_id: i64) -> AppResult<RouletteConfigDetail> {
        let config = find_config(self.db(), config_id).await?;
        let prize_list = load_prizes(self.db(), config_id).await?;
        Ok(detail_for(config, prize_list))
    }

    /// 新建或更新配置，并整体替换奖品列表
    ///
    /// - config_id 为空或找不到时新建
    /// - 名称为空时保留原名称 (新建则用默认名称)
    /// - 名称为空或概率无效的行直接忽略，order 取原始行号
    pub async fn save_config(&self, req: SaveRouletteConfigRequest) -> AppResult<RouletteConfigDetail> {
        let name = req
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        if let Some(n) = &name
            && n.chars().count() > 100
        {
            return Err(AppError::ValidationError(
                "Wheel name must be at most 100 characters".into(),
            ));
        }
        let rows = normalize_prize_rows(&req.prizes)?;

        let txn = self.db().begin().await?;

        let existing = match req.config_id {
            Some(id) => configs::Entity::find_by_id(id).one(&txn).await?,
            None => None,
        };

        let now = Utc::now();
        let config = match existing {
            Some(model) => {
                let mut am = model.into_active_model();
                if let Some(n) = name {
                    am.name = Set(n);
                }
                am.updated_at = Set(Some(now));
                am.update(&txn).await?
            }
            None => {
                configs::ActiveModel {
                    name: Set(name.unwrap_or_else(|| DEFAULT_CONFIG_NAME.to_string())),
                    created_at: Set(Some(now)),
                    updated_at: Set(Some(now)),
                    ..Default::default()
                }
                .insert(&txn)
                .await?
            }
        };

        prizes::Entity::delete_many()
            .filter(prizes::Column::ConfigId.eq(config.id))
            .exec(&txn)
            .await?;

        if !rows.is_empty() {
            let models = rows.iter().map(|spec| prizes::ActiveModel {
                config_id: Set(config.id),
                name: Set(spec.name.clone()),
                probability: Set(spec.probability),
                sort_order: Set(spec.order),
                ..Default::default()
            });
            prizes::Entity::insert_many(models).exec(&txn).await?;
        }

        let prize_list = load_prizes(&txn, config.id).await?;
        txn.commit().await?;

        log::info!(
            "Saved roulette config {} ({}) with {} prizes",
            config.id,
            config.name,
            prize_list.len()
        );

        Ok(detail_for(config, prize_list))
    }

    /// 删除配置及其奖品、当前抽奖记录 (已归档活动保留)
    pub async fn delete_config(&self, config_id: i64) -> AppResult<()> {
        let txn = self.db().begin().await?;
        find_config(&txn, config_id).await?;

        draws::Entity::delete_many()
            .filter(draws::Column::ConfigId.eq(config_id))
            .exec(&txn)
            .await?;
        prizes::Entity::delete_many()
            .filter(prizes::Column::ConfigId.eq(config_id))
            .exec(&txn)
            .await?;
        configs::Entity::delete_by_id(config_id).exec(&txn).await?;

        txn.commit().await?;
        log::info!("Deleted roulette config {config_id}");
        Ok(())
    }
}

// -----------------------------
// 内部辅助方法
// -----------------------------

pub(crate) async fn find_config<C: ConnectionTrait>(
    conn: &C,
    config_id: i64,
) -> AppResult<configs::Model> {
    configs::Entity::find_by_id(config_id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Roulette config not found".into()))
}

pub(crate) async fn load_prizes<C: ConnectionTrait>(
    conn: &C,
    config_id: i64,
) -> Result<Vec<prizes::Model>, DbErr> {
    prizes::Entity::find()
        .filter(prizes::Column::ConfigId.eq(config_id))
        .order_by_asc(prizes::Column::SortOrder)
        .order_by_asc(prizes::Column::Id)
        .all(conn)
        .await
}

/// 读取奖品并构建转盘布局 (每次请求重新计算)
pub(crate) async fn load_layout<C: ConnectionTrait>(
    conn: &C,
    config_id: i64,
) -> Result<WheelLayout, DbErr> {
    let specs: Vec<PrizeSpec> = load_prizes(conn, config_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(build_segments(&specs))
}

fn detail_for(config: configs::Model, prize_list: Vec<prizes::Model>) -> RouletteConfigDetail {
    let specs: Vec<PrizeSpec> = prize_list.iter().cloned().map(Into::into).collect();
    let layout = build_segments(&specs);
    RouletteConfigDetail {
        id: config.id,
        name: config.name,
        created_at: config.created_at,
        updated_at: config.updated_at,
        prizes: prize_list.into_iter().map(PrizeResponse::from).collect(),
        gradient: layout.gradient,
    }
}

/// 后台表单行 -> 奖品
///
/// 名称为空、概率缺失或非有限数值的行跳过；order 保留原行号。
/// 概率总和溢出时拒绝保存。
pub fn normalize_prize_rows(rows: &[PrizeInput]) -> AppResult<Vec<PrizeSpec>> {
    let mut specs = Vec::with_capacity(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        let name = row.name.trim();
        let Some(probability) = row.probability.filter(|p| p.is_finite()) else {
            continue;
        };
        if name.is_empty() {
            continue;
        }
        if name.chars().count() > 100 {
            return Err(AppError::ValidationError(format!(
                "Prize name at row {} must be at most 100 characters",
                idx + 1
            )));
        }
        specs.push(PrizeSpec::new(name, probability, idx as i32));
    }
    let total: f64 = specs
        .iter()
        .filter(|s| s.probability > 0.0)
        .map(|s| s.probability)
        .sum();
    if !total.is_finite() {
        return Err(AppError::ValidationError(
            "Total probability is too large".into(),
        ));
    }
    Ok(specs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Transaction};

    fn config(id: i64, name: &str) -> configs::Model {
        configs::Model {
            id,
            name: name.into(),
            created_at: None,
            updated_at: None,
        }
    }

    fn prize(id: i64, config_id: i64, name: &str, probability: f64, sort_order: i32) -> prizes::Model {
        prizes::Model {
            id,
            config_id,
            name: name.into(),
            probability,
            sort_order,
        }
    }

    fn exec(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    fn save_request(config_id: Option<i64>, name: Option<&str>, rows: Vec<PrizeInput>) -> SaveRouletteConfigRequest {
        SaveRouletteConfigRequest {
            config_id,
            name: name.map(str::to_string),
            prizes: rows,
        }
    }

    fn transaction_log(service: RouletteService, db: Arc<DatabaseConnection>) -> Vec<Transaction> {
        drop(service);
        Arc::try_unwrap(db)
            .ok()
            .expect("connection still shared")
            .into_transaction_log()
    }

    fn row(name: &str, probability: Option<f64>) -> PrizeInput {
        PrizeInput {
            name: name.to_string(),
            probability,
        }
    }

    #[test]
    fn test_normalize_skips_blank_and_invalid_rows() {
        let rows = vec![
            row("A", Some(50.0)),
            row("  ", Some(10.0)),
            row("B", None),
            row("C", Some(f64::INFINITY)),
            row(" D ", Some(0.0)),
            row("E", Some(-1.0)),
        ];
        let specs = normalize_prize_rows(&rows).unwrap();
        let got: Vec<(&str, f64, i32)> = specs
            .iter()
            .map(|s| (s.name.as_str(), s.probability, s.order))
            .collect();
        // 0 与负数仍保存，只是不上转盘
        assert_eq!(got, vec![("A", 50.0, 0), ("D", 0.0, 4), ("E", -1.0, 5)]);
    }

    #[test]
    fn test_normalize_rejects_overlong_name() {
        let rows = vec![row(&"x".repeat(101), Some(1.0))];
        assert!(matches!(
            normalize_prize_rows(&rows),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_normalize_rejects_overflowing_total() {
        let rows = vec![row("A", Some(1e308)), row("B", Some(1e308))];
        assert!(matches!(
            normalize_prize_rows(&rows),
            Err(AppError::ValidationError(_))
        ));
    }

    #[actix_web::test]
    async fn test_get_wheel_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<configs::Model>::new()])
            .into_connection();
        let service = RouletteService::new(Arc::new(db), 50);
        assert!(matches!(
            service.get_wheel(42).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[actix_web::test]
    async fn test_get_config_detail_builds_preview() {
        let config = configs::Model {
            id: 1,
            name: "尾牙".into(),
            created_at: None,
            updated_at: None,
        };
        let prize = |id: i64, name: &str, probability: f64, sort_order: i32| prizes::Model {
            id,
            config_id: 1,
            name: name.into(),
            probability,
            sort_order,
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![config]])
            .append_query_results([vec![
                prize(10, "A", 3.0, 0),
                prize(11, "Zero", 0.0, 1),
                prize(12, "B", 1.0, 2),
            ]])
            .into_connection();
        let service = RouletteService::new(Arc::new(db), 50);

        let detail = service.get_config_detail(1).await.unwrap();
        assert_eq!(detail.prizes.len(), 3);
        assert_eq!(detail.prizes[1].order, 1);
        assert_eq!(
            detail.gradient,
            "conic-gradient(from -90deg, #F59E0B 0.00deg 270.00deg, #FDE047 270.00deg 360.00deg)"
        );
    }

    #[actix_web::test]
    async fn test_save_new_config_uses_default_name() {
        let saved = config(9, DEFAULT_CONFIG_NAME);
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![saved]])
                // insert_many ... returning id
                .append_query_results([vec![prize(1, 9, "A", 3.0, 0)]])
                .append_query_results([vec![prize(1, 9, "A", 3.0, 0), prize(2, 9, "B", 1.0, 2)]])
                .append_exec_results([exec(0)])
                .into_connection(),
        );
        let service = RouletteService::new(db.clone(), 50);

        let rows = vec![row("A", Some(3.0)), row("", Some(5.0)), row("B", Some(1.0))];
        let detail = service
            .save_config(save_request(None, Some("   "), rows))
            .await
            .unwrap();
        assert_eq!(detail.id, 9);
        assert_eq!(detail.prizes.len(), 2);
        assert_eq!(detail.prizes[1].order, 2);
        assert!(detail.gradient.ends_with("#FDE047 270.00deg 360.00deg)"));

        let log = transaction_log(service, db);
        assert_eq!(log.len(), 1);
        let txn = format!("{:?}", log[0]);
        assert!(txn.contains(DEFAULT_CONFIG_NAME));
        assert!(txn.contains("DELETE FROM"));
        assert!(txn.contains("COMMIT"));
    }

    #[actix_web::test]
    async fn test_save_unknown_id_creates_config() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<configs::Model>::new()])
                .append_query_results([vec![config(10, "春酒")]])
                .append_query_results([Vec::<prizes::Model>::new()])
                .append_exec_results([exec(0)])
                .into_connection(),
        );
        let service = RouletteService::new(db.clone(), 50);

        let detail = service
            .save_config(save_request(Some(77), Some("春酒"), Vec::new()))
            .await
            .unwrap();
        assert_eq!(detail.id, 10);
        assert!(detail.prizes.is_empty());
        assert_eq!(detail.gradient, crate::wheel::NEUTRAL_GRADIENT);

        let txn = format!("{:?}", transaction_log(service, db)[0]);
        assert!(txn.contains("INSERT INTO"));
        assert!(txn.contains("春酒"));
    }

    #[actix_web::test]
    async fn test_save_existing_keeps_name_and_replaces_prizes() {
        let existing = config(1, "尾牙");
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![existing.clone()]])
                // update ... returning
                .append_query_results([vec![existing]])
                .append_query_results([vec![prize(5, 1, "New", 1.0, 0)]])
                .append_query_results([vec![prize(5, 1, "New", 1.0, 0)]])
                .append_exec_results([exec(3)])
                .into_connection(),
        );
        let service = RouletteService::new(db.clone(), 50);

        let detail = service
            .save_config(save_request(Some(1), None, vec![row("New", Some(1.0))]))
            .await
            .unwrap();
        assert_eq!(detail.name, "尾牙");
        assert_eq!(detail.prizes.len(), 1);
        assert_eq!(detail.prizes[0].name, "New");

        let txn = format!("{:?}", transaction_log(service, db)[0]);
        assert!(txn.contains("UPDATE"));
        // 名称为空时不改写名称
        assert!(!txn.contains("尾牙"));
        assert!(txn.contains("DELETE FROM"));
        assert!(txn.contains("New"));
    }

    #[actix_web::test]
    async fn test_delete_config_removes_prizes_and_draws() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![config(1, "尾牙")]])
                .append_exec_results([exec(4), exec(3), exec(1)])
                .into_connection(),
        );
        let service = RouletteService::new(db.clone(), 50);

        service.delete_config(1).await.unwrap();

        let log = transaction_log(service, db);
        assert_eq!(log.len(), 1);
        let txn = format!("{:?}", log[0]);
        assert!(txn.contains("draw_histories"));
        assert!(txn.contains("prizes"));
        assert!(txn.contains("roulette_configs"));
        assert!(txn.contains("COMMIT"));
    }

    #[actix_web::test]
    async fn test_delete_unknown_config() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<configs::Model>::new()])
            .into_connection();
        let service = RouletteService::new(Arc::new(db), 50);
        assert!(matches!(
            service.delete_config(404).await,
            Err(AppError::NotFound(_))
        ));
    }
}
