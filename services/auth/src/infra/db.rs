use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    sea_query::Expr,
};

use ravon_auth_schema::auth_codes;

use crate::domain::repository::AuthCodeRepository;
use crate::domain::types::AuthCode;
use crate::error::AuthServiceError;

#[derive(Clone)]
pub struct DbAuthCodeRepository {
    pub db: DatabaseConnection,
}

impl AuthCodeRepository for DbAuthCodeRepository {
    async fn delete_for_owner(&self, telegram_user_id: i64) -> Result<u64, AuthServiceError> {
        let result = auth_codes::Entity::delete_many()
            .filter(auth_codes::Column::TelegramUserId.eq(telegram_user_id))
            .exec(&self.db)
            .await
            .context("delete auth codes for owner")?;
        Ok(result.rows_affected)
    }

    async fn insert(&self, code: &AuthCode) -> Result<(), AuthServiceError> {
        auth_codes::ActiveModel {
            id: Set(code.id),
            telegram_user_id: Set(code.telegram_user_id),
            code: Set(code.code.clone()),
            first_name: Set(code.first_name.clone()),
            last_name: Set(code.last_name.clone()),
            username: Set(code.username.clone()),
            photo_url: Set(code.photo_url.clone()),
            expires_at: Set(code.expires_at),
            used_at: Set(None),
            created_at: Set(code.created_at),
        }
        .insert(&self.db)
        .await
        .context("insert auth code")?;
        Ok(())
    }

    async fn claim_valid(&self, code: &str) -> Result<Option<AuthCode>, AuthServiceError> {
        // One conditional UPDATE .. RETURNING. Claiming and validity-checking
        // happen in the same statement, so concurrent claims of one code
        // resolve to exactly one winner; a find followed by a mark-used would
        // reintroduce the double-claim race.
        let now = Utc::now();
        let mut claimed = auth_codes::Entity::update_many()
            .col_expr(auth_codes::Column::UsedAt, Expr::value(now))
            .filter(auth_codes::Column::Code.eq(code))
            .filter(auth_codes::Column::UsedAt.is_null())
            .filter(auth_codes::Column::ExpiresAt.gt(now))
            .exec_with_returning(&self.db)
            .await
            .context("claim auth code")?;
        Ok(claimed.pop().map(authcode_from_model))
    }

    async fn purge_expired(&self) -> Result<u64, AuthServiceError> {
        let result = auth_codes::Entity::delete_many()
            .filter(auth_codes::Column::ExpiresAt.lte(Utc::now()))
            .exec(&self.db)
            .await
            .context("purge expired auth codes")?;
        Ok(result.rows_affected)
    }
}

fn authcode_from_model(model: auth_codes::Model) -> AuthCode {
    AuthCode {
        id: model.id,
        telegram_user_id: model.telegram_user_id,
        code: model.code,
        first_name: model.first_name,
        last_name: model.last_name,
        username: model.username,
        photo_url: model.photo_url,
        expires_at: model.expires_at,
        used_at: model.used_at,
        created_at: model.created_at,
    }
}
