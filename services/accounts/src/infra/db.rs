use anyhow::Context;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use lentera_accounts_schema::{activity_logs, one_time_codes, users};

use crate::domain::repository::{ActivityLog, OneTimeCodeRepository, UserRepository};
use crate::domain::types::{CodePurpose, NewActivity, OneTimeCode, User, UserRole};
use crate::error::AccountsServiceError;

// ── Users ───────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

fn user_from_model(model: users::Model) -> Result<User, AccountsServiceError> {
    let role = UserRole::from_i16(model.role)
        .with_context(|| format!("unknown role {} for user {}", model.role, model.id))?;
    Ok(User {
        id: model.id,
        email: model.email,
        password_hash: model.password_hash,
        full_name: model.full_name,
        role,
        disability_type: model.disability_type,
        email_verified: model.email_verified,
        email_verified_at: model.email_verified_at,
        created_at: model.created_at,
    })
}

impl UserRepository for DbUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountsServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AccountsServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn create(&self, user: &User) -> Result<(), AccountsServiceError> {
        let insert = users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            full_name: Set(user.full_name.clone()),
            role: Set(user.role.as_i16()),
            disability_type: Set(user.disability_type.clone()),
            email_verified: Set(user.email_verified),
            email_verified_at: Set(user.email_verified_at),
            created_at: Set(user.created_at),
        }
        .insert(&self.db)
        .await;
        match insert {
            Ok(_) => Ok(()),
            // A concurrent registration can slip between the pre-insert email
            // check and this insert; the unique index on email is the
            // authority, so its violation is a duplicate, not a server error.
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(AccountsServiceError::EmailTaken)
            }
            Err(e) => Err(anyhow::Error::from(e).context("insert user").into()),
        }
    }
}

// ── One-time codes ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOneTimeCodeRepository {
    pub db: DatabaseConnection,
}

fn code_from_model(model: one_time_codes::Model) -> Result<OneTimeCode, AccountsServiceError> {
    let purpose = CodePurpose::from_i16(model.purpose)
        .with_context(|| format!("unknown purpose {} for code {}", model.purpose, model.id))?;
    Ok(OneTimeCode {
        id: model.id,
        user_id: model.user_id,
        code: model.code,
        purpose,
        expires_at: model.expires_at,
        used_at: model.used_at,
        created_at: model.created_at,
    })
}

async fn insert_code(
    txn: &DatabaseTransaction,
    code: &OneTimeCode,
) -> Result<(), sea_orm::DbErr> {
    one_time_codes::ActiveModel {
        id: Set(code.id),
        user_id: Set(code.user_id),
        code: Set(code.code.clone()),
        purpose: Set(code.purpose.as_i16()),
        expires_at: Set(code.expires_at),
        used_at: Set(code.used_at),
        created_at: Set(code.created_at),
    }
    .insert(txn)
    .await?;
    Ok(())
}

async fn mark_code_used(txn: &DatabaseTransaction, code_id: Uuid) -> Result<(), sea_orm::DbErr> {
    one_time_codes::ActiveModel {
        id: Set(code_id),
        used_at: Set(Some(Utc::now())),
        ..Default::default()
    }
    .update(txn)
    .await?;
    Ok(())
}

impl OneTimeCodeRepository for DbOneTimeCodeRepository {
    async fn replace_for_purpose(&self, code: &OneTimeCode) -> Result<(), AccountsServiceError> {
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                let code = code.clone();
                Box::pin(async move {
                    one_time_codes::Entity::delete_many()
                        .filter(one_time_codes::Column::UserId.eq(code.user_id))
                        .filter(one_time_codes::Column::Purpose.eq(code.purpose.as_i16()))
                        .exec(txn)
                        .await?;
                    insert_code(txn, &code).await
                })
            })
            .await
            .context("replace one-time code")?;
        Ok(())
    }

    async fn find_unused(
        &self,
        user_id: Uuid,
        purpose: CodePurpose,
        code: &str,
    ) -> Result<Option<OneTimeCode>, AccountsServiceError> {
        // No expiry filter: callers distinguish expired from unknown codes.
        let model = one_time_codes::Entity::find()
            .filter(one_time_codes::Column::UserId.eq(user_id))
            .filter(one_time_codes::Column::Purpose.eq(purpose.as_i16()))
            .filter(one_time_codes::Column::Code.eq(code))
            .filter(one_time_codes::Column::UsedAt.is_null())
            .one(&self.db)
            .await
            .context("find unused one-time code")?;
        model.map(code_from_model).transpose()
    }

    async fn consume_for_email_verification(
        &self,
        code_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), AccountsServiceError> {
        self.db
            .transaction::<_, (), sea_orm::DbErr>(move |txn| {
                Box::pin(async move {
                    users::ActiveModel {
                        id: Set(user_id),
                        email_verified: Set(true),
                        email_verified_at: Set(Some(Utc::now())),
                        ..Default::default()
                    }
                    .update(txn)
                    .await?;
                    mark_code_used(txn, code_id).await
                })
            })
            .await
            .context("consume code for email verification")?;
        Ok(())
    }

    async fn consume_for_password_reset(
        &self,
        code_id: Uuid,
        user_id: Uuid,
        password_hash: &str,
    ) -> Result<(), AccountsServiceError> {
        let password_hash = password_hash.to_owned();
        self.db
            .transaction::<_, (), sea_orm::DbErr>(move |txn| {
                let password_hash = password_hash.clone();
                Box::pin(async move {
                    users::ActiveModel {
                        id: Set(user_id),
                        password_hash: Set(password_hash),
                        ..Default::default()
                    }
                    .update(txn)
                    .await?;
                    mark_code_used(txn, code_id).await
                })
            })
            .await
            .context("consume code for password reset")?;
        Ok(())
    }
}

// ── Activity log ────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbActivityLog {
    pub db: DatabaseConnection,
}

impl ActivityLog for DbActivityLog {
    async fn append(&self, entry: &NewActivity) -> Result<(), AccountsServiceError> {
        activity_logs::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(entry.user_id),
            action: Set(entry.action.to_owned()),
            entity_type: Set(entry.entity_type.to_owned()),
            entity_id: Set(entry.entity_id),
            ip_address: Set(entry.ip_address.clone()),
            user_agent: Set(entry.user_agent.clone()),
            metadata: Set(entry.metadata.clone()),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
        .context("insert activity log")?;
        Ok(())
    }
}
