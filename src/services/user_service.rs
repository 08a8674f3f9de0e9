use crate::entities::user_entity as users;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{hash_password, validate_password, verify_password};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set,
};

#[derive(Clone)]
pub struct UserService {
    pool: DatabaseConnection,
}

impl UserService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn get_profile(&self, user_id: i64) -> AppResult<UserResponse> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(UserResponse::from(user))
    }

    pub async fn update_profile(
        &self,
        user_id: i64,
        request: UpdateProfileRequest,
    ) -> AppResult<UserResponse> {
        if let Some(name) = &request.name {
            if name.trim().is_empty() || name.len() > 100 {
                return Err(AppError::ValidationError(
                    "Name must be between 1 and 100 characters".to_string(),
                ));
            }
        }

        if request.name.is_none() && request.fitness_goals.is_none() {
            return Err(AppError::ValidationError("No fields to update".to_string()));
        }

        let mut model = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?
            .into_active_model();

        if let Some(name) = &request.name {
            model.name = Set(name.clone());
        }
        if let Some(goals) = &request.fitness_goals {
            model.fitness_goals = Set(Some(goals.clone()));
        }
        model.updated_at = Set(Some(Utc::now()));

        let updated = model.update(&self.pool).await?;
        Ok(UserResponse::from(updated))
    }

    pub async fn change_password(
        &self,
        user_id: i64,
        request: ChangePasswordRequest,
    ) -> AppResult<()> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let is_valid = verify_password(&request.current_password, &user.password_hash)?;
        if !is_valid {
            return Err(AppError::AuthError(
                "Current password is incorrect".to_string(),
            ));
        }

        validate_password(&request.new_password)?;
        let new_hash = hash_password(&request.new_password)?;

        let mut model = user.into_active_model();
        model.password_hash = Set(new_hash);
        model.updated_at = Set(Some(Utc::now()));
        model.update(&self.pool).await?;

        Ok(())
    }

    /// Admin gate for catalog writes and order-status updates; the flag lives
    /// in the database, not in the token.
    pub async fn ensure_admin(&self, user_id: i64) -> AppResult<()> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if !user.is_admin {
            return Err(AppError::PermissionDenied);
        }

        Ok(())
    }
}
