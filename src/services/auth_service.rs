use crate::entities::user_entity as users;
use crate::error::{AppError, AppResult, is_unique_violation};
use crate::models::*;
use crate::utils::{JwtService, hash_password, validate_email, validate_password, verify_password};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

#[derive(Clone)]
pub struct AuthService {
    pool: DatabaseConnection,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(pool: DatabaseConnection, jwt_service: JwtService) -> Self {
        Self { pool, jwt_service }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<AuthResponse> {
        if request.name.trim().is_empty() {
            return Err(AppError::ValidationError("Name is required".to_string()));
        }
        validate_email(&request.email)?;
        validate_password(&request.password)?;

        // advisory check; the unique index on email is authoritative for the
        // race between this lookup and the insert below
        let existing = users::Entity::find()
            .filter(users::Column::Email.eq(request.email.clone()))
            .one(&self.pool)
            .await?;

        if existing.is_some() {
            return Err(AppError::Conflict(
                "An account with this email already exists".to_string(),
            ));
        }

        let password_hash = hash_password(&request.password)?;

        let user = users::ActiveModel {
            email: Set(request.email.clone()),
            password_hash: Set(password_hash),
            name: Set(request.name.clone()),
            fitness_goals: Set(request.fitness_goals.clone()),
            is_admin: Set(false),
            ..Default::default()
        }
        .insert(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("An account with this email already exists".to_string())
            } else {
                AppError::DatabaseError(e)
            }
        })?;

        log::info!("Registered user {} ({})", user.id, user.email);

        let token = self.jwt_service.generate_token(user.id, &user.email)?;

        Ok(AuthResponse {
            user: UserResponse::from(user),
            token,
        })
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(request.email.clone()))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::AuthError("Invalid credentials".to_string()))?;

        // same message for unknown email and wrong password
        let is_valid = verify_password(&request.password, &user.password_hash)?;
        if !is_valid {
            return Err(AppError::AuthError("Invalid credentials".to_string()));
        }

        let token = self.jwt_service.generate_token(user.id, &user.email)?;

        Ok(AuthResponse {
            user: UserResponse::from(user),
            token,
        })
    }
}
