use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, NotSet, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use time::OffsetDateTime;

use crate::entities::users;
use crate::errors::domain::DomainError;

/// Public view of a user; never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub nick: String,
    pub email: String,
    pub created_at: OffsetDateTime,
}

/// What login needs to check a password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub user_id: i64,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub nick: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub name: String,
    pub nick: String,
    pub email: String,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            nick: model.nick,
            email: model.email,
            created_at: model.created_at,
        }
    }
}

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    new_user: NewUser,
) -> Result<User, DomainError> {
    let now = OffsetDateTime::now_utc();
    let active = users::ActiveModel {
        id: NotSet,
        name: Set(new_user.name),
        nick: Set(new_user.nick),
        email: Set(new_user.email),
        password_hash: Set(new_user.password_hash),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(User::from(active.insert(conn).await?))
}

pub async fn find_user_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<User>, DomainError> {
    let user = users::Entity::find_by_id(user_id).one(conn).await?;
    Ok(user.map(User::from))
}

/// Users whose name or nick contains `query`.
pub async fn search_users<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    query: &str,
) -> Result<Vec<User>, DomainError> {
    let found = users::Entity::find()
        .filter(
            Condition::any()
                .add(users::Column::Name.contains(query))
                .add(users::Column::Nick.contains(query)),
        )
        .order_by_asc(users::Column::Id)
        .all(conn)
        .await?;
    Ok(found.into_iter().map(User::from).collect())
}

/// Returns whether a row was updated.
pub async fn update_profile<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    update: ProfileUpdate,
) -> Result<bool, DomainError> {
    let result = users::Entity::update_many()
        .col_expr(users::Column::Name, Expr::value(update.name))
        .col_expr(users::Column::Nick, Expr::value(update.nick))
        .col_expr(users::Column::Email, Expr::value(update.email))
        .col_expr(
            users::Column::UpdatedAt,
            Expr::value(OffsetDateTime::now_utc()),
        )
        .filter(users::Column::Id.eq(user_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected == 1)
}

pub async fn delete_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<bool, DomainError> {
    let result = users::Entity::delete_by_id(user_id).exec(conn).await?;
    Ok(result.rows_affected == 1)
}

pub async fn find_credential_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<Credential>, DomainError> {
    let row = users::Entity::find()
        .select_only()
        .column(users::Column::Id)
        .column(users::Column::PasswordHash)
        .filter(users::Column::Email.eq(email))
        .into_tuple::<(i64, String)>()
        .one(conn)
        .await?;
    Ok(row.map(|(user_id, password_hash)| Credential {
        user_id,
        password_hash,
    }))
}

pub async fn find_password_hash<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<String>, DomainError> {
    let hash = users::Entity::find_by_id(user_id)
        .select_only()
        .column(users::Column::PasswordHash)
        .into_tuple::<String>()
        .one(conn)
        .await?;
    Ok(hash)
}

/// Replace the stored hash in a single statement.
pub async fn update_password_hash<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    password_hash: &str,
) -> Result<bool, DomainError> {
    let result = users::Entity::update_many()
        .col_expr(users::Column::PasswordHash, Expr::value(password_hash))
        .col_expr(
            users::Column::UpdatedAt,
            Expr::value(OffsetDateTime::now_utc()),
        )
        .filter(users::Column::Id.eq(user_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected == 1)
}
