use sea_orm::sea_query::{Expr, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Select, Set,
};
use time::OffsetDateTime;

use crate::entities::{followers, posts, users};
use crate::errors::domain::DomainError;

/// A post joined with its author's nick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author_id: i64,
    pub author_nick: String,
    pub likes: i64,
    pub created_at: OffsetDateTime,
}

impl Post {
    fn from_pair((post, author): (posts::Model, Option<users::Model>)) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            author_id: post.author_id,
            author_nick: author.map(|a| a.nick).unwrap_or_default(),
            likes: post.likes,
            created_at: post.created_at,
        }
    }
}

fn newest_first(select: Select<posts::Entity>) -> Select<posts::Entity> {
    select
        .order_by_desc(posts::Column::CreatedAt)
        .order_by_desc(posts::Column::Id)
}

async fn load_with_authors<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    select: Select<posts::Entity>,
) -> Result<Vec<Post>, DomainError> {
    let rows = select.find_also_related(users::Entity).all(conn).await?;
    Ok(rows.into_iter().map(Post::from_pair).collect())
}

pub async fn create_post<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    author_id: i64,
    title: String,
    content: String,
) -> Result<Post, DomainError> {
    let active = posts::ActiveModel {
        id: NotSet,
        title: Set(title),
        content: Set(content),
        author_id: Set(author_id),
        likes: Set(0),
        created_at: Set(OffsetDateTime::now_utc()),
    };
    let inserted = active.insert(conn).await?;
    let author = users::Entity::find_by_id(author_id).one(conn).await?;
    Ok(Post::from_pair((inserted, author)))
}

pub async fn find_post<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: i64,
) -> Result<Option<Post>, DomainError> {
    let row = posts::Entity::find_by_id(post_id)
        .find_also_related(users::Entity)
        .one(conn)
        .await?;
    Ok(row.map(Post::from_pair))
}

/// The user's own posts plus posts by everyone they follow.
pub async fn feed<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<Post>, DomainError> {
    let followed = Query::select()
        .column(followers::Column::UserId)
        .from(followers::Entity)
        .and_where(followers::Column::FollowerId.eq(user_id))
        .to_owned();

    let select = posts::Entity::find().filter(
        Condition::any()
            .add(posts::Column::AuthorId.eq(user_id))
            .add(posts::Column::AuthorId.in_subquery(followed)),
    );
    load_with_authors(conn, newest_first(select)).await
}

pub async fn posts_by_author<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    author_id: i64,
) -> Result<Vec<Post>, DomainError> {
    let select = posts::Entity::find().filter(posts::Column::AuthorId.eq(author_id));
    load_with_authors(conn, newest_first(select)).await
}

/// Update only if `author_id` still owns the post. Returns whether a row changed.
pub async fn update_post_owned<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: i64,
    author_id: i64,
    title: String,
    content: String,
) -> Result<bool, DomainError> {
    let result = posts::Entity::update_many()
        .col_expr(posts::Column::Title, Expr::value(title))
        .col_expr(posts::Column::Content, Expr::value(content))
        .filter(posts::Column::Id.eq(post_id))
        .filter(posts::Column::AuthorId.eq(author_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected == 1)
}

/// Delete only if `author_id` still owns the post. Returns whether a row was removed.
pub async fn delete_post_owned<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: i64,
    author_id: i64,
) -> Result<bool, DomainError> {
    let result = posts::Entity::delete_many()
        .filter(posts::Column::Id.eq(post_id))
        .filter(posts::Column::AuthorId.eq(author_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected == 1)
}

pub async fn delete_posts_by_author<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    author_id: i64,
) -> Result<u64, DomainError> {
    let result = posts::Entity::delete_many()
        .filter(posts::Column::AuthorId.eq(author_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn like<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: i64,
) -> Result<bool, DomainError> {
    let result = posts::Entity::update_many()
        .col_expr(posts::Column::Likes, Expr::col(posts::Column::Likes).add(1))
        .filter(posts::Column::Id.eq(post_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected == 1)
}

/// Decrement likes, flooring at zero.
pub async fn dislike<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: i64,
) -> Result<bool, DomainError> {
    let result = posts::Entity::update_many()
        .col_expr(
            posts::Column::Likes,
            Expr::cust("CASE WHEN likes > 0 THEN likes - 1 ELSE 0 END"),
        )
        .filter(posts::Column::Id.eq(post_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected == 1)
}
