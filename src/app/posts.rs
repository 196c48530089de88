use anyhow::Result;
use sqlx::postgres::PgRow;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::post::{Post, PostFields};
use crate::infra::db::Db;

const POST_COLUMNS: &str =
    "id, title, slug, image_url, content, excerpt, author, badge, date, likes";

#[derive(Clone)]
pub struct PostService {
    db: Db,
}

impl PostService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>> {
        let rows = sqlx::query(&format!(
            "SELECT {POST_COLUMNS} FROM blog_posts ORDER BY date DESC"
        ))
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(post_from_row).collect()
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Post>> {
        let row = sqlx::query(&format!(
            "SELECT {POST_COLUMNS} FROM blog_posts WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(post_from_row).transpose()
    }

    pub async fn create_post(&self, fields: PostFields) -> Result<Post> {
        let id = Uuid::new_v4().to_string();

        let row = sqlx::query(&format!(
            "INSERT INTO blog_posts (id, title, slug, image_url, content, excerpt, author, badge, date, likes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW(), 0) \
             RETURNING {POST_COLUMNS}"
        ))
        .bind(&id)
        .bind(fields.title)
        .bind(fields.slug)
        .bind(fields.image_url)
        .bind(fields.content)
        .bind(fields.excerpt)
        .bind(fields.author)
        .bind(fields.badge)
        .fetch_one(self.db.pool())
        .await?;

        post_from_row(&row)
    }

    /// Overwrites every mutable field and refreshes `date`. `None` when no
    /// post has the given id.
    pub async fn update_post(&self, id: &str, fields: PostFields) -> Result<Option<Post>> {
        let row = sqlx::query(&format!(
            "UPDATE blog_posts \
             SET title = $1, slug = $2, image_url = $3, content = $4, excerpt = $5, \
                 author = $6, badge = $7, date = NOW() \
             WHERE id = $8 \
             RETURNING {POST_COLUMNS}"
        ))
        .bind(fields.title)
        .bind(fields.slug)
        .bind(fields.image_url)
        .bind(fields.content)
        .bind(fields.excerpt)
        .bind(fields.author)
        .bind(fields.badge)
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(post_from_row).transpose()
    }

    /// Hard delete. Comments pointing at the post are left in place.
    pub async fn delete_post(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Atomic increment in the store. An unknown id matches nothing and is
    /// not reported.
    pub async fn like_post(&self, id: &str) -> Result<u64> {
        let result = sqlx::query("UPDATE blog_posts SET likes = likes + 1 WHERE id = $1")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected())
    }
}

fn post_from_row(row: &PgRow) -> Result<Post> {
    Ok(Post {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        slug: row.try_get("slug")?,
        image_url: row.try_get("image_url")?,
        content: row.try_get("content")?,
        excerpt: row.try_get("excerpt")?,
        author: row.try_get("author")?,
        badge: row.try_get("badge")?,
        date: row.try_get("date")?,
        likes: row.try_get("likes")?,
    })
}
