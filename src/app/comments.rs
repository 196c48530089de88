use anyhow::Result;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::comment::Comment;
use crate::infra::db::Db;

#[derive(Clone)]
pub struct CommentService {
    db: Db,
}

impl CommentService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub async fn list_comments(&self, post_id: &str) -> Result<Vec<Comment>> {
        let rows = sqlx::query(
            "SELECT id, post_id, name, comment, created_at \
             FROM blog_comments \
             WHERE post_id = $1 \
             ORDER BY created_at ASC",
        )
        .bind(post_id)
        .fetch_all(self.db.pool())
        .await?;

        let mut comments = Vec::with_capacity(rows.len());
        for row in rows {
            comments.push(Comment {
                id: row.try_get("id")?,
                post_id: row.try_get("post_id")?,
                name: row.try_get("name")?,
                comment: row.try_get("comment")?,
                created_at: row.try_get("created_at")?,
            });
        }

        Ok(comments)
    }

    /// Inserts without checking that `post_id` names an existing post.
    /// Returns the generated comment id.
    pub async fn add_comment(
        &self,
        post_id: &str,
        name: Option<String>,
        comment: Option<String>,
    ) -> Result<String> {
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            "INSERT INTO blog_comments (id, post_id, name, comment, created_at) \
             VALUES ($1, $2, $3, $4, NOW())",
        )
        .bind(&id)
        .bind(post_id)
        .bind(name)
        .bind(comment)
        .execute(self.db.pool())
        .await?;

        Ok(id)
    }
}
