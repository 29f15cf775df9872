//! Blog post entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, NotSet, Set, Unchanged};

use journal_core::domain::{NewPost, Post, PostChanges};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "blog_posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    #[sea_orm(column_type = "Text")]
    pub excerpt: String,
    #[sea_orm(column_type = "Text")]
    pub category: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub read_time: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub date: Option<String>,
    pub is_private: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            content: model.content,
            excerpt: model.excerpt,
            category: model.category,
            read_time: model.read_time,
            date: model.date,
            is_private: model.is_private,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// New rows start public, with both timestamps set to now.
impl From<NewPost> for ActiveModel {
    fn from(post: NewPost) -> Self {
        let now: DateTimeWithTimeZone = chrono::Utc::now().into();
        Self {
            id: NotSet,
            title: Set(post.title),
            content: Set(post.content),
            excerpt: Set(post.excerpt),
            category: Set(post.category),
            read_time: Set(Some(post.read_time)),
            date: Set(Some(post.date)),
            is_private: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}

impl ActiveModel {
    /// Only the supplied columns are written; `updated_at` always moves.
    pub fn from_changes(id: i32, changes: PostChanges) -> Self {
        fn set_or_keep<T: Into<sea_orm::Value>>(value: Option<T>) -> ActiveValue<T> {
            value.map_or(NotSet, Set)
        }

        Self {
            id: Unchanged(id),
            title: set_or_keep(changes.title),
            content: set_or_keep(changes.content),
            excerpt: set_or_keep(changes.excerpt),
            category: set_or_keep(changes.category),
            read_time: set_or_keep(changes.read_time.map(Some)),
            date: set_or_keep(changes.date.map(Some)),
            is_private: NotSet,
            created_at: NotSet,
            updated_at: Set(chrono::Utc::now().into()),
        }
    }

    pub fn privacy(id: i32, is_private: bool) -> Self {
        Self {
            id: Unchanged(id),
            is_private: Set(is_private),
            updated_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changes_only_touch_supplied_columns() {
        let active = ActiveModel::from_changes(
            3,
            PostChanges {
                title: Some("New title".to_string()),
                ..Default::default()
            },
        );

        assert_eq!(active.id, Unchanged(3));
        assert_eq!(active.title, Set("New title".to_string()));
        assert!(active.content.is_not_set());
        assert!(active.date.is_not_set());
        assert!(active.updated_at.is_set());
    }
}
