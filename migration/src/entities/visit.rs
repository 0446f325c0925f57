//! Visit event entity (append-only)

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "visit")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub short_url_id: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub referrer: Option<String>,
    pub visited_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::short_url::Entity",
        from = "Column::ShortUrlId",
        to = "super::short_url::Column::Id"
    )]
    ShortUrl,
}

impl Related<super::short_url::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShortUrl.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
