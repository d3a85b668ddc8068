use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    /// ISO-8601 `YYYY-MM-DD`, so text order is chronological order.
    pub release_date: Option<String>,
    #[sea_orm(column_type = "Double", nullable)]
    pub rating: Option<f64>,
    pub poster_path: Option<String>,
    pub duration_minutes: Option<i32>,
    /// Comma-separated genre names.
    pub genres: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::section_movie::Entity")]
    SectionMovie,
}

impl Related<super::section_movie::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SectionMovie.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
