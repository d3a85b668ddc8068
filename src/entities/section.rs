use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sections")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub section_type: String,
    pub display_order: i32,
    pub is_active: bool,
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
