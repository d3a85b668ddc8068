use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(pk_auto(Movies::Id))
                    .col(string(Movies::Title))
                    .col(string_null(Movies::ReleaseDate))
                    .col(double_null(Movies::Rating))
                    .col(string_null(Movies::PosterPath))
                    .col(integer_null(Movies::DurationMinutes))
                    .col(string(Movies::Genres).default(""))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movies_release_date")
                    .table(Movies::Table)
                    .col(Movies::ReleaseDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movies_rating")
                    .table(Movies::Table)
                    .col(Movies::Rating)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Sections::Table)
                    .if_not_exists()
                    .col(pk_auto(Sections::Id))
                    .col(string(Sections::Title))
                    .col(string(Sections::SectionType))
                    .col(integer(Sections::DisplayOrder).default(0))
                    .col(boolean(Sections::IsActive).default(true))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sections_active_order")
                    .table(Sections::Table)
                    .col(Sections::IsActive)
                    .col(Sections::DisplayOrder)
                    .col(Sections::Title)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SectionMovies::Table)
                    .if_not_exists()
                    .col(pk_auto(SectionMovies::Id))
                    .col(integer(SectionMovies::SectionId))
                    .col(integer(SectionMovies::MovieId))
                    .col(integer(SectionMovies::DisplayOrder).default(0))
                    .col(big_integer(SectionMovies::AddedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_section_movies_section")
                            .from(SectionMovies::Table, SectionMovies::SectionId)
                            .to(Sections::Table, Sections::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_section_movies_movie")
                            .from(SectionMovies::Table, SectionMovies::MovieId)
                            .to(Movies::Table, Movies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_section_movies_unique")
                    .table(SectionMovies::Table)
                    .col(SectionMovies::SectionId)
                    .col(SectionMovies::MovieId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_section_movies_order")
                    .table(SectionMovies::Table)
                    .col(SectionMovies::SectionId)
                    .col(SectionMovies::DisplayOrder)
                    .col(SectionMovies::MovieId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(SectionMovies::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Sections::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Movies::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Movies {
    Table,
    Id,
    Title,
    ReleaseDate,
    Rating,
    PosterPath,
    DurationMinutes,
    Genres,
}

#[derive(DeriveIden)]
enum Sections {
    Table,
    Id,
    Title,
    SectionType,
    DisplayOrder,
    IsActive,
}

#[derive(DeriveIden)]
enum SectionMovies {
    Table,
    Id,
    SectionId,
    MovieId,
    DisplayOrder,
    AddedAt,
}
