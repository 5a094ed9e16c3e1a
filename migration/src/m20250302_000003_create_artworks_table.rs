use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Artworks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Artworks::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Artworks::Title).string_len(100).not_null())
                    .col(ColumnDef::new(Artworks::Name).string_len(110).not_null())
                    .col(ColumnDef::new(Artworks::Slug).string_len(115).not_null().unique_key())
                    .col(
                        ColumnDef::new(Artworks::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Artworks::InventoryName)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Artworks::InternalName)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Artworks::ArtistId).uuid().not_null())
                    .col(ColumnDef::new(Artworks::Year).string_len(4).not_null())
                    .col(
                        ColumnDef::new(Artworks::IsRepresentative)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Artworks::GenreId).uuid().not_null())
                    .col(ColumnDef::new(Artworks::StyleClass).string_len(4).not_null())
                    .col(
                        ColumnDef::new(Artworks::MediumDescription)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Artworks::Description).text().not_null())
                    .col(ColumnDef::new(Artworks::ImageHeight).double())
                    .col(ColumnDef::new(Artworks::ImageWidth).double())
                    .col(ColumnDef::new(Artworks::MeasurementUnits).string_len(2).not_null())
                    .col(ColumnDef::new(Artworks::HeightMetric).double())
                    .col(ColumnDef::new(Artworks::WidthMetric).double())
                    .col(ColumnDef::new(Artworks::MetricUnits).string_len(2).not_null())
                    .col(ColumnDef::new(Artworks::HeightImperial).double())
                    .col(ColumnDef::new(Artworks::WidthImperial).double())
                    .col(ColumnDef::new(Artworks::ImperialUnits).string_len(2).not_null())
                    .col(ColumnDef::new(Artworks::Price).integer().not_null())
                    .col(
                        ColumnDef::new(Artworks::IsPriceDisplayed)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Artworks::AlternativePricingMessage)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Artworks::Status).string_len(4).not_null())
                    .col(ColumnDef::new(Artworks::Created).timestamp().not_null())
                    .col(ColumnDef::new(Artworks::Updated).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_artworks_artist_id")
                            .from(Artworks::Table, Artworks::ArtistId)
                            .to(Artists::Table, Artists::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_artworks_genre_id")
                            .from(Artworks::Table, Artworks::GenreId)
                            .to(Genres::Table, Genres::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_artworks_artist_id")
                    .table(Artworks::Table)
                    .col(Artworks::ArtistId)
                    .to_owned(),
            )
            .await?;

        // Suffix counters for artwork slugs, keyed by lower-cased title
        manager
            .create_table(
                Table::create()
                    .table(ArtworkRatchets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ArtworkRatchets::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ArtworkRatchets::Title)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(ArtworkRatchets::Suffix)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ArtworkRatchets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Artworks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Artworks {
    Table,
    Id,
    Title,
    Name,
    Slug,
    IsActive,
    InventoryName,
    InternalName,
    ArtistId,
    Year,
    IsRepresentative,
    GenreId,
    StyleClass,
    MediumDescription,
    Description,
    ImageHeight,
    ImageWidth,
    MeasurementUnits,
    HeightMetric,
    WidthMetric,
    MetricUnits,
    HeightImperial,
    WidthImperial,
    ImperialUnits,
    Price,
    IsPriceDisplayed,
    AlternativePricingMessage,
    Status,
    Created,
    Updated,
}

#[derive(DeriveIden)]
enum ArtworkRatchets {
    Table,
    Id,
    Title,
    Suffix,
}

#[derive(DeriveIden)]
enum Artists {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Genres {
    Table,
    Id,
}
