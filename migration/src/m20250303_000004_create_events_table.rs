use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Events::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Events::Title).string_len(128).not_null().unique_key())
                    .col(
                        ColumnDef::new(Events::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Events::Slug).string_len(132).not_null().unique_key())
                    .col(ColumnDef::new(Events::Kind).string_len(128).not_null())
                    .col(ColumnDef::new(Events::Image).string())
                    .col(ColumnDef::new(Events::TotalSeats).integer())
                    .col(
                        ColumnDef::new(Events::IsAdmission)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Events::AdmissionPrice).integer())
                    .col(ColumnDef::new(Events::StartDate).date().not_null())
                    .col(ColumnDef::new(Events::EndDate).date().not_null())
                    .col(ColumnDef::new(Events::Time).string_len(20).not_null())
                    .col(ColumnDef::new(Events::Location).string_len(128).not_null())
                    .col(ColumnDef::new(Events::Details).text().not_null())
                    .col(ColumnDef::new(Events::Created).timestamp().not_null())
                    .col(ColumnDef::new(Events::Updated).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EventArtists::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(EventArtists::EventId).uuid().not_null())
                    .col(ColumnDef::new(EventArtists::ArtistId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(EventArtists::EventId)
                            .col(EventArtists::ArtistId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_artists_event_id")
                            .from(EventArtists::Table, EventArtists::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_artists_artist_id")
                            .from(EventArtists::Table, EventArtists::ArtistId)
                            .to(Artists::Table, Artists::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Suffix counters for event slugs, keyed by lower-cased title
        manager
            .create_table(
                Table::create()
                    .table(EventRatchets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EventRatchets::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EventRatchets::Title)
                            .string_len(128)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(EventRatchets::Suffix)
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
            .drop_table(Table::drop().table(EventRatchets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EventArtists::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Events {
    Table,
    Id,
    Title,
    IsActive,
    Slug,
    Kind,
    Image,
    TotalSeats,
    IsAdmission,
    AdmissionPrice,
    StartDate,
    EndDate,
    Time,
    Location,
    Details,
    Created,
    Updated,
}

#[derive(DeriveIden)]
enum EventArtists {
    Table,
    EventId,
    ArtistId,
}

#[derive(DeriveIden)]
enum EventRatchets {
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
