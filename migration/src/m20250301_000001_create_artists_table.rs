use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Artists::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Artists::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Artists::FirstName).string_len(30).not_null())
                    .col(ColumnDef::new(Artists::LastName).string_len(30).not_null())
                    .col(ColumnDef::new(Artists::Slug).string_len(65).not_null().unique_key())
                    .col(
                        ColumnDef::new(Artists::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Artists::Description).text().not_null())
                    .col(ColumnDef::new(Artists::Biography).string())
                    .col(ColumnDef::new(Artists::Created).timestamp().not_null())
                    .col(ColumnDef::new(Artists::Updated).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        // Suffix counters for artist slugs, keyed by lower-cased full name
        manager
            .create_table(
                Table::create()
                    .table(ArtistRatchets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ArtistRatchets::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ArtistRatchets::Name)
                            .string_len(61)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(ArtistRatchets::Suffix)
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
            .drop_table(Table::drop().table(ArtistRatchets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Artists::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Artists {
    Table,
    Id,
    FirstName,
    LastName,
    Slug,
    IsActive,
    Description,
    Biography,
    Created,
    Updated,
}

#[derive(DeriveIden)]
enum ArtistRatchets {
    Table,
    Id,
    Name,
    Suffix,
}
