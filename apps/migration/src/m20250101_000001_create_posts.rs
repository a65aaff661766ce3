use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Posts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Posts::AuthorId).uuid().not_null())
                    .col(ColumnDef::new(Posts::AuthorName).string().not_null())
                    .col(ColumnDef::new(Posts::Caption).text().not_null())
                    .col(ColumnDef::new(Posts::MediaUrls).json_binary().not_null())
                    .col(
                        ColumnDef::new(Posts::LikedByUserIds)
                            .json_binary()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Posts::Likes).integer().not_null().default(0))
                    .col(ColumnDef::new(Posts::Comments).json_binary().not_null())
                    .col(ColumnDef::new(Posts::Shares).json_binary().not_null())
                    .col(
                        ColumnDef::new(Posts::ShareCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Posts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Posts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    // Optimistic-concurrency stamp
                    .col(
                        ColumnDef::new(Posts::Version)
                            .big_integer()
                            .not_null()
                            .default(1),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Posts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Posts {
    Table,
    Id,
    AuthorId,
    AuthorName,
    Caption,
    MediaUrls,
    LikedByUserIds,
    Likes,
    Comments,
    Shares,
    ShareCount,
    CreatedAt,
    UpdatedAt,
    Version,
}
