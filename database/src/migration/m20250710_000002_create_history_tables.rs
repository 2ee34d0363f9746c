use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HolderHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(HolderHistory::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(HolderHistory::Address).string().not_null().unique_key())
                    .col(ColumnDef::new(HolderHistory::NftCount).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(HolderHistory::FirstSeen)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HolderHistory::LastSeen)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(HolderHistory::IsActive).boolean().not_null().default(true))
                    .to_owned(),
            )
            .await?;

        // Growth windows count entries by first appearance
        manager
            .create_index(
                Index::create()
                    .name("idx_holder_history_first_seen")
                    .table(HolderHistory::Table)
                    .col(HolderHistory::FirstSeen)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(HolderSnapshots::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(HolderSnapshots::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(HolderSnapshots::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(HolderSnapshots::TotalHolders).integer().not_null())
                    .col(ColumnDef::new(HolderSnapshots::TotalSupply).big_integer().not_null())
                    .col(
                        ColumnDef::new(HolderSnapshots::TotalTransactions)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(HolderSnapshots::UniqueTokensTracked).integer().not_null())
                    .col(ColumnDef::new(HolderSnapshots::Coverage).double().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_holder_snapshots_timestamp")
                    .table(HolderSnapshots::Table)
                    .col(HolderSnapshots::Timestamp)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HolderSnapshots::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(HolderHistory::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum HolderHistory {
    Table,
    Id,
    Address,
    NftCount,
    FirstSeen,
    LastSeen,
    IsActive,
}

#[derive(DeriveIden)]
enum HolderSnapshots {
    Table,
    Id,
    Timestamp,
    TotalHolders,
    TotalSupply,
    TotalTransactions,
    UniqueTokensTracked,
    Coverage,
}
