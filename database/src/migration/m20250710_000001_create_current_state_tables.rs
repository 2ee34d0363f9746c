use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Statistics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Statistics::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Statistics::Key).text().not_null().unique_key())
                    .col(ColumnDef::new(Statistics::Value).text().not_null())
                    .col(
                        ColumnDef::new(Statistics::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transactions::Hash).string().not_null())
                    .col(ColumnDef::new(Transactions::BlockNumber).big_integer().not_null())
                    .col(ColumnDef::new(Transactions::TimeStamp).big_integer().not_null())
                    .col(ColumnDef::new(Transactions::FromAddress).string().not_null())
                    .col(ColumnDef::new(Transactions::ToAddress).string().not_null())
                    .col(ColumnDef::new(Transactions::TokenId).string().not_null())
                    .col(ColumnDef::new(Transactions::TokenName).string().null())
                    .col(ColumnDef::new(Transactions::TokenSymbol).string().null())
                    .col(ColumnDef::new(Transactions::ContractAddress).string().not_null())
                    .to_owned(),
            )
            .await?;

        // One row per token moved by a transaction
        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_hash_token")
                    .table(Transactions::Table)
                    .col(Transactions::Hash)
                    .col(Transactions::TokenId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_block_number")
                    .table(Transactions::Table)
                    .col(Transactions::BlockNumber)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Holders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Holders::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Holders::Address).string().not_null().unique_key())
                    .col(ColumnDef::new(Holders::NftCount).integer().not_null().default(0))
                    .col(ColumnDef::new(Holders::Percentage).double().not_null().default(0.0))
                    .col(ColumnDef::new(Holders::UpdatedAt).timestamp_with_time_zone().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_holders_nft_count")
                    .table(Holders::Table)
                    .col(Holders::NftCount)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TokenOwnership::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TokenOwnership::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TokenOwnership::TokenId).string().not_null().unique_key())
                    .col(ColumnDef::new(TokenOwnership::CurrentOwner).string().not_null())
                    .col(ColumnDef::new(TokenOwnership::ContractAddress).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_token_ownership_current_owner")
                    .table(TokenOwnership::Table)
                    .col(TokenOwnership::CurrentOwner)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TokenOwnership::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Holders::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Statistics::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Statistics {
    Table,
    Id,
    Key,
    Value,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Transactions {
    Table,
    Id,
    Hash,
    BlockNumber,
    TimeStamp,
    FromAddress,
    ToAddress,
    TokenId,
    TokenName,
    TokenSymbol,
    ContractAddress,
}

#[derive(DeriveIden)]
enum Holders {
    Table,
    Id,
    Address,
    NftCount,
    Percentage,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TokenOwnership {
    Table,
    Id,
    TokenId,
    CurrentOwner,
    ContractAddress,
}
