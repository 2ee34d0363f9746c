use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    DatabaseConnection, DatabaseTransaction, EntityTrait, PaginatorTrait, QuerySelect, Set,
    TransactionTrait,
};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::domain::models::{
    Holder, HolderHistoryEntry, HolderSnapshot, OwnershipEntry, TransferRecord,
};
use crate::infrastructure::persistence::entities::{
    holder_history, holder_snapshots, holders, statistics, token_ownership, transactions,
};
use crate::infrastructure::persistence::error::DbError;
use crate::infrastructure::persistence::store::{SyncStore, SyncTransaction};

/// Postgres-backed sync store
pub struct SeaOrmSyncStore {
    conn: Arc<DatabaseConnection>,
}

impl fmt::Debug for SeaOrmSyncStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeaOrmSyncStore").finish_non_exhaustive()
    }
}

impl SeaOrmSyncStore {
    pub fn new(conn: Arc<DatabaseConnection>) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl SyncStore for SeaOrmSyncStore {
    type Transaction = SeaOrmSyncTransaction;

    async fn begin(&self) -> Result<Self::Transaction, DbError> {
        let txn = self.conn.begin().await?;
        Ok(SeaOrmSyncTransaction { txn })
    }
}

/// One sync run's database transaction; rolled back on drop
pub struct SeaOrmSyncTransaction {
    txn: DatabaseTransaction,
}

fn to_i32(value: u64, field: &str) -> Result<i32, DbError> {
    i32::try_from(value)
        .map_err(|_| DbError::QueryError(format!("{} out of range: {}", field, value)))
}

fn to_i64(value: u64, field: &str) -> Result<i64, DbError> {
    i64::try_from(value)
        .map_err(|_| DbError::QueryError(format!("{} out of range: {}", field, value)))
}

#[async_trait]
impl SyncTransaction for SeaOrmSyncTransaction {
    async fn clear_current_state(&mut self) -> Result<(), DbError> {
        transactions::Entity::delete_many().exec(&self.txn).await?;
        holders::Entity::delete_many().exec(&self.txn).await?;
        token_ownership::Entity::delete_many().exec(&self.txn).await?;
        Ok(())
    }

    async fn insert_transfers(&mut self, records: &[TransferRecord]) -> Result<u64, DbError> {
        if records.is_empty() {
            return Ok(0);
        }

        let models = records
            .iter()
            .map(|record| {
                Ok(transactions::ActiveModel {
                    hash: Set(record.hash.clone()),
                    block_number: Set(to_i64(record.block_number, "block_number")?),
                    time_stamp: Set(to_i64(record.timestamp, "time_stamp")?),
                    from_address: Set(record.from.clone()),
                    to_address: Set(record.to.clone()),
                    token_id: Set(record.token_id.clone()),
                    token_name: Set(record.token_name.clone()),
                    token_symbol: Set(record.token_symbol.clone()),
                    contract_address: Set(record.contract_address.clone()),
                    ..Default::default()
                })
            })
            .collect::<Result<Vec<_>, DbError>>()?;

        let inserted = transactions::Entity::insert_many(models)
            .on_conflict(
                OnConflict::columns([transactions::Column::Hash, transactions::Column::TokenId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.txn)
            .await?;

        Ok(inserted)
    }

    async fn insert_ownership(
        &mut self,
        contract_address: &str,
        entries: &[OwnershipEntry],
    ) -> Result<(), DbError> {
        if entries.is_empty() {
            return Ok(());
        }

        let models: Vec<token_ownership::ActiveModel> = entries
            .iter()
            .map(|entry| token_ownership::ActiveModel {
                token_id: Set(entry.token_id.clone()),
                current_owner: Set(entry.current_owner.clone()),
                contract_address: Set(contract_address.to_string()),
                ..Default::default()
            })
            .collect();

        token_ownership::Entity::insert_many(models)
            .on_conflict(
                OnConflict::column(token_ownership::Column::TokenId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.txn)
            .await?;

        Ok(())
    }

    async fn insert_holders(&mut self, rows: &[Holder]) -> Result<(), DbError> {
        if rows.is_empty() {
            return Ok(());
        }

        let now = Utc::now();
        let models = rows
            .iter()
            .map(|holder| {
                Ok(holders::ActiveModel {
                    address: Set(holder.address.clone()),
                    nft_count: Set(to_i32(holder.nft_count as u64, "nft_count")?),
                    percentage: Set(holder.percentage),
                    updated_at: Set(now),
                    ..Default::default()
                })
            })
            .collect::<Result<Vec<_>, DbError>>()?;

        holders::Entity::insert_many(models)
            .on_conflict(
                OnConflict::column(holders::Column::Address)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.txn)
            .await?;

        Ok(())
    }

    async fn known_holder_addresses(&mut self) -> Result<HashSet<String>, DbError> {
        let addresses: Vec<String> = holder_history::Entity::find()
            .select_only()
            .column(holder_history::Column::Address)
            .into_tuple()
            .all(&self.txn)
            .await?;

        Ok(addresses.into_iter().collect())
    }

    async fn insert_history(&mut self, entries: &[HolderHistoryEntry]) -> Result<(), DbError> {
        if entries.is_empty() {
            return Ok(());
        }

        let models = entries
            .iter()
            .map(|entry| {
                Ok(holder_history::ActiveModel {
                    address: Set(entry.address.clone()),
                    nft_count: Set(to_i32(entry.nft_count as u64, "nft_count")?),
                    first_seen: Set(entry.first_seen),
                    last_seen: Set(entry.last_seen),
                    is_active: Set(entry.is_active),
                    ..Default::default()
                })
            })
            .collect::<Result<Vec<_>, DbError>>()?;

        holder_history::Entity::insert_many(models)
            .on_conflict(
                OnConflict::column(holder_history::Column::Address)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.txn)
            .await?;

        Ok(())
    }

    async fn count_transfers(&mut self) -> Result<u64, DbError> {
        Ok(transactions::Entity::find().count(&self.txn).await?)
    }

    async fn append_snapshot(&mut self, snapshot: &HolderSnapshot) -> Result<(), DbError> {
        let model = holder_snapshots::ActiveModel {
            timestamp: Set(snapshot.timestamp),
            total_holders: Set(to_i32(snapshot.total_holders, "total_holders")?),
            total_supply: Set(to_i64(snapshot.total_supply, "total_supply")?),
            total_transactions: Set(to_i64(snapshot.total_transactions, "total_transactions")?),
            unique_tokens_tracked: Set(to_i32(
                snapshot.unique_tokens_tracked,
                "unique_tokens_tracked",
            )?),
            coverage: Set(snapshot.coverage),
            ..Default::default()
        };

        holder_snapshots::Entity::insert(model)
            .exec_without_returning(&self.txn)
            .await?;

        Ok(())
    }

    async fn put_statistic(&mut self, key: &str, value: &str) -> Result<(), DbError> {
        let model = statistics::ActiveModel {
            key: Set(key.to_string()),
            value: Set(value.to_string()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        statistics::Entity::insert(model)
            .on_conflict(
                OnConflict::column(statistics::Column::Key)
                    .update_columns([statistics::Column::Value, statistics::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(&self.txn)
            .await?;

        Ok(())
    }

    async fn commit(self) -> Result<(), DbError> {
        self.txn.commit().await?;
        Ok(())
    }
}
