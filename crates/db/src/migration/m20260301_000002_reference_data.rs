//! Seeds the fixed reference rows the ledger assumes exist.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Transaction types in reporting order. Ids follow position.
const TRANSACTION_TYPES: [&str; 5] = [
    "Validation",
    "Reduction",
    "Credit Transfer",
    "Credit Adjustment Validation",
    "Credit Adjustment Reduction",
];

const CREDIT_CLASSES: [&str; 2] = ["A", "B"];

const WEIGHT_CLASSES: [&str; 1] = ["LDV"];

const FIRST_MODEL_YEAR: i32 = 2019;
const LAST_MODEL_YEAR: i32 = 2030;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        seed(
            manager,
            CreditTransactionTypes::Table,
            CreditTransactionTypes::Id,
            CreditTransactionTypes::TransactionType,
            TRANSACTION_TYPES.iter().map(ToString::to_string),
        )
        .await?;
        seed(
            manager,
            CreditClasses::Table,
            CreditClasses::Id,
            CreditClasses::CreditClass,
            CREDIT_CLASSES.iter().map(ToString::to_string),
        )
        .await?;
        seed(
            manager,
            WeightClasses::Table,
            WeightClasses::Id,
            WeightClasses::WeightClassCode,
            WEIGHT_CLASSES.iter().map(ToString::to_string),
        )
        .await?;
        seed(
            manager,
            ModelYears::Table,
            ModelYears::Id,
            ModelYears::Name,
            (FIRST_MODEL_YEAR..=LAST_MODEL_YEAR).map(|year| year.to_string()),
        )
        .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            ModelYears::Table.into_iden(),
            WeightClasses::Table.into_iden(),
            CreditClasses::Table.into_iden(),
            CreditTransactionTypes::Table.into_iden(),
        ] {
            manager
                .exec_stmt(Query::delete().from_table(table).to_owned())
                .await?;
        }
        Ok(())
    }
}

/// Inserts `names` with ids 1, 2, 3, ... in iteration order.
async fn seed<T, I, N>(
    manager: &SchemaManager<'_>,
    table: T,
    id: I,
    name: N,
    names: impl Iterator<Item = String>,
) -> Result<(), DbErr>
where
    T: IntoIden + 'static,
    I: IntoIden,
    N: IntoIden,
{
    let mut insert = Query::insert();
    insert.into_table(table).columns([id.into_iden(), name.into_iden()]);
    for (row_id, value) in (1..).zip(names) {
        insert
            .values([Expr::val(row_id).into(), Expr::val(value).into()])
            .map_err(|e| DbErr::Custom(e.to_string()))?;
    }
    manager.exec_stmt(insert).await
}

#[derive(DeriveIden)]
enum CreditTransactionTypes {
    Table,
    Id,
    TransactionType,
}

#[derive(DeriveIden)]
enum CreditClasses {
    Table,
    Id,
    CreditClass,
}

#[derive(DeriveIden)]
enum WeightClasses {
    Table,
    Id,
    WeightClassCode,
}

#[derive(DeriveIden)]
enum ModelYears {
    Table,
    Id,
    Name,
}
