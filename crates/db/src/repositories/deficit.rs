//! Deficit adjustment.
//!
//! Runs on the caller's connection and has no atomicity of its own: award
//! and transfer call it inside their transaction after their entries are
//! written.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use creditledger_core::ledger::{
    BalanceKey, CreditError, CreditTransactionType, OutstandingDeficit, ReductionPlan,
    ReferenceData, ReportSummary, SYSTEM_USER, plan_deficit_reductions, select_governing_report,
};
use creditledger_shared::types::{DeficitId, ModelYearReportId, OrganizationId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{debug, info};
use uuid::Uuid;

use super::ledger::{NewEntry, db_err, insert_entry, load_credit_balances};
use crate::entities::{
    model_year_report_credit_transactions, model_year_reports, model_years,
    organization_deficits, sea_orm_active_enums::ModelYearReportStatus,
};

/// Pays down `organization`'s deficits from positive balances in the credit
/// class chosen on its latest assessed model-year report.
///
/// Returns `None` when the organization has no assessed report; nothing is
/// written then. Otherwise returns the applied plan, which may be empty.
///
/// # Errors
///
/// Returns `CreditError::MissingReferenceData` if the report's reduction
/// selection is absent or names an unknown credit class, or if a report or
/// deficit points at an unknown model year. Returns `CreditError::Database`
/// if a query fails.
pub async fn adjust_deficits<C: ConnectionTrait>(
    conn: &C,
    reference: &ReferenceData,
    organization: OrganizationId,
    now: DateTime<Utc>,
) -> Result<Option<ReductionPlan>, CreditError> {
    // Read per call: model years are added without a restart.
    let year_names = load_model_year_names(conn).await?;

    let assessed = model_year_reports::Entity::find()
        .filter(model_year_reports::Column::OrganizationId.eq(organization.into_inner()))
        .filter(model_year_reports::Column::ValidationStatus.eq(ModelYearReportStatus::Assessed))
        .order_by_asc(model_year_reports::Column::CreatedAt)
        .order_by_asc(model_year_reports::Column::Id)
        .all(conn)
        .await
        .map_err(db_err)?;

    let summaries = assessed
        .into_iter()
        .map(|report| {
            Ok(ReportSummary {
                id: ModelYearReportId::from_uuid(report.id),
                model_year_name: model_year_name(&year_names, report.model_year_id)?,
                credit_reduction_selection: report.credit_reduction_selection,
            })
        })
        .collect::<Result<Vec<_>, CreditError>>()?;

    let Some(report) = select_governing_report(summaries) else {
        debug!(
            organization_id = %organization,
            "No assessed model year report, skipping deficit adjustment"
        );
        return Ok(None);
    };

    let selection = report
        .credit_reduction_selection
        .as_deref()
        .ok_or_else(|| {
            CreditError::MissingReferenceData(format!(
                "credit reduction selection on report {}",
                report.id
            ))
        })?;
    let credit_class_id = reference.credit_class_id(selection)?;

    let balances = load_credit_balances(conn, organization).await?;

    let deficits = organization_deficits::Entity::find()
        .filter(organization_deficits::Column::OrganizationId.eq(organization.into_inner()))
        .filter(organization_deficits::Column::CreditClassId.eq(credit_class_id))
        .order_by_asc(organization_deficits::Column::CreatedAt)
        .order_by_asc(organization_deficits::Column::Id)
        .all(conn)
        .await
        .map_err(db_err)?
        .into_iter()
        .map(|d| {
            Ok(OutstandingDeficit {
                id: DeficitId::from_uuid(d.id),
                model_year_name: model_year_name(&year_names, d.model_year_id)?,
                credit_value: d.credit_value,
            })
        })
        .collect::<Result<Vec<_>, CreditError>>()?;

    let plan = plan_deficit_reductions(&balances, credit_class_id, deficits);
    let reduction_type_id = reference.transaction_type_id(CreditTransactionType::Reduction);

    for reduction in &plan.reductions {
        let entry = insert_entry(
            conn,
            NewEntry {
                credit_to: None,
                debit_from: Some(organization),
                key: BalanceKey::new(
                    reduction.model_year_id,
                    credit_class_id,
                    reduction.weight_class_id,
                ),
                number_of_credits: 1,
                credit_value: reduction.amount,
                total_value: reduction.amount,
                transaction_type_id: reduction_type_id,
                transaction_timestamp: now,
                user: SYSTEM_USER.to_string(),
            },
            now,
        )
        .await?;

        model_year_report_credit_transactions::ActiveModel {
            id: Set(Uuid::now_v7()),
            model_year_report_id: Set(report.id.into_inner()),
            credit_transaction_id: Set(entry.id),
            create_user: Set(SYSTEM_USER.to_string()),
            update_user: Set(SYSTEM_USER.to_string()),
            created_at: Set(now.into()),
        }
        .insert(conn)
        .await
        .map_err(db_err)?;
    }

    for deficit in &plan.updated_deficits {
        organization_deficits::ActiveModel {
            id: Set(deficit.id.into_inner()),
            credit_value: Set(deficit.credit_value),
            update_user: Set(SYSTEM_USER.to_string()),
            updated_at: Set(now.into()),
            ..Default::default()
        }
        .update(conn)
        .await
        .map_err(db_err)?;
    }

    info!(
        organization_id = %organization,
        report_id = %report.id,
        reductions = plan.reductions.len(),
        total_reduction = %plan.total_reduction,
        "Adjusted deficits"
    );

    Ok(Some(plan))
}

async fn load_model_year_names<C: ConnectionTrait>(
    conn: &C,
) -> Result<HashMap<i32, String>, CreditError> {
    Ok(model_years::Entity::find()
        .all(conn)
        .await
        .map_err(db_err)?
        .into_iter()
        .map(|y| (y.id, y.name))
        .collect())
}

fn model_year_name(
    names: &HashMap<i32, String>,
    model_year_id: i32,
) -> Result<String, CreditError> {
    names
        .get(&model_year_id)
        .cloned()
        .ok_or_else(|| CreditError::MissingReferenceData(format!("model year {model_year_id}")))
}
