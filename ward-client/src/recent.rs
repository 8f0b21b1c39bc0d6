use tracing::error;
use ward_core::{Endpoints, FetchError, PatientRecord, RecentRow};

use crate::http::{get_json, RECENT_PATIENTS};
use crate::transport::Transport;

/// Rows for the dashboard's recent-patients table.
///
/// Failures are logged here as well as returned; the dashboard keeps the
/// table empty rather than showing an error.
pub async fn fetch_recent_patients<T: Transport>(
    transport: &T,
    endpoints: &Endpoints,
) -> Result<Vec<RecentRow>, FetchError> {
    let records: Vec<PatientRecord> =
        get_json(transport, &endpoints.recent_patients(), RECENT_PATIENTS)
            .await
            .inspect_err(|err| error!(error = %err, "error fetching recent patients"))?;

    Ok(records
        .iter()
        .map(|record| RecentRow::from_record(record, endpoints))
        .collect())
}
