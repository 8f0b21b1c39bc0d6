use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};
use ward_core::{ErrorBody, FetchError};

use crate::transport::{HttpResponse, Transport};

/// What is being fetched, for messages and logs.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Subject {
    pub noun: &'static str,
    pub network_message: &'static str,
}

pub(crate) const PATIENT: Subject = Subject {
    noun: "patient",
    network_message: "Network error or error processing response while fetching patient.",
};

pub(crate) const PATIENTS: Subject = Subject {
    noun: "patients",
    network_message: "Network error or error processing response.",
};

pub(crate) const RECENT_PATIENTS: Subject = Subject {
    noun: "recent patients",
    network_message: "Network error or error processing response.",
};

/// GET `url` and decode a 2xx body as `T`.
///
/// Non-2xx answers become [`FetchError::Http`] carrying the body's `error`
/// field, or a generated message when the body has none. Transport failures
/// and undecodable 2xx bodies both become [`FetchError::Network`].
pub(crate) async fn get_json<T, D>(transport: &T, url: &str, subject: Subject) -> Result<D, FetchError>
where
    T: Transport,
    D: DeserializeOwned,
{
    debug!(%url, subject = subject.noun, "issuing request");
    let response = transport.get(url).await.map_err(|err| {
        error!(%url, error = %err, "{} request did not complete", subject.noun);
        FetchError::Network(subject.network_message.to_string())
    })?;

    if !response.is_success() {
        let err = http_error(&response, subject);
        warn!(%url, status = response.status, message = %err, "backend returned an error");
        return Err(err);
    }

    serde_json::from_str(&response.body).map_err(|err| {
        error!(%url, error = %err, "could not decode {} response", subject.noun);
        FetchError::Network(subject.network_message.to_string())
    })
}

fn http_error(response: &HttpResponse, subject: Subject) -> FetchError {
    let message = serde_json::from_str::<ErrorBody>(&response.body)
        .ok()
        .and_then(|body| body.error)
        .unwrap_or_else(|| format!("Error {} fetching {}.", response.status, subject.noun));
    FetchError::Http {
        status: response.status,
        message,
    }
}
