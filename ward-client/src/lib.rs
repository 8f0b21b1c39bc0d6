//! Fetch side of the ward viewer: detail search, roster controller and the
//! recent-patients loader, all written against the [`Transport`] and
//! [`Timer`] seams so they run the same in the browser and natively.

mod fetcher;
mod http;
mod recent;
mod roster;
pub mod transport;

pub use fetcher::PatientFetcher;
pub use recent::fetch_recent_patients;
pub use roster::RosterController;
pub use transport::{HttpResponse, Timer, Transport, TransportError};

#[cfg(not(target_arch = "wasm32"))]
pub use transport::{ReqwestTransport, TokioTimer};
