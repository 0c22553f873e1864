//! Drive a [`Page`] directly against a [`Backend`].
//!
//! The gate check always resolves before any fetch is issued; profile and format fetches issued
//! together run concurrently.

use std::sync::Arc;

use tracing::debug;

use crate::{
    api::Backend,
    page::{Effect, Event, Fetch, Page},
};

/// Activate `page` and run the resulting load to completion.
///
/// Returns the effects the backend can't carry out (navigation).
pub async fn activate<B>(page: &mut Page, backend: &B) -> Vec<Effect>
where
    B: Backend + ?Sized,
{
    let effects = page.activate();
    run(page, backend, effects).await
}

/// Execute `effects` and everything they lead to.
pub async fn run<B>(page: &mut Page, backend: &B, mut effects: Vec<Effect>) -> Vec<Effect>
where
    B: Backend + ?Sized,
{
    let mut unhandled = Vec::new();

    while !effects.is_empty() {
        let mut gate = None;
        let mut profiles = None;
        let mut formats = None;

        for effect in effects.drain(..) {
            match effect {
                Effect::CheckGate(activation) => gate = Some(activation),
                Effect::FetchProfiles(fetch) => profiles = Some(fetch),
                Effect::FetchFormats(fetch) => formats = Some(fetch),
                Effect::Navigate(_) => unhandled.push(effect),
            }
        }

        if let Some(activation) = gate {
            let result = backend.git_status().await.map_err(Arc::new);
            effects.extend(page.handle(Event::GateChecked(activation, result)));
        }

        let (profiles, formats) = tokio::join!(
            fetch_profiles(backend, profiles),
            fetch_formats(backend, formats)
        );
        for event in profiles.into_iter().chain(formats) {
            effects.extend(page.handle(event));
        }
    }

    unhandled
}

async fn fetch_profiles<B>(backend: &B, fetch: Option<Fetch>) -> Option<Event>
where
    B: Backend + ?Sized,
{
    let fetch = fetch?;
    debug!("Fetching profiles for {fetch}");
    let result = backend.profiles().await.map_err(Arc::new);
    Some(Event::ProfilesFetched(fetch, result))
}

async fn fetch_formats<B>(backend: &B, fetch: Option<Fetch>) -> Option<Event>
where
    B: Backend + ?Sized,
{
    let fetch = fetch?;
    debug!("Fetching formats for {fetch}");
    let result = backend.formats().await.map_err(Arc::new);
    Some(Event::FormatsFetched(fetch, result))
}
