// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Configurable async fetch-and-notify component
//!
//! A [`Fetcher`] owns the configuration of one logical query against an
//! [`Endpoint`], runs it without blocking the caller, decodes the response
//! tolerantly and announces the outcome on two channels per outcome: a
//! single-slot [`Callback`] and a multi-listener [`Event`].
//!
//! # Run lifecycle
//!
//! ```text
//! Idle --run()--> Requesting --+--> Succeeded
//!                     |        +--> Failed
//!                     +--stop()--> Idle
//! ```
//!
//! Each run is tagged with a generation number. Starting a run or calling
//! [`Fetcher::stop`] bumps the generation and cancels the in-flight request, so a
//! completion that arrives for an older generation is discarded and never
//! reaches the notification channels.

use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use api_client::{
    FetchError, HttpResponse, HttpTransport, RequestHeaders, SessionProvider, TransportError,
    decode_tolerant,
};
use shared_types::Chain;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{
    endpoint::{DEFAULT_BASE_URL, Endpoint},
    notify::{Callback, Event},
};

/// Configuration of a fetch component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    /// Base URL the endpoint path is appended to
    pub base_url: String,
    /// Chain the query addresses
    pub chain: Chain,
    /// Resource identifier, e.g. a collection contract address
    pub identifier: String,
    /// Run automatically the first time the host activates the component
    pub run_on_activate: bool,
    /// Log every raw response body
    pub log_raw_response: bool,
    /// Log queries and failures
    pub log_errors: bool,
    /// Dispose of the component once a run has been dispatched
    pub destroy_at_end: bool,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            chain: Chain::default(),
            identifier: String::new(),
            run_on_activate: false,
            log_raw_response: false,
            log_errors: true,
            destroy_at_end: false,
        }
    }
}

/// Phase of the most recent run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchState {
    /// No run started, or the last run was stopped
    #[default]
    Idle,
    /// A request is in flight
    Requesting,
    /// The last run delivered a model
    Succeeded,
    /// The last run ended on the error channel
    Failed,
}

/// Execution mode of the host activating a component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostMode {
    /// Normal execution; auto-run is honoured
    Live,
    /// Passive inspection, e.g. an editor preview; auto-run never fires
    Inspect,
}

/// Per-run snapshot taken when the run starts
#[derive(Debug, Clone)]
struct RunContext {
    generation: u64,
    url: String,
    token: CancellationToken,
    log_raw_response: bool,
    log_errors: bool,
    destroy_at_end: bool,
}

#[derive(Debug)]
struct Inner<M> {
    settings: FetchSettings,
    request_url: Option<String>,
    model: Option<M>,
    state: FetchState,
    generation: u64,
    in_flight: Option<CancellationToken>,
    activated: bool,
    disposed: bool,
}

struct Shared<E: Endpoint, H> {
    endpoint: E,
    transport: H,
    session: Arc<dyn SessionProvider>,
    inner: Mutex<Inner<E::Model>>,
    on_complete: Callback<E::Model>,
    on_error: Callback<FetchError>,
    after_success: Event,
    after_error: Event,
}

/// Fetch-and-notify component for a single endpoint query
///
/// Setters take `&self` and return `&Self`, so configuration can be chained
/// and changed between runs:
///
/// ```rust,no_run
/// use std::sync::Arc;
///
/// use api_client::Session;
/// use external_apis::{
///     CollectionEndpoint, Fetcher, ReqwestTransport, ReqwestTransportConfig,
/// };
/// use shared_types::Chain;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let session = Arc::new(Session::initialise("api-key", "sdk"));
/// let transport = ReqwestTransport::new(ReqwestTransportConfig::default())?;
///
/// let fetcher = Fetcher::new(CollectionEndpoint, transport, session);
/// fetcher
///     .set_chain(Chain::Ethereum)
///     .set_parameters(Some("0x1234567890123456789012345678901234567890"))
///     .on_complete(|collection| println!("collection: {}", collection.name))
///     .on_error(|error| eprintln!("lookup failed: {error}"));
///
/// // Returns the previously stored model; the new one arrives via the callbacks.
/// let _previous = fetcher.run();
/// # Ok(())
/// # }
/// ```
pub struct Fetcher<E: Endpoint, H: HttpTransport> {
    shared: Arc<Shared<E, H>>,
    detached: bool,
}

impl<E, H> Fetcher<E, H>
where
    E: Endpoint,
    H: HttpTransport + 'static,
{
    /// Create a component with default settings
    pub fn new(endpoint: E, transport: H, session: Arc<dyn SessionProvider>) -> Self {
        Self::with_settings(endpoint, transport, session, FetchSettings::default())
    }

    /// Create a component with explicit settings
    pub fn with_settings(
        endpoint: E,
        transport: H,
        session: Arc<dyn SessionProvider>,
        settings: FetchSettings,
    ) -> Self {
        let inner = Inner {
            settings,
            request_url: None,
            model: None,
            state: FetchState::Idle,
            generation: 0,
            in_flight: None,
            activated: false,
            disposed: false,
        };

        Self {
            shared: Arc::new(Shared {
                endpoint,
                transport,
                session,
                inner: Mutex::new(inner),
                on_complete: Callback::new(),
                on_error: Callback::new(),
                after_success: Event::new(),
                after_error: Event::new(),
            }),
            detached: false,
        }
    }

    /// Create a one-shot component for code-driven use
    ///
    /// Auto-run and error logging are off. With `destroy_at_end` the component
    /// disposes of itself after its first run has been dispatched.
    pub fn initialize(
        endpoint: E,
        transport: H,
        session: Arc<dyn SessionProvider>,
        destroy_at_end: bool,
    ) -> Self {
        let settings = FetchSettings {
            run_on_activate: false,
            log_errors: false,
            destroy_at_end,
            ..FetchSettings::default()
        };
        Self::with_settings(endpoint, transport, session, settings)
    }

    /// Set the resource identifier; `None` keeps the current one
    pub fn set_parameters(&self, identifier: Option<&str>) -> &Self {
        if let Some(identifier) = identifier {
            self.shared.lock().settings.identifier = identifier.to_string();
        }
        self
    }

    /// Set the chain to query
    pub fn set_chain(&self, chain: Chain) -> &Self {
        self.shared.lock().settings.chain = chain;
        self
    }

    /// Set the base URL the endpoint path is appended to
    pub fn set_base_url(&self, base_url: impl Into<String>) -> &Self {
        self.shared.lock().settings.base_url = base_url.into();
        self
    }

    /// Enable or disable the run on first live activation
    pub fn set_run_on_activate(&self, enabled: bool) -> &Self {
        self.shared.lock().settings.run_on_activate = enabled;
        self
    }

    /// Enable or disable raw response logging
    pub fn set_log_raw_response(&self, enabled: bool) -> &Self {
        self.shared.lock().settings.log_raw_response = enabled;
        self
    }

    /// Enable or disable query and error logging
    pub fn set_log_errors(&self, enabled: bool) -> &Self {
        self.shared.lock().settings.log_errors = enabled;
        self
    }

    /// Dispose of the component after the next dispatched run
    pub fn set_destroy_at_end(&self, enabled: bool) -> &Self {
        self.shared.lock().settings.destroy_at_end = enabled;
        self
    }

    /// Register the success callback, replacing any previous one
    pub fn on_complete<F>(&self, callback: F) -> &Self
    where
        F: Fn(&E::Model) + Send + Sync + 'static,
    {
        self.shared.on_complete.set(callback);
        self
    }

    /// Register the error callback, replacing any previous one
    pub fn on_error<F>(&self, callback: F) -> &Self
    where
        F: Fn(&FetchError) + Send + Sync + 'static,
    {
        self.shared.on_error.set(callback);
        self
    }

    /// Broadcast event fired after every successful run
    pub fn after_success(&self) -> &Event {
        &self.shared.after_success
    }

    /// Broadcast event fired after every failed run
    pub fn after_error(&self) -> &Event {
        &self.shared.after_error
    }

    /// Notify the component that its host became active
    ///
    /// Starts a run the first time this is called in [`HostMode::Live`] if
    /// auto-run is enabled. Returns whether a run was started.
    pub fn activate(&self, mode: HostMode) -> bool {
        if mode != HostMode::Live {
            return false;
        }

        let should_run = {
            let mut inner = self.shared.lock();
            let first = !inner.activated;
            inner.activated = true;
            first && inner.settings.run_on_activate
        };

        if should_run {
            self.run();
        }
        should_run
    }

    /// Start a run for the current configuration
    ///
    /// Any in-flight run is superseded. The return value is the model stored
    /// before this call; the fetched model is delivered through
    /// [`Fetcher::on_complete`] and [`Fetcher::after_success`]. Failures never
    /// surface here, only on the error channel.
    pub fn run(&self) -> Option<E::Model> {
        let (previous, context) = {
            let mut inner = self.shared.lock();
            if inner.disposed {
                warn!(endpoint = E::NAME, "run ignored, component was disposed");
                return None;
            }

            let url = self.shared.endpoint.build_url(
                &inner.settings.base_url,
                inner.settings.chain,
                &inner.settings.identifier,
            );

            if let Some(token) = inner.in_flight.take() {
                debug!(endpoint = E::NAME, "superseding in-flight run");
                token.cancel();
            }

            inner.generation += 1;
            let token = CancellationToken::new();
            inner.in_flight = Some(token.clone());
            inner.request_url = Some(url.clone());
            inner.state = FetchState::Requesting;

            if inner.settings.log_errors {
                info!(
                    endpoint = E::NAME,
                    identifier = inner.settings.identifier,
                    chain = %inner.settings.chain,
                    "querying endpoint"
                );
            }

            let context = RunContext {
                generation: inner.generation,
                url,
                token,
                log_raw_response: inner.settings.log_raw_response,
                log_errors: inner.settings.log_errors,
                destroy_at_end: inner.settings.destroy_at_end,
            };
            (inner.model.clone(), context)
        };

        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn(Arc::clone(&self.shared).execute(context));
            }
            Err(_) => self
                .shared
                .finish(&context, Err(FetchError::RuntimeUnavailable)),
        }

        previous
    }

    /// Cancel the in-flight run without notifying either channel
    pub fn stop(&self) {
        let mut inner = self.shared.lock();
        inner.generation += 1;
        if let Some(token) = inner.in_flight.take() {
            token.cancel();
            inner.state = FetchState::Idle;
            debug!(endpoint = E::NAME, "in-flight run stopped");
        }
    }

    /// Start a run and hand ownership of the component to it
    ///
    /// The component disposes of itself once the outcome has been dispatched.
    pub fn run_detached(mut self) {
        self.detached = true;
        self.set_destroy_at_end(true);
        self.run();
    }

    /// Release callbacks, listeners and the stored model, and cancel any run
    ///
    /// Later calls to [`Fetcher::run`] are ignored.
    pub fn dispose(&self) {
        self.shared.dispose();
    }

    /// Whether the component has been disposed
    pub fn is_disposed(&self) -> bool {
        self.shared.lock().disposed
    }

    /// Model stored by the last successful run
    pub fn model(&self) -> Option<E::Model> {
        self.shared.lock().model.clone()
    }

    /// URL resolved by the most recent run
    pub fn request_url(&self) -> Option<String> {
        self.shared.lock().request_url.clone()
    }

    /// Phase of the most recent run
    pub fn state(&self) -> FetchState {
        self.shared.lock().state
    }

    /// Current configuration
    pub fn settings(&self) -> FetchSettings {
        self.shared.lock().settings.clone()
    }

    /// Configured chain
    pub fn chain(&self) -> Chain {
        self.shared.lock().settings.chain
    }

    /// Configured identifier
    pub fn identifier(&self) -> String {
        self.shared.lock().settings.identifier.clone()
    }

    /// The endpoint this component queries
    pub fn endpoint(&self) -> &E {
        &self.shared.endpoint
    }
}

impl<E: Endpoint, H: HttpTransport> Drop for Fetcher<E, H> {
    fn drop(&mut self) {
        if !self.detached {
            self.shared.dispose();
        }
    }
}

impl<E: Endpoint, H: HttpTransport> fmt::Debug for Fetcher<E, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.shared.lock();
        f.debug_struct("Fetcher")
            .field("endpoint", &E::NAME)
            .field("transport", &self.shared.transport.name())
            .field("settings", &inner.settings)
            .field("state", &inner.state)
            .field("generation", &inner.generation)
            .field("disposed", &inner.disposed)
            .finish_non_exhaustive()
    }
}

impl<E: Endpoint, H: HttpTransport> Shared<E, H> {
    fn lock(&self) -> MutexGuard<'_, Inner<E::Model>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn execute(self: Arc<Self>, context: RunContext) {
        let headers = RequestHeaders::from_session(self.session.as_ref());

        let result = tokio::select! {
            biased;
            () = context.token.cancelled() => {
                debug!(endpoint = E::NAME, generation = context.generation, "run cancelled");
                return;
            }
            result = self.transport.get(&context.url, &headers) => result,
        };

        let outcome = self.handle_response(&context, result);
        self.finish(&context, outcome);
    }

    fn handle_response(
        &self,
        context: &RunContext,
        result: Result<HttpResponse, TransportError>,
    ) -> Result<E::Model, FetchError> {
        let response = result?;

        if context.log_raw_response {
            info!(
                endpoint = E::NAME,
                status = response.status,
                body = %response.text(),
                "raw response"
            );
        }

        if !response.is_success() {
            return Err(FetchError::HttpStatus {
                status: response.status,
                body: response.text().into_owned(),
            });
        }

        decode_tolerant(&response.body).map_err(|source| FetchError::Decode {
            source,
            body: response.text().into_owned(),
        })
    }

    fn finish(&self, context: &RunContext, outcome: Result<E::Model, FetchError>) {
        {
            let mut inner = self.lock();
            if inner.disposed || inner.generation != context.generation {
                debug!(
                    endpoint = E::NAME,
                    generation = context.generation,
                    current = inner.generation,
                    "discarding stale completion"
                );
                return;
            }

            inner.in_flight = None;
            match &outcome {
                Ok(model) => {
                    inner.model = Some(model.clone());
                    inner.state = FetchState::Succeeded;
                }
                Err(_) => {
                    inner.model = None;
                    inner.state = FetchState::Failed;
                }
            }
        }

        match outcome {
            Ok(model) => {
                self.on_complete.invoke(&model);
                self.after_success.invoke();
                if context.log_errors {
                    info!(endpoint = E::NAME, url = context.url, "response: success");
                }
            }
            Err(error) => {
                self.on_error.invoke(&error);
                if context.log_errors {
                    warn!(
                        endpoint = E::NAME,
                        url = context.url,
                        status = error.status_code(),
                        %error,
                        "request failed"
                    );
                }
                self.after_error.invoke();
            }
        }

        if context.destroy_at_end {
            self.dispose();
        }
    }

    fn dispose(&self) {
        {
            let mut inner = self.lock();
            if inner.disposed {
                return;
            }
            inner.disposed = true;
            inner.generation += 1;
            inner.model = None;
            inner.state = FetchState::Idle;
            if let Some(token) = inner.in_flight.take() {
                token.cancel();
            }
        }

        self.on_complete.clear();
        self.on_error.clear();
        self.after_success.remove_all_listeners();
        self.after_error.remove_all_listeners();
        debug!(endpoint = E::NAME, "component disposed");
    }
}
