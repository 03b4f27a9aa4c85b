// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod actor;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use clap::Parser;
use leavelink::{ApplyContext, State};
use leavelink_api::{
    ApiError, ApiResult, AuthorizationService, BankHolidaysRequest, BankHolidaysResponse,
    CreateProfileRequest, DeleteEventResponse, EventCostRequest, EventCostResponse, EventRequest,
    EventResponse, HouseholdBalancesResponse, LinkPartnerRequest, ListEventsResponse,
    PeriodRequest, PeriodResponse, ProfileInfo, ProfileResponse, UpdateSettingsRequest,
    calculate_event_cost, create_event, create_profile, delete_event, get_household_balances,
    get_period, get_profile, link_partner, list_bank_holidays, list_events, unlink_partner,
    update_event, update_settings,
};
use leavelink_domain::{BankHoliday, EventId, OverlapPolicy, UserId};
use leavelink_holidays::{
    BankHolidayCache, DEFAULT_DIVISION, DEFAULT_FEED_URL, DEFAULT_FETCH_TIMEOUT, GovUkSource,
    HolidayError, HolidaySource,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::actor::ActingUser;

/// `LeaveLink` Server - HTTP server for household leave planning
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// URL of the gov.uk style bank holiday feed
    #[arg(long, default_value = DEFAULT_FEED_URL)]
    holiday_feed_url: String,

    /// Division of the feed to read
    #[arg(long, default_value = DEFAULT_DIVISION)]
    holiday_division: String,

    /// Seconds a single feed request may take before it is abandoned
    #[arg(long, default_value_t = DEFAULT_FETCH_TIMEOUT.as_secs())]
    holiday_fetch_timeout_secs: u64,

    /// Hours a fetched holiday list stays fresh
    #[arg(long, default_value_t = 24)]
    holiday_cache_ttl_hours: i64,

    /// How same-type overlaps are judged: `strict` or `half-day-aware`
    #[arg(long, default_value = "strict")]
    overlap_policy: OverlapPolicy,
}

/// Application state shared across handlers.
///
/// The household store and the holiday cache sit behind separate locks so a
/// slow feed refresh never blocks bookings for other households.
struct AppState<S> {
    /// Every profile and event.
    store: Arc<Mutex<State>>,
    /// Public holidays used when costing leave.
    holidays: Arc<BankHolidayCache<S>>,
    /// How same-type overlaps are judged.
    overlap_policy: OverlapPolicy,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            holidays: Arc::clone(&self.holidays),
            overlap_policy: self.overlap_policy,
        }
    }
}

impl<S: HolidaySource> AppState<S> {
    async fn bank_holidays(&self) -> Result<Vec<BankHoliday>, HttpError> {
        Ok(self.holidays.get().await?)
    }
}

/// Generic error response.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal API error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<HolidayError> for HttpError {
    fn from(err: HolidayError) -> Self {
        warn!(error = %err, "Bank holidays unavailable");
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: format!("Bank holidays unavailable: {err}"),
        }
    }
}

fn apply_context<'a, S>(
    app_state: &AppState<S>,
    actor: UserId,
    bank_holidays: &'a [BankHoliday],
) -> ApplyContext<'a> {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    ApplyContext {
        actor,
        now,
        bank_holidays,
        overlap_policy: app_state.overlap_policy,
    }
}

/// Handler for GET `/profiles/{id}` endpoint.
async fn handle_get_profile<S: HolidaySource>(
    AxumState(app_state): AxumState<AppState<S>>,
    ActingUser(actor): ActingUser,
    Path(id): Path<String>,
) -> Result<Json<ProfileInfo>, HttpError> {
    let user_id: UserId = UserId::new(&id);
    let store = app_state.store.lock().await;
    AuthorizationService::authorize_household_read(&store, &actor, &user_id)?;
    Ok(Json(get_profile(&store, &user_id)?))
}

/// Handler for POST `/profiles` endpoint.
///
/// Creates the acting user's profile.
async fn handle_create_profile<S: HolidaySource>(
    AxumState(app_state): AxumState<AppState<S>>,
    ActingUser(actor): ActingUser,
    Json(req): Json<CreateProfileRequest>,
) -> Result<(StatusCode, Json<ProfileResponse>), HttpError> {
    info!(actor = %actor, "Handling create_profile request");

    let ctx: ApplyContext<'_> = apply_context(&app_state, actor, &[]);
    let mut store = app_state.store.lock().await;
    let result: ApiResult<ProfileResponse> = create_profile(&store, req, &ctx)?;
    *store = result.new_state;

    Ok((StatusCode::CREATED, Json(result.response)))
}

/// Handler for PUT `/profiles/{id}/settings` endpoint.
async fn handle_update_settings<S: HolidaySource>(
    AxumState(app_state): AxumState<AppState<S>>,
    ActingUser(actor): ActingUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateSettingsRequest>,
) -> Result<Json<ProfileResponse>, HttpError> {
    AuthorizationService::authorize_profile_change(&actor, &UserId::new(&id))?;
    info!(actor = %actor, "Handling update_settings request");

    let ctx: ApplyContext<'_> = apply_context(&app_state, actor, &[]);
    let mut store = app_state.store.lock().await;
    let result: ApiResult<ProfileResponse> = update_settings(&store, req, &ctx)?;
    *store = result.new_state;

    Ok(Json(result.response))
}

/// Handler for POST `/profiles/{id}/partner` endpoint.
async fn handle_link_partner<S: HolidaySource>(
    AxumState(app_state): AxumState<AppState<S>>,
    ActingUser(actor): ActingUser,
    Path(id): Path<String>,
    Json(req): Json<LinkPartnerRequest>,
) -> Result<Json<ProfileResponse>, HttpError> {
    AuthorizationService::authorize_profile_change(&actor, &UserId::new(&id))?;
    info!(actor = %actor, partner_id = %req.partner_id, "Handling link_partner request");

    let ctx: ApplyContext<'_> = apply_context(&app_state, actor, &[]);
    let mut store = app_state.store.lock().await;
    let result: ApiResult<ProfileResponse> = link_partner(&store, &req, &ctx)?;
    *store = result.new_state;

    Ok(Json(result.response))
}

/// Handler for DELETE `/profiles/{id}/partner` endpoint.
async fn handle_unlink_partner<S: HolidaySource>(
    AxumState(app_state): AxumState<AppState<S>>,
    ActingUser(actor): ActingUser,
    Path(id): Path<String>,
) -> Result<Json<ProfileResponse>, HttpError> {
    AuthorizationService::authorize_profile_change(&actor, &UserId::new(&id))?;
    info!(actor = %actor, "Handling unlink_partner request");

    let ctx: ApplyContext<'_> = apply_context(&app_state, actor, &[]);
    let mut store = app_state.store.lock().await;
    let result: ApiResult<ProfileResponse> = unlink_partner(&store, &ctx)?;
    *store = result.new_state;

    Ok(Json(result.response))
}

/// Handler for GET `/households/{id}/balances` endpoint.
async fn handle_household_balances<S: HolidaySource>(
    AxumState(app_state): AxumState<AppState<S>>,
    ActingUser(actor): ActingUser,
    Path(id): Path<String>,
) -> Result<Json<HouseholdBalancesResponse>, HttpError> {
    let user_id: UserId = UserId::new(&id);
    {
        let store = app_state.store.lock().await;
        AuthorizationService::authorize_household_read(&store, &actor, &user_id)?;
    }

    let bank_holidays: Vec<BankHoliday> = app_state.bank_holidays().await?;
    let today = OffsetDateTime::now_utc().date();

    // Membership may have changed while the feed was fetched
    let store = app_state.store.lock().await;
    AuthorizationService::authorize_household_read(&store, &actor, &user_id)?;
    Ok(Json(get_household_balances(
        &store,
        &user_id,
        &bank_holidays,
        today,
    )?))
}

/// Handler for GET `/events` endpoint.
///
/// Lists the acting user's household events.
async fn handle_list_events<S: HolidaySource>(
    AxumState(app_state): AxumState<AppState<S>>,
    ActingUser(actor): ActingUser,
) -> Result<Json<ListEventsResponse>, HttpError> {
    let store = app_state.store.lock().await;
    Ok(Json(list_events(&store, &actor)?))
}

/// Handler for POST `/events` endpoint.
///
/// Books a new event under a freshly generated id.
async fn handle_create_event<S: HolidaySource>(
    AxumState(app_state): AxumState<AppState<S>>,
    ActingUser(actor): ActingUser,
    Json(req): Json<EventRequest>,
) -> Result<(StatusCode, Json<EventResponse>), HttpError> {
    let event_id: EventId = EventId::new(&uuid::Uuid::new_v4().to_string());
    info!(
        actor = %actor,
        event_id = %event_id,
        event_type = %req.event_type,
        start_date = %req.start_date,
        end_date = %req.end_date,
        "Handling create_event request"
    );

    let bank_holidays: Vec<BankHoliday> = app_state.bank_holidays().await?;
    let ctx: ApplyContext<'_> = apply_context(&app_state, actor, &bank_holidays);
    let mut store = app_state.store.lock().await;
    let result: ApiResult<EventResponse> = create_event(&store, &event_id, req, &ctx)?;
    *store = result.new_state;

    Ok((StatusCode::CREATED, Json(result.response)))
}

/// Handler for PUT `/events/{id}` endpoint.
async fn handle_update_event<S: HolidaySource>(
    AxumState(app_state): AxumState<AppState<S>>,
    ActingUser(actor): ActingUser,
    Path(id): Path<String>,
    Json(req): Json<EventRequest>,
) -> Result<Json<EventResponse>, HttpError> {
    let event_id: EventId = EventId::new(&id);
    info!(actor = %actor, event_id = %event_id, "Handling update_event request");

    let bank_holidays: Vec<BankHoliday> = app_state.bank_holidays().await?;
    let ctx: ApplyContext<'_> = apply_context(&app_state, actor, &bank_holidays);
    let mut store = app_state.store.lock().await;
    let result: ApiResult<EventResponse> = update_event(&store, &event_id, req, &ctx)?;
    *store = result.new_state;

    Ok(Json(result.response))
}

/// Handler for DELETE `/events/{id}` endpoint.
async fn handle_delete_event<S: HolidaySource>(
    AxumState(app_state): AxumState<AppState<S>>,
    ActingUser(actor): ActingUser,
    Path(id): Path<String>,
) -> Result<Json<DeleteEventResponse>, HttpError> {
    let event_id: EventId = EventId::new(&id);
    info!(actor = %actor, event_id = %event_id, "Handling delete_event request");

    let ctx: ApplyContext<'_> = apply_context(&app_state, actor, &[]);
    let mut store = app_state.store.lock().await;
    let result: ApiResult<DeleteEventResponse> = delete_event(&store, &event_id, &ctx)?;
    *store = result.new_state;

    Ok(Json(result.response))
}

/// Handler for POST `/events/cost` endpoint.
async fn handle_event_cost<S: HolidaySource>(
    AxumState(app_state): AxumState<AppState<S>>,
    ActingUser(actor): ActingUser,
    Json(req): Json<EventCostRequest>,
) -> Result<Json<EventCostResponse>, HttpError> {
    debug!(
        actor = %actor,
        start_date = %req.start_date,
        end_date = %req.end_date,
        "Handling event cost request"
    );
    let bank_holidays: Vec<BankHoliday> = app_state.bank_holidays().await?;
    Ok(Json(calculate_event_cost(&req, &bank_holidays)?))
}

/// Handler for GET `/periods` endpoint.
async fn handle_get_period(
    Query(req): Query<PeriodRequest>,
) -> Result<Json<PeriodResponse>, HttpError> {
    Ok(Json(get_period(&req, OffsetDateTime::now_utc().date())?))
}

/// Handler for GET `/bank_holidays` endpoint.
async fn handle_list_bank_holidays<S: HolidaySource>(
    AxumState(app_state): AxumState<AppState<S>>,
    Query(req): Query<BankHolidaysRequest>,
) -> Result<Json<BankHolidaysResponse>, HttpError> {
    let bank_holidays: Vec<BankHoliday> = app_state.bank_holidays().await?;
    Ok(Json(list_bank_holidays(&req, &bank_holidays)?))
}

/// Builds the application router with all endpoints.
fn build_router<S: HolidaySource + 'static>(app_state: AppState<S>) -> Router {
    Router::new()
        .route("/profiles", post(handle_create_profile::<S>))
        .route("/profiles/{id}", get(handle_get_profile::<S>))
        .route("/profiles/{id}/settings", put(handle_update_settings::<S>))
        .route(
            "/profiles/{id}/partner",
            post(handle_link_partner::<S>).delete(handle_unlink_partner::<S>),
        )
        .route(
            "/households/{id}/balances",
            get(handle_household_balances::<S>),
        )
        .route(
            "/events",
            get(handle_list_events::<S>).post(handle_create_event::<S>),
        )
        .route("/events/cost", post(handle_event_cost::<S>))
        .route(
            "/events/{id}",
            put(handle_update_event::<S>).delete(handle_delete_event::<S>),
        )
        .route("/periods", get(handle_get_period))
        .route("/bank_holidays", get(handle_list_bank_holidays::<S>))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing LeaveLink Server");
    info!(
        url = %args.holiday_feed_url,
        division = %args.holiday_division,
        ttl_hours = args.holiday_cache_ttl_hours,
        fetch_timeout_secs = args.holiday_fetch_timeout_secs,
        overlap_policy = ?args.overlap_policy,
        "Configured bank holiday feed"
    );

    let source: GovUkSource = GovUkSource::new(
        &args.holiday_feed_url,
        &args.holiday_division,
        std::time::Duration::from_secs(args.holiday_fetch_timeout_secs),
    )?;
    let app_state: AppState<GovUkSource> = AppState {
        store: Arc::new(Mutex::new(State::new())),
        holidays: Arc::new(BankHolidayCache::new(
            source,
            time::Duration::hours(args.holiday_cache_ttl_hours),
        )),
        overlap_policy: args.overlap_policy,
    };

    // Warm the cache; a failure here is retried on first use
    if let Err(e) = app_state.holidays.get().await {
        warn!(error = %e, "Initial bank holiday fetch failed");
    }

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
