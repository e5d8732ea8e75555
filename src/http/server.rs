use log::{debug, info};
use rouille::{Request, Response};
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};

use crate::{
    actions::{self, DashboardAction},
    catalog::{Catalog, CatalogStats},
    config::{HttpConfig, Onboarding},
    domain::{artist::Artist, id::SubmissionId, options},
    filter::FilterCriteria,
    http::error::ApiError,
    onboard::{ArtistForm, submission::Submission},
};

type Submissions = HashMap<SubmissionId, Submission>;

pub struct HttpServer {
    catalog: Arc<Catalog>,
    submissions: Arc<Mutex<Submissions>>,
    submit_delay: Duration,
    retain_settled: Duration,
    pub config: HttpConfig,
}

/// Drops registrations that settled or were cancelled at least `retention` ago.
fn evict_expired(submissions: &mut Submissions, now: Instant, retention: Duration) -> usize {
    let before = submissions.len();
    submissions.retain(|_, s| !s.is_expired(now, retention));
    before - submissions.len()
}

impl HttpServer {
    pub fn new(catalog: Catalog, config: HttpConfig, onboarding: &Onboarding) -> Self {
        Self {
            catalog: Arc::new(catalog),
            submissions: Arc::new(Mutex::new(HashMap::new())),
            submit_delay: onboarding.submit_delay(),
            retain_settled: onboarding.retain_settled(),
            config,
        }
    }

    pub fn run(self) {
        let addr = format!("{}:{}", self.config.bind_addr, self.config.port);
        rouille::start_server(addr, move |request| self.handle_request(request));
    }

    fn handle_request(&self, request: &Request) -> Response {
        Self::log_request(request);

        let response = rouille::router!(request,
            (GET) (/artists) => {
                self.handle_browse(request)
            },
            (GET) (/artists/{id: String}) => {
                self.respond(self.get_artist(&id))
            },
            (POST) (/artists/{id: String}/quote) => {
                self.respond(self.request_quote(&id))
            },
            (POST) (/artists/{id: String}/actions/{action: String}) => {
                self.respond(self.perform_action(&id, &action))
            },
            (GET) (/dashboard) => {
                self.handle_dashboard(request)
            },
            (GET) (/options) => {
                Response::json(&OptionsResponse::current())
            },
            (POST) (/onboard) => {
                self.respond(self.submit_registration(request))
            },
            (GET) (/onboard/{id: String}) => {
                self.respond(self.registration_state(&id))
            },
            (DELETE) (/onboard/{id: String}) => {
                self.respond(self.cancel_registration(&id))
            },
            _ => Response::empty_404()
        );

        info!("Response: {} {}", request.method(), response.status_code);
        response
    }

    fn log_request(request: &Request) {
        info!("{} {}", request.method(), request.url());
    }

    fn respond(&self, result: Result<Response, ApiError>) -> Response {
        match result {
            Ok(r) => r,
            Err(e) => {
                debug!("request failed with {}: {:?}", e.status_code(), e);
                e.into_response()
            }
        }
    }

    /// browse query parameters mirror the filter sidebar: category, location, priceRange, search
    fn criteria_from_query(request: &Request) -> FilterCriteria {
        let param = |name: &str| request.get_param(name).unwrap_or_default();
        FilterCriteria {
            category: param("category"),
            location: param("location"),
            price_range: param("priceRange"),
            search_term: param("search"),
        }
    }

    fn handle_browse(&self, request: &Request) -> Response {
        let criteria = Self::criteria_from_query(request);
        let artists = self.catalog.filter(&criteria);
        debug!(
            "browse with {} active filters -> {} artists",
            criteria.active_count(),
            artists.len()
        );

        Response::json(&BrowseResponse {
            count: artists.len(),
            total: self.catalog.artists().len(),
            filtered: criteria.is_active(),
            criteria,
            artists,
        })
    }

    fn handle_dashboard(&self, request: &Request) -> Response {
        let term = request.get_param("search").unwrap_or_default();

        Response::json(&DashboardResponse {
            stats: self.catalog.stats(),
            artists: self.catalog.search(&term),
        })
    }

    fn get_artist(&self, id: &str) -> Result<Response, ApiError> {
        let artist = self.catalog.get(id)?;
        Ok(Response::json(artist))
    }

    fn request_quote(&self, id: &str) -> Result<Response, ApiError> {
        let artist = self.catalog.get(id)?;
        Ok(Response::json(&MessageResponse {
            message: actions::request_quote(artist)?,
        }))
    }

    fn perform_action(&self, id: &str, action: &str) -> Result<Response, ApiError> {
        let action: DashboardAction = action
            .parse()
            .map_err(|e: anyhow::Error| ApiError::BadRequest(e.to_string()))?;
        let artist = self.catalog.get(id)?;
        Ok(Response::json(&MessageResponse {
            message: actions::action_message(action, artist),
        }))
    }

    fn lock_submissions(&self) -> Result<MutexGuard<'_, Submissions>, ApiError> {
        self.submissions.lock().map_err(|e| {
            ApiError::Internal(format!("Could not access submissions under lock: {e}"))
        })
    }

    fn parse_submission_id(id: &str) -> Result<SubmissionId, ApiError> {
        SubmissionId::from_hex(id).map_err(|_| ApiError::BadRequest("invalid submission id".into()))
    }

    fn submit_registration(&self, request: &Request) -> Result<Response, ApiError> {
        let form: ArtistForm = rouille::input::json_input(request)
            .map_err(|e| ApiError::BadRequest(format!("invalid registration body: {e}")))?;

        let now = Instant::now();
        let submission = Submission::start(form, self.submit_delay, now)?;
        let id = submission.id;

        let mut submissions = self.lock_submissions()?;
        let evicted = evict_expired(&mut submissions, now, self.retain_settled);
        if evicted > 0 {
            debug!("evicted {} finished registrations", evicted);
        }
        submissions.insert(id, submission);

        Ok(Response::json(&SubmissionResponse {
            submission_id: id.to_hex(),
        })
        .with_status_code(202))
    }

    fn registration_state(&self, id: &str) -> Result<Response, ApiError> {
        let id = Self::parse_submission_id(id)?;
        let submissions = self.lock_submissions()?;
        let submission = submissions
            .get(&id)
            .ok_or_else(|| ApiError::NotFound(format!("submission {} not found", id)))?;

        Ok(Response::json(&submission.state(Instant::now())))
    }

    fn cancel_registration(&self, id: &str) -> Result<Response, ApiError> {
        let id = Self::parse_submission_id(id)?;
        let mut submissions = self.lock_submissions()?;
        let submission = submissions
            .get_mut(&id)
            .ok_or_else(|| ApiError::NotFound(format!("submission {} not found", id)))?;

        let now = Instant::now();
        if submission.cancel(now) {
            Ok(Response::json(&submission.state(now)))
        } else {
            Ok(Response::text("submission already settled").with_status_code(409))
        }
    }
}

#[derive(Serialize)]
struct BrowseResponse<'a> {
    count: usize,
    total: usize,
    filtered: bool,
    criteria: FilterCriteria,
    artists: Vec<&'a Artist>,
}

#[derive(Serialize)]
struct DashboardResponse<'a> {
    stats: CatalogStats,
    artists: Vec<&'a Artist>,
}

#[derive(Serialize, Deserialize)]
struct MessageResponse {
    message: String,
}

#[derive(Serialize, Deserialize)]
struct SubmissionResponse {
    submission_id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OptionsResponse {
    categories: &'static [&'static str],
    locations: &'static [&'static str],
    price_ranges: &'static [&'static str],
    languages: &'static [&'static str],
}

impl OptionsResponse {
    fn current() -> Self {
        Self {
            categories: options::CATEGORIES,
            locations: options::LOCATIONS,
            price_ranges: options::PRICE_RANGES,
            languages: options::LANGUAGES,
        }
    }
}

#[cfg(test)]
pub fn parse_json_response<T: serde::de::DeserializeOwned>(
    response: rouille::Response,
) -> anyhow::Result<T> {
    Ok(serde_json::from_reader(
        response.data.into_reader_and_size().0,
    )?)
}
