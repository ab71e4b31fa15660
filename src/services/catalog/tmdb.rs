/// TMDB (The Movie Database) v3 catalog provider
///
/// API Flow:
/// 1. Details: /movie/{id}?append_to_response=credits → genres, runtime, cast, crew
/// 2. Recommendations: /movie/{id}/recommendations?page=1 → candidate stubs
/// 3. Popular: /movie/popular?page=1 → popularity-ordered list
///
/// Authenticates with the `api_key` query parameter.
use crate::{
    error::{AppError, AppResult},
    models::{
        CandidateStub, CastMember, CrewMember, Genre, MovieId, MovieMetadata, PopularMovie,
    },
    services::catalog::CatalogProvider,
};
use reqwest::Client as HttpClient;
use serde::{de::DeserializeOwned, Deserialize};
use tracing::instrument;

const FIRST_PAGE: &str = "1";

#[derive(Clone)]
pub struct TmdbCatalog {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    language: String,
}

impl TmdbCatalog {
    pub fn new(api_key: String, api_url: String, language: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            language,
        }
    }

    /// Issues a GET against the API and decodes the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> AppResult<T> {
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {} for {}: {}",
                status, path, body
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl CatalogProvider for TmdbCatalog {
    #[instrument(skip(self), fields(provider = "tmdb"))]
    async fn get_movie(&self, id: MovieId) -> AppResult<MovieMetadata> {
        let details: TmdbMovieDetails = self
            .get_json(
                &format!("/movie/{}", id),
                &[("append_to_response", "credits")],
            )
            .await?;

        tracing::debug!(
            movie_id = %id,
            genres = details.genres.len(),
            "Movie details fetched"
        );

        Ok(details.into())
    }

    #[instrument(skip(self), fields(provider = "tmdb"))]
    async fn get_recommendations(&self, id: MovieId) -> AppResult<Vec<CandidateStub>> {
        let page: TmdbPage<TmdbCandidate> = self
            .get_json(
                &format!("/movie/{}/recommendations", id),
                &[("language", self.language.as_str()), ("page", FIRST_PAGE)],
            )
            .await?;

        Ok(page
            .results
            .into_iter()
            .map(|c| CandidateStub {
                id: MovieId(c.id),
                adult: c.adult,
            })
            .collect())
    }

    #[instrument(skip(self), fields(provider = "tmdb"))]
    async fn get_popular(&self) -> AppResult<Vec<PopularMovie>> {
        let page: TmdbPage<TmdbListMovie> = self
            .get_json(
                "/movie/popular",
                &[("language", self.language.as_str()), ("page", FIRST_PAGE)],
            )
            .await?;

        tracing::info!(results = page.results.len(), "Popular list fetched");

        Ok(page.results.into_iter().map(PopularMovie::from).collect())
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

// ============================================================================
// TMDB wire types
// ============================================================================

#[derive(Debug, Deserialize)]
struct TmdbPage<T> {
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct TmdbCandidate {
    id: u64,
    #[serde(default)]
    adult: bool,
}

/// Entry of a list endpoint (popular); carries no credits
#[derive(Debug, Deserialize)]
struct TmdbListMovie {
    id: u64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    poster_path: Option<String>,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    vote_average: Option<f64>,
    #[serde(default)]
    runtime: Option<u32>,
    #[serde(default)]
    adult: bool,
}

#[derive(Debug, Deserialize)]
struct TmdbMovieDetails {
    id: u64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    poster_path: Option<String>,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    runtime: Option<u32>,
    #[serde(default)]
    vote_average: Option<f64>,
    #[serde(default)]
    genres: Vec<Genre>,
    #[serde(default)]
    credits: Option<TmdbCredits>,
    #[serde(default)]
    adult: bool,
}

#[derive(Debug, Default, Deserialize)]
struct TmdbCredits {
    #[serde(default)]
    cast: Vec<CastMember>,
    #[serde(default)]
    crew: Vec<CrewMember>,
}

/// TMDB sends "" for unknown titles and dates
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<TmdbMovieDetails> for MovieMetadata {
    fn from(details: TmdbMovieDetails) -> Self {
        let credits = details.credits.unwrap_or_default();

        MovieMetadata {
            id: MovieId(details.id),
            title: non_empty(details.title),
            poster_path: details.poster_path,
            release_date: non_empty(details.release_date),
            runtime: details.runtime,
            vote_average: details.vote_average,
            genres: details.genres,
            crew: credits.crew,
            cast: credits.cast,
            adult: details.adult,
        }
    }
}

impl From<TmdbListMovie> for PopularMovie {
    fn from(movie: TmdbListMovie) -> Self {
        PopularMovie {
            id: MovieId(movie.id),
            title: non_empty(movie.title),
            poster_path: movie.poster_path,
            release_date: non_empty(movie.release_date),
            vote_average: movie.vote_average,
            runtime: movie.runtime,
            adult: movie.adult,
        }
    }
}
