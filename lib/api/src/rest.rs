use actix_cors::Cors;
use actix_web::{http::Method, web, App, HttpResponse, HttpServer, Result as ActixResult};
use filmgraph_core::{ActorField, ActorUpdate, FilterCondition, MovieField, MovieUpdate};
use filmgraph_storage::GraphStore;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

const OPTIONS_MESSAGE: &str =
    "Allow: GET, PUT, POST, DELETE, OPTIONS\nTwo sub-APIs: 'movies' and 'actors'";
const WELCOME_MESSAGE: &str = "Welcome to the Hollywood Database.";
const DEFAULT_LIMIT: usize = 10;

/// Where the REST server listens
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Deserialize)]
struct LimitQuery {
    n: Option<usize>,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(store: Arc<GraphStore>, config: ServerConfig) -> std::io::Result<()> {
        info!("Starting HTTP server on {}:{}", config.host, config.port);
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(store.clone()))
                .configure(configure)
        })
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
    }
}

/// Register every route; shared by the server and the tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::method(Method::OPTIONS).to(options))
        .route("/", web::get().to(index))
        .route("/actors", web::get().to(find_actors))
        .route("/actors/", web::get().to(find_actors))
        .route("/actors/{key}", web::get().to(get_actor))
        .route("/actors/{name}", web::put().to(put_actor))
        .route("/actors/{name}", web::post().to(post_actor))
        .route("/actors/{name}", web::delete().to(delete_actor))
        .route("/movies", web::get().to(find_movies))
        .route("/movies/", web::get().to(find_movies))
        .route("/movies/{key}", web::get().to(get_movie))
        .route("/movies/{name}", web::put().to(put_movie))
        .route("/movies/{name}", web::post().to(post_movie))
        .route("/movies/{name}", web::delete().to(delete_movie))
        .route("/analytics/summary", web::get().to(summary))
        .route("/analytics/hubs", web::get().to(hub_actors))
        .route("/analytics/grossing", web::get().to(highest_grossing))
        .route("/analytics/oldest", web::get().to(oldest))
        .route("/analytics/year/{year}", web::get().to(year));
}

/// Path segments use `_` in place of spaces
fn decode_name(raw: &str) -> String {
    raw.replace('_', " ")
}

/// Parse `attr=value|attr=value`. `None` when the segment is a plain name.
fn parse_or_query(key: &str) -> Option<Vec<(String, String)>> {
    if !key.contains('=') || !key.contains('|') {
        return None;
    }
    key.split('|')
        .map(|pair| {
            pair.split_once('=')
                .map(|(attr, value)| (attr.to_string(), decode_name(value)))
        })
        .collect()
}

fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({
        "error": message.into()
    }))
}

fn created() -> HttpResponse {
    HttpResponse::Created().json(serde_json::json!({
        "result": true
    }))
}

fn found_or_bad_request<T: serde::Serialize>(items: Vec<T>) -> HttpResponse {
    if items.is_empty() {
        bad_request("No entries match the query")
    } else {
        HttpResponse::Ok().json(items)
    }
}

async fn options() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(OPTIONS_MESSAGE))
}

async fn index() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(WELCOME_MESSAGE))
}

async fn get_actor(
    store: web::Data<Arc<GraphStore>>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let key = path.into_inner();

    if let Some(pairs) = parse_or_query(&key) {
        return Ok(match FilterCondition::<ActorField>::any(pairs) {
            Ok(condition) => found_or_bad_request(store.find_actors(condition)),
            Err(e) => bad_request(e.to_string()),
        });
    }

    match store.actor_view(&decode_name(&key)) {
        Some(view) => Ok(HttpResponse::Ok().json(view)),
        None => Ok(bad_request("Couldn't find the actor in our database.")),
    }
}

async fn get_movie(
    store: web::Data<Arc<GraphStore>>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let key = path.into_inner();

    if let Some(pairs) = parse_or_query(&key) {
        return Ok(match FilterCondition::<MovieField>::any(pairs) {
            Ok(condition) => found_or_bad_request(store.find_movies(condition)),
            Err(e) => bad_request(e.to_string()),
        });
    }

    match store.movie_view(&decode_name(&key)) {
        Some(view) => Ok(HttpResponse::Ok().json(view)),
        None => Ok(bad_request("Couldn't find the movie in our database.")),
    }
}

async fn find_actors(
    store: web::Data<Arc<GraphStore>>,
    query: web::Query<Vec<(String, String)>>,
) -> ActixResult<HttpResponse> {
    let pairs = query.into_inner().into_iter().map(|(k, v)| (k, decode_name(&v)));
    Ok(match FilterCondition::<ActorField>::all(pairs) {
        Ok(condition) => found_or_bad_request(store.find_actors(condition)),
        Err(e) => bad_request(e.to_string()),
    })
}

async fn find_movies(
    store: web::Data<Arc<GraphStore>>,
    query: web::Query<Vec<(String, String)>>,
) -> ActixResult<HttpResponse> {
    let pairs = query.into_inner().into_iter().map(|(k, v)| (k, decode_name(&v)));
    Ok(match FilterCondition::<MovieField>::all(pairs) {
        Ok(condition) => found_or_bad_request(store.find_movies(condition)),
        Err(e) => bad_request(e.to_string()),
    })
}

async fn put_actor(
    store: web::Data<Arc<GraphStore>>,
    path: web::Path<String>,
    req: web::Json<ActorUpdate>,
) -> ActixResult<HttpResponse> {
    let name = decode_name(&path.into_inner());
    let update = req.into_inner();
    if update.is_empty() {
        return Ok(bad_request("Bad Request"));
    }
    match store.update_actor(&name, update) {
        Ok(()) => Ok(created()),
        Err(e) => Ok(bad_request(e.to_string())),
    }
}

async fn put_movie(
    store: web::Data<Arc<GraphStore>>,
    path: web::Path<String>,
    req: web::Json<MovieUpdate>,
) -> ActixResult<HttpResponse> {
    let name = decode_name(&path.into_inner());
    let update = req.into_inner();
    if update.is_empty() {
        return Ok(bad_request("Bad Request"));
    }
    match store.update_movie(&name, update) {
        Ok(()) => Ok(created()),
        Err(e) => Ok(bad_request(e.to_string())),
    }
}

async fn post_actor(
    store: web::Data<Arc<GraphStore>>,
    path: web::Path<String>,
    req: web::Json<ActorUpdate>,
) -> ActixResult<HttpResponse> {
    let name = decode_name(&path.into_inner());
    let update = req.into_inner();
    if update.is_empty() {
        return Ok(bad_request("Bad Request"));
    }
    match store.upsert_actor(&name, update) {
        Ok(()) => Ok(created()),
        Err(e) => Ok(bad_request(e.to_string())),
    }
}

async fn post_movie(
    store: web::Data<Arc<GraphStore>>,
    path: web::Path<String>,
    req: web::Json<MovieUpdate>,
) -> ActixResult<HttpResponse> {
    let name = decode_name(&path.into_inner());
    let update = req.into_inner();
    if update.is_empty() {
        return Ok(bad_request("Bad Request"));
    }
    match store.upsert_movie(&name, update) {
        Ok(()) => Ok(created()),
        Err(e) => Ok(bad_request(e.to_string())),
    }
}

async fn delete_actor(
    store: web::Data<Arc<GraphStore>>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let name = decode_name(&path.into_inner());
    match store.delete_actor(&name) {
        Ok(true) => Ok(created()),
        Ok(false) => Ok(bad_request("Actor not in database.")),
        Err(e) => Ok(bad_request(e.to_string())),
    }
}

async fn delete_movie(
    store: web::Data<Arc<GraphStore>>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let name = decode_name(&path.into_inner());
    match store.delete_movie(&name) {
        Ok(true) => Ok(created()),
        Ok(false) => Ok(bad_request("Movie not in database.")),
        Err(e) => Ok(bad_request(e.to_string())),
    }
}

async fn summary(
    store: web::Data<Arc<GraphStore>>,
    query: web::Query<LimitQuery>,
) -> ActixResult<HttpResponse> {
    let n = query.n.unwrap_or(DEFAULT_LIMIT);
    Ok(HttpResponse::Ok().json(store.read().summary(n)))
}

async fn hub_actors(
    store: web::Data<Arc<GraphStore>>,
    query: web::Query<LimitQuery>,
) -> ActixResult<HttpResponse> {
    let n = query.n.unwrap_or(DEFAULT_LIMIT);
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": store.read().hub_actors(n)
    })))
}

async fn highest_grossing(
    store: web::Data<Arc<GraphStore>>,
    query: web::Query<LimitQuery>,
) -> ActixResult<HttpResponse> {
    let n = query.n.unwrap_or(DEFAULT_LIMIT);
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": store.read().n_highest_grossing_actors(n)
    })))
}

async fn oldest(
    store: web::Data<Arc<GraphStore>>,
    query: web::Query<LimitQuery>,
) -> ActixResult<HttpResponse> {
    let n = query.n.unwrap_or(DEFAULT_LIMIT);
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": store.read().n_oldest_actors(n)
    })))
}

async fn year(
    store: web::Data<Arc<GraphStore>>,
    path: web::Path<i32>,
) -> ActixResult<HttpResponse> {
    let year = path.into_inner();
    let graph = store.read();
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "movies": graph.movies_in_year(year),
        "actors": graph.actors_in_year(year),
    })))
}
