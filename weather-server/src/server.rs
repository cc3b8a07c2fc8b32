use percent_encoding::percent_decode_str;
use std::convert::Infallible;
use std::net::SocketAddr;
use warp::http::StatusCode;
use warp::path::FullPath;
use warp::{Filter, Rejection, Reply};

use weather_core::{WeatherError, WeatherService};

pub async fn run(address: SocketAddr, service: WeatherService) -> anyhow::Result<()> {
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for shutdown signal: {}", e);
        }
    };

    let (bound, server) = warp::serve(routes(service))
        .try_bind_with_graceful_shutdown(address, shutdown)
        .map_err(|e| anyhow::anyhow!("Failed to bind {}: {}", address, e))?;

    log::info!("Listening on http://{}", bound);
    server.await;
    log::info!("Server stopped");

    Ok(())
}

pub fn routes(
    service: WeatherService,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    location()
        .and(warp::get())
        .and(with_service(service))
        .and_then(weather)
        .recover(rejection)
        .with(warp::log("weather_server::api"))
}

/// The raw `{location}` segment, including an empty one (`/weather/`).
fn location() -> impl Filter<Extract = (String,), Error = Rejection> + Clone {
    let empty = warp::path("weather")
        .and(warp::path::end())
        .and(warp::path::full())
        .and_then(empty_segment);

    warp::path!("weather" / String).or(empty).unify()
}

async fn empty_segment(full: FullPath) -> Result<String, Rejection> {
    // `/weather` alone has no segment at all.
    if full.as_str().ends_with('/') {
        Ok(String::new())
    } else {
        Err(warp::reject::not_found())
    }
}

fn with_service(
    service: WeatherService,
) -> impl Filter<Extract = (WeatherService,), Error = Infallible> + Clone {
    warp::any().map(move || service.clone())
}

pub async fn weather(location: String, service: WeatherService) -> Result<impl Reply, Rejection> {
    // warp hands over the raw segment.
    let location = percent_decode_str(&location).decode_utf8_lossy();

    service
        .current(&location)
        .await
        .map(|response| warp::reply::json(&response))
        .map_err(|e| warp::reject::custom(Error(e)))
}

#[derive(Debug)]
struct Error(WeatherError);
impl warp::reject::Reject for Error {}

pub async fn rejection(err: Rejection) -> Result<impl Reply, Rejection> {
    match err.find::<Error>() {
        Some(Error(e)) => {
            log::error!("Error: {}", e);
            Ok(warp::reply::with_status(
                e.to_string(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
        None => Err(err),
    }
}
