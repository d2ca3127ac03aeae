use std::{
    io::{Error, ErrorKind},
    net::SocketAddr,
    str::FromStr,
};

use axum::{Extension, Router, routing::get};

use crate::{api, config, types::SharedLoginSession};

/// Serves `/callback` and `/health` for the login flow on `SERVER_ADDRESS`.
pub async fn start_api_server(session: SharedLoginSession) -> Result<(), Error> {
    let app = Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(session)));

    let addr = SocketAddr::from_str(&config::server_addr())
        .map_err(|e| Error::new(ErrorKind::InvalidInput, e))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await
}
