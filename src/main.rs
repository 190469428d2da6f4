mod client;
mod model;

#[cfg(feature = "server")]
mod server;

use client::App;

fn main() {
    #[cfg(not(feature = "server"))]
    dioxus::launch(App);

    #[cfg(feature = "server")]
    dioxus::serve(|| async move {
        use dioxus_logger::tracing;

        use crate::server::{bot, config::Config, startup};

        dotenvy::dotenv().ok();
        let config = Config::from_env()?;

        let db = startup::connect_to_database(&config).await?;

        tracing::info!("Starting server");

        // The bot runs on its own task; the dashboard is served regardless.
        tokio::spawn(async move {
            if let Err(e) = bot::start::start_bot(&config, db).await {
                tracing::error!("Discord bot error: {}", e);
            }
        });

        Ok(dioxus::server::router(App))
    })
}
