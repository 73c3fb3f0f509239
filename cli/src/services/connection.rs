//! Connection management for the backing store
//!
//! Credentials are an explicit value object owned by the manager, never
//! ambient process state. The manager tracks where it is in the
//! configure/verify cycle and discards credentials that fail a probe.

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};
use crate::input;

/// Database credential triple
#[derive(Debug, Clone)]
pub struct DbCredentials {
    /// host:port/dbname (port optional, defaults to 5432)
    pub endpoint: String,
    pub username: String,
    pub password: String,
}

/// Where the manager is in the configure/verify cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No credentials held
    Unconfigured,
    /// Credentials held but not yet probed
    Unverified,
    /// Last probe succeeded
    Verified,
    /// Last probe failed
    Failed,
}

/// Manages credential state and connection probing
pub struct ConnectionManager {
    credentials: Option<DbCredentials>,
    state: ConnectionState,
}

impl ConnectionManager {
    /// Build from configuration; credentials present only when all three
    /// values were configured.
    pub fn from_config(config: &DatabaseConfig) -> Self {
        let credentials = match (&config.endpoint, &config.username, &config.password) {
            (Some(endpoint), Some(username), Some(password)) => Some(DbCredentials {
                endpoint: endpoint.clone(),
                username: username.clone(),
                password: password.clone(),
            }),
            _ => None,
        };
        let state = if credentials.is_some() {
            ConnectionState::Unverified
        } else {
            ConnectionState::Unconfigured
        };
        Self { credentials, state }
    }

    /// Whether credential material is currently held
    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Replace the held credentials; the new set is unverified until probed
    pub fn set_credentials(&mut self, credentials: DbCredentials) {
        self.credentials = Some(credentials);
        self.state = ConnectionState::Unverified;
    }

    /// Drop the held credentials, returning to the unconfigured state
    pub fn discard_credentials(&mut self) {
        self.credentials = None;
        self.state = ConnectionState::Unconfigured;
    }

    /// Open a pool and run a trivial round-trip query.
    ///
    /// The pool is closed on every failure path; errors come back as values,
    /// never as panics.
    pub async fn probe(&mut self) -> AppResult<PgPool> {
        let credentials = self.credentials.clone().ok_or_else(|| {
            AppError::Configuration("No database credentials configured".to_string())
        })?;
        match open_and_probe(&credentials).await {
            Ok(pool) => {
                self.state = ConnectionState::Verified;
                Ok(pool)
            }
            Err(e) => {
                self.state = ConnectionState::Failed;
                Err(e)
            }
        }
    }

    /// Prompt for credentials, probe, and either commit or roll back.
    ///
    /// On probe failure the just-entered credentials are discarded, so the
    /// manager is never left half-configured.
    pub async fn configure_interactively(&mut self) -> AppResult<PgPool> {
        println!("\n=== Database configuration ===");
        println!("Enter your credentials.");

        let username = input::read_nonempty("Username: ");
        let endpoint = input::read_nonempty("Endpoint (host:port/dbname): ");
        let password = rpassword::prompt_password("Password: ")?;

        self.set_credentials(DbCredentials {
            endpoint,
            username,
            password,
        });

        match self.probe().await {
            Ok(pool) => {
                println!("Database connection validated.");
                Ok(pool)
            }
            Err(e) => {
                println!("Could not connect to the database: {e}");
                self.discard_credentials();
                Err(e)
            }
        }
    }

    /// Entry point for the sync flow: end with a verified pool or an error.
    ///
    /// Unconfigured managers go straight to the interactive flow; configured
    /// ones whose probe fails fall back to it instead of failing hard.
    pub async fn ensure_ready(&mut self) -> AppResult<PgPool> {
        if !self.is_configured() {
            return self.configure_interactively().await;
        }
        match self.probe().await {
            Ok(pool) => Ok(pool),
            Err(e) => {
                println!("Configured credentials exist, but the connection failed: {e}");
                println!("Let's try configuring again...");
                self.configure_interactively().await
            }
        }
    }
}

async fn open_and_probe(credentials: &DbCredentials) -> AppResult<PgPool> {
    let options = connect_options(credentials)?;
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(30))
        .connect_with(options)
        .await?;

    match sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(&pool).await {
        Ok(_) => Ok(pool),
        Err(e) => {
            pool.close().await;
            Err(e.into())
        }
    }
}

fn connect_options(credentials: &DbCredentials) -> AppResult<PgConnectOptions> {
    let (host, port, database) = parse_endpoint(&credentials.endpoint)?;
    Ok(PgConnectOptions::new()
        .host(&host)
        .port(port)
        .database(&database)
        .username(&credentials.username)
        .password(&credentials.password))
}

/// Split host[:port]/dbname into parts; port defaults to 5432
fn parse_endpoint(endpoint: &str) -> AppResult<(String, u16, String)> {
    let (address, database) = endpoint.split_once('/').ok_or_else(|| {
        AppError::Configuration(format!(
            "Endpoint '{endpoint}' must be in host:port/dbname form"
        ))
    })?;
    if database.is_empty() {
        return Err(AppError::Configuration(format!(
            "Endpoint '{endpoint}' is missing a database name"
        )));
    }
    let (host, port) = match address.split_once(':') {
        Some((host, port)) => {
            let port = port.parse::<u16>().map_err(|_| {
                AppError::Configuration(format!("Endpoint '{endpoint}' has an invalid port"))
            })?;
            (host, port)
        }
        None => (address, 5432),
    };
    if host.is_empty() {
        return Err(AppError::Configuration(format!(
            "Endpoint '{endpoint}' is missing a host"
        )));
    }
    Ok((host.to_string(), port, database.to_string()))
}
