//! Redis cache client implementation
//!
//! This module provides a Redis client with connection retry, per-command
//! timeouts and the key operations the refresh token whitelist relies on:
//! set with millisecond expiry, existence checks and counted deletes.
//!
//! Only idempotent commands are retried. The check-and-delete behind
//! [`RedisClient::take`] is sent once.

use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError, RedisResult};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};

use snip_shared::config::cache::CacheConfig;

use crate::InfrastructureError;

/// Upper bound for the exponential backoff between attempts
const MAX_RETRY_DELAY_MS: u64 = 5000;

type RedisFuture<T> = Pin<Box<dyn Future<Output = RedisResult<T>> + Send>>;

/// Whether a command may be sent again after a failed attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RetryPolicy {
    /// Sending twice has the same effect as sending once
    Idempotent,
    /// The reply carries the outcome, and a lost reply may hide an applied
    /// write. Sent exactly once.
    SingleAttempt,
}

impl RetryPolicy {
    /// Attempts allowed under `config`
    pub(crate) fn max_attempts(self, config: &CacheConfig) -> u32 {
        match self {
            RetryPolicy::Idempotent => config.max_retries.max(1),
            RetryPolicy::SingleAttempt => 1,
        }
    }
}

/// Redis client with connection retry and command timeouts
///
/// Cloning is cheap: all clones share one multiplexed connection.
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Configuration used to create this client
    config: CacheConfig,
}

impl RedisClient {
    /// Create a new Redis client
    ///
    /// # Example
    /// ```no_run
    /// use snip_infra::cache::{CacheConfig, RedisClient};
    ///
    /// async fn create_client() -> Result<RedisClient, snip_infra::InfrastructureError> {
    ///     let config = CacheConfig::new("redis://localhost:6379").with_prefix("snip");
    ///     RedisClient::new(config).await
    /// }
    /// ```
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        info!(
            url = %mask_url(&config.url),
            max_retries = config.max_retries,
            "Creating Redis client"
        );

        // Parse Redis URL and create client
        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection = Self::create_connection_with_retry(&client, &config).await?;

        info!("Redis client created successfully");

        Ok(Self { connection, config })
    }

    /// Create multiplexed connection with retry logic
    async fn create_connection_with_retry(
        client: &Client,
        config: &CacheConfig,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let connect_timeout = Duration::from_secs(config.connection_timeout);
        let max_attempts = config.max_retries.max(1);
        let mut attempts = 0;
        let mut delay = config.retry_delay_ms;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            let err = match timeout(connect_timeout, client.get_multiplexed_async_connection()).await
            {
                Ok(Ok(connection)) => {
                    info!("Successfully connected to Redis");
                    return Ok(connection);
                }
                Ok(Err(e)) => InfrastructureError::Cache(e),
                Err(_) => InfrastructureError::Timeout {
                    timeout_ms: connect_timeout.as_millis() as u64,
                },
            };

            if attempts >= max_attempts {
                error!(
                    "Failed to connect to Redis after {} attempts: {}",
                    attempts, err
                );
                return Err(err);
            }

            warn!(
                "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                attempts, max_attempts, err, delay
            );
            sleep(Duration::from_millis(delay)).await;
            delay = (delay * 2).min(MAX_RETRY_DELAY_MS);
        }
    }

    /// Configuration this client was built from
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Set a value that expires after `expiry_ms` milliseconds
    ///
    /// Overwrites any existing value and resets its expiry.
    pub async fn set_with_expiry_ms(
        &self,
        key: &str,
        value: &str,
        expiry_ms: u64,
    ) -> Result<(), InfrastructureError> {
        debug!("Setting key '{}' with expiry {}ms", key, expiry_ms);

        self.execute(RetryPolicy::Idempotent, |mut conn| {
            let key = key.to_string();
            let value = value.to_string();

            Box::pin(async move {
                redis::cmd("SET")
                    .arg(key)
                    .arg(value)
                    .arg("PX")
                    .arg(expiry_ms)
                    .query_async::<_, ()>(&mut conn)
                    .await
            })
        })
        .await
        .map_err(|e| {
            error!("Failed to set key '{}': {}", key, e);
            e
        })
    }

    /// Check if a key exists in cache
    pub async fn exists(&self, key: &str) -> Result<bool, InfrastructureError> {
        debug!("Checking if key '{}' exists", key);

        let exists = self
            .execute(RetryPolicy::Idempotent, |mut conn| {
                let key = key.to_string();

                Box::pin(async move { conn.exists::<_, bool>(key).await })
            })
            .await
            .map_err(|e| {
                error!("Failed to check key '{}' existence: {}", key, e);
                e
            })?;

        debug!("Key '{}' exists: {}", key, exists);
        Ok(exists)
    }

    /// Delete a key, retrying on transient failures
    ///
    /// Returns whether this call's `DEL` removed the key. After a retry that
    /// answer is unreliable, so use [`RedisClient::take`] when it matters.
    pub async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        debug!("Deleting key '{}'", key);
        self.delete_with(RetryPolicy::Idempotent, key).await
    }

    /// Delete a key in a single attempt, reporting whether it was present
    ///
    /// Exactly one concurrent caller observes `true`. A timeout or transport
    /// error is returned as an error and never turned into `false`.
    pub async fn take(&self, key: &str) -> Result<bool, InfrastructureError> {
        debug!("Taking key '{}'", key);
        self.delete_with(RetryPolicy::SingleAttempt, key).await
    }

    async fn delete_with(&self, policy: RetryPolicy, key: &str) -> Result<bool, InfrastructureError> {
        let deleted_count = self
            .execute(policy, |mut conn| {
                let key = key.to_string();

                Box::pin(async move { conn.del::<_, u32>(key).await })
            })
            .await
            .map_err(|e| {
                error!("Failed to delete key '{}': {}", key, e);
                e
            })?;

        let deleted = deleted_count > 0;
        if deleted {
            debug!("Successfully deleted key '{}'", key);
        } else {
            debug!("Key '{}' was not found", key);
        }
        Ok(deleted)
    }

    /// Check if the Redis connection is healthy
    ///
    /// Performs a PING command to verify connectivity.
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        debug!("Performing Redis health check");

        let response = self
            .execute(RetryPolicy::Idempotent, |mut conn| {
                Box::pin(async move { redis::cmd("PING").query_async::<_, String>(&mut conn).await })
            })
            .await
            .map_err(|e| {
                error!("Redis health check failed: {}", e);
                e
            })?;

        if response == "PONG" {
            debug!("Redis health check passed");
            Ok(true)
        } else {
            warn!("Redis health check returned unexpected response: {}", response);
            Ok(false)
        }
    }

    /// Execute a Redis operation with timeout, retrying as `policy` allows
    ///
    /// Each attempt is bounded by the configured response timeout. Timeouts
    /// and transient errors are retried with exponential backoff.
    async fn execute<F, T>(&self, policy: RetryPolicy, operation: F) -> Result<T, InfrastructureError>
    where
        F: Fn(MultiplexedConnection) -> RedisFuture<T>,
    {
        run_attempts(policy.max_attempts(&self.config), &self.config, || {
            operation(self.connection.clone())
        })
        .await
    }
}

/// Runs `attempt` up to `max_attempts` times under the configured response
/// timeout and backoff
pub(crate) async fn run_attempts<F, Fut, T>(
    max_attempts: u32,
    config: &CacheConfig,
    mut attempt: F,
) -> Result<T, InfrastructureError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = RedisResult<T>>,
{
    let response_timeout = Duration::from_millis(config.response_timeout_ms);
    let mut attempts = 0;
    let mut delay = config.retry_delay_ms;

    loop {
        attempts += 1;

        let err = match timeout(response_timeout, attempt()).await {
            Ok(Ok(result)) => return Ok(result),
            Ok(Err(e)) if !is_retriable_error(&e) => return Err(InfrastructureError::Cache(e)),
            Ok(Err(e)) => InfrastructureError::Cache(e),
            Err(_) => InfrastructureError::Timeout {
                timeout_ms: config.response_timeout_ms,
            },
        };

        if attempts >= max_attempts {
            error!("Redis operation failed after {} attempts: {}", attempts, err);
            return Err(err);
        }

        warn!(
            "Redis operation failed (attempt {}/{}): {}. Retrying in {}ms...",
            attempts, max_attempts, err, delay
        );
        sleep(Duration::from_millis(delay)).await;
        delay = (delay * 2).min(MAX_RETRY_DELAY_MS);
    }
}

/// Check if a Redis error is transient and the operation should be retried
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError
            | redis::ErrorKind::ClientError
            | redis::ErrorKind::BusyLoadingError
            | redis::ErrorKind::TryAgain
    )
}

/// Mask credentials in a Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    if let (Some(at_pos), Some(proto_end)) = (url.rfind('@'), url.find("://")) {
        if at_pos > proto_end {
            let proto = &url[..proto_end + 3];
            let host_part = &url[at_pos..];
            return format!("{}****{}", proto, host_part);
        }
    }
    url.to_string()
}
