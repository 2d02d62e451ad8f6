//! Redis-backed store, shared by all the serving processes.
//!
//! The transitions run as server-side Lua scripts and `MULTI`/`EXEC`
//! transactions, so they are atomic regardless of how many processes talk to
//! the same Redis.

use redis::{aio::ConnectionManager, AsyncCommands, RedisError, Script};
use tokio::sync::OnceCell;
use tracing::{debug, trace};

use crate::{Error, Provision, ProvisionOutcome, Settings, SettingsStore};

/// The key prefix used unless configured otherwise.
pub const DEFAULT_KEY_PREFIX: &str = "incrementer";

/// The error code the increment script replies with when the store is not
/// configured.
const NOT_CONFIGURED_CODE: &str = "NOTCONFIGURED";

/// Advance the counter.
///
/// Lua numbers are doubles, so the bound is checked on the decimal strings
/// Redis stores, never on converted numbers. `INCRBY` does the exact `i64`
/// addition and refuses an overflowing one, which resets the counter as any
/// other out-of-bounds sum.
///
/// KEYS: step, maximum, value.
const INCREMENT_SCRIPT: &str = r#"
local function compare(a, b)
    local a_negative = string.sub(a, 1, 1) == "-"
    local b_negative = string.sub(b, 1, 1) == "-"
    if a_negative ~= b_negative then
        return a_negative and -1 or 1
    end
    local order = 0
    if #a ~= #b then
        order = #a < #b and -1 or 1
    elseif a ~= b then
        order = a < b and -1 or 1
    end
    if a_negative then
        order = -order
    end
    return order
end

local step = redis.call("GET", KEYS[1])
local max = redis.call("GET", KEYS[2])
if not step or step == "0" or not max then
    return redis.error_reply("NOTCONFIGURED step and maximum are not set")
end
local reply = redis.pcall("INCRBY", KEYS[3], step)
if type(reply) == "table" and reply.err then
    if string.find(reply.err, "overflow", 1, true) then
        redis.call("SET", KEYS[3], 0)
        return 0
    end
    return reply
end
local value = redis.call("GET", KEYS[3])
if compare(value, max) > 0 then
    redis.call("SET", KEYS[3], 0)
    return 0
end
return value
"#;

/// Seed the store unless the step is already there.
///
/// KEYS: step, maximum, value. ARGV: step, maximum, value.
const PROVISION_SCRIPT: &str = r#"
if redis.call("EXISTS", KEYS[1]) == 1 then
    return 0
end
redis.call("SET", KEYS[2], ARGV[2])
redis.call("SET", KEYS[1], ARGV[1])
redis.call("SET", KEYS[3], ARGV[3])
return 1
"#;

/// The fixed keys the entries live under.
#[derive(Debug, Clone)]
struct Keys {
    /// The counter value key.
    value: String,
    /// The maximum key.
    maximum: String,
    /// The step key.
    step: String,
}

impl Keys {
    /// Derive the keys from the prefix.
    fn with_prefix(prefix: &str) -> Self {
        Self {
            value: format!("{prefix}_value"),
            maximum: format!("{prefix}_max"),
            step: format!("{prefix}_step"),
        }
    }
}

/// A store on top of a Redis server.
pub struct RedisStore {
    /// The client to establish the connection with.
    client: redis::Client,
    /// The multiplexed connection, reconnecting on failures.
    /// Established on first use, so an unreachable server does not prevent
    /// the store from being created.
    conn: OnceCell<ConnectionManager>,
    /// The keys to use.
    keys: Keys,
    /// The increment script.
    increment_script: Script,
    /// The provisioning script.
    provision_script: Script,
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore")
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}

impl RedisStore {
    /// Prepare the store for the Redis server at `url`, using the keys under
    /// the given prefix.
    ///
    /// Only validates the URL, the connection is established lazily.
    pub fn open(url: &str, key_prefix: &str) -> Result<Self, Error> {
        let client = redis::Client::open(url).map_err(Error::unavailable)?;
        Ok(Self {
            client,
            conn: OnceCell::new(),
            keys: Keys::with_prefix(key_prefix),
            increment_script: Script::new(INCREMENT_SCRIPT),
            provision_script: Script::new(PROVISION_SCRIPT),
        })
    }

    /// Obtain a handle to the shared connection, connecting if needed.
    async fn conn(&self) -> Result<ConnectionManager, Error> {
        let conn = self
            .conn
            .get_or_try_init(|| async {
                let conn = ConnectionManager::new(self.client.clone()).await?;
                debug!(message = "Connected to redis");
                Ok::<_, RedisError>(conn)
            })
            .await
            .map_err(Error::unavailable)?;
        Ok(conn.clone())
    }
}

/// Map the script reply error to the store error.
fn increment_error(err: RedisError) -> Error {
    if err.code() == Some(NOT_CONFIGURED_CODE) {
        Error::NotConfigured
    } else {
        Error::unavailable(err)
    }
}

#[async_trait::async_trait]
impl SettingsStore for RedisStore {
    async fn number(&self) -> Result<Option<i64>, Error> {
        let mut conn = self.conn().await?;
        conn.get(&self.keys.value).await.map_err(Error::unavailable)
    }

    async fn settings(&self) -> Result<Option<Settings>, Error> {
        let mut conn = self.conn().await?;
        let (maximum, step): (Option<i64>, Option<i64>) = redis::cmd("MGET")
            .arg(&self.keys.maximum)
            .arg(&self.keys.step)
            .query_async(&mut conn)
            .await
            .map_err(Error::unavailable)?;
        Ok(Settings::from_parts(maximum, step))
    }

    async fn increment(&self) -> Result<i64, Error> {
        let mut conn = self.conn().await?;
        let value: i64 = self
            .increment_script
            .key(&self.keys.step)
            .key(&self.keys.maximum)
            .key(&self.keys.value)
            .invoke_async(&mut conn)
            .await
            .map_err(increment_error)?;
        trace!(message = "Counter advanced", value);
        Ok(value)
    }

    async fn set_settings(&self, settings: Settings) -> Result<(), Error> {
        let mut conn = self.conn().await?;
        redis::pipe()
            .atomic()
            .set(&self.keys.maximum, settings.maximum)
            .ignore()
            .set(&self.keys.step, settings.step)
            .ignore()
            .query_async(&mut conn)
            .await
            .map_err(Error::unavailable)
    }

    async fn provision(&self, provision: Provision) -> Result<ProvisionOutcome, Error> {
        let mut conn = self.conn().await?;
        let written: bool = self
            .provision_script
            .key(&self.keys.step)
            .key(&self.keys.maximum)
            .key(&self.keys.value)
            .arg(provision.settings.step)
            .arg(provision.settings.maximum)
            .arg(provision.value)
            .invoke_async(&mut conn)
            .await
            .map_err(Error::unavailable)?;
        Ok(if written {
            ProvisionOutcome::Provisioned
        } else {
            ProvisionOutcome::AlreadyProvisioned
        })
    }
}
