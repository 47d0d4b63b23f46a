use redis::aio::ConnectionManager;
use redis::{AsyncCommands, IntoConnectionInfo};

use super::error::StoreError;
use super::syscall_source::SyscallSource;

/// Reads the callable-syscall SET from Redis over one shared, self-healing
/// connection.
#[derive(Clone)]
pub struct RedisSyscallSource {
    conn: ConnectionManager,
    key: String,
}

impl RedisSyscallSource {
    pub async fn connect(addr: &str, password: &str, key: &str) -> redis::RedisResult<Self> {
        let mut info = format!("redis://{addr}/0").into_connection_info()?;
        if !password.is_empty() {
            info.redis.password = Some(password.to_string());
        }
        let client = redis::Client::open(info)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self {
            conn,
            key: key.to_string(),
        })
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        let _pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl SyscallSource for RedisSyscallSource {
    async fn members(&self) -> Result<Vec<String>, StoreError> {
        let mut conn = self.conn.clone();
        let members: Vec<String> = conn
            .smembers(&self.key)
            .await
            .map_err(|e| StoreError::Unavailable(format!("SMEMBERS {}: {e}", self.key)))?;
        Ok(members)
    }
}
