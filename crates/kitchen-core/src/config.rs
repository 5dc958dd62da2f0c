//! 服務配置

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{KitchenError, Result};

/// 服務配置
///
/// 啟動時載入一次後不再變動，以參數方式注入需要的元件。
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// 除錯模式（資料庫主機強制為 localhost）
    #[serde(default)]
    pub debug: bool,

    /// 資料庫名稱
    pub postgres_db: String,

    /// 資料庫使用者
    pub postgres_user: String,

    /// 資料庫密碼
    pub postgres_password: String,

    /// 資料庫主機
    pub postgres_host: String,

    /// 資料庫埠號
    pub postgres_port: u16,

    /// 完整連線字串（提供時優先使用）
    #[serde(default)]
    pub database_url: Option<String>,
}

impl Settings {
    /// 創建新的配置
    pub fn new(
        postgres_db: String,
        postgres_user: String,
        postgres_password: String,
        postgres_host: String,
        postgres_port: u16,
    ) -> Self {
        Self {
            debug: false,
            postgres_db,
            postgres_user,
            postgres_password,
            postgres_host,
            postgres_port,
            database_url: None,
        }
    }

    /// 建構器模式：設置除錯模式
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// 建構器模式：設置完整連線字串
    pub fn with_database_url(mut self, url: String) -> Self {
        self.database_url = Some(url);
        self
    }

    /// 由 JSON 載入
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| KitchenError::Config(e.to_string()))
    }

    /// 由環境變數載入
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// 由任意鍵值來源載入（`DEBUG`, `POSTGRES_*`, `DATABASE_URL`）
    pub fn from_env_with<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            lookup(key).ok_or_else(|| KitchenError::Config(format!("缺少環境變數 {key}")))
        };

        let debug = match lookup("DEBUG") {
            Some(value) => parse_bool(&value)
                .ok_or_else(|| KitchenError::Config(format!("DEBUG 值無效: {value}")))?,
            None => false,
        };

        let port_value = require("POSTGRES_PORT")?;
        let postgres_port = port_value
            .parse::<u16>()
            .map_err(|_| KitchenError::Config(format!("POSTGRES_PORT 值無效: {port_value}")))?;

        let mut settings = Self::new(
            require("POSTGRES_DB")?,
            require("POSTGRES_USER")?,
            require("POSTGRES_PASSWORD")?,
            require("POSTGRES_HOST")?,
            postgres_port,
        )
        .with_debug(debug);

        if let Some(url) = lookup("DATABASE_URL") {
            settings = settings.with_database_url(url);
        }

        Ok(settings)
    }

    /// 實際連線的主機
    pub fn effective_host(&self) -> &str {
        if self.debug {
            "localhost"
        } else {
            &self.postgres_host
        }
    }

    /// 資料庫連線字串
    pub fn database_url(&self) -> String {
        match &self.database_url {
            Some(url) => url.clone(),
            None => format!(
                "postgresql://{}:{}@{}:{}/{}",
                self.postgres_user,
                self.postgres_password,
                self.effective_host(),
                self.postgres_port,
                self.postgres_db
            ),
        }
    }
}

/// 密碼與連線字串不會出現在日誌中
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("debug", &self.debug)
            .field("postgres_db", &self.postgres_db)
            .field("postgres_user", &self.postgres_user)
            .field("postgres_password", &"***")
            .field("postgres_host", &self.postgres_host)
            .field("postgres_port", &self.postgres_port)
            .field("database_url", &self.database_url.as_ref().map(|_| "***"))
            .finish()
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
