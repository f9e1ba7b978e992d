/// 服务器配置 - 所有配置项
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/bistro | 工作目录 (数据库、日志) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | STRIPE_SECRET_KEY | (无) | 支付网关密钥 (服务端) |
/// | STRIPE_PUBLISHABLE_KEY | (无) | 支付网关公钥 (客户端) |
/// | CURRENCY | usd | 默认货币 (ISO code) |
///
/// 缺少 STRIPE_SECRET_KEY 只会禁用支付功能，不影响其余服务。
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库和日志文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 支付网关密钥 (仅服务端持有)
    pub stripe_secret_key: Option<String>,
    /// 支付网关公钥 (透传给客户端)
    pub stripe_publishable_key: Option<String>,
    /// 默认货币
    pub currency: String,
}

impl Config {
    /// 从环境变量加载配置，未设置时使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/bistro".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            stripe_secret_key: std::env::var("STRIPE_SECRET_KEY").ok().filter(|k| !k.is_empty()),
            stripe_publishable_key: std::env::var("STRIPE_PUBLISHABLE_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
            currency: std::env::var("CURRENCY").unwrap_or_else(|_| "usd".into()),
        }
    }

    /// 使用自定义值覆盖部分配置 (测试场景)
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 数据库目录: work_dir/database
    pub fn database_dir(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.work_dir).join("database")
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
