use config::Config;
use serde::{Deserialize, Serialize};
///  struct GetDefault;
///  struct GetOption;
///
///  fn settings() -> &'static RwLock<Config>
///  fn clap() -> &'static RwLock<Clap>
///
///  struct Clap
use std::sync::{OnceLock, RwLock};
use std::time::Duration;

//get or default
pub struct GetDefault;
pub struct GetOption;

/// get settings
/// prefer `clap()` for typed access, or GetOption::xxx | GetDefault::xxx for single keys
///
/// # Returns
/// * `&'static RwLock<Config>` - config instance
pub fn settings() -> &'static RwLock<Config> {
    static CONFIG: OnceLock<RwLock<Config>> = OnceLock::new();
    CONFIG.get_or_init(|| RwLock::new(init_config()))
}

/// get clap instance
/// # Returns
/// * `&'static RwLock<Clap>` - typed application config
/// # Panics
/// * if the layered configuration exists but does not match `Clap`
pub fn clap() -> &'static RwLock<Clap> {
    static CLAP: OnceLock<RwLock<Clap>> = OnceLock::new();
    CLAP.get_or_init(|| {
        if cfg!(test) {
            return RwLock::new(Clap::default());
        }

        let loaded = match settings().read() {
            Ok(guard) => guard.clone().try_deserialize::<Clap>(),
            Err(e) => panic!("settings lock poisoned: {}", e),
        };

        RwLock::new(loaded.unwrap_or_else(|e| panic!("clap config loading error: {}", e)))
    })
}

/// read a copy of the listing section, falls back to defaults on a poisoned lock
pub fn listing() -> Listing {
    clap().read().map(|c| c.listing.clone()).unwrap_or_default()
}

/// init config
/// # Returns
/// * `Config` - config instance
fn init_config() -> Config {
    //development production testing
    let run_mode = std::env::var("MCLAP_RUN_MODE").unwrap_or("development".to_string());
    tracing::info!("MCLAP_RUN_MODE={}", run_mode);

    let config_path = std::env::var("MCLAP_CONFIG_PATH").unwrap_or("config".to_string());
    tracing::info!("Config file path: {}", config_path);

    let conf = config::File::with_name(&format!("{config_path}/config.yml")).required(false);
    let mode = config::File::with_name(&format!("{config_path}/{run_mode}.yml")).required(false);
    let local = config::File::with_name(&format!("{config_path}/local.yml")).required(false);

    let builder = Config::builder()
        .add_source(conf)
        .add_source(mode)
        .add_source(local)
        .add_source(config::Environment::with_prefix("MCLAP").separator("__"));

    builder.build().unwrap_or_else(|e| panic!("config build error: {}", e))
}

/// make getter for settings, if not found, return default value
macro_rules! make_setting_getter_default {
    ($name:ident, $type:ty, $getter:ident) => {
        pub fn $name(k: &str, default: $type) -> $type {
            match settings().read() {
                Ok(guard) => guard.$getter(k).unwrap_or(default),
                Err(_) => default,
            }
        }
    };
}

/// make getter for settings, return Option value
macro_rules! make_setting_getter_option {
    ($name:ident, $type:ty, $getter:ident) => {
        pub fn $name(k: &str) -> Option<$type> {
            match settings().read() {
                Ok(guard) => guard.$getter(k).ok(),
                Err(_) => None,
            }
        }
    };
}

/// make getter for settings
macro_rules! make_setting_getter {
    ($name:ident, $type:ty, $getter:ident) => {
        impl GetDefault {
            make_setting_getter_default!($name, $type, $getter);
        }

        impl GetOption {
            make_setting_getter_option!($name, $type, $getter);
        }
    };
}

make_setting_getter!(string, String, get_string);
make_setting_getter!(boolean, bool, get_bool);

/// Clap config
/// # Fields
/// * `name` - application name
/// * `short` - four letter application code, first segment of every error code
/// * `debug` - debug mode
/// * `web` - list api listener
/// * `api` - upstream list api used by remote sources
/// * `listing` - pagination and search defaults
/// * `log` - log config
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Clap {
    pub name: String,
    pub short: String,
    pub debug: bool,
    pub web: Web,
    pub api: Api,
    pub listing: Listing,
    pub log: Option<Log>,
}

/// Clap log config
/// # Fields
/// * `level` - EnvFilter directives
/// * `console` - write to stdout
/// * `dirs` - daily rolling log directory, empty disables file output
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Log {
    pub level: String,
    pub console: bool,
    pub dirs: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Web {
    pub port: u16,
    pub bind: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Api {
    pub base: String,
    pub timeout_secs: u64,
    pub user_agent: Option<String>,
}

/// Listing defaults shared by every paginated page
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Listing {
    pub page_size: usize,
    pub max_visible: usize,
    pub debounce_ms: u64,
}

impl Listing {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Web {
    pub fn bind_addr(&self) -> String {
        let bind = self.bind.clone().unwrap_or("0.0.0.0".to_string());
        format!("{}:{}", bind, self.port)
    }
}

impl Default for Log {
    fn default() -> Self {
        Log { level: "info".to_string(), console: true, dirs: String::new() }
    }
}

impl Default for Web {
    fn default() -> Self {
        Self { bind: None, port: 8080 }
    }
}

impl Default for Api {
    fn default() -> Self {
        Self { base: "http://127.0.0.1:8080".to_string(), timeout_secs: 10, user_agent: None }
    }
}

impl Default for Listing {
    fn default() -> Self {
        Self { page_size: 10, max_visible: 5, debounce_ms: 300 }
    }
}

impl Default for Clap {
    fn default() -> Self {
        Self {
            name: "MentorClap".to_string(),
            short: "MCLP".to_string(),
            debug: false,
            web: Default::default(),
            api: Default::default(),
            listing: Default::default(),
            log: Some(Default::default()),
        }
    }
}
