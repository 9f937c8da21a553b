/// Layouted: predefined LayoutedC constructors per domain
/// ResultE<T> = Result<T, Erx>;
/// ResultEX = ResultE<()>;
/// fn smp<T: ToString>(error: T) -> Erx
/// fn amp<T: ToString>(additional: &str) -> impl Fn(T) -> Erx
/// fn emp<T: Error>(error: T) -> Erx
use crate::conf;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

lazy_static! {
    static ref APP_SHORT: String = conf::clap().read().map(|c| c.short.clone()).unwrap_or_else(|_| "MCLP".to_string());
}

/// Zero
pub static LAYOUTED_C_ZERO: &str = "0000";

/// ResultE<T> = Result<T, Erx>;
pub type ResultE<T> = Result<T, Erx>;

/// ResultEX = ResultE<()>;
pub type ResultEX = ResultE<()>;

/// Layouted: Some predefined Layouted methods
pub struct Layouted;

pub fn describe_error(e: &dyn std::error::Error) -> String {
    let mut description = e.to_string();
    let mut current = e.source();
    while let Some(source) = current {
        description.push_str(&format!("\nCaused by: {}", source));
        current = source.source();
    }
    description
}

/// emp: keep the whole `source()` chain of a std error under the "ORIGIN" extra
pub fn emp<T: std::error::Error>(error: T) -> Erx {
    let extra = vec![(String::from("ORIGIN"), describe_error(&error))];
    let message = error.to_string();
    Erx { code: Default::default(), message, extra }
}

/// smp: simple convert T: ToString to Erx
pub fn smp<T: ToString>(error: T) -> Erx {
    Erx { code: Default::default(), message: error.to_string(), extra: Vec::new() }
}

/// amp: return a function that convert T: ToString to Erx, message prefixed by `additional`
///
/// ```
/// use mentorclap::erx::amp;
/// let fetch_failed = amp::<&str>("fetch blogs");
/// assert_eq!(fetch_failed("timeout").message(), "fetch blogs : timeout");
/// ```
pub fn amp<T: ToString>(additional: &str) -> impl Fn(T) -> Erx {
    let additional = additional.to_string();
    move |err: T| Erx { code: Default::default(), message: format!("{} : {}", additional, err.to_string()), extra: Vec::new() }
}

/// Predefined Layouted Code with length 4
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum PreL4 {
    /// Common
    COMM,
    /// Configuration
    CONF,
    /// Listing: query decoding and validation
    LIST,
    /// Fetch: remote data source
    FTCH,
    /// Web: http surface
    WEBS,
    /// Undefined
    UNDF,
    ///
    OTHE,
}

impl PreL4 {
    pub fn four(&self) -> &'static str {
        match self {
            PreL4::COMM => "COMM",
            PreL4::CONF => "CONF",
            PreL4::LIST => "LIST",
            PreL4::FTCH => "FTCH",
            PreL4::WEBS => "WEBS",
            PreL4::UNDF => "UNDF",
            PreL4::OTHE => "OTHE",
        }
    }

    pub fn parse(s: &str) -> Option<PreL4> {
        match s.to_uppercase().as_str() {
            "COMM" => Some(PreL4::COMM),
            "CONF" => Some(PreL4::CONF),
            "LIST" => Some(PreL4::LIST),
            "FTCH" => Some(PreL4::FTCH),
            "WEBS" => Some(PreL4::WEBS),
            "UNDF" => Some(PreL4::UNDF),
            "OTHE" => Some(PreL4::OTHE),
            _ => None,
        }
    }
}

impl Display for PreL4 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.four())
    }
}

impl From<&str> for PreL4 {
    fn from(s: &str) -> Self {
        PreL4::parse(s).unwrap_or(PreL4::OTHE)
    }
}

impl From<PreL4> for String {
    fn from(value: PreL4) -> Self {
        value.four().to_string()
    }
}

impl Layouted {
    pub fn common(category: &str, detail: &str) -> LayoutedC {
        LayoutedC::new(PreL4::COMM.four(), category, detail)
    }

    pub fn config(category: &str, detail: &str) -> LayoutedC {
        LayoutedC::new(PreL4::CONF.four(), category, detail)
    }

    pub fn listing(category: &str, detail: &str) -> LayoutedC {
        LayoutedC::new(PreL4::LIST.four(), category, detail)
    }

    pub fn fetch(category: &str, detail: &str) -> LayoutedC {
        LayoutedC::new(PreL4::FTCH.four(), category, detail)
    }

    pub fn web(category: &str, detail: &str) -> LayoutedC {
        LayoutedC::new(PreL4::WEBS.four(), category, detail)
    }
}

/// Code format
/// aaaa-xxxx-yyyy-zzzz
///
///    aaaa : application short name
///    xxxx : domain (PreL4)
///    yyyy : category inside the domain
///    zzzz : concrete error
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LayoutedC {
    pub application: String,
    pub domain: String,
    pub category: String,
    pub detail: String,
}

impl LayoutedC {
    pub fn okay() -> LayoutedC {
        LayoutedC {
            application: APP_SHORT.clone(),
            domain: LAYOUTED_C_ZERO.into(),
            category: LAYOUTED_C_ZERO.into(),
            detail: LAYOUTED_C_ZERO.into(),
        }
    }

    pub fn new(domain: &str, category: &str, detail: &str) -> LayoutedC {
        LayoutedC { application: APP_SHORT.clone(), domain: domain.into(), category: category.into(), detail: detail.into() }
    }

    pub fn is_okc(&self) -> bool {
        [&self.domain, &self.category, &self.detail].iter().all(|part| part.chars().all(|c| c == '0'))
    }

    pub fn layout_string(&self) -> String {
        format!("{}-{}-{}-{}", self.application, self.domain, self.category, self.detail)
    }
}

impl Default for LayoutedC {
    fn default() -> Self {
        LayoutedC { application: APP_SHORT.clone(), domain: PreL4::UNDF.into(), category: PreL4::UNDF.into(), detail: PreL4::UNDF.into() }
    }
}

impl From<LayoutedC> for String {
    fn from(value: LayoutedC) -> Self {
        value.layout_string()
    }
}

impl From<String> for LayoutedC {
    fn from(value: String) -> Self {
        let mut c = LayoutedC::default();
        let parts: Vec<&str> = value.split('-').collect();
        if let Some(application) = parts.first() {
            c.application = application.to_string();
        }
        if let Some(domain) = parts.get(1) {
            c.domain = domain.to_string();
        }
        if let Some(category) = parts.get(2) {
            c.category = category.to_string();
        }
        if let Some(detail) = parts.get(3) {
            c.detail = detail.to_string();
        }
        c
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Erx {
    code: LayoutedC,
    message: String,
    extra: Vec<(String, String)>,
}

impl Erx {
    pub fn new(message: &str) -> Erx {
        Erx { code: Default::default(), message: message.to_string(), extra: Vec::new() }
    }

    pub fn coded(code: LayoutedC, message: &str) -> Erx {
        Erx { code, message: message.to_string(), extra: Vec::new() }
    }

    pub fn code(&self) -> LayoutedC {
        self.code.clone()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn description(&self) -> String {
        let mut description = self.code.layout_string();
        description.push(' ');
        description.push_str(&self.message);
        if self.extra.is_empty() {
            return description;
        }

        let pairs: Vec<String> = self.extra.iter().map(|x| format!("{}={}", x.0, x.1)).collect();
        description.push_str(&format!(" {{ {} }}", pairs.join(" ,")));

        description
    }

    /// get extra
    pub fn extra(&self) -> &Vec<(String, String)> {
        &self.extra
    }

    /// get extra value, if not exists, return None
    pub fn extra_val(&self, key: &str) -> Option<String> {
        self.extra.iter().find(|e| e.0.eq(key)).map(|e| e.1.clone())
    }

    /// add extra
    /// if key exists, replace value
    pub fn add_extra(&mut self, key: &str, value: &str) -> &mut Self {
        for (k, v) in self.extra.iter_mut() {
            if *k == key {
                *v = value.to_string();
                return self;
            }
        }

        self.extra.push((key.to_string(), value.to_string()));
        self
    }
}

impl Display for Erx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", serde_json::to_string(&self).unwrap_or_default())
    }
}

impl std::error::Error for Erx {}

impl From<&str> for Erx {
    fn from(s: &str) -> Self {
        Erx::new(s)
    }
}

impl From<String> for Erx {
    fn from(str: String) -> Erx {
        if str.is_empty() {
            return Erx::default();
        }

        serde_json::from_str(&str).unwrap_or_else(|_| Erx::new(&str))
    }
}

impl From<(&str, &str)> for Erx {
    fn from((code, message): (&str, &str)) -> Self {
        Erx { code: code.to_string().into(), message: message.to_string(), extra: Default::default() }
    }
}
