/// 将表达式转换为可选字符串 (to optional string)
///
/// # 示例
/// ```
/// use mentorclap::tos;
/// assert_eq!(tos!("page"), Some("page".to_string()));
/// assert_eq!(tos!("page ", 2), Some("page 2".to_string()));
/// ```
#[macro_export]
macro_rules! tos {
    ($e:expr) => {
        Some($e.to_string())
    };
    ($($e:expr),+) => {
        Some($crate::ts_helper!($($e),+))
    };
}

/// 将表达式拼接为字符串 (to string)
///
/// # 示例
/// ```
/// use mentorclap::ts;
/// assert_eq!(ts!("total=", 42), "total=42");
/// ```
#[macro_export]
macro_rules! ts {
    ($e:expr) => {
        $e.to_string()
    };
    ($($e:expr),+) => {
        $crate::ts_helper!($($e),+)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! ts_helper {
    ($e:expr) => {
        $e.to_string()
    };
    ($e:expr, $($rest:expr),+) => {
        format!("{}{}", $e, $crate::ts_helper!($($rest),+))
    };
}
