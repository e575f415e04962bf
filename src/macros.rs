// src/macros.rs

/// `String` shorthand: `s!()` is an empty string, `s!(x)` is `String::from(x)`.
#[macro_export]
macro_rules! s {
    () => {
        ::std::string::String::new()
    };
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

/// Concatenate string slices into a fresh `String`.
#[macro_export]
macro_rules! join {
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut s = ::std::string::String::from($first);
        $(
            s.push_str($rest);
        )+
        s
    }};
}

/// Dotted label path: `label!("", "Login")` is `Login`,
/// `label!("Login", "UsernameInput")` is `Login.UsernameInput`.
#[macro_export]
macro_rules! label {
    ($prefix:expr, $name:expr) => {{
        let prefix: &str = $prefix;
        let name: &str = $name;
        if prefix.is_empty() {
            $crate::s!(name)
        } else {
            $crate::join!(prefix, ".", name)
        }
    }};
}
