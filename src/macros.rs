// src/macros.rs

/// `s!()` → empty `String`; `s!(x)` → `String::from(x)`.
#[macro_export]
macro_rules! s {
    () => {
        ::std::string::String::new()
    };
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

/// Concatenate anything string-like into a new `String`.
/// `join!(&root, "/leaders")`, `join!(first, " ", last)`
#[macro_export]
macro_rules! join {
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut s = ::std::string::String::from(::std::convert::AsRef::<str>::as_ref(&$first));
        $(
            s.push_str(::std::convert::AsRef::<str>::as_ref(&$rest));
        )+
        s
    }};
}
