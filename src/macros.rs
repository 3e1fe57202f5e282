pub use enclose::*;

/// Builds a plain [`Object`](crate::Object) from `key => value` pairs.
#[macro_export]
macro_rules! object {
    ($($key:expr => $value:expr),* $(,)?) => {
        $crate::Object::new()$(.with($key, $value))*
    };
}

#[macro_export]
macro_rules! watch {
    (( $($d_tt:tt)* ) $data:expr, $key:expr, $value:ident => $($b:tt)*) => {
        $crate::Watcher::new($data, $key, $crate::macros::enclose!(($( $d_tt )*) move |$value: &$crate::Value| { $($b)* }))
    };
    ($data:expr, $key:expr, $value:ident => $($b:tt)*) => {
        $crate::Watcher::new($data, $key, move |$value: &$crate::Value| { $($b)* })
    };
}
