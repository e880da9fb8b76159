//! Declarative macros for ergonomic effect construction

/// Create an `Effect::Future` from an async block
///
/// The block is moved into the future, so clone any `Arc` collaborators
/// out of the environment before invoking the macro.
///
/// # Example
///
/// ```rust,ignore
/// use showtime_core::async_effect;
///
/// let api = Arc::clone(&env.api);
/// async_effect! {
///     match api.list_movies().await {
///         Ok(movies) => Some(FormAction::CatalogLoaded { movies }),
///         Err(error) => Some(FormAction::CatalogFailed { error: error.to_string() }),
///     }
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}
