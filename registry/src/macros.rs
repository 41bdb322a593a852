//! Public macros for declaring services and resolving them.

/// Resolves a service from a registry, panicking if nothing matches.
///
/// Lookup follows [`Registry::get`](crate::Registry::get): exact key first, then the
/// first assignable instance. For a non-panicking lookup call `get` directly.
///
/// # Panics
///
/// Panics with the requested type name if the service cannot be resolved.
///
/// # Examples
///
/// ```
/// use tether_registry::{resolve, service, Registry};
///
/// trait Greeter: Send + Sync { fn greet(&self) -> String; }
/// struct EnglishGreeter;
/// impl Greeter for EnglishGreeter { fn greet(&self) -> String { "Hello!".to_string() } }
/// service!(EnglishGreeter => dyn Greeter);
///
/// let registry = Registry::new();
/// registry.insert(EnglishGreeter).unwrap();
///
/// // Resolve by concrete type or by trait.
/// let _concrete = resolve!(registry, EnglishGreeter);
/// let greeter = resolve!(registry, trait Greeter);
/// assert_eq!(greeter.greet(), "Hello!");
/// ```
#[macro_export]
macro_rules! resolve {
    // resolve!(registry, trait MyTrait)
    ($registry:expr, trait $trait_ident:ident) => {
        $registry
            .get::<dyn $trait_ident>()
            .unwrap_or_else(|| {
                panic!(
                    "Failed to resolve required trait service: {}",
                    std::any::type_name::<dyn $trait_ident>()
                )
            })
    };

    // resolve!(registry, MyService)
    ($registry:expr, $type:ty) => {
        $registry
            .get::<$type>()
            .unwrap_or_else(|| {
                panic!(
                    "Failed to resolve required service: {}",
                    std::any::type_name::<$type>()
                )
            })
    };
}

/// Implements [`Service`](crate::Service) for a type, listing the trait objects it can
/// be served as.
///
/// ```
/// use tether_registry::service;
///
/// trait Clock: Send + Sync {}
/// trait Named: Send + Sync {}
///
/// struct SystemClock;
/// impl Clock for SystemClock {}
/// impl Named for SystemClock {}
///
/// struct Plain;
///
/// service!(SystemClock => dyn Clock, dyn Named);
/// service!(Plain);
/// ```
#[macro_export]
macro_rules! service {
    ($type:ty) => {
        impl $crate::Service for $type {}
    };

    ($type:ty => $($capability:ty),+ $(,)?) => {
        impl $crate::Service for $type {
            fn capabilities(table: &mut $crate::Capabilities<Self>) {
                $( table.provide::<$capability>(|it| it); )+
            }
        }
    };
}
