/// Declares a closed registry of remote resources.
///
/// ```
/// use loadrx::{define_resources, ResourceState, StateStore};
///
/// define_resources! {
///     pub struct ShopResources {
///         key: ShopResource,
///         states: ShopResourceStates,
///         resources: {
///             Price => price: u64,
///             FlashMessages => flash_messages: Vec<String>,
///         }
///     }
/// }
///
/// # async fn example() {
/// let resources = ShopResources::new(
///     || async { 100_000u64 },
///     || async { vec!["Save 10% today only".to_string()] },
/// );
/// let store = StateStore::new(ShopResourceStates::default());
///
/// resources.load(&store, ShopResource::Price, false).await;
/// assert!(store.get_state().price.is_loaded());
/// # }
/// ```
///
/// This generates:
/// - `ShopResource`, an enum with one variant per resource, parseable from
///   the field name;
/// - `ShopResourceStates`, one [`ResourceState`](crate::ResourceState) field
///   per resource, all `Initial` by default;
/// - `ShopResources`, holding the loaders, with `load` and `load_by_name`.
///
/// Every resource type must be `Clone + Debug + PartialEq + Send + Sync +
/// 'static`. The states struct derives `Debug`, `Clone` and `PartialEq`, and
/// it lives inside a [`StateStore`](crate::StateStore).
///
/// The store state reaches the slice through
/// [`HasResources`](crate::HasResources); the states struct implements it for
/// itself, so it can also be the whole store state.
#[macro_export]
macro_rules! define_resources {
    (
        $(#[$meta:meta])*
        $vis:vis struct $defs:ident {
            key: $key:ident,
            states: $states:ident,
            resources: {
                $( $(#[$res_meta:meta])* $variant:ident => $field:ident : $ty:ty ),+ $(,)?
            } $(,)?
        }
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $key {
            $( $(#[$res_meta])* $variant, )+
        }

        impl $key {
            pub const ALL: &'static [$key] = &[ $( $key::$variant, )+ ];

            pub fn name(&self) -> &'static str {
                match self {
                    $( $key::$variant => stringify!($field), )+
                }
            }
        }

        impl ::std::fmt::Display for $key {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl ::std::str::FromStr for $key {
            type Err = $crate::RegistryError;

            fn from_str(name: &str) -> ::std::result::Result<Self, Self::Err> {
                $(
                    if name == stringify!($field) {
                        return Ok($key::$variant);
                    }
                )+
                Err($crate::RegistryError::InvalidKey(name.to_string()))
            }
        }

        #[derive(Debug, Clone, PartialEq)]
        $vis struct $states {
            $( pub $field: $crate::ResourceState<$ty>, )+
        }

        impl ::std::default::Default for $states {
            fn default() -> Self {
                $states {
                    $( $field: $crate::ResourceState::Initial, )+
                }
            }
        }

        impl $states {
            pub fn status(&self, key: $key) -> $crate::ResourceStatus {
                match key {
                    $( $key::$variant => self.$field.status(), )+
                }
            }
        }

        impl $crate::State for $states {}

        impl $crate::HasResources<$states> for $states {
            fn resources(&self) -> &$states {
                self
            }

            fn resources_mut(&mut self) -> &mut $states {
                self
            }
        }

        $(#[$meta])*
        $vis struct $defs {
            loader: $crate::ResourceLoader<::std::sync::Arc<dyn $crate::Clock>>,
            $( $field: ::std::boxed::Box<dyn $crate::ResourceDefinition<$ty>>, )+
        }

        impl $defs {
            #[allow(clippy::too_many_arguments)]
            pub fn new($( $field: impl $crate::ResourceDefinition<$ty>, )+) -> Self {
                $defs {
                    loader: $crate::ResourceLoader::with_clock(
                        ::std::sync::Arc::new($crate::SystemClock) as ::std::sync::Arc<dyn $crate::Clock>,
                    ),
                    $( $field: ::std::boxed::Box::new($field), )+
                }
            }

            /// Stamps every state written by this registry with `clock`.
            pub fn with_clock(self, clock: impl $crate::Clock + 'static) -> Self {
                $defs {
                    loader: $crate::ResourceLoader::with_clock(
                        ::std::sync::Arc::new(clock) as ::std::sync::Arc<dyn $crate::Clock>,
                    ),
                    ..self
                }
            }

            /// Loads the resource `key` into `store`.
            pub fn load<S>(
                &self,
                store: &$crate::StateStore<S>,
                key: $key,
                refresh: bool,
            ) -> $crate::ResourceLoad
            where
                S: $crate::State + $crate::HasResources<$states>,
            {
                let options = $crate::LoadOptions::default().with_refresh(refresh);
                match key {
                    $(
                        $key::$variant => {
                            fn slot<St: $crate::HasResources<$states>>(
                                state: &St,
                            ) -> &$crate::ResourceState<$ty> {
                                &state.resources().$field
                            }
                            fn slot_mut<St: $crate::HasResources<$states>>(
                                state: &mut St,
                            ) -> &mut $crate::ResourceState<$ty> {
                                &mut state.resources_mut().$field
                            }
                            let definition = &self.$field;
                            self.loader.load_resource(
                                key.name(),
                                || definition.fetch(),
                                store.slice(slot::<S>, slot_mut::<S>),
                                options,
                            )
                        }
                    )+
                }
            }

            /// Loads the resource called `name`, failing fast when no such resource is declared.
            pub fn load_by_name<S>(
                &self,
                store: &$crate::StateStore<S>,
                name: &str,
                refresh: bool,
            ) -> ::std::result::Result<$crate::ResourceLoad, $crate::RegistryError>
            where
                S: $crate::State + $crate::HasResources<$states>,
            {
                let key = name.parse::<$key>()?;
                Ok(self.load(store, key, refresh))
            }
        }
    };
}
