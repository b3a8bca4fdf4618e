use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::config::PluginSettings;
use crate::context::{Handler, RequestContext};
use crate::error::Error;
use crate::guard::{GuardContext, GuardFactory};
use crate::logging;
use crate::login::{login_factory, LOGIN_CONDITION};

/// Registry of named guard conditions.
///
/// `GuardRegistry` is the only way to turn a condition name into a guarded
/// handler. It is owned by the application's route-setup code; there is no
/// process-wide instance. A new registry already knows the `login`
/// condition, and further conditions can be registered at any time before
/// the routes that use them are declared.
///
/// Names are case-sensitive. Registering an existing name replaces it.
///
/// # Examples
///
/// ```
/// use route_guard::{handler, GuardRegistry};
/// use route_guard::web::{RequestAdapter, Response};
///
/// let registry = GuardRegistry::<RequestAdapter>::default();
/// let private = registry
///     .needs("login", handler(|_req: &RequestAdapter| Response::ok("welcome")))
///     .expect("login is built in");
///
/// let req = RequestAdapter::get("/private?user=dagolden");
/// assert_eq!(
///     private(&req).location(),
///     Some("/login?return_url=%2Fprivate%3Fuser%3Ddagolden&user=dagolden")
/// );
///
/// assert!(registry.needs("admin", handler(|_req: &RequestAdapter| Response::ok(""))).is_err());
/// ```
pub struct GuardRegistry<C: RequestContext> {
    context: GuardContext,
    factories: HashMap<String, GuardFactory<C>>,
}

/// One element of a flat `name, factory, name, factory, ...` extension list.
pub enum ExtensionItem<C: RequestContext> {
    /// A condition name
    Name(String),
    /// The factory for the preceding name
    Factory(GuardFactory<C>),
}

impl<C: RequestContext> From<&str> for ExtensionItem<C> {
    fn from(name: &str) -> Self {
        ExtensionItem::Name(name.to_string())
    }
}

impl<C: RequestContext> From<String> for ExtensionItem<C> {
    fn from(name: String) -> Self {
        ExtensionItem::Name(name)
    }
}

impl<C: RequestContext> From<GuardFactory<C>> for ExtensionItem<C> {
    fn from(factory: GuardFactory<C>) -> Self {
        ExtensionItem::Factory(factory)
    }
}

impl<C: RequestContext + 'static> GuardRegistry<C> {
    /// Creates a registry seeded with the `login` condition.
    pub fn new(settings: PluginSettings) -> Self {
        let mut registry = Self::empty(settings);
        registry.register(LOGIN_CONDITION, login_factory());
        registry
    }
}

impl<C: RequestContext> GuardRegistry<C> {
    /// Creates a registry with no conditions at all.
    pub fn empty(settings: PluginSettings) -> Self {
        Self {
            context: GuardContext::new(settings),
            factories: HashMap::new(),
        }
    }

    /// Registers `factory` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, factory: GuardFactory<C>) {
        let name = name.into();
        logging::condition_registered(&name, self.factories.contains_key(&name));
        self.factories.insert(name, factory);
    }

    /// Registers every `(name, factory)` pair in order.
    ///
    /// Later pairs win over earlier ones with the same name.
    pub fn extend<I, N>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (N, GuardFactory<C>)>,
        N: Into<String>,
    {
        for (name, factory) in pairs {
            self.register(name, factory);
        }
    }

    /// Registers conditions from a flat, alternating name/factory list.
    ///
    /// # Errors
    ///
    /// Returns `MalformedExtension` if the list has an odd length or an item
    /// is out of position. The registry is left unchanged in that case.
    pub fn extend_from_list(&mut self, items: Vec<ExtensionItem<C>>) -> Result<(), Error> {
        let len = items.len();
        if len % 2 != 0 {
            logging::malformed_extension(len);
            return Err(Error::malformed_extension(
                len,
                "extension items must form name/factory pairs",
            ));
        }

        let mut pairs = Vec::with_capacity(len / 2);
        let mut iter = items.into_iter().enumerate();
        while let (Some((i, name)), Some((j, factory))) = (iter.next(), iter.next()) {
            match (name, factory) {
                (ExtensionItem::Name(name), ExtensionItem::Factory(factory)) => {
                    pairs.push((name, factory))
                }
                (ExtensionItem::Factory(_), _) => {
                    logging::malformed_extension(len);
                    return Err(Error::malformed_extension(
                        len,
                        format!("expected a condition name at position {}", i),
                    ));
                }
                (_, ExtensionItem::Name(_)) => {
                    logging::malformed_extension(len);
                    return Err(Error::malformed_extension(
                        len,
                        format!("expected a guard factory at position {}", j),
                    ));
                }
            }
        }

        self.extend(pairs);
        Ok(())
    }

    /// Looks up the factory registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownCondition` if nothing is registered under `name`.
    pub fn resolve(&self, name: &str) -> Result<GuardFactory<C>, Error> {
        match self.factories.get(name) {
            Some(factory) => Ok(Arc::clone(factory)),
            None => {
                logging::unknown_condition(name);
                Err(Error::unknown_condition(name))
            }
        }
    }

    /// Guards `protected` with the condition `name`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownCondition` if `name` is not registered.
    pub fn needs(&self, name: &str, protected: Handler<C>) -> Result<Handler<C>, Error> {
        self.needs_with::<&str>(name, &[], protected)
    }

    /// Guards `protected` with the condition `name` and its arguments.
    ///
    /// The factory is invoked exactly once; the handler it returns is what
    /// the router should install.
    ///
    /// # Errors
    ///
    /// Returns `UnknownCondition` if `name` is not registered.
    pub fn needs_with<S>(
        &self,
        name: &str,
        args: &[S],
        protected: Handler<C>,
    ) -> Result<Handler<C>, Error>
    where
        S: AsRef<str>,
    {
        let factory = self.resolve(name)?;
        let args: Vec<String> = args.iter().map(|a| a.as_ref().to_string()).collect();
        logging::guard_installed(name, args.len());
        Ok(factory(&self.context, args.as_slice(), protected))
    }

    /// Returns true if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Returns the registered condition names, sorted.
    pub fn conditions(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered conditions.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns true if no conditions are registered.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Returns the context handed to every factory.
    pub fn context(&self) -> &GuardContext {
        &self.context
    }

    /// Returns the host's plugin settings.
    pub fn settings(&self) -> &PluginSettings {
        self.context.settings()
    }
}

impl<C: RequestContext + 'static> Default for GuardRegistry<C> {
    fn default() -> Self {
        Self::new(PluginSettings::default())
    }
}

impl<C: RequestContext> fmt::Debug for GuardRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardRegistry")
            .field("conditions", &self.conditions())
            .field("context", &self.context)
            .finish()
    }
}
