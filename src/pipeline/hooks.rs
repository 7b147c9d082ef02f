//! Named hooks and the ordered per-stage hook lists.

use std::borrow::Cow;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use super::{Error, Request};

/// Pipeline stage a hook list belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Mutate the outgoing request before it is sent.
    Build,
    /// Observe or perform the transport call.
    Send,
    /// Interpret the raw response.
    Unmarshal,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Build => "build",
            Self::Send => "send",
            Self::Unmarshal => "unmarshal",
        };
        f.write_str(name)
    }
}

/// Side effect a hook applies to an in-flight request.
///
/// Returning `Err` aborts the request: no later hook in the stage and
/// no later stage runs.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Applies the hook to `request`.
    ///
    /// # Errors
    ///
    /// Any error aborts the request and is returned to the caller as is.
    async fn handle(&self, request: &mut Request) -> Result<(), Error>;
}

#[async_trait]
impl<H: Handler + ?Sized> Handler for Arc<H> {
    async fn handle(&self, request: &mut Request) -> Result<(), Error> {
        (**self).handle(request).await
    }
}

struct FnHandler<F>(F);

#[async_trait]
impl<F> Handler for FnHandler<F>
where
    F: Fn(&mut Request) -> Result<(), Error> + Send + Sync,
{
    async fn handle(&self, request: &mut Request) -> Result<(), Error> {
        (self.0)(request)
    }
}

/// A named handler.
///
/// The name is only used for logging and for inspecting hook lists.
#[derive(Clone)]
pub struct Hook {
    name: Cow<'static, str>,
    handler: Arc<dyn Handler>,
}

impl Hook {
    /// Creates a hook from a handler.
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>, handler: impl Handler + 'static) -> Self {
        Self {
            name: name.into(),
            handler: Arc::new(handler),
        }
    }

    /// Creates a hook from a synchronous closure.
    #[must_use]
    pub fn from_fn<F>(name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: Fn(&mut Request) -> Result<(), Error> + Send + Sync + 'static,
    {
        Self::new(name, FnHandler(f))
    }

    /// Returns the hook name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Applies the hook to `request`.
    ///
    /// # Errors
    ///
    /// Propagates the handler's error.
    pub async fn run(&self, request: &mut Request) -> Result<(), Error> {
        self.handler.handle(request).await
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Hook").field(&self.name).finish()
    }
}

/// Ordered list of hooks for one stage.
///
/// Hooks run front to back.
#[derive(Debug, Clone, Default)]
pub struct HookList {
    hooks: VecDeque<Hook>,
}

impl HookList {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            hooks: VecDeque::new(),
        }
    }

    /// Adds a hook that runs before every hook already in the list.
    pub fn push_front(&mut self, hook: Hook) {
        self.hooks.push_front(hook);
    }

    /// Adds a hook that runs after every hook already in the list.
    pub fn push_back(&mut self, hook: Hook) {
        self.hooks.push_back(hook);
    }

    /// Removes every hook.
    pub fn clear(&mut self) {
        self.hooks.clear();
    }

    /// Returns true if the list has no hooks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Returns the number of hooks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Returns hook names in execution order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.hooks.iter().map(Hook::name)
    }

    /// Runs every hook in order, stopping at the first error.
    pub(crate) async fn run(&self, stage: Stage, request: &mut Request) -> Result<(), Error> {
        for hook in &self.hooks {
            tracing::trace!(%stage, hook = hook.name(), "running hook");
            if let Err(e) = hook.run(request).await {
                tracing::debug!(%stage, hook = hook.name(), error = %e, "hook aborted request");
                return Err(e);
            }
        }
        Ok(())
    }
}

/// The three stage lists a client hands to every request it builds.
///
/// Requests take a snapshot (clone) of these, so per-call additions never
/// leak back into the client's defaults.
#[derive(Debug, Clone, Default)]
pub struct Hooks {
    /// Hooks that mutate the outgoing request
    pub build: HookList,
    /// Hooks around (and including) the transport call
    pub send: HookList,
    /// Hooks that interpret the response
    pub unmarshal: HookList,
}

impl Hooks {
    /// Returns true if all three stages are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.build.is_empty() && self.send.is_empty() && self.unmarshal.is_empty()
    }
}
