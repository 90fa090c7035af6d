//! A registry of lazily evaluated, scoped design tokens.
//!
//! A design token is a named value. Its default is either a constant or a
//! derivation from other tokens. Scopes form a tree rooted at
//! [`TokenRegistry::root`], and each scope may override a token's binding for
//! itself and its descendants. Reading a token in a scope uses the closest
//! binding on the path to the root and falls back to the default. Derived
//! bindings always evaluate in the reading scope, even when they are bound in
//! an ancestor.
//!
//! Values are cached per token and scope. While evaluating a derived token,
//! the registry records every token read through the [`TokenContext`]. Writing
//! a binding then drops the cached values of the written token in that scope
//! and its descendants, followed by every transitively dependent value.
//! Re-evaluation is lazy and happens on the next read. Subscribers learn about
//! all dropped values once the write has been processed.
//!
//! ```
//! # use swatchbook::{TokenRegistry, error::TokenError};
//! let registry = TokenRegistry::new();
//! let unit = registry.create("design-unit", 4.0)?;
//! let double = registry.create_derived("double-unit", move |cx| Ok(2.0 * cx.get(unit)?))?;
//!
//! let root = registry.root();
//! let scope = registry.create_scope(root);
//! registry.set_value_for(unit, scope, 5.0);
//!
//! assert_eq!(registry.get_value_for(double, root)?, 8.0);
//! assert_eq!(registry.get_value_for(double, scope)?, 10.0);
//! # Ok::<(), TokenError>(())
//! ```

use std::any::{type_name, Any, TypeId};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::marker::PhantomData;
use std::rc::{Rc, Weak};

use crate::error::TokenError;

// ====================================================================================================================
// Handles
// ====================================================================================================================

/// An opaque handle for a scope.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(usize);

/// An opaque, untyped handle for a token.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(usize);

/// A typed handle for a token.
///
/// Handles are only meaningful for the registry that created them.
pub struct Token<T> {
    id: TokenId,
    marker: PhantomData<fn() -> T>,
}

impl<T> Token<T> {
    const fn new(id: TokenId) -> Self {
        Self {
            id,
            marker: PhantomData,
        }
    }

    /// Get the untyped handle.
    pub const fn id(&self) -> TokenId {
        self.id
    }
}

impl<T> Clone for Token<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Token<T> {}

impl<T> PartialEq for Token<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Token<T> {}

impl<T> std::hash::Hash for Token<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> std::fmt::Debug for Token<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Token").field(&self.id.0).finish()
    }
}

impl<T> From<Token<T>> for TokenId {
    fn from(value: Token<T>) -> Self {
        value.id
    }
}

/// The notification for a token value that is no longer current.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TokenChange {
    pub token: TokenId,
    pub scope: ScopeId,
}

// ====================================================================================================================
// Bindings
// ====================================================================================================================

type Value = Rc<dyn Any>;
type Derivation = Rc<dyn Fn(&TokenContext<'_>) -> Result<Value, TokenError>>;

#[derive(Clone)]
enum Binding {
    Value(Value),
    Derived(Derivation),
}

impl Binding {
    fn value<T: 'static>(value: T) -> Self {
        Self::Value(Rc::new(value))
    }

    fn derived<T, F>(derivation: F) -> Self
    where
        T: 'static,
        F: Fn(&TokenContext<'_>) -> Result<T, TokenError> + 'static,
    {
        let derivation: Derivation = Rc::new(move |cx: &TokenContext<'_>| {
            derivation(cx).map(|value| Rc::new(value) as Value)
        });
        Self::Derived(derivation)
    }
}

/// The context for evaluating a derived token.
pub struct TokenContext<'a> {
    registry: &'a TokenRegistry,
    scope: ScopeId,
}

impl TokenContext<'_> {
    /// Get the scope the token is being evaluated for.
    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    /// Get the value of the given token in the current scope and record the
    /// dependency.
    pub fn get<T: Clone + 'static>(&self, token: Token<T>) -> Result<T, TokenError> {
        self.registry.get_value_for(token, self.scope)
    }
}

// ====================================================================================================================
// Registry State
// ====================================================================================================================

type Key = (TokenId, ScopeId);

struct ScopeNode {
    parent: Option<ScopeId>,
    children: Vec<ScopeId>,
}

struct TokenNode {
    name: String,
    type_id: TypeId,
    default: Binding,
    bindings: HashMap<ScopeId, Binding>,
}

#[derive(Default)]
struct Registry {
    scopes: Vec<ScopeNode>,
    tokens: Vec<TokenNode>,
    names: HashMap<String, TokenId>,
    cache: HashMap<Key, Value>,
    dependencies: HashMap<Key, HashSet<Key>>,
    dependents: HashMap<Key, HashSet<Key>>,
    evaluating: Vec<Key>,
}

impl Registry {
    fn name(&self, token: TokenId) -> &str {
        self.tokens
            .get(token.0)
            .map_or("<unknown>", |node| node.name.as_str())
    }

    fn resolve(&self, token: TokenId, scope: ScopeId) -> Option<Binding> {
        let node = self.tokens.get(token.0)?;
        let mut current = Some(scope);
        while let Some(scope) = current {
            if let Some(binding) = node.bindings.get(&scope) {
                return Some(binding.clone());
            }
            current = self.scopes.get(scope.0).and_then(|node| node.parent);
        }

        Some(node.default.clone())
    }

    fn subtree(&self, scope: ScopeId) -> Vec<ScopeId> {
        let mut result = Vec::new();
        let mut pending = vec![scope];
        while let Some(scope) = pending.pop() {
            result.push(scope);
            if let Some(node) = self.scopes.get(scope.0) {
                pending.extend(node.children.iter().copied());
            }
        }
        result
    }

    fn record(&mut self, dependency: Key) {
        if let Some(dependent) = self.evaluating.last().copied() {
            self.dependencies
                .entry(dependent)
                .or_default()
                .insert(dependency);
            self.dependents
                .entry(dependency)
                .or_default()
                .insert(dependent);
        }
    }

    /// Drop the cached values of the token in the scope and its descendants as
    /// well as all transitive dependents. Return the dropped keys.
    fn invalidate(&mut self, token: TokenId, scope: ScopeId) -> Vec<Key> {
        let mut pending: Vec<Key> = self
            .subtree(scope)
            .into_iter()
            .map(|scope| (token, scope))
            .collect();
        let mut seen = HashSet::new();
        let mut dropped = Vec::new();

        while let Some(key) = pending.pop() {
            if !seen.insert(key) {
                continue;
            }

            if self.cache.remove(&key).is_some() {
                dropped.push(key);
            }
            if let Some(dependencies) = self.dependencies.remove(&key) {
                for dependency in dependencies {
                    if let Some(dependents) = self.dependents.get_mut(&dependency) {
                        dependents.remove(&key);
                        if dependents.is_empty() {
                            self.dependents.remove(&dependency);
                        }
                    }
                }
            }
            if let Some(dependents) = self.dependents.remove(&key) {
                pending.extend(dependents);
            }
        }

        dropped
    }
}

type Listener = Rc<dyn Fn(&TokenChange)>;
type Listeners = RefCell<Vec<(u64, Listener)>>;

/// A subscription to token changes. Dropping the subscription ends it.
#[must_use = "dropping a subscription ends it"]
pub struct Subscription {
    listeners: Weak<Listeners>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Subscription").field(&self.id).finish()
    }
}

// ====================================================================================================================
// Token Registry
// ====================================================================================================================

/// A registry of design tokens and the scopes they are evaluated in.
///
/// The registry is single-threaded and uses interior mutability, so that
/// derived tokens can read other tokens during evaluation. No internal borrow
/// is held while a derivation or subscriber runs.
pub struct TokenRegistry {
    state: RefCell<Registry>,
    listeners: Rc<Listeners>,
    next_subscription: Cell<u64>,
}

impl Default for TokenRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenRegistry {
    /// Create a new registry with only a root scope.
    pub fn new() -> Self {
        let state = Registry {
            scopes: vec![ScopeNode {
                parent: None,
                children: Vec::new(),
            }],
            ..Default::default()
        };

        Self {
            state: RefCell::new(state),
            listeners: Rc::new(RefCell::new(Vec::new())),
            next_subscription: Cell::new(0),
        }
    }

    /// Get the root scope.
    pub const fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    /// Create a new scope nested inside the given parent scope.
    ///
    /// A parent created by another registry may not exist in this one. The
    /// new scope then becomes a child of the root.
    pub fn create_scope(&self, parent: ScopeId) -> ScopeId {
        let mut state = self.state.borrow_mut();
        let scope = ScopeId(state.scopes.len());
        let parent = if parent.0 < state.scopes.len() {
            parent
        } else {
            tracing::warn!(?parent, "unknown parent scope, nesting in root instead");
            ScopeId(0)
        };

        state.scopes[parent.0].children.push(scope);
        state.scopes.push(ScopeNode {
            parent: Some(parent),
            children: Vec::new(),
        });
        scope
    }

    /// Get the parent of the given scope.
    pub fn parent_of(&self, scope: ScopeId) -> Option<ScopeId> {
        self.state
            .borrow()
            .scopes
            .get(scope.0)
            .and_then(|node| node.parent)
    }

    /// Get the number of tokens.
    pub fn len(&self) -> usize {
        self.state.borrow().tokens.len()
    }

    /// Determine whether this registry has no tokens.
    pub fn is_empty(&self) -> bool {
        self.state.borrow().tokens.is_empty()
    }

    /// Get the name of the token with the given handle.
    pub fn name_of(&self, token: impl Into<TokenId>) -> String {
        self.state.borrow().name(token.into()).to_string()
    }

    fn register<T: 'static>(&self, name: String, default: Binding) -> Result<Token<T>, TokenError> {
        let mut state = self.state.borrow_mut();
        if state.names.contains_key(&name) {
            return Err(TokenError::DuplicateName(name));
        }

        let id = TokenId(state.tokens.len());
        tracing::trace!(token = %name, "create design token");
        state.names.insert(name.clone(), id);
        state.tokens.push(TokenNode {
            name,
            type_id: TypeId::of::<T>(),
            default,
            bindings: HashMap::new(),
        });
        Ok(Token::new(id))
    }

    /// Create a new token with a constant default value.
    pub fn create<T: Clone + 'static>(
        &self,
        name: impl Into<String>,
        default: T,
    ) -> Result<Token<T>, TokenError> {
        self.register(name.into(), Binding::value(default))
    }

    /// Create a new token whose default value is derived from other tokens.
    pub fn create_derived<T, F>(&self, name: impl Into<String>, derivation: F) -> Result<Token<T>, TokenError>
    where
        T: Clone + 'static,
        F: Fn(&TokenContext<'_>) -> Result<T, TokenError> + 'static,
    {
        self.register(name.into(), Binding::derived(derivation))
    }

    /// Look up a token by name.
    ///
    /// This method fails if no token has the name or the token's values have
    /// a different type.
    pub fn lookup<T: Clone + 'static>(&self, name: &str) -> Result<Token<T>, TokenError> {
        let state = self.state.borrow();
        let id = *state
            .names
            .get(name)
            .ok_or_else(|| TokenError::UnknownName(name.to_string()))?;

        if state.tokens[id.0].type_id != TypeId::of::<T>() {
            return Err(TokenError::TypeMismatch {
                name: name.to_string(),
                expected: type_name::<T>(),
            });
        }

        Ok(Token::new(id))
    }

    // ----------------------------------------------------------------------------------------------------------------

    /// Get the value of the token in the given scope.
    ///
    /// This method fails if the token's derivation fails or depends on
    /// itself.
    pub fn get_value_for<T: Clone + 'static>(&self, token: Token<T>, scope: ScopeId) -> Result<T, TokenError> {
        let value = self.evaluate(token.id, scope)?;
        value
            .downcast_ref::<T>()
            .cloned()
            .ok_or_else(|| TokenError::TypeMismatch {
                name: self.name_of(token),
                expected: type_name::<T>(),
            })
    }

    fn evaluate(&self, token: TokenId, scope: ScopeId) -> Result<Value, TokenError> {
        let key = (token, scope);

        let binding = {
            let mut state = self.state.borrow_mut();
            if state.evaluating.contains(&key) {
                let name = state.name(token).to_string();
                tracing::warn!(token = %name, ?scope, "design token depends on itself");
                return Err(TokenError::Cycle(name));
            }

            state.record(key);
            if let Some(value) = state.cache.get(&key) {
                tracing::trace!(token = %state.name(token), ?scope, "cache hit");
                return Ok(Rc::clone(value));
            }

            let binding = state
                .resolve(token, scope)
                .ok_or_else(|| TokenError::UnknownName(format!("{:?}", token)))?;
            tracing::trace!(token = %state.name(token), ?scope, "evaluate design token");
            state.evaluating.push(key);
            binding
        };

        let result = match binding {
            Binding::Value(value) => Ok(value),
            Binding::Derived(derivation) => derivation(&TokenContext {
                registry: self,
                scope,
            }),
        };

        let mut state = self.state.borrow_mut();
        state.evaluating.pop();
        if let Ok(value) = &result {
            state.cache.insert(key, Rc::clone(value));
        }
        result
    }

    // ----------------------------------------------------------------------------------------------------------------

    fn write(&self, token: TokenId, scope: ScopeId, binding: Option<Binding>) -> bool {
        let dropped = {
            let mut state = self.state.borrow_mut();
            let Some(node) = state.tokens.get_mut(token.0) else {
                return false;
            };

            let changed = match binding {
                Some(binding) => {
                    node.bindings.insert(scope, binding);
                    true
                }
                None => node.bindings.remove(&scope).is_some(),
            };
            if !changed {
                return false;
            }

            let dropped = state.invalidate(token, scope);
            tracing::debug!(
                token = %state.name(token),
                ?scope,
                invalidated = dropped.len(),
                "invalidate design tokens"
            );
            dropped
        };

        let mut changes = vec![TokenChange { token, scope }];
        changes.extend(
            dropped
                .into_iter()
                .filter(|key| *key != (token, scope))
                .map(|(token, scope)| TokenChange { token, scope }),
        );
        self.notify(&changes);
        true
    }

    fn notify(&self, changes: &[TokenChange]) {
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for change in changes {
            for listener in listeners.iter() {
                listener(change);
            }
        }
    }

    /// Bind the token to the given value in the scope.
    pub fn set_value_for<T: Clone + 'static>(&self, token: Token<T>, scope: ScopeId, value: T) {
        self.write(token.id, scope, Some(Binding::value(value)));
    }

    /// Bind the token to the given derivation in the scope.
    pub fn set_derived_for<T, F>(&self, token: Token<T>, scope: ScopeId, derivation: F)
    where
        T: Clone + 'static,
        F: Fn(&TokenContext<'_>) -> Result<T, TokenError> + 'static,
    {
        self.write(token.id, scope, Some(Binding::derived(derivation)));
    }

    /// Remove the token's binding in the scope, which exposes the binding of
    /// the closest ancestor or the default again. This method returns whether
    /// there was a binding to remove.
    pub fn delete_value_for<T>(&self, token: Token<T>, scope: ScopeId) -> bool {
        self.write(token.id, scope, None)
    }

    /// Subscribe to changes. The callback receives one notification for the
    /// written token and scope and one for every other value that was dropped
    /// from the cache as a result.
    pub fn subscribe(&self, callback: impl Fn(&TokenChange) + 'static) -> Subscription {
        let id = self.next_subscription.get();
        self.next_subscription.set(id + 1);
        self.listeners.borrow_mut().push((id, Rc::new(callback)));

        Subscription {
            listeners: Rc::downgrade(&self.listeners),
            id,
        }
    }
}

impl std::fmt::Debug for TokenRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("TokenRegistry")
            .field("tokens", &state.tokens.len())
            .field("scopes", &state.scopes.len())
            .field("cached", &state.cache.len())
            .finish()
    }
}

#[cfg(test)]
mod test {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::{TokenChange, TokenRegistry};
    use crate::error::TokenError;

    #[test]
    fn test_create_and_lookup() {
        let registry = TokenRegistry::new();
        let unit = registry.create("design-unit", 4_usize).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.name_of(unit), "design-unit");

        assert_eq!(
            registry.create("design-unit", 5_usize),
            Err(TokenError::DuplicateName("design-unit".to_string()))
        );
        assert_eq!(registry.lookup::<usize>("design-unit"), Ok(unit));
        assert!(matches!(
            registry.lookup::<f64>("design-unit"),
            Err(TokenError::TypeMismatch { .. })
        ));
        assert_eq!(
            registry.lookup::<usize>("density"),
            Err(TokenError::UnknownName("density".to_string()))
        );
    }

    #[test]
    fn test_scoped_values() {
        let registry = TokenRegistry::new();
        let root = registry.root();
        let parent = registry.create_scope(root);
        let child = registry.create_scope(parent);
        let sibling = registry.create_scope(root);
        assert_eq!(registry.parent_of(child), Some(parent));
        assert_eq!(registry.parent_of(root), None);

        let unit = registry.create("design-unit", 4).unwrap();
        registry.set_value_for(unit, parent, 8);
        assert_eq!(registry.get_value_for(unit, root), Ok(4));
        assert_eq!(registry.get_value_for(unit, parent), Ok(8));
        assert_eq!(registry.get_value_for(unit, child), Ok(8));
        assert_eq!(registry.get_value_for(unit, sibling), Ok(4));

        assert!(registry.delete_value_for(unit, parent));
        assert!(!registry.delete_value_for(unit, parent));
        assert_eq!(registry.get_value_for(unit, child), Ok(4));
    }

    #[test]
    fn test_unknown_parent_scope() {
        let other = TokenRegistry::new();
        let foreign = other.create_scope(other.create_scope(other.root()));

        let registry = TokenRegistry::new();
        let root = registry.root();
        let scope = registry.create_scope(foreign);
        assert_eq!(registry.parent_of(scope), Some(root));

        let unit = registry.create("design-unit", 4).unwrap();
        registry.set_value_for(unit, root, 6);
        assert_eq!(registry.get_value_for(unit, scope), Ok(6));
    }

    #[test]
    fn test_dependents_are_pruned() {
        let registry = TokenRegistry::new();
        let root = registry.root();
        let input = registry.create("input", 1).unwrap();
        let output = registry
            .create_derived("output", move |cx| Ok(cx.get(input)? + 1))
            .unwrap();

        assert_eq!(registry.get_value_for(output, root), Ok(2));
        assert_eq!(registry.state.borrow().dependents.len(), 1);

        // Rebinding the derived token drops its dependency on the input.
        registry.set_value_for(output, root, 10);
        {
            let state = registry.state.borrow();
            assert!(state.dependents.is_empty());
            assert!(state.dependencies.is_empty());
        }

        assert_eq!(registry.get_value_for(output, root), Ok(10));
        assert!(registry.state.borrow().dependents.is_empty());
    }

    #[test]
    fn test_derived_values() {
        let registry = TokenRegistry::new();
        let root = registry.root();
        let scope = registry.create_scope(root);

        let base = registry.create("base-height-multiplier", 10).unwrap();
        let density = registry.create("density", 0).unwrap();
        let unit = registry.create("design-unit", 4).unwrap();
        let height = registry
            .create_derived("height-number", move |cx| {
                Ok((cx.get(base)? + cx.get(density)?) * cx.get(unit)?)
            })
            .unwrap();

        assert_eq!(registry.get_value_for(height, root), Ok(40));
        registry.set_value_for(density, scope, 2);
        assert_eq!(registry.get_value_for(height, scope), Ok(48));
        assert_eq!(registry.get_value_for(height, root), Ok(40));

        // Writes in an ancestor reach cached values in descendants.
        registry.set_value_for(unit, root, 5);
        assert_eq!(registry.get_value_for(height, scope), Ok(60));
        assert_eq!(registry.get_value_for(height, root), Ok(50));

        // A derived binding bound in the root evaluates in the reading scope.
        registry.set_derived_for(unit, root, move |cx| Ok(cx.get(density)? + 1));
        assert_eq!(registry.get_value_for(height, root), Ok(10));
        assert_eq!(registry.get_value_for(height, scope), Ok(36));
    }

    #[test]
    fn test_lazy_evaluation() {
        let registry = TokenRegistry::new();
        let root = registry.root();
        let count = Rc::new(Cell::new(0));

        let input = registry.create("input", 1).unwrap();
        let counter = Rc::clone(&count);
        let output = registry
            .create_derived("output", move |cx| {
                counter.set(counter.get() + 1);
                Ok(cx.get(input)? * 10)
            })
            .unwrap();

        assert_eq!(registry.get_value_for(output, root), Ok(10));
        assert_eq!(registry.get_value_for(output, root), Ok(10));
        assert_eq!(count.get(), 1);

        registry.set_value_for(input, root, 2);
        assert_eq!(count.get(), 1);
        assert_eq!(registry.get_value_for(output, root), Ok(20));
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_cycle() {
        let registry = TokenRegistry::new();
        let root = registry.root();
        let first = registry.create("first", 1).unwrap();
        let second = registry
            .create_derived("second", move |cx| cx.get(first))
            .unwrap();
        registry.set_derived_for(first, root, move |cx| cx.get(second));

        assert!(matches!(registry.get_value_for(second, root), Err(TokenError::Cycle(_))));

        // Breaking the cycle recovers.
        assert!(registry.delete_value_for(first, root));
        assert_eq!(registry.get_value_for(second, root), Ok(1));
    }

    #[test]
    fn test_subscribe() {
        let registry = TokenRegistry::new();
        let root = registry.root();
        let scope = registry.create_scope(root);
        let changes = Rc::new(RefCell::new(Vec::new()));

        let input = registry.create("input", 1).unwrap();
        let output = registry
            .create_derived("output", move |cx| Ok(cx.get(input)? + 1))
            .unwrap();
        assert_eq!(registry.get_value_for(output, scope), Ok(2));

        let sink = Rc::clone(&changes);
        let subscription = registry.subscribe(move |change| sink.borrow_mut().push(*change));
        registry.set_value_for(input, root, 5);

        let changes_seen = changes.borrow().clone();
        assert_eq!(changes_seen[0], TokenChange { token: input.id(), scope: root });
        assert!(changes_seen.contains(&TokenChange {
            token: output.id(),
            scope
        }));

        drop(subscription);
        changes.borrow_mut().clear();
        registry.set_value_for(input, root, 6);
        assert!(changes.borrow().is_empty());
        assert_eq!(registry.get_value_for(output, scope), Ok(7));
    }
}
