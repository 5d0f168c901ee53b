//=========================================================================
// Scene Definition
//=========================================================================
//
// Identity + constructor of a scene type.
//
// A definition is the Rust counterpart of "the scene's constructor": it
// is keyed by the `TypeId` of the factory type, so two definitions of
// the same type always compare equal and resolve to one registry entry.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

//=== Internal Dependencies ===============================================

use super::{Scene, SceneFactory, SceneInit};

//=== SceneDefinition =====================================================

type Constructor<C> = fn(SceneInit<'_, C>) -> Box<dyn Scene<C>>;

/// Type-keyed scene identity plus the function that builds it.
///
/// Cheap to copy; obtained with [`SceneDefinition::of`].
pub struct SceneDefinition<C = ()> {
    id: TypeId,
    name: &'static str,
    construct: Constructor<C>,
}

impl<C: 'static> SceneDefinition<C> {
    /// Returns the definition of scene type `S`.
    pub fn of<S: SceneFactory<C>>() -> Self {
        Self {
            id: TypeId::of::<S>(),
            name: type_name::<S>(),
            construct: construct_boxed::<C, S>,
        }
    }

    /// Returns `true` if this definition describes scene type `S`.
    pub fn is<S: SceneFactory<C>>(&self) -> bool {
        self.id == TypeId::of::<S>()
    }

    pub(crate) fn construct(&self, init: SceneInit<'_, C>) -> Box<dyn Scene<C>> {
        (self.construct)(init)
    }
}

impl<C> SceneDefinition<C> {
    /// Fully qualified type name of the scene.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without its module path (`game::scenes::Intro` → `Intro`).
    pub fn short_name(&self) -> &'static str {
        self.name.rsplit("::").next().unwrap_or(self.name)
    }
}

fn construct_boxed<C: 'static, S: SceneFactory<C>>(init: SceneInit<'_, C>) -> Box<dyn Scene<C>> {
    Box::new(S::create(init))
}

//--- Trait Implementations -----------------------------------------------

// Manual impls: derives would demand the same traits from `C`.

impl<C> Clone for SceneDefinition<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for SceneDefinition<C> {}

impl<C> PartialEq for SceneDefinition<C> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<C> Eq for SceneDefinition<C> {}

impl<C> Hash for SceneDefinition<C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<C> fmt::Debug for SceneDefinition<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SceneDefinition").field(&self.name).finish()
    }
}

impl<C> fmt::Display for SceneDefinition<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
