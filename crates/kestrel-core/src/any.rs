// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Upcasting from capability trait objects to [`Any`].
//!
//! Type-keyed containers store values as `Box<dyn Capability>` so they can
//! be iterated through the capability, and still need the concrete runtime
//! type for keying and downcasting. Making a capability trait extend
//! [`AsAny`] gives both.
//!
//! ```rust
//! use kestrel_core::AsAny;
//!
//! trait Item: AsAny {}
//! struct Apple;
//! impl Item for Apple {}
//!
//! let boxed: Box<dyn Item> = Box::new(Apple);
//! assert!(boxed.as_ref().as_any().is::<Apple>());
//! ```
//!
//! Always call these methods on the trait object itself (`boxed.as_ref()`
//! or `&*boxed`), never on the `Box`: the box is `Any` too and would
//! report its own type.

use std::any::{Any, TypeId};

/// Access to the concrete runtime type behind a trait object.
///
/// Implemented for every `'static` sized type; capability traits opt in by
/// declaring it as a supertrait.
pub trait AsAny: Any {
    /// Returns `self` as a shared `&dyn Any`.
    fn as_any(&self) -> &dyn Any;

    /// Returns `self` as a mutable `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Converts a boxed value into a `Box<dyn Any>` for owned downcasts.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// The [`TypeId`] of the concrete type.
    fn concrete_type_id(&self) -> TypeId;

    /// The name of the concrete type, for diagnostics.
    fn concrete_type_name(&self) -> &'static str;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn concrete_type_id(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn concrete_type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Shape: AsAny {
        fn sides(&self) -> u32;
    }

    struct Square;
    impl Shape for Square {
        fn sides(&self) -> u32 {
            4
        }
    }

    #[test]
    fn test_concrete_type_through_trait_object() {
        let shape: Box<dyn Shape> = Box::new(Square);
        assert_eq!(shape.as_ref().concrete_type_id(), TypeId::of::<Square>());
        assert!(shape.as_ref().concrete_type_name().ends_with("Square"));
        assert_eq!(shape.sides(), 4);
    }

    #[test]
    fn test_owned_downcast() {
        let shape: Box<dyn Shape> = Box::new(Square);
        let any = AsAny::into_any(shape);
        assert!(any.downcast::<Square>().is_ok());
    }
}
