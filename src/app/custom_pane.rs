use std::any::Any;

/// An extra control area the UI attaches to a session (e.g. an "open read-only"
/// checkbox). The session stores it and hands it back; it never looks inside.
pub trait CustomPane: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> CustomPane for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
