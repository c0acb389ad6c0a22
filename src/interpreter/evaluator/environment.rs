use crate::interpreter::value::core::Value;

/// Index of a frame in an [`Environment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(usize);

/// The innermost frame visible at some point of evaluation.
///
/// `None` is the empty scope, outside even the root frame.
pub type Scope = Option<FrameId>;

/// A single name binding, linked to the frame it extends.
#[derive(Debug, Clone, Copy)]
struct Frame<'p> {
    name:   &'p str,
    value:  Value<'p>,
    parent: Scope,
}

/// Arena of binding frames owned by one evaluation call.
///
/// Frames are only ever appended while a call runs, so a [`Scope`] handed
/// out earlier stays valid and keeps seeing the same bindings. Everything is
/// released at once by dropping the environment or truncating it back to a
/// saved length.
#[derive(Debug, Default)]
pub struct Environment<'p> {
    frames: Vec<Frame<'p>>,
}

impl<'p> Environment<'p> {
    /// Creates an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Adds a frame binding `name` to `value` on top of `parent`.
    ///
    /// # Returns
    /// The scope in which `name` is visible along with everything visible in
    /// `parent`.
    pub fn bind(&mut self, parent: Scope, name: &'p str, value: Value<'p>) -> Scope {
        self.frames.push(Frame { name, value, parent });
        Some(FrameId(self.frames.len() - 1))
    }

    /// Resolves `name` by walking outward from `scope`.
    ///
    /// The innermost binding wins.
    #[must_use]
    pub fn lookup(&self, scope: Scope, name: &str) -> Option<Value<'p>> {
        let mut current = scope;
        while let Some(FrameId(index)) = current {
            let frame = self.frames.get(index)?;
            if frame.name == name {
                return Some(frame.value);
            }
            current = frame.parent;
        }
        None
    }

    /// Number of frames currently allocated.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` if no frame has been allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Releases every frame allocated after the first `len`.
    ///
    /// Scopes pointing at released frames must not be used afterwards.
    pub fn truncate(&mut self, len: usize) {
        self.frames.truncate(len);
    }
}
