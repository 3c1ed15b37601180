use crate::{
    ast::Position,
    interpreter::{evaluator::core::EvalResult, value::Value},
};

/// Shape objects and their method table.
///
/// Defines the concrete shape kinds, their construction and validation,
/// the geometric formulas behind `area()` and `perimeter()`, and the
/// explicit capability table used to dispatch method calls on shape values.
pub mod shape;
/// The canvas object and its method table.
///
/// A canvas is the ordered, mutable shape collection the `for` statement
/// iterates. Exposes `push`, `pop` and `size` through the same capability
/// table mechanism the shapes use.
pub mod canvas;

/// Type alias for object constructor handlers.
///
/// A constructor receives the evaluated, arity-checked argument values and
/// the call position, and returns the constructed object value.
type ConstructorFn = fn(&[Value], Position) -> EvalResult<Value>;

/// One entry of the constructor table: an object type name, its expected
/// argument count and the handler building it.
pub struct ConstructorDef {
    /// The type name as spelled in source code.
    pub name:  &'static str,
    /// The exact number of constructor arguments.
    pub arity: usize,
    func:      ConstructorFn,
}

impl ConstructorDef {
    /// Builds the object from already-evaluated arguments.
    ///
    /// # Errors
    /// Returns a `NumberOfArguments` error when the argument count differs
    /// from the declared arity, or whatever the handler raises while
    /// validating its arguments.
    pub fn construct(&self, arguments: &[Value], position: Position) -> EvalResult<Value> {
        if arguments.len() != self.arity {
            return Err(crate::error::RuntimeError::NumberOfArguments {
                name: self.name.to_owned(),
                expected: self.arity,
                found: arguments.len(),
                position,
            });
        }
        (self.func)(arguments, position)
    }
}

/// Defines the object constructors exposed to the language.
///
/// Each entry provides the source-level type name, the expected arity and
/// the handler. The abstract `Shape` is deliberately absent: it names the
/// iteration element type but cannot be instantiated.
macro_rules! object_constructors {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        static CONSTRUCTOR_TABLE: &[ConstructorDef] = &[
            $(
                ConstructorDef { name: $name, arity: $arity, func: $func },
            )*
        ];
    };
}

object_constructors! {
    "Circle"    => { arity: 1, func: shape::circle },
    "Square"    => { arity: 1, func: shape::square },
    "Rectangle" => { arity: 2, func: shape::rectangle },
    "Triangle"  => { arity: 3, func: shape::triangle },
    "Rhomb"     => { arity: 2, func: shape::rhomb },
    "Trapeze"   => { arity: 3, func: shape::trapeze },
    "Polygon"   => { arity: 2, func: shape::polygon },
    "Canvas"    => { arity: 0, func: canvas::canvas },
}

/// Looks up an object constructor by its source-level type name.
#[must_use]
pub fn constructor(name: &str) -> Option<&'static ConstructorDef> {
    CONSTRUCTOR_TABLE.iter().find(|def| def.name == name)
}
