use std::{cell::RefCell, f64::consts::PI, rc::Rc};

use crate::{
    ast::{Position, Type},
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::Value},
    util::num::i64_to_f64_checked,
};

/// The concrete geometry of a shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    /// A circle with the given radius.
    Circle {
        /// The radius.
        radius: f64,
    },
    /// A square with the given side length.
    Square {
        /// The side length.
        side: f64,
    },
    /// An axis-aligned rectangle.
    Rectangle {
        /// The width.
        width:  f64,
        /// The height.
        height: f64,
    },
    /// A triangle given by its three side lengths.
    Triangle {
        /// First side.
        a: f64,
        /// Second side.
        b: f64,
        /// Third side.
        c: f64,
    },
    /// A rhombus given by its two diagonals.
    Rhomb {
        /// First diagonal.
        d1: f64,
        /// Second diagonal.
        d2: f64,
    },
    /// An isosceles trapeze given by its parallel sides and height.
    Trapeze {
        /// The longer parallel side.
        a:      f64,
        /// The shorter parallel side.
        b:      f64,
        /// The height between them.
        height: f64,
    },
    /// A regular polygon given by its vertex count and side length.
    Polygon {
        /// The number of sides, at least three.
        sides: i64,
        /// The side length.
        side:  f64,
    },
}

/// A shape object: concrete geometry plus a movable origin.
///
/// Shapes are reference values at the language level; the interpreter holds
/// them behind `Rc<RefCell<...>>` so `move(dx, dy)` is visible through every
/// alias, including the canvas that holds the shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    kind: ShapeKind,
    x:    f64,
    y:    f64,
}

impl Shape {
    /// Creates a shape at the origin.
    #[must_use]
    pub const fn new(kind: ShapeKind) -> Self {
        Self { kind, x: 0.0, y: 0.0 }
    }

    /// The concrete type tag of this shape. Never the abstract `Shape`.
    #[must_use]
    pub const fn type_of(&self) -> Type {
        match self.kind {
            ShapeKind::Circle { .. } => Type::Circle,
            ShapeKind::Square { .. } => Type::Square,
            ShapeKind::Rectangle { .. } => Type::Rectangle,
            ShapeKind::Triangle { .. } => Type::Triangle,
            ShapeKind::Rhomb { .. } => Type::Rhomb,
            ShapeKind::Trapeze { .. } => Type::Trapeze,
            ShapeKind::Polygon { .. } => Type::Polygon,
        }
    }

    /// The enclosed area.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn area(&self) -> f64 {
        match &self.kind {
            ShapeKind::Circle { radius } => PI * radius * radius,
            ShapeKind::Square { side } => side * side,
            ShapeKind::Rectangle { width, height } => width * height,
            ShapeKind::Triangle { a, b, c } => {
                // Heron's formula.
                let s = (a + b + c) / 2.0;
                (s * (s - a) * (s - b) * (s - c)).sqrt()
            },
            ShapeKind::Rhomb { d1, d2 } => d1 * d2 / 2.0,
            ShapeKind::Trapeze { a, b, height } => (a + b) / 2.0 * height,
            ShapeKind::Polygon { sides, side } => {
                let n = *sides as f64;
                n * side * side / (4.0 * (PI / n).tan())
            },
        }
    }

    /// The boundary length.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn perimeter(&self) -> f64 {
        match &self.kind {
            ShapeKind::Circle { radius } => 2.0 * PI * radius,
            ShapeKind::Square { side } => 4.0 * side,
            ShapeKind::Rectangle { width, height } => 2.0 * (width + height),
            ShapeKind::Triangle { a, b, c } => a + b + c,
            ShapeKind::Rhomb { d1, d2 } => 2.0 * (d1 * d1 + d2 * d2).sqrt(),
            ShapeKind::Trapeze { a, b, height } => {
                let leg = (height * height + (a - b) / 2.0 * ((a - b) / 2.0)).sqrt();
                a + b + 2.0 * leg
            },
            ShapeKind::Polygon { sides, side } => *sides as f64 * side,
        }
    }

    /// Translates the origin by the given offsets.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// The origin's x coordinate.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// The origin's y coordinate.
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.y
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ShapeKind::Circle { radius } => write!(f, "Circle(radius: {radius})"),
            ShapeKind::Square { side } => write!(f, "Square(side: {side})"),
            ShapeKind::Rectangle { width, height } => {
                write!(f, "Rectangle(width: {width}, height: {height})")
            },
            ShapeKind::Triangle { a, b, c } => write!(f, "Triangle(a: {a}, b: {b}, c: {c})"),
            ShapeKind::Rhomb { d1, d2 } => write!(f, "Rhomb(d1: {d1}, d2: {d2})"),
            ShapeKind::Trapeze { a, b, height } => {
                write!(f, "Trapeze(a: {a}, b: {b}, height: {height})")
            },
            ShapeKind::Polygon { sides, side } => {
                write!(f, "Polygon(sides: {sides}, side: {side})")
            },
        }
    }
}

/// Converts a constructor or method argument to a number.
fn numeric(value: &Value, name: &str, position: Position) -> EvalResult<f64> {
    match value {
        Value::Int(value) => i64_to_f64_checked(*value, RuntimeError::Overflow { position }),
        Value::Dec(value) => Ok(*value),
        other => Err(RuntimeError::InvalidArgument {
            details: format!("{name} must be numeric, found [{}]", other.type_of()),
            position,
        }),
    }
}

/// Converts a constructor argument to a strictly positive, finite length.
fn dimension(value: &Value, name: &str, position: Position) -> EvalResult<f64> {
    let number = numeric(value, name, position)?;
    if !number.is_finite() || number <= 0.0 {
        return Err(RuntimeError::InvalidArgument { details:  format!("{name} must be positive"),
                                                   position, });
    }
    Ok(number)
}

/// Builds a `Circle(radius)`.
pub fn circle(arguments: &[Value], position: Position) -> EvalResult<Value> {
    let radius = dimension(&arguments[0], "radius", position)?;
    Ok(Shape::new(ShapeKind::Circle { radius }).into())
}

/// Builds a `Square(side)`.
pub fn square(arguments: &[Value], position: Position) -> EvalResult<Value> {
    let side = dimension(&arguments[0], "side", position)?;
    Ok(Shape::new(ShapeKind::Square { side }).into())
}

/// Builds a `Rectangle(width, height)`.
pub fn rectangle(arguments: &[Value], position: Position) -> EvalResult<Value> {
    let width = dimension(&arguments[0], "width", position)?;
    let height = dimension(&arguments[1], "height", position)?;
    Ok(Shape::new(ShapeKind::Rectangle { width, height }).into())
}

/// Builds a `Triangle(a, b, c)`, rejecting side lengths that violate the
/// triangle inequality.
pub fn triangle(arguments: &[Value], position: Position) -> EvalResult<Value> {
    let a = dimension(&arguments[0], "a", position)?;
    let b = dimension(&arguments[1], "b", position)?;
    let c = dimension(&arguments[2], "c", position)?;
    if a + b <= c || a + c <= b || b + c <= a {
        return Err(RuntimeError::InvalidArgument {
            details: format!("sides {a}, {b}, {c} do not form a triangle"),
            position,
        });
    }
    Ok(Shape::new(ShapeKind::Triangle { a, b, c }).into())
}

/// Builds a `Rhomb(d1, d2)` from its diagonals.
pub fn rhomb(arguments: &[Value], position: Position) -> EvalResult<Value> {
    let d1 = dimension(&arguments[0], "d1", position)?;
    let d2 = dimension(&arguments[1], "d2", position)?;
    Ok(Shape::new(ShapeKind::Rhomb { d1, d2 }).into())
}

/// Builds a `Trapeze(a, b, height)`.
pub fn trapeze(arguments: &[Value], position: Position) -> EvalResult<Value> {
    let a = dimension(&arguments[0], "a", position)?;
    let b = dimension(&arguments[1], "b", position)?;
    let height = dimension(&arguments[2], "height", position)?;
    Ok(Shape::new(ShapeKind::Trapeze { a, b, height }).into())
}

/// Builds a regular `Polygon(sides, side)`. The vertex count must be an
/// integer of at least three.
pub fn polygon(arguments: &[Value], position: Position) -> EvalResult<Value> {
    let Value::Int(sides) = &arguments[0] else {
        return Err(RuntimeError::InvalidArgument {
            details: format!("sides must be [int], found [{}]", arguments[0].type_of()),
            position,
        });
    };
    if *sides < 3 {
        return Err(RuntimeError::InvalidArgument {
            details: format!("a polygon needs at least 3 sides, got {sides}"),
            position,
        });
    }
    let side = dimension(&arguments[1], "side", position)?;
    Ok(Shape::new(ShapeKind::Polygon { sides: *sides, side }).into())
}

/// Type alias for shape method handlers.
type ShapeMethodFn = fn(&mut Shape, &[Value], Position) -> EvalResult<Option<Value>>;

struct MethodDef {
    name:  &'static str,
    arity: usize,
    func:  ShapeMethodFn,
}

/// The methods every shape exposes, regardless of kind. Kind-specific
/// accessors are resolved separately by [`accessor`].
static SHAPE_METHODS: &[MethodDef] = &[
    MethodDef { name:  "area",
                arity: 0,
                func:  |shape, _, _| Ok(Some(Value::Dec(shape.area()))), },
    MethodDef { name:  "perimeter",
                arity: 0,
                func:  |shape, _, _| Ok(Some(Value::Dec(shape.perimeter()))), },
    MethodDef { name: "move", arity: 2, func: shape_move },
    MethodDef { name:  "x",
                arity: 0,
                func:  |shape, _, _| Ok(Some(Value::Dec(shape.x()))), },
    MethodDef { name:  "y",
                arity: 0,
                func:  |shape, _, _| Ok(Some(Value::Dec(shape.y()))), },
];

fn shape_move(shape: &mut Shape, arguments: &[Value], position: Position) -> EvalResult<Option<Value>> {
    let dx = numeric(&arguments[0], "dx", position)?;
    let dy = numeric(&arguments[1], "dy", position)?;
    shape.translate(dx, dy);
    Ok(None)
}

/// Resolves a kind-specific zero-argument accessor, such as `radius` on a
/// circle or `width` on a rectangle. Returns `None` for names the kind does
/// not expose.
fn accessor(shape: &Shape, name: &str) -> Option<Value> {
    let value = match (&shape.kind, name) {
        (ShapeKind::Circle { radius }, "radius") => Value::Dec(*radius),
        (ShapeKind::Square { side }, "side")
        | (ShapeKind::Polygon { side, .. }, "side") => Value::Dec(*side),
        (ShapeKind::Rectangle { width, .. }, "width") => Value::Dec(*width),
        (ShapeKind::Rectangle { height, .. }, "height")
        | (ShapeKind::Trapeze { height, .. }, "height") => Value::Dec(*height),
        (ShapeKind::Triangle { a, .. }, "a") | (ShapeKind::Trapeze { a, .. }, "a") => {
            Value::Dec(*a)
        },
        (ShapeKind::Triangle { b, .. }, "b") | (ShapeKind::Trapeze { b, .. }, "b") => {
            Value::Dec(*b)
        },
        (ShapeKind::Triangle { c, .. }, "c") => Value::Dec(*c),
        (ShapeKind::Rhomb { d1, .. }, "d1") => Value::Dec(*d1),
        (ShapeKind::Rhomb { d2, .. }, "d2") => Value::Dec(*d2),
        (ShapeKind::Polygon { sides, .. }, "sides") => Value::Int(*sides),
        _ => return None,
    };
    Some(value)
}

/// Dispatches a method call on a shape value.
///
/// Resolution order: the common method table, then the kind-specific
/// accessors. An unknown name raises the typed missing-function-declaration
/// error; a known name with the wrong argument count raises the
/// number-of-arguments error.
pub fn call_method(shape: &Rc<RefCell<Shape>>,
                   name: &str,
                   arguments: &[Value],
                   position: Position)
                   -> EvalResult<Option<Value>> {
    if let Some(method) = SHAPE_METHODS.iter().find(|method| method.name == name) {
        if arguments.len() != method.arity {
            return Err(RuntimeError::NumberOfArguments { name: name.to_owned(),
                                                         expected: method.arity,
                                                         found: arguments.len(),
                                                         position });
        }
        return (method.func)(&mut shape.borrow_mut(), arguments, position);
    }

    let value = accessor(&shape.borrow(), name);
    if let Some(value) = value {
        if !arguments.is_empty() {
            return Err(RuntimeError::NumberOfArguments { name: name.to_owned(),
                                                         expected: 0,
                                                         found: arguments.len(),
                                                         position });
        }
        return Ok(Some(value));
    }

    Err(RuntimeError::MissingFunctionDeclaration { name: name.to_owned(),
                                                   position })
}
