use std::{cell::RefCell, rc::Rc};

use crate::{
    ast::Position,
    error::RuntimeError,
    geometry::shape::Shape,
    interpreter::{evaluator::core::EvalResult, value::Value},
};

/// The ordered, mutable shape collection.
///
/// A canvas stores aliases of the shapes pushed onto it; a shape moved
/// through one reference is moved on the canvas too. The `for` statement
/// walks the collection in push order, observing mutations made while the
/// loop runs.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Canvas {
    shapes: Vec<Rc<RefCell<Shape>>>,
}

impl Canvas {
    /// Creates an empty canvas.
    #[must_use]
    pub const fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    /// Appends a shape.
    pub fn push(&mut self, shape: Rc<RefCell<Shape>>) {
        self.shapes.push(shape);
    }

    /// Removes and returns the most recently pushed shape.
    pub fn pop(&mut self) -> Option<Rc<RefCell<Shape>>> {
        self.shapes.pop()
    }

    /// The shape at `index`, if any. Used by the `for` statement, which
    /// re-reads the live collection every iteration.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Rc<RefCell<Shape>>> {
        self.shapes.get(index).map(Rc::clone)
    }

    /// The number of shapes held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Whether the canvas holds no shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl std::fmt::Display for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Canvas(size: {})", self.shapes.len())
    }
}

/// Builds an empty `Canvas()`.
#[allow(clippy::unnecessary_wraps)]
pub fn canvas(_arguments: &[Value], _position: Position) -> EvalResult<Value> {
    Ok(Canvas::new().into())
}

/// Type alias for canvas method handlers.
type CanvasMethodFn = fn(&mut Canvas, &[Value], Position) -> EvalResult<Option<Value>>;

struct MethodDef {
    name:  &'static str,
    arity: usize,
    func:  CanvasMethodFn,
}

static CANVAS_METHODS: &[MethodDef] = &[
    MethodDef { name: "push", arity: 1, func: canvas_push },
    MethodDef { name: "pop", arity: 0, func: canvas_pop },
    MethodDef { name: "size", arity: 0, func: canvas_size },
];

fn canvas_push(canvas: &mut Canvas,
               arguments: &[Value],
               position: Position)
               -> EvalResult<Option<Value>> {
    let Value::Shape(shape) = &arguments[0] else {
        return Err(RuntimeError::InvalidArgument {
            details: format!("push expects a shape, found [{}]", arguments[0].type_of()),
            position,
        });
    };
    canvas.push(Rc::clone(shape));
    Ok(None)
}

fn canvas_pop(canvas: &mut Canvas,
              _arguments: &[Value],
              position: Position)
              -> EvalResult<Option<Value>> {
    canvas.pop()
          .map(|shape| Some(Value::Shape(shape)))
          .ok_or(RuntimeError::EmptyCanvas { position })
}

fn canvas_size(canvas: &mut Canvas,
               _arguments: &[Value],
               position: Position)
               -> EvalResult<Option<Value>> {
    let size = i64::try_from(canvas.len()).map_err(|_| RuntimeError::Overflow { position })?;
    Ok(Some(Value::Int(size)))
}

/// Dispatches a method call on a canvas value. Unknown names raise the
/// typed missing-function-declaration error.
pub fn call_method(canvas: &Rc<RefCell<Canvas>>,
                   name: &str,
                   arguments: &[Value],
                   position: Position)
                   -> EvalResult<Option<Value>> {
    let Some(method) = CANVAS_METHODS.iter().find(|method| method.name == name) else {
        return Err(RuntimeError::MissingFunctionDeclaration { name: name.to_owned(),
                                                              position });
    };
    if arguments.len() != method.arity {
        return Err(RuntimeError::NumberOfArguments { name: name.to_owned(),
                                                     expected: method.arity,
                                                     found: arguments.len(),
                                                     position });
    }
    (method.func)(&mut canvas.borrow_mut(), arguments, position)
}
