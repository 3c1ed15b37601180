use crate::interpreter::lexer::TokenKind;

/// A source location expressed as a 1-based line and column pair.
///
/// Every token and every AST node carries the position at which it started,
/// so diagnostics from any pipeline stage can point back into the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// 1-based line number.
    pub line:   usize,
    /// 1-based column number.
    pub column: usize,
}

impl Position {
    /// Position used for nodes that have no meaningful source location,
    /// such as the synthesized call to `main`.
    #[must_use]
    pub const fn start() -> Self {
        Self { line: 0, column: 0 }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The closed set of language-level types.
///
/// Type tags are compared nominally: `Shape` is not a supertype of the
/// concrete shapes, so a variable declared `Shape` does not accept a
/// `Circle` value in declarations or assignments. The only `Shape`-typed
/// binding a program can hold is the loop variable of a `for` statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    /// `int`, a 64-bit signed integer (bounded further by the lexer limits).
    Int,
    /// `dec`, a double precision decimal number.
    Dec,
    /// `bool`.
    Bool,
    /// `String`.
    Str,
    /// `Shape`, the abstract element type of `for` loops.
    Shape,
    /// `Circle`.
    Circle,
    /// `Square`.
    Square,
    /// `Rectangle`.
    Rectangle,
    /// `Triangle`.
    Triangle,
    /// `Rhomb`.
    Rhomb,
    /// `Trapeze`.
    Trapeze,
    /// `Polygon`.
    Polygon,
    /// `Canvas`, the ordered shape collection.
    Canvas,
}

impl Type {
    /// Maps a declaration-type token to its semantic type tag.
    ///
    /// Returns `None` for tokens that do not name a type. This is the single
    /// token-to-type table used by declarations, parameters, casts and
    /// constructor-name parsing.
    #[must_use]
    pub const fn from_token(kind: &TokenKind) -> Option<Self> {
        match kind {
            TokenKind::TyInt => Some(Self::Int),
            TokenKind::TyDec => Some(Self::Dec),
            TokenKind::TyBool => Some(Self::Bool),
            TokenKind::TyString => Some(Self::Str),
            TokenKind::TyShape => Some(Self::Shape),
            TokenKind::TyCircle => Some(Self::Circle),
            TokenKind::TySquare => Some(Self::Square),
            TokenKind::TyRectangle => Some(Self::Rectangle),
            TokenKind::TyTriangle => Some(Self::Triangle),
            TokenKind::TyRhomb => Some(Self::Rhomb),
            TokenKind::TyTrapeze => Some(Self::Trapeze),
            TokenKind::TyPolygon => Some(Self::Polygon),
            TokenKind::TyCanvas => Some(Self::Canvas),
            _ => None,
        }
    }

    /// The keyword spelling of the type, as it appears in source code.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Dec => "dec",
            Self::Bool => "bool",
            Self::Str => "String",
            Self::Shape => "Shape",
            Self::Circle => "Circle",
            Self::Square => "Square",
            Self::Rectangle => "Rectangle",
            Self::Triangle => "Triangle",
            Self::Rhomb => "Rhomb",
            Self::Trapeze => "Trapeze",
            Self::Polygon => "Polygon",
            Self::Canvas => "Canvas",
        }
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A whole source file: the ordered list of function declarations.
///
/// The parser reports duplicate function names and keeps the first
/// occurrence, so the list the interpreter receives is already deduplicated.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Functions in declaration order.
    pub functions: Vec<Function>,
}

/// A function declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    /// The function name.
    pub name:        String,
    /// The declared return type; `None` means the function returns nothing.
    pub return_type: Option<Type>,
    /// The declared parameters, unique by name.
    pub parameters:  Vec<Parameter>,
    /// The function body.
    pub body:        Block,
    /// Position of the `def` keyword.
    pub position:    Position,
}

/// A typed parameter declaration, also used by the `for` statement header.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// The declared type.
    pub ty:       Type,
    /// The parameter name.
    pub name:     String,
    /// Position of the type keyword.
    pub position: Position,
}

/// A brace-delimited sequence of statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Statements in source order.
    pub statements: Vec<Statement>,
    /// Position of the opening brace.
    pub position:   Position,
}

/// A single statement.
///
/// `Option<Expr>` slots hold `None` when the parser could not produce the
/// expression; the syntax error has already been collected and the
/// interpreter raises the matching typed "missing ..." error if the
/// placeholder is ever executed.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `if (condition) { ... } else { ... }`
    If {
        /// The condition expression.
        condition: Option<Expr>,
        /// Block executed when the condition holds.
        body:      Block,
        /// Optional `else` block.
        else_body: Option<Block>,
        /// Position of the `if` keyword.
        position:  Position,
    },
    /// `while (condition) { ... }`
    While {
        /// The loop condition, re-evaluated before every iteration.
        condition: Option<Expr>,
        /// The loop body.
        body:      Block,
        /// Position of the `while` keyword.
        position:  Position,
    },
    /// `for (Shape name : canvas) { ... }` — iteration over a canvas.
    Iterate {
        /// The declared element type; must be exactly `Shape` at runtime.
        element_type: Type,
        /// The loop variable name.
        element_name: String,
        /// The iterated expression; must evaluate to a canvas.
        source:       Option<Expr>,
        /// The loop body.
        body:         Block,
        /// Position of the `for` keyword.
        position:     Position,
    },
    /// `return expression;`
    Return {
        /// The returned expression.
        value:    Option<Expr>,
        /// Position of the `return` keyword.
        position: Position,
    },
    /// `type name = expression;`
    Declaration {
        /// The declared type.
        ty:          Type,
        /// The declared name.
        name:        String,
        /// The initializer; required at runtime.
        initializer: Option<Expr>,
        /// Position of the type keyword.
        position:    Position,
    },
    /// `name = expression;`
    Assignment {
        /// The assigned variable.
        name:     String,
        /// The assigned value; required at runtime.
        value:    Option<Expr>,
        /// Position of the target identifier.
        position: Position,
    },
    /// A bare expression followed by `;`, evaluated for its side effects.
    Expression(Expr),
}

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// `or`
    Or,
    /// `and`
    And,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `>`
    Greater,
    /// `<`
    Less,
    /// `>=`
    GreaterEqual,
    /// `<=`
    LessEqual,
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/` — always true division; two integers divide to a decimal.
    Divide,
}

impl BinaryOperator {
    /// The source spelling of the operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Or => "or",
            Self::And => "and",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Greater => ">",
            Self::Less => "<",
            Self::GreaterEqual => ">=",
            Self::LessEqual => "<=",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// `-`, valid on `int` and `dec` operands.
    Negate,
    /// `not` (or `!`), valid on `bool` operands.
    Not,
}

impl UnaryOperator {
    /// The source spelling of the operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Negate => "-",
            Self::Not => "not",
        }
    }
}

/// An expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// An integer literal.
    Integer {
        /// The literal value.
        value:    i64,
        /// Source position.
        position: Position,
    },
    /// A decimal literal.
    Decimal {
        /// The literal value.
        value:    f64,
        /// Source position.
        position: Position,
    },
    /// A string literal. Backslash escapes are stored literally; only a
    /// doubled backslash has been collapsed by the lexer.
    Str {
        /// The literal value.
        value:    String,
        /// Source position.
        position: Position,
    },
    /// A boolean literal, `True` or `False`.
    Bool {
        /// The literal value.
        value:    bool,
        /// Source position.
        position: Position,
    },
    /// A binary operation.
    Binary {
        /// Left operand.
        left:     Box<Expr>,
        /// The operator.
        op:       BinaryOperator,
        /// Right operand.
        right:    Box<Expr>,
        /// Position of the operator.
        position: Position,
    },
    /// A unary operation.
    Unary {
        /// The operator.
        op:       UnaryOperator,
        /// The operand.
        operand:  Box<Expr>,
        /// Position of the operator.
        position: Position,
    },
    /// A call. With no `root` this is a plain function, builtin or
    /// constructor call; with a `root` it is a method call on the value the
    /// root evaluates to. Chains like `a.b().c()` nest through `root`.
    Call {
        /// The receiver expression for method calls.
        root:      Option<Box<Expr>>,
        /// The called name.
        name:      String,
        /// Argument expressions.
        arguments: Vec<Expr>,
        /// Source position of the call.
        position:  Position,
    },
    /// A variable reference.
    Identifier {
        /// The referenced name.
        name:     String,
        /// Source position.
        position: Position,
    },
    /// A numeric cast, `(int) expr` or `(dec) expr`. The operand is the full
    /// expression following the closing parenthesis.
    Cast {
        /// The cast target, `Int` or `Dec`.
        target:   Type,
        /// The operand expression.
        operand:  Box<Expr>,
        /// Position of the opening parenthesis.
        position: Position,
    },
}

impl Expr {
    /// The source position the expression starts at.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Integer { position, .. }
            | Self::Decimal { position, .. }
            | Self::Str { position, .. }
            | Self::Bool { position, .. }
            | Self::Binary { position, .. }
            | Self::Unary { position, .. }
            | Self::Call { position, .. }
            | Self::Identifier { position, .. }
            | Self::Cast { position, .. } => *position,
        }
    }
}
