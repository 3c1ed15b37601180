use crate::{
    ast::{BinaryOperator, Expr, Type, UnaryOperator},
    interpreter::{lexer::TokenKind, parser::Parser},
};

/// Maps a token to a relational operator.
const fn relational_operator(kind: &TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::EqualEqual => Some(BinaryOperator::Equal),
        TokenKind::BangEqual => Some(BinaryOperator::NotEqual),
        TokenKind::Greater => Some(BinaryOperator::Greater),
        TokenKind::Less => Some(BinaryOperator::Less),
        TokenKind::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        TokenKind::LessEqual => Some(BinaryOperator::LessEqual),
        _ => None,
    }
}

/// Maps a token to an additive operator.
const fn sum_operator(kind: &TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Subtract),
        _ => None,
    }
}

/// Maps a token to a multiplicative operator.
const fn mul_operator(kind: &TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Star => Some(BinaryOperator::Multiply),
        TokenKind::Slash => Some(BinaryOperator::Divide),
        _ => None,
    }
}

impl Parser<'_> {
    /// `expr = or_expr ;`
    ///
    /// Entry point of the precedence chain: `or` binds loosest, then `and`,
    /// the relational operators, `+`/`-`, `*`/`/`, and unary operators bind
    /// tightest. Every binary operator is left-associative.
    pub(in crate::interpreter::parser) fn parse_expression(&mut self) -> Option<Expr> {
        self.parse_or_expression()
    }

    /// `or_expr = and_expr, { "or", and_expr } ;`
    fn parse_or_expression(&mut self) -> Option<Expr> {
        let mut left = self.parse_and_expression()?;

        while self.token.kind == TokenKind::Or {
            let position = self.here();
            self.advance();
            let Some(right) = self.parse_and_expression() else {
                self.report_missing_expression();
                return None;
            };
            left = Expr::Binary { left: Box::new(left),
                                  op: BinaryOperator::Or,
                                  right: Box::new(right),
                                  position };
        }

        Some(left)
    }

    /// `and_expr = relative_expr, { "and", relative_expr } ;`
    fn parse_and_expression(&mut self) -> Option<Expr> {
        let mut left = self.parse_relative_expression()?;

        while self.token.kind == TokenKind::And {
            let position = self.here();
            self.advance();
            let Some(right) = self.parse_relative_expression() else {
                self.report_missing_expression();
                return None;
            };
            left = Expr::Binary { left: Box::new(left),
                                  op: BinaryOperator::And,
                                  right: Box::new(right),
                                  position };
        }

        Some(left)
    }

    /// `relative_expr = sum_expr, { relop, sum_expr } ;`
    fn parse_relative_expression(&mut self) -> Option<Expr> {
        let mut left = self.parse_sum_expression()?;

        while let Some(op) = relational_operator(&self.token.kind) {
            let position = self.here();
            self.advance();
            let Some(right) = self.parse_sum_expression() else {
                self.report_missing_expression();
                return None;
            };
            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  position };
        }

        Some(left)
    }

    /// `sum_expr = mul_expr, { ("+"|"-"), mul_expr } ;`
    fn parse_sum_expression(&mut self) -> Option<Expr> {
        let mut left = self.parse_mul_expression()?;

        while let Some(op) = sum_operator(&self.token.kind) {
            let position = self.here();
            self.advance();
            let Some(right) = self.parse_mul_expression() else {
                self.report_missing_expression();
                return None;
            };
            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  position };
        }

        Some(left)
    }

    /// `mul_expr = negated, { ("*"|"/"), negated } ;`
    fn parse_mul_expression(&mut self) -> Option<Expr> {
        let mut left = self.parse_negated()?;

        while let Some(op) = mul_operator(&self.token.kind) {
            let position = self.here();
            self.advance();
            let Some(right) = self.parse_negated() else {
                self.report_missing_expression();
                return None;
            };
            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  position };
        }

        Some(left)
    }

    /// `negated = [ "-" | "not" ], factor ;`
    fn parse_negated(&mut self) -> Option<Expr> {
        let op = match self.token.kind {
            TokenKind::Minus => Some(UnaryOperator::Negate),
            TokenKind::Not => Some(UnaryOperator::Not),
            _ => None,
        };

        let Some(op) = op else {
            return self.parse_factor();
        };

        let position = self.here();
        self.advance();

        let Some(operand) = self.parse_factor() else {
            self.report_missing_expression();
            return None;
        };

        Some(Expr::Unary { op,
                           operand: Box::new(operand),
                           position })
    }

    /// `factor = literal | call_chain ;`
    fn parse_factor(&mut self) -> Option<Expr> {
        if let Some(literal) = self.parse_literal() {
            return Some(literal);
        }
        self.parse_call_chain()
    }

    /// `literal = integer_value | decimal_value | string_value | bool_value ;`
    fn parse_literal(&mut self) -> Option<Expr> {
        let position = self.here();
        let expr = match &self.token.kind {
            TokenKind::Integer(value) => Expr::Integer { value: *value, position },
            TokenKind::Decimal(value) => Expr::Decimal { value: *value, position },
            TokenKind::Str(value) => Expr::Str { value: value.clone(),
                                                 position },
            TokenKind::True => Expr::Bool { value: true, position },
            TokenKind::False => Expr::Bool { value: false, position },
            _ => return None,
        };
        self.advance();
        Some(expr)
    }

    /// `call_chain = simple_expr, { ".", identifier, [ "(", [ expr_list ], ")" ] } ;`
    ///
    /// Each link becomes a call node whose root is the expression built so
    /// far, so `a.b().c()` nests left-to-right. `.name` without parentheses
    /// is a zero-argument call.
    fn parse_call_chain(&mut self) -> Option<Expr> {
        let mut expr = self.parse_simple_expression()?;

        while self.token.kind == TokenKind::Dot {
            let position = self.here();
            self.advance();

            let TokenKind::Identifier(name) = &self.token.kind else {
                self.report_missing_identifier();
                return None;
            };
            let name = name.clone();
            self.advance();

            let arguments = if self.token.kind == TokenKind::LParen {
                self.advance();
                let arguments = self.parse_expression_list();
                self.check_and_consume(&TokenKind::RParen);
                arguments
            } else {
                Vec::new()
            };

            expr = Expr::Call { root: Some(Box::new(expr)),
                                name,
                                arguments,
                                position };
        }

        Some(expr)
    }

    /// `simple_expr = id_or_call | "(", ( cast | expr ), ")" ;`
    fn parse_simple_expression(&mut self) -> Option<Expr> {
        if let Some(expr) = self.parse_id_or_call() {
            return Some(expr);
        }
        self.parse_cast_or_group()
    }

    /// `id_or_call = ( identifier | type ), [ "(", [ expr_list ], ")" ] ;`
    ///
    /// A type keyword followed by parentheses is a constructor call; a bare
    /// type keyword is not an expression and yields `None`.
    fn parse_id_or_call(&mut self) -> Option<Expr> {
        let position = self.here();

        let (name, is_type) = match &self.token.kind {
            TokenKind::Identifier(name) => (name.clone(), false),
            kind => match Type::from_token(kind) {
                Some(ty) => (ty.name().to_owned(), true),
                None => return None,
            },
        };
        self.advance();

        if self.token.kind == TokenKind::LParen {
            self.advance();
            let arguments = self.parse_expression_list();
            self.check_and_consume(&TokenKind::RParen);
            return Some(Expr::Call { root: None,
                                     name,
                                     arguments,
                                     position });
        }

        if is_type {
            return None;
        }

        Some(Expr::Identifier { name, position })
    }

    /// `cast_or_group = "(", ( ("int" | "dec") ")" expr | expr ")" ) ;`
    ///
    /// A parenthesized `int` or `dec` keyword is a cast whose operand is
    /// the whole expression that follows the closing parenthesis; anything
    /// else inside parentheses is ordinary grouping.
    fn parse_cast_or_group(&mut self) -> Option<Expr> {
        if self.token.kind != TokenKind::LParen {
            return None;
        }
        let position = self.here();
        self.advance();

        let cast_target = match self.token.kind {
            TokenKind::TyInt => Some(Type::Int),
            TokenKind::TyDec => Some(Type::Dec),
            _ => None,
        };

        if let Some(target) = cast_target {
            self.advance();
            self.check_and_consume(&TokenKind::RParen);
            let Some(operand) = self.parse_expression() else {
                self.report_missing_expression();
                return None;
            };
            return Some(Expr::Cast { target,
                                     operand: Box::new(operand),
                                     position });
        }

        let expression = self.parse_expression();
        self.check_and_consume(&TokenKind::RParen);
        expression
    }

    /// `expr_list = expr, { ",", expr } ;`
    fn parse_expression_list(&mut self) -> Vec<Expr> {
        let mut expressions = Vec::new();

        let Some(first) = self.parse_expression() else {
            return expressions;
        };
        expressions.push(first);

        while self.token.kind == TokenKind::Comma {
            self.advance();
            match self.parse_expression() {
                Some(expression) => expressions.push(expression),
                None => self.report_missing_expression(),
            }
        }

        expressions
    }
}
