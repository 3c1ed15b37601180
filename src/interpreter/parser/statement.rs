use crate::{
    ast::{Block, Expr, Statement, Type},
    interpreter::{lexer::TokenKind, parser::Parser},
};

impl Parser<'_> {
    /// `block = "{", { statement }, "}" ;`
    ///
    /// Statements are collected until no rule matches; a missing brace on
    /// either side is reported and parsing continues.
    pub(in crate::interpreter::parser) fn parse_block(&mut self) -> Block {
        let position = self.here();
        self.check_and_consume(&TokenKind::LBrace);

        let mut statements = Vec::new();
        while let Some(statement) = self.parse_statement() {
            statements.push(statement);
        }

        self.check_and_consume(&TokenKind::RBrace);

        Block { statements, position }
    }

    /// `statement = if_stmt | while_stmt | iterate_stmt | return_stmt
    ///            | declaration | assignment_or_expr ;`
    ///
    /// Alternatives are tried in order; the first match wins.
    fn parse_statement(&mut self) -> Option<Statement> {
        if let Some(statement) = self.parse_if_statement() {
            return Some(statement);
        }
        if let Some(statement) = self.parse_while_statement() {
            return Some(statement);
        }
        if let Some(statement) = self.parse_iterate_statement() {
            return Some(statement);
        }
        if let Some(statement) = self.parse_return_statement() {
            return Some(statement);
        }
        if let Some(statement) = self.parse_declaration_statement() {
            return Some(statement);
        }
        self.parse_assignment_or_expression()
    }

    /// `if_stmt = "if", "(", expr, ")", block, [ "else", block ] ;`
    fn parse_if_statement(&mut self) -> Option<Statement> {
        if self.token.kind != TokenKind::If {
            return None;
        }
        let position = self.here();
        self.advance();

        self.check_and_consume(&TokenKind::LParen);
        let condition = self.parse_expression();
        if condition.is_none() {
            self.report_missing_expression();
        }
        self.check_and_consume(&TokenKind::RParen);

        let body = self.parse_block();

        let else_body = if self.token.kind == TokenKind::Else {
            self.advance();
            Some(self.parse_block())
        } else {
            None
        };

        Some(Statement::If { condition,
                             body,
                             else_body,
                             position })
    }

    /// `while_stmt = "while", "(", expr, ")", block ;`
    fn parse_while_statement(&mut self) -> Option<Statement> {
        if self.token.kind != TokenKind::While {
            return None;
        }
        let position = self.here();
        self.advance();

        self.check_and_consume(&TokenKind::LParen);
        let condition = self.parse_expression();
        if condition.is_none() {
            self.report_missing_expression();
        }
        self.check_and_consume(&TokenKind::RParen);

        let body = self.parse_block();

        Some(Statement::While { condition,
                                body,
                                position })
    }

    /// `iterate_stmt = "for", "(", argument_dec, ":", expr, ")", block ;`
    ///
    /// A missing element declaration is reported and patched with a `Shape`
    /// placeholder so the rest of the statement still parses.
    fn parse_iterate_statement(&mut self) -> Option<Statement> {
        if self.token.kind != TokenKind::For {
            return None;
        }
        let position = self.here();
        self.advance();

        self.check_and_consume(&TokenKind::LParen);

        let (element_type, element_name) = match self.parse_parameter() {
            Some(parameter) => (parameter.ty, parameter.name),
            None => {
                self.errors
                    .push(crate::error::SyntaxError::MissingArgument { position: self.here() });
                (Type::Shape, String::new())
            },
        };

        self.check_and_consume(&TokenKind::Colon);

        let source = self.parse_expression();
        if source.is_none() {
            self.report_missing_expression();
        }

        self.check_and_consume(&TokenKind::RParen);

        let body = self.parse_block();

        Some(Statement::Iterate { element_type,
                                  element_name,
                                  source,
                                  body,
                                  position })
    }

    /// `return_stmt = "return", expr, ";" ;`
    fn parse_return_statement(&mut self) -> Option<Statement> {
        if self.token.kind != TokenKind::Return {
            return None;
        }
        let position = self.here();
        self.advance();

        let value = self.parse_expression();
        if value.is_none() {
            self.report_missing_expression();
        }

        self.check_and_consume(&TokenKind::Semicolon);

        Some(Statement::Return { value, position })
    }

    /// `declaration = argument_dec, [ "=", expr ], ";" ;`
    fn parse_declaration_statement(&mut self) -> Option<Statement> {
        let position = self.here();
        let parameter = self.parse_parameter()?;

        let initializer = if self.token.kind == TokenKind::Assign {
            self.advance();
            let initializer = self.parse_expression();
            if initializer.is_none() {
                self.report_missing_expression();
            }
            initializer
        } else {
            None
        };

        self.check_and_consume(&TokenKind::Semicolon);

        Some(Statement::Declaration { ty: parameter.ty,
                                      name: parameter.name,
                                      initializer,
                                      position })
    }

    /// `assignment_or_expr = expr, [ "=", expr ], ";" ;`
    ///
    /// A leading expression followed by `=` must be a plain identifier; any
    /// other target is reported and the statement degrades to a bare
    /// expression so parsing can continue.
    fn parse_assignment_or_expression(&mut self) -> Option<Statement> {
        let position = self.here();
        let target = self.parse_expression();

        let mut assigned = None;
        let mut is_assignment = false;
        if self.token.kind == TokenKind::Assign {
            is_assignment = true;
            self.advance();
            assigned = self.parse_expression();
        }

        if target.is_none() && !is_assignment {
            return None;
        }

        self.check_and_consume(&TokenKind::Semicolon);

        if is_assignment {
            return match target {
                Some(Expr::Identifier { name, .. }) => Some(Statement::Assignment { name,
                                                                                    value: assigned,
                                                                                    position }),
                _ => {
                    self.report_missing_identifier();
                    assigned.map(Statement::Expression)
                },
            };
        }

        target.map(Statement::Expression)
    }
}
