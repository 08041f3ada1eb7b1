use crate::ast::{BinaryOp, Block, Expr, Program, Stmt, UnaryOp};
use crate::error::{Span, SpiError};
use crate::scope::GlobalScope;
use tracing::trace;

/// Tree-walking evaluator. Owns the global scope of the run it performs.
pub struct Evaluator {
    scope: GlobalScope,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self::with_scope(GlobalScope::new())
    }

    pub fn with_scope(scope: GlobalScope) -> Self {
        Self { scope }
    }

    pub fn scope(&self) -> &GlobalScope {
        &self.scope
    }

    pub fn into_scope(self) -> GlobalScope {
        self.scope
    }

    pub fn evaluate_program(&mut self, program: &Program) -> Result<(), SpiError> {
        self.execute_block(&program.block)
    }

    pub fn execute_statement(&mut self, stmt: &Stmt) -> Result<(), SpiError> {
        match stmt {
            Stmt::Compound(block) => self.execute_block(block),
            Stmt::Assign { name, value, .. } => {
                let value = self.evaluate_expression(value)?;
                trace!(name = %name, value, "assign");
                self.scope.assign(name, value);
                Ok(())
            }
            Stmt::NoOp { .. } => Ok(()),
        }
    }

    fn execute_block(&mut self, block: &Block) -> Result<(), SpiError> {
        for statement in &block.statements {
            self.execute_statement(statement)?;
        }
        Ok(())
    }

    pub fn evaluate_expression(&mut self, expr: &Expr) -> Result<i64, SpiError> {
        match expr {
            Expr::Number { value, .. } => Ok(*value),
            Expr::Variable { name, span } => self.scope.get(name).ok_or_else(|| {
                SpiError::eval_error_with_help(
                    span.clone(),
                    format!("Undefined variable '{}'", name),
                    format!("Assign '{}' with ':=' before reading it.", name),
                )
            }),
            Expr::Unary {
                operator,
                operand,
                span,
            } => {
                let operand_val = self.evaluate_expression(operand)?;
                Self::evaluate_unary_op(*operator, operand_val, span)
            }
            Expr::Binary {
                left,
                operator,
                right,
                span,
            } => {
                let left_val = self.evaluate_expression(left)?;
                let right_val = self.evaluate_expression(right)?;
                Self::evaluate_binary_op(*operator, left_val, right_val, span)
            }
        }
    }

    fn evaluate_unary_op(operator: UnaryOp, operand: i64, span: &Span) -> Result<i64, SpiError> {
        match operator {
            UnaryOp::Plus => Ok(operand),
            UnaryOp::Negate => operand
                .checked_neg()
                .ok_or_else(|| Self::overflow(span)),
        }
    }

    fn evaluate_binary_op(
        operator: BinaryOp,
        left: i64,
        right: i64,
        span: &Span,
    ) -> Result<i64, SpiError> {
        let result = match operator {
            BinaryOp::Add => left.checked_add(right),
            BinaryOp::Subtract => left.checked_sub(right),
            BinaryOp::Multiply => left.checked_mul(right),
            BinaryOp::Divide => {
                if right == 0 {
                    return Err(SpiError::eval_error(
                        span.clone(),
                        "Division by zero".to_string(),
                    ));
                }
                floor_div(left, right)
            }
        };

        result.ok_or_else(|| Self::overflow(span))
    }

    fn overflow(span: &Span) -> SpiError {
        SpiError::eval_error(span.clone(), "Integer overflow".to_string())
    }
}

/// Integer division rounding toward negative infinity.
///
/// `None` on division by zero or when the quotient does not fit in `i64`.
pub fn floor_div(left: i64, right: i64) -> Option<i64> {
    let quotient = left.checked_div(right)?;
    if left % right != 0 && (left < 0) != (right < 0) {
        Some(quotient - 1)
    } else {
        Some(quotient)
    }
}

#[cfg(test)]
mod tests {
    use super::floor_div;

    #[test]
    fn floor_div_rounds_toward_negative_infinity() {
        assert_eq!(floor_div(7, 2), Some(3));
        assert_eq!(floor_div(-7, 2), Some(-4));
        assert_eq!(floor_div(7, -2), Some(-4));
        assert_eq!(floor_div(-7, -2), Some(3));
        assert_eq!(floor_div(-8, 2), Some(-4));
        assert_eq!(floor_div(0, -3), Some(0));
    }

    #[test]
    fn floor_div_rejects_zero_and_overflow() {
        assert_eq!(floor_div(1, 0), None);
        assert_eq!(floor_div(i64::MIN, -1), None);
    }
}
