use super::Compiler;
use crate::codegen::{CodeGenerator, ProgramGenerator};
use crate::engine::ExecutionLimits;
use crate::validation::{DagValidator, StructuralCheck};

/// Configures a `Compiler`.
pub struct CompilerBuilder {
    validator: DagValidator,
    generator: Box<dyn ProgramGenerator>,
    limits: ExecutionLimits,
}

impl Default for CompilerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CompilerBuilder {
    pub fn new() -> Self {
        Self {
            validator: DagValidator::new(),
            generator: Box::new(CodeGenerator::new()),
            limits: ExecutionLimits::default(),
        }
    }

    pub fn with_validator(mut self, validator: DagValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Appends a structural check to the current validator.
    pub fn with_check(mut self, check: Box<dyn StructuralCheck>) -> Self {
        self.validator = self.validator.with_check(check);
        self
    }

    pub fn with_generator(mut self, generator: Box<dyn ProgramGenerator>) -> Self {
        self.generator = generator;
        self
    }

    pub fn with_limits(mut self, limits: ExecutionLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn build(self) -> Compiler {
        Compiler {
            validator: self.validator,
            generator: self.generator,
            limits: self.limits,
            runs: 0,
        }
    }
}
