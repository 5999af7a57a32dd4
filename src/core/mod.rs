pub mod fraction;
pub mod operand;
