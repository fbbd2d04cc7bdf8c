use std::collections::HashMap;

use lazy_static::lazy_static;

use super::decode::{prefixed_form, primary_form, PREFIX};
use super::instruction::Instruction;
use crate::error::EncodeError;

lazy_static! {
    /// Reverse of the decode tables, keyed by operand form.
    static ref OPCODES: HashMap<Instruction, Vec<u8>> = {
        let mut opcodes = HashMap::with_capacity(512);
        for opcode in 0..=u8::MAX {
            if let Some(form) = primary_form(opcode) {
                opcodes.insert(form, vec![opcode]);
            }
            opcodes.insert(prefixed_form(opcode), vec![PREFIX, opcode]);
        }
        opcodes
    };
}

/// Encode an instruction back into its machine bytes, immediates
/// little-endian.
pub fn encode(instruction: &Instruction) -> Result<Vec<u8>, EncodeError> {
    let mut bytes = OPCODES
        .get(&instruction.form())
        .cloned()
        .ok_or_else(|| EncodeError::Unencodable(instruction.to_string()))?;
    bytes.extend(instruction.data());
    Ok(bytes)
}
