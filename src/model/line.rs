//! Per-line analysis records.

use smol_str::SmolStr;

/// The analyzer's verdict on one source line.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineAnalysis {
    /// Line number (1-indexed).
    pub line_number: u32,
    pub is_correct: bool,
    pub error_message: Option<String>,
    /// The line's instruction as the analyzer reconstructed it.
    pub instruction: SmolStr,
    /// Location counter at this line, when the analyzer assigns addresses.
    pub address: Option<u64>,
    /// Encoded bytes, when the analyzer also encodes.
    pub machine_code: Option<Vec<u8>>,
}

impl LineAnalysis {
    pub fn correct(line_number: u32, instruction: impl Into<SmolStr>) -> Self {
        Self {
            line_number,
            is_correct: true,
            error_message: None,
            instruction: instruction.into(),
            address: None,
            machine_code: None,
        }
    }

    pub fn incorrect(
        line_number: u32,
        instruction: impl Into<SmolStr>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            line_number,
            is_correct: false,
            error_message: Some(message.into()),
            instruction: instruction.into(),
            address: None,
            machine_code: None,
        }
    }

    pub fn with_encoding(mut self, address: u64, machine_code: Vec<u8>) -> Self {
        self.address = Some(address);
        self.machine_code = Some(machine_code);
        self
    }
}
