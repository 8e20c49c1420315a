// Copyright 2022 Aztec
// Copyright 2025 Horizen Labs, Inc.
// SPDX-License-Identifier: Apache-2.0 or MIT

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// 	http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use alloc::string::{String, ToString};
use core::fmt;
use snafu::Snafu;

#[cfg(feature = "json")]
use crate::json::JsonError;
use crate::{
    calldata::CalldataError,
    curve::ArithmeticError,
    key::{VerificationKeyError, VkCommitmentField},
    proof::{ProofCommitmentField, ProofError},
    utils::{to_hex_string, IntoBEBytes32},
    U256,
};

/// The verification error type.
///
/// A well-formed proof that does not satisfy the verification equation is not
/// an error: it is reported as `Ok(false)` by the verification functions.
#[derive(Debug, PartialEq, Snafu)]
pub enum VerifyError {
    /// The key, the proof or the public inputs could not be decoded, or a
    /// decoded value is out of range or not a valid curve point.
    #[snafu(display("Malformed input: {message}"))]
    MalformedInput { message: String },
    /// The number of public inputs does not match the verification key.
    #[snafu(display(
        "Provided public inputs length does not match. Expected: {expected}; Got: {actual}"
    ))]
    InputLengthMismatch { expected: usize, actual: usize },
    /// An undefined field operation was hit while evaluating the proof.
    #[snafu(display("Arithmetic error: {cause}"))]
    ArithmeticError { cause: ArithmeticError },
}

impl VerifyError {
    pub(crate) fn malformed(message: impl fmt::Display) -> Self {
        VerifyError::MalformedInput {
            message: message.to_string(),
        }
    }
}

impl From<ArithmeticError> for VerifyError {
    fn from(cause: ArithmeticError) -> Self {
        VerifyError::ArithmeticError { cause }
    }
}

impl From<ProofError> for VerifyError {
    fn from(e: ProofError) -> Self {
        VerifyError::malformed(format_args!("proof: {e}"))
    }
}

impl From<VerificationKeyError> for VerifyError {
    fn from(e: VerificationKeyError) -> Self {
        VerifyError::malformed(format_args!("verification key: {e}"))
    }
}

impl From<CalldataError> for VerifyError {
    fn from(e: CalldataError) -> Self {
        VerifyError::malformed(format_args!("calldata: {e}"))
    }
}

#[cfg(feature = "json")]
impl From<JsonError> for VerifyError {
    fn from(e: JsonError) -> Self {
        VerifyError::malformed(format_args!("json: {e}"))
    }
}

impl From<ConversionError> for VerifyError {
    fn from(e: ConversionError) -> Self {
        VerifyError::malformed(e)
    }
}

#[derive(Debug, PartialEq)]
pub enum GroupError {
    InvalidSliceLength {
        actual_length: usize,
        expected_length: usize,
    },
    NotOnCurve,
    NotInSubgroup,
    CoordinateExceedsModulus {
        coordinate_value: U256,
        modulus: U256,
    },
}

impl fmt::Display for GroupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupError::InvalidSliceLength {
                actual_length,
                expected_length,
            } => {
                write!(
                    f,
                    "Invalid Slice Length. Actual length: {actual_length}, Expected length: {expected_length}",
                )
            }
            GroupError::NotOnCurve => {
                write!(f, "Point not on curve")
            }
            GroupError::NotInSubgroup => {
                write!(f, "Point not in the prime order subgroup")
            }
            GroupError::CoordinateExceedsModulus {
                coordinate_value,
                modulus,
            } => {
                write!(
                    f,
                    "Coordinate value {} exceeds base field modulus {}",
                    to_hex_string(&coordinate_value.into_be_bytes32()),
                    modulus
                )
            }
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum CommitmentField {
    Proof(ProofCommitmentField),
    Vk(VkCommitmentField),
}

impl From<ProofCommitmentField> for CommitmentField {
    fn from(pcf: ProofCommitmentField) -> Self {
        CommitmentField::Proof(pcf)
    }
}

impl From<VkCommitmentField> for CommitmentField {
    fn from(vkcf: VkCommitmentField) -> Self {
        CommitmentField::Vk(vkcf)
    }
}

impl fmt::Display for CommitmentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommitmentField::Proof(field_name) => {
                write!(f, "{field_name}")
            }
            CommitmentField::Vk(field_name) => {
                write!(f, "{field_name}")
            }
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct ConversionError {
    pub group: GroupError,
    pub field: Option<CommitmentField>,
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field_name) => {
                write!(
                    f,
                    "Failed to convert data into an EC point for field \"{}\". Cause: {}",
                    field_name, self.group
                )
            }
            None => {
                write!(
                    f,
                    "Failed to convert data into an EC point. Cause: {}",
                    self.group
                )
            }
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum FieldError {
    InvalidSliceLength {
        actual_length: usize,
        expected_length: usize,
    },
    /// The value is not below the field modulus.
    NotMember { value: U256 },
    /// The text is neither a decimal nor a `0x` hexadecimal 256-bit integer.
    InvalidNumber { value: String },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::InvalidSliceLength {
                actual_length,
                expected_length,
            } => {
                write!(
                    f,
                    "Invalid Slice Length. Actual length: {actual_length}, Expected length: {expected_length}",
                )
            }
            FieldError::NotMember { value } => {
                write!(
                    f,
                    "Value {} is not a field element",
                    to_hex_string(&value.into_be_bytes32())
                )
            }
            FieldError::InvalidNumber { value } => {
                write!(f, "\"{value}\" is not a valid 256-bit integer")
            }
        }
    }
}
