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

use crate::{
    constants::{EVM_WORD_SIZE, G2_ELEMENT_SIZE, GROUP_ELEMENT_SIZE, HEADER_VALUE_SIZE},
    errors::{FieldError, GroupError},
    EVMWord, Fq, Fq2, Fr, G1, G2, U256,
};
use alloc::{
    string::{String, ToString},
    vec::Vec,
};
use ark_ec::AffineRepr;
use ark_ff::{AdditiveGroup, PrimeField};

pub(crate) trait IntoU256 {
    fn into_u256(self) -> U256;
}

impl IntoU256 for &[u8; 32] {
    fn into_u256(self) -> U256 {
        let mut rchunks_iter = self.rchunks_exact(8);
        let limbs: [u64; 4] = core::array::from_fn(|_| {
            let mut limb = [0u8; 8];
            if let Some(chunk) = rchunks_iter.next() {
                limb.copy_from_slice(chunk);
            }
            u64::from_be_bytes(limb)
        });
        debug_assert!(rchunks_iter.remainder().is_empty());

        U256::new(limbs)
    }
}

impl IntoU256 for [u8; 32] {
    fn into_u256(self) -> U256 {
        (&self).into_u256()
    }
}

/// Trait for returning a big-endian representation of some object as a `[u8; 32]`.
pub(crate) trait IntoBEBytes32 {
    fn into_be_bytes32(self) -> [u8; 32];
}

impl IntoBEBytes32 for U256 {
    fn into_be_bytes32(self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        for (chunk, limb) in bytes.chunks_exact_mut(8).zip(self.0.iter().rev()) {
            chunk.copy_from_slice(&limb.to_be_bytes());
        }
        bytes
    }
}

impl IntoBEBytes32 for Fr {
    fn into_be_bytes32(self) -> [u8; 32] {
        self.into_bigint().into_be_bytes32()
    }
}

impl IntoBEBytes32 for Fq {
    fn into_be_bytes32(self) -> [u8; 32] {
        self.into_bigint().into_be_bytes32()
    }
}

impl IntoBEBytes32 for u64 {
    fn into_be_bytes32(self) -> [u8; 32] {
        let be = self.to_be_bytes();
        let mut arr = [0u8; 32];
        arr[24..].copy_from_slice(&be);
        arr
    }
}

pub(crate) fn to_hex_string(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(2 + 2 * bytes.len());
    out.push_str("0x");
    out.push_str(&hex::encode(bytes));
    out
}

// Splits `N` bytes off the front of `data`.
fn take<'a, const N: usize>(data: &mut &'a [u8]) -> Result<&'a [u8; N], usize> {
    if data.len() < N {
        return Err(data.len());
    }
    let (head, rest) = data.split_at(N);
    *data = rest;
    head.try_into().map_err(|_| N)
}

pub(crate) fn read_u64(data: &mut &[u8]) -> Result<u64, FieldError> {
    let chunk = take::<HEADER_VALUE_SIZE>(data).map_err(|actual_length| {
        FieldError::InvalidSliceLength {
            actual_length,
            expected_length: HEADER_VALUE_SIZE,
        }
    })?;
    Ok(u64::from_be_bytes(*chunk))
}

pub(crate) fn read_word(data: &mut &[u8]) -> Result<EVMWord, FieldError> {
    take::<EVM_WORD_SIZE>(data)
        .copied()
        .map_err(|actual_length| FieldError::InvalidSliceLength {
            actual_length,
            expected_length: EVM_WORD_SIZE,
        })
}

/// Interprets a big-endian word as an element of the field `F`, rejecting
/// values that are not below the modulus.
pub(crate) fn field_from_word<F: PrimeField<BigInt = U256>>(
    word: &EVMWord,
) -> Result<F, FieldError> {
    let value = word.into_u256();
    F::from_bigint(value).ok_or(FieldError::NotMember { value })
}

// Strict counterpart of `Fr::from_be_bytes_mod_order`.
pub(crate) fn read_fr(data: &mut &[u8]) -> Result<Fr, FieldError> {
    field_from_word(&read_word(data)?)
}

pub(crate) fn read_fq(data: &mut &[u8]) -> Result<Fq, GroupError> {
    let word = read_word(data).map_err(|e| match e {
        FieldError::InvalidSliceLength {
            actual_length,
            expected_length,
        } => GroupError::InvalidSliceLength {
            actual_length,
            expected_length,
        },
        _ => GroupError::NotOnCurve,
    })?;
    field_from_word::<Fq>(&word).map_err(|_| GroupError::CoordinateExceedsModulus {
        coordinate_value: word.into_u256(),
        modulus: Fq::MODULUS,
    })
}

fn ensure_len(data: &[u8], expected_length: usize) -> Result<(), GroupError> {
    if data.len() < expected_length {
        return Err(GroupError::InvalidSliceLength {
            actual_length: data.len(),
            expected_length,
        });
    }
    Ok(())
}

// Parse point in G1.
pub(crate) fn read_g1(data: &mut &[u8]) -> Result<G1, GroupError> {
    ensure_len(data, GROUP_ELEMENT_SIZE)?;

    let x = read_fq(data)?;
    let y = read_fq(data)?;

    // If (0, 0) is given, we interpret this as the point at infinity:
    // https://docs.rs/ark-ec/0.5.0/src/ark_ec/models/short_weierstrass/affine.rs.html#212-218
    if x == Fq::ZERO && y == Fq::ZERO {
        return Ok(G1::zero());
    }

    let point = G1::new_unchecked(x, y);
    check_g1(&point)?;
    Ok(point)
}

// Parse point in G2.
pub(crate) fn read_g2(data: &mut &[u8]) -> Result<G2, GroupError> {
    ensure_len(data, G2_ELEMENT_SIZE)?;

    // Read in reverse order (i.e., imaginary part before real part) to match
    // Solidity's encoding:
    // https://eips.ethereum.org/EIPS/eip-197#encoding
    let x_c1 = read_fq(data)?;
    let x_c0 = read_fq(data)?;
    let y_c1 = read_fq(data)?;
    let y_c0 = read_fq(data)?;

    let x = Fq2::new(x_c0, x_c1);
    let y = Fq2::new(y_c0, y_c1);

    if x == Fq2::ZERO && y == Fq2::ZERO {
        return Ok(G2::zero());
    }

    let point = G2::new_unchecked(x, y);
    check_g2(&point)?;
    Ok(point)
}

/// Checks that an affine point built elsewhere is a valid G1 element.
pub(crate) fn check_g1(point: &G1) -> Result<(), GroupError> {
    if point.is_zero() {
        return Ok(());
    }
    if !point.is_on_curve() {
        return Err(GroupError::NotOnCurve);
    }
    // This is always true for G1 with the BN254 curve.
    debug_assert!(point.is_in_correct_subgroup_assuming_on_curve());
    Ok(())
}

/// Checks that an affine point built elsewhere is on the twist and in the
/// prime order subgroup.
pub(crate) fn check_g2(point: &G2) -> Result<(), GroupError> {
    if point.is_zero() {
        return Ok(());
    }
    if !point.is_on_curve() {
        return Err(GroupError::NotOnCurve);
    }
    // Unlike G1, the G2 curve has a non-trivial cofactor.
    if !point.is_in_correct_subgroup_assuming_on_curve() {
        return Err(GroupError::NotInSubgroup);
    }
    Ok(())
}

pub(crate) fn write_g1(point: &G1, out: &mut Vec<u8>) {
    if point.is_zero() {
        out.extend_from_slice(&[0u8; GROUP_ELEMENT_SIZE]);
    } else {
        out.extend_from_slice(&point.x.into_be_bytes32());
        out.extend_from_slice(&point.y.into_be_bytes32());
    }
}

pub(crate) fn write_g2(point: &G2, out: &mut Vec<u8>) {
    if point.is_zero() {
        out.extend_from_slice(&[0u8; G2_ELEMENT_SIZE]);
    } else {
        out.extend_from_slice(&point.x.c1.into_be_bytes32());
        out.extend_from_slice(&point.x.c0.into_be_bytes32());
        out.extend_from_slice(&point.y.c1.into_be_bytes32());
        out.extend_from_slice(&point.y.c0.into_be_bytes32());
    }
}

/// Parses a 256-bit unsigned integer written either in decimal or as a
/// `0x`-prefixed hexadecimal string, the two forms snarkjs emits.
pub(crate) fn parse_u256(value: &str) -> Result<U256, FieldError> {
    let invalid = || FieldError::InvalidNumber {
        value: value.to_string(),
    };

    if let Some(digits) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        if digits.is_empty() || digits.len() > 2 * EVM_WORD_SIZE {
            return Err(invalid());
        }
        let mut padded = [b'0'; 2 * EVM_WORD_SIZE];
        padded[2 * EVM_WORD_SIZE - digits.len()..].copy_from_slice(digits.as_bytes());
        let mut word = [0u8; EVM_WORD_SIZE];
        hex::decode_to_slice(padded, &mut word).map_err(|_| invalid())?;
        return Ok(word.into_u256());
    }

    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let mut limbs = [0u64; 4];
    for digit in value.bytes().map(|b| u128::from(b - b'0')) {
        let mut carry = digit;
        for limb in limbs.iter_mut() {
            let acc = u128::from(*limb) * 10 + carry;
            *limb = acc as u64;
            carry = acc >> 64;
        }
        if carry != 0 {
            return Err(invalid());
        }
    }
    Ok(U256::new(limbs))
}

pub(crate) fn parse_field<F: PrimeField<BigInt = U256>>(value: &str) -> Result<F, FieldError> {
    let value = parse_u256(value)?;
    F::from_bigint(value).ok_or(FieldError::NotMember { value })
}
