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

use crate::constants::EVM_WORD_SIZE;

pub use ark_bn254::Bn254;

/// Scalar field of BN254. Public inputs and PLONK evaluations live here.
pub type Fr = ark_bn254::Fr;
/// Base field of BN254. Curve coordinates live here.
pub type Fq = ark_bn254::Fq;
pub type Fq2 = ark_bn254::Fq2;

/// A point of the G1 group in affine form.
pub type G1 = ark_bn254::G1Affine;
/// A point of the G2 group in affine form.
pub type G2 = ark_bn254::G2Affine;
pub type G1Projective = ark_bn254::G1Projective;
pub type G2Projective = ark_bn254::G2Projective;

/// Element of the pairing target group `G_T`.
pub type Gt = ark_ec::pairing::PairingOutput<Bn254>;

pub type U256 = ark_ff::BigInt<4>;

/// A raw 32-byte big-endian calldata word.
pub type EVMWord = [u8; EVM_WORD_SIZE];

/// A single public input, encoded as a calldata word.
pub type PublicInput = EVMWord;
pub type Pubs = [PublicInput];
