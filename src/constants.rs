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

// Scalar size (in bytes)
pub const FIELD_ELEMENT_SIZE: usize = 32;
// EVM words are 32 bytes long
pub const EVM_WORD_SIZE: usize = 32;
// G1 Point Size (in bytes)
pub const GROUP_ELEMENT_SIZE: usize = 2 * FIELD_ELEMENT_SIZE;
// G2 Point Size (in bytes)
pub const G2_ELEMENT_SIZE: usize = 4 * FIELD_ELEMENT_SIZE;
// Size of the u64 header values in the verification key formats
pub const HEADER_VALUE_SIZE: usize = 8;

pub const GROTH16_PROOF_WORDS: usize = 8;
pub const GROTH16_PROOF_SIZE: usize = GROTH16_PROOF_WORDS * EVM_WORD_SIZE;
// num_public_inputs | alpha | beta | gamma | delta
pub const GROTH16_VK_FIXED_SIZE: usize =
    HEADER_VALUE_SIZE + GROUP_ELEMENT_SIZE + 3 * G2_ELEMENT_SIZE;

pub const NUM_PLONK_COMMITMENTS: usize = 9;
pub const NUM_PLONK_EVALUATIONS: usize = 6;
pub const PLONK_PROOF_WORDS: usize = 2 * NUM_PLONK_COMMITMENTS + NUM_PLONK_EVALUATIONS;
pub const PLONK_PROOF_SIZE: usize = PLONK_PROOF_WORDS * EVM_WORD_SIZE;
// Number of batching powers of v used in the opening (v_1, ..., v_5)
pub const NUM_PLONK_V_CHALLENGES: usize = 5;
// power | n_public | k1 | k2 | w | 8 selector/permutation commitments | X_2
pub const PLONK_VK_SIZE: usize = 2 * HEADER_VALUE_SIZE
    + 3 * FIELD_ELEMENT_SIZE
    + 8 * GROUP_ELEMENT_SIZE
    + G2_ELEMENT_SIZE;

// 2^28 divides r - 1 for the BN254 scalar field
pub const MAX_PLONK_POWER: u64 = 28;
