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

//! Field and curve arithmetic over BN254.
//!
//! The heavy lifting (Montgomery field arithmetic, Jacobian point formulas and
//! the optimal ate pairing) is done by arkworks. This module pins down the
//! error contract the verifiers rely on: the only failing operation is the
//! inversion of zero, and it is reported instead of panicking.
//!
//! The arkworks backend does not promise constant-time execution. Everything
//! handled here (keys, proofs and public inputs) is public.

use alloc::vec::Vec;
use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup, VariableBaseMSM};
use ark_ff::{batch_inversion, AdditiveGroup, Field, One};
use snafu::Snafu;

use crate::{Bn254, Fr, Gt, G1Projective, G1, G2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Snafu)]
pub enum ArithmeticError {
    #[snafu(display("Division by zero"))]
    DivisionByZero,
    #[snafu(display("Mismatched lengths: {bases} bases and {scalars} scalars"))]
    LengthMismatch { bases: usize, scalars: usize },
}

/// Multiplicative inverse of `x`.
pub fn inverse(x: Fr) -> Result<Fr, ArithmeticError> {
    x.inverse().ok_or(ArithmeticError::DivisionByZero)
}

/// `numerator / denominator`.
pub fn divide(numerator: Fr, denominator: Fr) -> Result<Fr, ArithmeticError> {
    Ok(numerator * inverse(denominator)?)
}

/// Inverts every element in place using a single field inversion.
///
/// Fails without touching `values` if any of them is zero.
pub fn batch_inverse(values: &mut [Fr]) -> Result<(), ArithmeticError> {
    if values.iter().any(|v| *v == Fr::ZERO) {
        return Err(ArithmeticError::DivisionByZero);
    }
    batch_inversion(values);
    Ok(())
}

/// `Σ scalars[i] · bases[i]`, accumulated from left to right.
pub fn linear_combination(bases: &[G1], scalars: &[Fr]) -> Result<G1Projective, ArithmeticError> {
    if bases.len() != scalars.len() {
        return Err(ArithmeticError::LengthMismatch {
            bases: bases.len(),
            scalars: scalars.len(),
        });
    }
    Ok(bases
        .iter()
        .zip(scalars)
        .fold(G1Projective::ZERO, |acc, (base, scalar)| acc + *base * scalar))
}

/// Multi-scalar multiplication. Same result as [`linear_combination`], but
/// computed with Pippenger's algorithm.
pub fn msm(bases: &[G1], scalars: &[Fr]) -> Result<G1Projective, ArithmeticError> {
    G1Projective::msm(bases, scalars).map_err(|_| ArithmeticError::LengthMismatch {
        bases: bases.len(),
        scalars: scalars.len(),
    })
}

pub fn pairing(p: G1, q: G2) -> Gt {
    Bn254::pairing(p, q)
}

/// Checks `Π e(P_i, Q_i) == 1` with a single multi-Miller loop and one final
/// exponentiation.
pub fn pairing_product_is_identity(pairs: &[(G1, G2)]) -> bool {
    let (g1_points, g2_points): (Vec<G1>, Vec<G2>) = pairs.iter().copied().unzip();
    let product = Bn254::multi_pairing(g1_points, g2_points);
    product.0.is_one()
}

/// Normalizes a batch of projective points with one shared inversion.
pub fn normalize(points: &[G1Projective]) -> Vec<G1> {
    G1Projective::normalize_batch(points)
}
