// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! ERC-20 style call construction.
//!
//! Starknet token contracts follow the ERC-20 entry points, with `u256`
//! amounts passed as `(low, high)` felts.

use super::amount::Uint256Pair;
use super::types::{Call, FeltAddress};

/// Entry point used for allowance approval.
pub const APPROVE_ENTRYPOINT: &str = "approve";

/// Build `approve(spender, amount)` against `token`.
///
/// Calldata layout: `[spender, amount.low, amount.high]`.
pub fn approve_call(token: &FeltAddress, spender: &FeltAddress, amount: Uint256Pair) -> Call {
    let [low, high] = amount.into_calldata();
    Call {
        contract_address: token.to_string(),
        entrypoint: APPROVE_ENTRYPOINT.to_string(),
        calldata: vec![spender.to_string(), low, high],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::{amount::encode, STRK_TOKEN};

    #[test]
    fn approve_call_layout() {
        let token = FeltAddress::parse(STRK_TOKEN.address).unwrap();
        let spender = FeltAddress::parse("0x1234").unwrap();

        let call = approve_call(&token, &spender, encode("1").unwrap());

        assert_eq!(call.contract_address, STRK_TOKEN.address);
        assert_eq!(call.entrypoint, "approve");
        assert_eq!(
            call.calldata,
            vec![
                "0x1234".to_string(),
                "1000000000000000000".to_string(),
                "0".to_string()
            ]
        );
    }
}
