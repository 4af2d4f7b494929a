use alloy_primitives::{Address, Bytes};
use alloy_sol_types::{sol, SolCall};

sol! {
    /// Allowance module surface used by the app
    interface IAllowanceModule {
        function deleteAllowance(address delegate, address token);
        function getDelegates(address safe, uint48 start, uint8 pageSize) external view returns (address[] results, uint48 next);
        function getTokens(address safe, address delegate) external view returns (address[]);
        function getTokenAllowance(address safe, address delegate, address token) external view returns (uint256[5]);
    }
}

/// Call data revoking `beneficiary`'s allowance for `token`
pub fn encode_delete_allowance(beneficiary: Address, token: Address) -> Bytes {
    IAllowanceModule::deleteAllowanceCall {
        delegate: beneficiary,
        token,
    }
    .abi_encode()
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::keccak256;

    #[test]
    fn test_delete_allowance_layout() {
        let beneficiary = Address::repeat_byte(0xaa);
        let token = Address::repeat_byte(0xbb);
        let data = encode_delete_allowance(beneficiary, token);

        assert_eq!(data.len(), 4 + 32 + 32);
        assert_eq!(&data[..4], &keccak256("deleteAllowance(address,address)")[..4]);
        assert_eq!(&data[4 + 12..36], beneficiary.as_slice());
        assert_eq!(&data[36 + 12..], token.as_slice());
    }

    #[test]
    fn test_payload_tracks_identity() {
        let beneficiary = Address::repeat_byte(0x01);
        let token = Address::repeat_byte(0x02);

        let first = encode_delete_allowance(beneficiary, token);
        let again = encode_delete_allowance(beneficiary, token);
        assert_eq!(first, again);

        let other_token = encode_delete_allowance(beneficiary, Address::ZERO);
        assert_ne!(first, other_token);
        let other_beneficiary = encode_delete_allowance(Address::repeat_byte(0x03), token);
        assert_ne!(first, other_beneficiary);
    }
}
