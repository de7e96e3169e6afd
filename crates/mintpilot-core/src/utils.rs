/*!
 * Mintpilot Utils
 *
 * Utilitários comuns usados em toda a workspace Mintpilot
 */

use crate::traits::ChainClient;
use ethereum_types::{Address, H256, U256};
use std::str::FromStr;

/// Converte uma string hexadecimal para Address
pub fn hex_to_address(hex: &str) -> Option<Address> {
    let hex_str = if hex.starts_with("0x") { &hex[2..] } else { hex };
    Address::from_str(hex_str).ok()
}

/// Converte uma string hexadecimal para H256
pub fn hex_to_h256(hex: &str) -> Option<H256> {
    let hex_str = if hex.starts_with("0x") { &hex[2..] } else { hex };
    H256::from_str(hex_str).ok()
}

/// Converte uma string hexadecimal para bytes
pub fn hex_to_bytes(hex: &str) -> Option<Vec<u8>> {
    let hex_str = if hex.starts_with("0x") { &hex[2..] } else { hex };
    if hex_str.len() % 2 != 0 {
        return None;
    }
    let mut out = Vec::with_capacity(hex_str.len() / 2);
    let bytes = hex_str.as_bytes();
    for pair in bytes.chunks(2) {
        let high = (pair[0] as char).to_digit(16)?;
        let low = (pair[1] as char).to_digit(16)?;
        out.push((high * 16 + low) as u8);
    }
    Some(out)
}

/// Formata bytes como string hexadecimal com prefixo 0x
pub fn bytes_to_hex(data: &[u8]) -> String {
    let mut out = String::with_capacity(2 + data.len() * 2);
    out.push_str("0x");
    for byte in data {
        out.push_str(&format!("{:02x}", byte));
    }
    out
}

/// Formata um Address para exibição
pub fn format_address(address: &Address) -> String {
    format!("0x{:x}", address)
}

/// Formata um valor com decimais para exibição
pub fn format_token_amount(amount: &U256, decimals: u8) -> String {
    if decimals == 0 {
        return amount.to_string();
    }

    let divisor = U256::from(10).pow(U256::from(decimals));
    let integer_part = amount / divisor;
    let fractional_part = amount % divisor;

    let fractional_str = fractional_part.to_string();
    let padding = decimals as usize - fractional_str.len();
    let mut padded_fractional = String::with_capacity(decimals as usize);
    for _ in 0..padding {
        padded_fractional.push('0');
    }
    padded_fractional.push_str(&fractional_str);

    while padded_fractional.ends_with('0') && !padded_fractional.is_empty() {
        padded_fractional.pop();
    }

    if padded_fractional.is_empty() {
        integer_part.to_string()
    } else {
        format!("{}.{}", integer_part, padded_fractional)
    }
}

/// Verifica se um endereço é um contrato
pub async fn is_contract<C: ChainClient + ?Sized>(client: &C, address: &Address) -> bool {
    match client.get_bytecode(*address).await {
        Ok(code) => !code.is_empty(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        let bytes = hex_to_bytes("0x08c379a0ff").unwrap();
        assert_eq!(bytes, vec![0x08, 0xc3, 0x79, 0xa0, 0xff]);
        assert_eq!(bytes_to_hex(&bytes), "0x08c379a0ff");
    }

    #[test]
    fn hex_rejects_odd_length() {
        assert!(hex_to_bytes("0xabc").is_none());
    }

    #[test]
    fn format_amount_trims_zeros() {
        let amount = U256::from_dec_str("10000000000000000").unwrap();
        assert_eq!(format_token_amount(&amount, 18), "0.01");
    }
}
