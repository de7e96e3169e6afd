/*!
 * Mintpilot ABI
 *
 * Codificação e decodificação manual de chamadas de contrato. O
 * pipeline só precisa de um subconjunto pequeno do ABI (seletores,
 * palavras uint/bool/address/bytes32 e strings dinâmicas), então a
 * implementação é direta sobre Keccak-256 em vez de carregar um
 * codificador completo.
 */

use crate::error::{Error, Result};
use ethereum_types::{Address, H256, U256};
use tiny_keccak::{Hasher, Keccak};

/// Calcula o hash Keccak-256 de dados
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut result = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut result);
    result
}

/// Seletor de 4 bytes de uma assinatura de função ou erro
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Codifica um U256 como palavra de 32 bytes big-endian
pub fn word_uint(value: U256) -> [u8; 32] {
    let mut word = [0u8; 32];
    value.to_big_endian(&mut word);
    word
}

/// Codifica um Address como palavra de 32 bytes (zero-padded à esquerda)
pub fn word_address(address: Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..32].copy_from_slice(address.as_bytes());
    word
}

/// Calldata para uma função sem argumentos
pub fn encode_call0(signature: &str) -> Vec<u8> {
    selector(signature).to_vec()
}

/// Calldata para uma função com um argumento uint256
pub fn encode_call_uint(signature: &str, value: U256) -> Vec<u8> {
    let mut data = Vec::with_capacity(36);
    data.extend_from_slice(&selector(signature));
    data.extend_from_slice(&word_uint(value));
    data
}

/// Calldata para uma função com um argumento address
pub fn encode_call_address(signature: &str, address: Address) -> Vec<u8> {
    let mut data = Vec::with_capacity(36);
    data.extend_from_slice(&selector(signature));
    data.extend_from_slice(&word_address(address));
    data
}

/// Calldata para uma função (address, uint256)
pub fn encode_call_address_uint(signature: &str, address: Address, value: U256) -> Vec<u8> {
    let mut data = Vec::with_capacity(68);
    data.extend_from_slice(&selector(signature));
    data.extend_from_slice(&word_address(address));
    data.extend_from_slice(&word_uint(value));
    data
}

/// Calldata para uma função com um argumento bytes4 (alinhado à esquerda)
pub fn encode_call_bytes4(signature: &str, id: [u8; 4]) -> Vec<u8> {
    let mut data = Vec::with_capacity(36);
    data.extend_from_slice(&selector(signature));
    let mut word = [0u8; 32];
    word[0..4].copy_from_slice(&id);
    data.extend_from_slice(&word);
    data
}

/// Calldata para uma função com um argumento bytes32
pub fn encode_call_bytes32(signature: &str, key: H256) -> Vec<u8> {
    let mut data = Vec::with_capacity(36);
    data.extend_from_slice(&selector(signature));
    data.extend_from_slice(key.as_bytes());
    data
}

/// Calldata para uma função (bytes32, uint256)
pub fn encode_call_bytes32_uint(signature: &str, key: H256, value: U256) -> Vec<u8> {
    let mut data = Vec::with_capacity(68);
    data.extend_from_slice(&selector(signature));
    data.extend_from_slice(key.as_bytes());
    data.extend_from_slice(&word_uint(value));
    data
}

/// Decodifica a primeira palavra do retorno como uint256
pub fn decode_uint(data: &[u8]) -> Result<U256> {
    if data.len() < 32 {
        return Err(Error::DecodeError(format!(
            "retorno com {} bytes, esperado ao menos 32",
            data.len()
        )));
    }
    Ok(U256::from_big_endian(&data[0..32]))
}

/// Decodifica a palavra na posição `index` (estruturas retornadas por valor)
pub fn decode_uint_at(data: &[u8], index: usize) -> Result<U256> {
    let start = index * 32;
    if data.len() < start + 32 {
        return Err(Error::DecodeError(format!(
            "retorno com {} bytes não contém a palavra {}",
            data.len(),
            index
        )));
    }
    Ok(U256::from_big_endian(&data[start..start + 32]))
}

/// Decodifica a primeira palavra do retorno como bool
pub fn decode_bool(data: &[u8]) -> Result<bool> {
    let value = decode_uint(data)?;
    Ok(!value.is_zero())
}

/// Decodifica a primeira palavra do retorno como address
pub fn decode_address(data: &[u8]) -> Result<Address> {
    if data.len() < 32 {
        return Err(Error::DecodeError(format!(
            "retorno com {} bytes, esperado ao menos 32",
            data.len()
        )));
    }
    Ok(Address::from_slice(&data[12..32]))
}

/// Converte uma palavra de offset/tamanho em usize, rejeitando valores
/// maiores que o próprio retorno; os dois vêm de dados do contrato e
/// não podem derrubar o processo
fn word_to_len(value: U256, bound: usize) -> Result<usize> {
    if value > U256::from(bound) {
        return Err(Error::DecodeError(format!(
            "palavra {} fora do retorno de {} bytes",
            value, bound
        )));
    }
    Ok(value.as_usize())
}

/// Decodifica um retorno `string` (offset + tamanho + bytes UTF-8)
pub fn decode_string(data: &[u8]) -> Result<String> {
    let offset = word_to_len(decode_uint(data)?, data.len())?;
    if data.len() < offset + 32 {
        return Err(Error::DecodeError("offset de string fora do retorno".to_string()));
    }
    let len = word_to_len(U256::from_big_endian(&data[offset..offset + 32]), data.len())?;
    let start = offset + 32;
    if data.len() < start + len {
        return Err(Error::DecodeError("string truncada no retorno".to_string()));
    }
    String::from_utf8(data[start..start + len].to_vec())
        .map_err(|e| Error::DecodeError(format!("string inválida no retorno: {}", e)))
}

/// Codifica uma palavra uint256 como retorno de 32 bytes
pub fn encode_uint_return(value: U256) -> Vec<u8> {
    word_uint(value).to_vec()
}

/// Codifica um retorno bool
pub fn encode_bool_return(value: bool) -> Vec<u8> {
    word_uint(if value { U256::one() } else { U256::zero() }).to_vec()
}

/// Codifica um retorno address
pub fn encode_address_return(address: Address) -> Vec<u8> {
    word_address(address).to_vec()
}

/// Codifica um retorno `string` (offset + tamanho + bytes com padding)
pub fn encode_string_return(value: &str) -> Vec<u8> {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(64 + ((bytes.len() + 31) / 32) * 32);
    out.extend_from_slice(&word_uint(U256::from(32)));
    out.extend_from_slice(&word_uint(U256::from(bytes.len())));
    out.extend_from_slice(bytes);
    let padding = (32 - bytes.len() % 32) % 32;
    out.extend(std::iter::repeat(0u8).take(padding));
    out
}
