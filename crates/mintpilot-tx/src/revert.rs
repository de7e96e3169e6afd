use mintpilot_core::{abi, utils};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Seletor de `Error(string)`
const ERROR_STRING_SELECTOR: [u8; 4] = [0x08, 0xc3, 0x79, 0xa0];
/// Seletor de `Panic(uint256)`
const PANIC_SELECTOR: [u8; 4] = [0x4e, 0x48, 0x7b, 0x71];

/// Tabela estática de erros custom conhecidos nas plataformas suportadas
static KNOWN_ERRORS: Lazy<HashMap<[u8; 4], &'static str>> = Lazy::new(|| {
    let table: &[(&str, &str)] = &[
        ("SaleInactive()", "SaleInactive: a venda não está ativa"),
        ("MintNotStarted()", "MintNotStarted: a venda ainda não começou"),
        ("MintEnded()", "MintEnded: a janela de venda já encerrou"),
        ("MintPaused()", "MintPaused: o mint está pausado"),
        ("MaxSupplyReached()", "MaxSupplyReached: o supply máximo foi atingido"),
        ("MintedOut()", "MintedOut: todos os tokens já foram vendidos"),
        ("ExceedsMaxPerWallet()", "ExceedsMaxPerWallet: quantidade acima do limite por carteira"),
        ("WalletLimitExceeded()", "WalletLimitExceeded: limite da carteira excedido"),
        ("InsufficientFunds()", "InsufficientFunds: valor enviado insuficiente"),
        ("WrongPrice()", "WrongPrice: valor enviado não bate com o preço"),
        ("InvalidQuantity()", "InvalidQuantity: quantidade inválida"),
        ("AllowlistRequired()", "AllowlistRequired: endereço fora da allowlist"),
        ("InviteNotFound()", "InviteNotFound: lista de convite inexistente"),
    ];
    table.iter().map(|(sig, msg)| (abi::selector(sig), *msg)).collect()
});

/// Decodifica o payload cru de um revert em uma mensagem legível
///
/// Prioridade: `Error(string)` e `Panic(uint256)` padrão, depois a
/// tabela de seletores custom conhecidos; um prefixo de 4 bytes não
/// reconhecido aparece literalmente como "Custom Error: 0x…".
pub fn decode_revert(data: &[u8]) -> String {
    if data.is_empty() {
        return "execução revertida sem dados".to_string();
    }
    if data.len() < 4 {
        return format!("payload de revert curto: {}", utils::bytes_to_hex(data));
    }

    let mut sel = [0u8; 4];
    sel.copy_from_slice(&data[0..4]);

    if sel == ERROR_STRING_SELECTOR {
        if let Ok(message) = abi::decode_string(&data[4..]) {
            return message;
        }
    }
    if sel == PANIC_SELECTOR {
        if let Ok(code) = abi::decode_uint(&data[4..]) {
            return format!("Panic: código 0x{:x}", code);
        }
    }
    if let Some(message) = KNOWN_ERRORS.get(&sel) {
        return (*message).to_string();
    }

    format!("Custom Error: {}", utils::bytes_to_hex(&sel))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethereum_types::U256;

    fn custom_error_payload(signature: &str) -> Vec<u8> {
        abi::selector(signature).to_vec()
    }

    #[test]
    fn known_selector_yields_the_documented_message() {
        let payload = custom_error_payload("MaxSupplyReached()");
        assert_eq!(
            decode_revert(&payload),
            "MaxSupplyReached: o supply máximo foi atingido"
        );
    }

    #[test]
    fn unknown_selector_surfaces_the_literal_prefix() {
        let payload = vec![0xde, 0xad, 0xbe, 0xef, 0x01, 0x02];
        assert_eq!(decode_revert(&payload), "Custom Error: 0xdeadbeef");
    }

    #[test]
    fn standard_error_string_is_decoded() {
        let mut payload = ERROR_STRING_SELECTOR.to_vec();
        payload.extend_from_slice(&abi::encode_string_return("not live yet"));
        assert_eq!(decode_revert(&payload), "not live yet");
    }

    #[test]
    fn panic_code_is_reported() {
        let mut payload = PANIC_SELECTOR.to_vec();
        payload.extend_from_slice(&abi::encode_uint_return(U256::from(0x11)));
        assert_eq!(decode_revert(&payload), "Panic: código 0x11");
    }

    #[test]
    fn empty_payload_has_a_distinct_message() {
        assert_eq!(decode_revert(&[]), "execução revertida sem dados");
    }

    #[test]
    fn malformed_error_string_payload_degrades_to_the_prefix() {
        // Error(string) com palavra de offset absurda: o decodificador
        // recusa a string e cai no prefixo literal, sem panic
        let mut payload = ERROR_STRING_SELECTOR.to_vec();
        payload.extend_from_slice(&abi::encode_uint_return(U256::MAX));
        assert_eq!(decode_revert(&payload), "Custom Error: 0x08c379a0");
    }
}
