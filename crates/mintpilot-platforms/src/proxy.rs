use ethereum_types::Address;
use mintpilot_core::traits::ChainClient;

/// Desempacotamento de proxies mínimos (EIP-1167)
///
/// O runtime de um clone mínimo é um template fixo de 45 bytes com o
/// endereço do delegado embutido nos bytes 10..30. A verificação é um
/// casamento estrutural de bytes, nada além disso.
const PROXY_PREFIX: [u8; 10] = [0x36, 0x3d, 0x3d, 0x37, 0x3d, 0x3d, 0x3d, 0x36, 0x3d, 0x73];
const PROXY_SUFFIX: [u8; 15] = [
    0x5a, 0xf4, 0x3d, 0x82, 0x80, 0x3e, 0x90, 0x3d, 0x91, 0x60, 0x2b, 0x57, 0xfd, 0x5b, 0xf3,
];

/// Extrai o delegado de um bytecode de proxy mínimo, se o template casar
pub fn extract_minimal_proxy_target(code: &[u8]) -> Option<Address> {
    if code.len() != 45 {
        return None;
    }
    if code[0..10] != PROXY_PREFIX || code[30..45] != PROXY_SUFFIX {
        return None;
    }
    Some(Address::from_slice(&code[10..30]))
}

/// Busca o bytecode do endereço e tenta desempacotá-lo como proxy mínimo
pub async fn unwrap_proxy(client: &dyn ChainClient, address: Address) -> Option<Address> {
    let code = client.get_bytecode(address).await.ok()?;
    extract_minimal_proxy_target(&code)
}

/// Monta o runtime de um clone mínimo apontando para `target`
pub fn minimal_proxy_bytecode(target: Address) -> Vec<u8> {
    let mut code = Vec::with_capacity(45);
    code.extend_from_slice(&PROXY_PREFIX);
    code.extend_from_slice(target.as_bytes());
    code.extend_from_slice(&PROXY_SUFFIX);
    code
}
