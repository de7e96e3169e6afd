/*!
 * Mintpilot Platforms
 *
 * Reconhecimento de convenções de venda em contratos EVM heterogêneos.
 * Cada módulo de plataforma sabe detectar a sua convenção e extrair um
 * `ContractSnapshot` uniforme dela; o registro mantém os módulos em
 * ordem de especificidade e recorre ao analisador genérico quando
 * nenhum deles reconhece o contrato.
 */

pub mod generic;
pub mod module;
pub mod platforms;
pub mod proxy;
pub mod registry;
pub mod resolver;

pub use generic::GenericAnalyzer;
pub use module::PlatformModule;
pub use registry::PlatformRegistry;
pub use resolver::FieldResolver;
